//! Replays against a real local order endpoint.
//!
//! The stub server mimics the order API just enough: api-key check, 200 for buys, 403 for sells,
//! and it keeps every JSON body it receives.

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use async_trait::async_trait;
use common_lib::trade_struct::OrderPayload;
use replayer::order_gateway::{GatewayError, GatewayResponse, HttpOrderGateway, OrderGateway};
use replayer::order_replay::{OrderReplay, ReplaySummary};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

const API_KEY: &str = "test-api-key";

#[derive(Default)]
struct Received {
    bodies: Mutex<Vec<Value>>,
    content_types: Mutex<Vec<String>>,
}

async fn post_order(req: HttpRequest, body: web::Json<Value>, received: web::Data<Received>) -> HttpResponse {
    let key = req.headers().get("X-API-KEY").and_then(|v| v.to_str().ok()).unwrap_or_default().to_string();
    if key != API_KEY {
        return HttpResponse::Unauthorized().body("Invalid or missing API Key");
    }
    let content_type = req.headers().get("content-type").and_then(|v| v.to_str().ok()).unwrap_or_default().to_string();
    received.content_types.lock().unwrap().push(content_type);

    let body = body.into_inner();
    let side = body["side"].as_str().unwrap_or_default().to_string();
    received.bodies.lock().unwrap().push(body);

    match side.as_str() {
        "BUY" => HttpResponse::Ok().json(json!({"status": "NEW"})),
        _ => HttpResponse::Forbidden().body("sells disabled"),
    }
}

/// Start the stub on an ephemeral port; returns the orders url and the shared capture.
fn start_order_server() -> (String, web::Data<Received>) {
    let received = web::Data::new(Received::default());
    let data = received.clone();
    let server = HttpServer::new(move || App::new().app_data(data.clone()).route("/api/orders", web::post().to(post_order)))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    (format!("http://{}/api/orders", addr), received)
}

/// A url on a port nobody is listening on.
fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api/orders", port)
}

/// Sends MSFT orders to `unreachable`, everything else to `live`.
struct BySymbol {
    live: HttpOrderGateway,
    unreachable: HttpOrderGateway,
}

#[async_trait]
impl OrderGateway for BySymbol {
    async fn submit(&self, payload: &OrderPayload) -> Result<GatewayResponse, GatewayError> {
        match payload.symbol.as_str() {
            "MSFT" => self.unreachable.submit(payload).await,
            _ => self.live.submit(payload).await,
        }
    }
}

fn write_orders(name: &str, text: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("replayer_{}_{}.csv", name, std::process::id()));
    std::fs::write(&path, text).unwrap();
    path
}

#[actix_web::test]
async fn success_rejection_and_refused_connection() {
    let (url, received) = start_order_server();
    let gateway = BySymbol {
        live: HttpOrderGateway::new(&url, API_KEY).unwrap(),
        unreachable: HttpOrderGateway::new(&dead_url(), API_KEY).unwrap(),
    };
    let path = write_orders(
        "scenario",
        "symbol,side,type,quantity,price\nAAPL,buy,market,10,\nAAPL,sell,limit,5,150.00\nMSFT,buy,market,20,\n",
    );

    let summary = OrderReplay::new(gateway, Duration::ZERO).replay_file(&path, None).await.unwrap();
    assert_eq!(summary, ReplaySummary { success: 1, failed: 2 });

    let bodies = received.bodies.lock().unwrap().clone();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0], json!({"symbol": "AAPL", "side": "BUY", "type": "MARKET", "quantity": 10}));
    assert!(bodies[0].get("price").is_none());
    assert_eq!(bodies[1]["price"], json!(150.0));
    assert!(received.content_types.lock().unwrap().iter().all(|ct| ct.starts_with("application/json")));

    let _ = std::fs::remove_file(&path);
}

#[actix_web::test]
async fn wrong_api_key_rejects_every_row() {
    let (url, received) = start_order_server();
    let gateway = HttpOrderGateway::new(&url, "not-the-key").unwrap();
    let path = write_orders("wrong_key", "symbol,side,type,quantity,price\nAAPL,buy,market,1,\nIBM,buy,limit,2,99.5\n");

    let summary = OrderReplay::new(gateway, Duration::ZERO).replay_file(&path, None).await.unwrap();
    assert_eq!(summary, ReplaySummary { success: 0, failed: 2 });
    assert!(received.bodies.lock().unwrap().is_empty());

    let _ = std::fs::remove_file(&path);
}

#[actix_web::test]
async fn unreachable_endpoint_is_a_transport_error_not_a_crash() {
    let gateway = HttpOrderGateway::new(&dead_url(), API_KEY).unwrap();
    let result = gateway
        .submit(&OrderPayload::try_from(&common_lib::trade_struct::OrderRow {
            symbol: "MSFT".to_string(),
            side: "buy".to_string(),
            order_type: "market".to_string(),
            quantity: "20".to_string(),
            price: String::new(),
        })
        .unwrap())
        .await;
    assert!(result.is_err());
}

#[actix_web::test]
async fn missing_file_is_fatal() {
    let gateway = HttpOrderGateway::new(&dead_url(), API_KEY).unwrap();
    let result = OrderReplay::new(gateway, Duration::ZERO)
        .replay_file(Path::new("no_such_dir/orders.csv"), Some(std::env::temp_dir().as_path()))
        .await;
    assert!(result.is_err());
}

//! main.rs
#![forbid(unsafe_code)]

use clap::Parser;
use common_lib::init::init;
use common_lib::settings::Settings;
use replayer::order_csv::DEFAULT_ORDERS_CSV;
use replayer::order_gateway::HttpOrderGateway;
use replayer::order_replay::OrderReplay;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Replay a csv of orders against the order API, one request at a time.
#[derive(Parser, Debug)]
#[command(name = "replay_orders", version)]
struct Args {
    /// orders csv with header symbol,side,type,quantity,price
    #[arg(default_value = DEFAULT_ORDERS_CSV)]
    orders_csv: PathBuf,

    /// resolve ORDERS_CSV against this directory instead of guessing from the working directory
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// order endpoint (overrides TRADE_TOOLS_ORDERS_URL)
    #[arg(long)]
    url: Option<String>,

    /// X-API-KEY value (overrides TRADE_TOOLS_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// pause after each order in milliseconds (overrides TRADE_TOOLS_REPLAY_DELAY_MS)
    #[arg(long)]
    delay_ms: Option<u64>,
}

/// main
fn main() -> ExitCode {
    let args = Args::parse();
    init(env!("CARGO_MANIFEST_DIR"));

    let mut settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("[main] could not load settings: {}", &e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(url) = args.url {
        settings.orders_url = url;
    }
    if let Some(api_key) = args.api_key {
        settings.api_key = api_key;
    }
    if let Some(delay_ms) = args.delay_ms {
        settings.replay_delay_ms = delay_ms;
    }

    let gateway = match HttpOrderGateway::new(&settings.orders_url, &settings.api_key) {
        Ok(gateway) => gateway,
        Err(e) => {
            tracing::error!("[main] {}", &e);
            return ExitCode::FAILURE;
        }
    };
    let replay = OrderReplay::new(gateway, Duration::from_millis(settings.replay_delay_ms));

    let tokio_runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("replay")
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("[main] tokio runtime didn't start: {:?}", &e);
            return ExitCode::FAILURE;
        }
    };

    let result = tokio_runtime.block_on(async { replay.replay_file(&args.orders_csv, args.base_dir.as_deref()).await });

    match result {
        Ok(_summary) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("[main] replay aborted: {}", &e);
            ExitCode::FAILURE
        }
    }
}

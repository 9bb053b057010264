//! main.rs
#![forbid(unsafe_code)]

use analyzer::analysis::analyze_and_plot;
use analyzer::chart::PlottersRenderer;
use analyzer::fetcher::TradeFetcher;
use clap::Parser;
use common_lib::init::init;
use common_lib::settings::Settings;
use std::path::PathBuf;
use std::process::ExitCode;

/// Fetch the trade history export and chart price and volume to a PNG.
#[derive(Parser, Debug)]
#[command(name = "analyze_market", version)]
struct Args {
    /// trade csv endpoint (overrides TRADE_TOOLS_ANALYTICS_URL)
    #[arg(long)]
    url: Option<String>,

    /// image to write (overrides TRADE_TOOLS_OUTPUT_PATH)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// main
fn main() -> ExitCode {
    let args = Args::parse();
    init(env!("CARGO_MANIFEST_DIR"));

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("[main] could not load settings: {}", &e);
            return ExitCode::FAILURE;
        }
    };
    let url = args.url.unwrap_or(settings.analytics_url);
    let output_path = args.output.unwrap_or_else(|| PathBuf::from(settings.output_path));

    let tokio_runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("analytics")
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("[main] tokio runtime didn't start: {:?}", &e);
            return ExitCode::FAILURE;
        }
    };

    // a failed fetch has already been logged; it just means there is nothing to draw
    let outcome = tokio_runtime.block_on(async { TradeFetcher::new(&url).fetch().await });

    match analyze_and_plot(outcome.into_trades(), &PlottersRenderer::default(), &output_path) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("[main] {}", &e);
            ExitCode::FAILURE
        }
    }
}

use clap::Parser;

use partner_scout::cli::{self, Cli};
use partner_scout::ops::telemetry;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    telemetry::init_tracing_for(cli.log_format, cli.log_level());

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Partner-Scout starting");

    if let Err(e) = cli::run(cli).await {
        tracing::error!(error = %e, "Run failed");
        std::process::exit(1);
    }
}

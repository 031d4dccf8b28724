use clap::Parser;
use recurring_orders::app::{self, AppConfig};
use std::path::PathBuf;

/// Expand recurring orders into dated deliveries
#[derive(Parser)]
#[command(name = "recurring-orders", version)]
#[command(about = "Expand recurring orders into one delivery per scheduled day", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to the job configuration file (default: ./recurring-orders.toml)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = run(cli).await {
        app::handle_fatal_error(e, verbose);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::new(cli.verbose)?.with_config_path(cli.config);
    let (_config, job_config) = app::initialize_app(config).await?;
    app::run_job(&job_config).await?;
    Ok(())
}

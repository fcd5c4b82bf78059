use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use link_tracker::config;
use link_tracker::server;

/// Click tracking collector.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Bind address, overrides LISTEN
    #[arg(long)]
    listen: Option<String>,

    /// Click log file path, overrides LOG_FILE
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = config::Config::from_env();
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }
    if let Some(log_file) = cli.log_file {
        config.log_file = log_file;
    }
    config.validate()?;

    init_tracing(&config);
    config.print_summary();

    server::run(config).await
}

fn init_tracing(config: &config::Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_format == "json" {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use api_scout::config::{config_from_env, load_config, DiscoveryConfig};
use api_scout::health::probe::HealthProbe;
use api_scout::manager::ApiManager;

#[derive(Parser)]
#[command(name = "scout-cli")]
#[command(about = "Backend endpoint discovery and failover manager", long_about = None)]
struct Cli {
    /// Optional TOML config file. Environment variables still win.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one detection round and print the resulting state
    Detect,
    /// Probe a single host for liveness
    Probe {
        host: String,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Detect, then keep monitoring and failing over until Ctrl-C
    Watch,
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    api_scout::observability::logging::init();
    let cli = Cli::parse();

    let config: DiscoveryConfig = match &cli.config {
        Some(path) => load_config(path)?,
        None => config_from_env()?,
    };

    match cli.command {
        Commands::Detect => {
            let manager = ApiManager::new(config);
            let url = manager.get_url().await?;
            tracing::info!(url = %url, "detection complete");
            println!("{}", serde_json::to_string_pretty(&manager.snapshot())?);
        }
        Commands::Probe { host, port } => {
            let port = port.unwrap_or(config.hosts.port);
            let timeout = Duration::from_millis(config.probe.timeout_ms);
            let healthy = HealthProbe::new().probe(&host, port, timeout).await;
            println!(
                "http://{}:{} {}",
                host,
                port,
                if healthy { "healthy" } else { "unreachable" }
            );
            if !healthy {
                std::process::exit(1);
            }
        }
        Commands::Watch => {
            let manager = ApiManager::new(config);
            let url = manager.get_url().await?;
            tracing::info!(url = %url, "watching backend, press Ctrl-C to stop");
            manager.start_monitor();

            tokio::signal::ctrl_c().await?;
            manager.stop_monitor();
            println!("{}", serde_json::to_string_pretty(&manager.snapshot())?);
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

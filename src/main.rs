//! Treasury service entry point.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use treasury_service::api::AppState;
use treasury_service::config::Config;
use treasury_service::{metrics, server};

/// Treasury/FX mock data service.
#[derive(Parser, Debug)]
#[command(name = "treasury-service")]
#[command(about = "Serves treasury positions, FX rates and hedge recommendations over HTTP")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration before logging so RUST_LOG/LOG_JSON apply
    let config = Config::load()?;

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("treasury_service=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let (json, plain) = if config.log_json {
        (Some(fmt::layer().json()), None)
    } else {
        (None, Some(fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config).await,
        Some(Command::Serve) | None => cmd_serve(config).await,
    }
}

/// Check configuration validity.
async fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("TREASURY SERVICE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Service Name: {}", config.service_name);
    println!("  Environment: {}", config.environment);
    println!("  Listen Address: {} (binds {})", config.listen_addr, config.bind_addr()?);
    println!("  Read Header Timeout: {}s", config.read_header_timeout_secs);
    println!("  Log Filter: {}", config.rust_log);
    println!("  Log Format: {}", if config.log_json { "JSON" } else { "Text" });
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP service until shutdown or a fatal serve error.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let mut state = AppState::new(config.clone());
    if config.metrics_enabled {
        let handle = metrics::install_prometheus()?;
        metrics::spawn_upkeep(handle.clone(), metrics::UPKEEP_INTERVAL);
        state = state.with_metrics(handle);
        info!("Prometheus metrics enabled at /metrics");
    }

    if let Err(e) = server::run(&config, state).await {
        error!("Server failed: {}", e);
        return Err(e.into());
    }

    info!("Shutdown complete");
    Ok(())
}

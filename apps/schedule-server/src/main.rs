use anyhow::{Context, Result};
use clap::Parser;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

mod config;

use config::AppConfig;
use schedule::{Migrator, Service};

/// Schedule Backend - REST API for the schedule bot
#[derive(Parser)]
#[command(name = "schedule-server")]
#[command(about = "Schedule Backend - REST API for the schedule bot")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut cfg = AppConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(port) = cli.port {
        cfg.server.port = port;
    }

    if cli.print_config {
        println!("{}", cfg.to_yaml()?);
        return Ok(());
    }

    let mut opts = ConnectOptions::new(cfg.database.url.clone());
    if let Some(max_conns) = cfg.database.max_conns {
        opts.max_connections(max_conns);
    }
    let db = Database::connect(opts)
        .await
        .with_context(|| format!("Failed to connect to database: {}", cfg.database.url))?;

    Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;
    info!("Database connected successfully");

    let service = Arc::new(Service::new(db));
    let app = schedule::api::rest::routes::router(service);

    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server starting on {addr}");
    info!("Health check: curl http://{addr}/health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

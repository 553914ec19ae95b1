use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;

use appointments::api::rest::routes;
use appointments::domain::ports::{ConfirmationNotifier, NoopNotifier};
use appointments::domain::repo::AppointmentsRepository;
use appointments::domain::service::{Service, ServiceConfig};
use appointments::infra::notify::HttpConfirmationNotifier;
use appointments::infra::storage::memory::InMemoryAppointmentsRepository;
use appointments::infra::storage::migrations::Migrator;
use appointments::infra::storage::sea_orm_repo::SeaOrmAppointmentsRepository;

mod config;
mod logging;

use config::AppConfig;

/// Scheduler Server - appointment booking with conflict detection
#[derive(Parser)]
#[command(name = "scheduler-server")]
#[command(about = "Scheduler Server - appointment booking with conflict detection")]
#[command(version = "0.1.0")]
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

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use the in-memory store instead of a database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.port);

    // Dump the effective config before any log line can land on stdout.
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let logging_config = config.logging.clone().unwrap_or_default();
    logging::init_logging(&logging_config, cli.verbose);
    tracing::info!("Scheduler Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, cli.mock).await,
        Commands::Check => check_config(config),
    }
}

async fn build_repository(
    config: &AppConfig,
    mock: bool,
) -> Result<Arc<dyn AppointmentsRepository>> {
    if mock {
        tracing::info!("Using in-memory appointment store (--mock)");
        return Ok(Arc::new(InMemoryAppointmentsRepository::new()));
    }

    let db_config = config
        .database
        .as_ref()
        .ok_or_else(|| anyhow!("Database URL not configured (or pass --mock)"))?;

    let mut opts = ConnectOptions::new(db_config.url.clone());
    if let Some(max_conns) = db_config.max_conns {
        opts.max_connections(max_conns);
    }

    tracing::info!("Connecting to database: {}", db_config.url);
    let conn = Database::connect(opts)
        .await
        .context("database connection failed")?;

    tracing::info!("Running appointments database migrations");
    Migrator::up(&conn, None)
        .await
        .context("database migration failed")?;

    Ok(Arc::new(SeaOrmAppointmentsRepository::new(conn)))
}

fn build_notifier(config: &AppConfig) -> Result<Arc<dyn ConfirmationNotifier>> {
    match &config.notifications {
        Some(n) if n.enabled => {
            tracing::info!("Confirmation notifications enabled: {}", n.base_url);
            Ok(Arc::new(HttpConfirmationNotifier::new(n.base_url.clone())?))
        }
        _ => Ok(Arc::new(NoopNotifier)),
    }
}

async fn run_server(config: AppConfig, mock: bool) -> Result<()> {
    let repo = build_repository(&config, mock).await?;
    let notifier = build_notifier(&config)?;

    let service = Service::new(
        repo,
        notifier,
        ServiceConfig {
            max_title_length: config.appointments.max_title_length,
        },
    );
    let app = routes::router(Arc::new(service));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = wait_for_shutdown().await {
                tracing::error!("Shutdown signal handler failed: {}", e);
            }
            tracing::info!("Shutting down");
        })
        .await
        .context("server error")?;
    Ok(())
}

async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv()  => {},
            _ = tokio::signal::ctrl_c() => {},
        }
        Ok(())
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        Ok(())
    }
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}

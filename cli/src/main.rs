//! CLI entrypoint for consult-router
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use consult_application::{RoutingDeps, RoutingEngine, SystemClock};
use consult_domain::ConsultantRepository;
use consult_infrastructure::{
    ConfigLoader, FileConfig, InMemorySessionStore, SqliteConsultantStore, SqliteUserStore,
    TelegramTransport, build_bot, store,
};
use consult_presentation::{Cli, UpdateHandler, run_polling, stats_console};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Initialize logging based on verbosity level; `RUST_LOG` wins when set.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let stderr = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .with_context(|| format!("--log-file {} has no file name", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name));
    let file = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(file)
        .init();
    Ok(Some(guard))
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .context("failed to load configuration")?;

    if let Some(database) = &cli.database {
        config.storage.database = database.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    let file_config = load_config(&cli)?;
    for issue in file_config.validate() {
        if issue.is_error() {
            error!("{}", issue.message);
        } else {
            warn!("{}", issue.message);
        }
    }
    let routing = file_config.routing_config()?;

    info!(
        consultants = routing.roster.len(),
        message_limit = routing.quota.limit(),
        owner = ?routing.owner.map(|o| o.get()),
        database = %file_config.storage.database,
        "starting consult-router"
    );

    // === Dependency Injection ===
    let pool = store::connect(&file_config.storage.database)
        .await
        .context("failed to open database")?;
    let users = Arc::new(SqliteUserStore::new(pool.clone()));
    let consultants = Arc::new(SqliteConsultantStore::new(pool));

    if cli.stats {
        consultants.ensure(routing.roster.ids()).await?;
        print!("{}", stats_console(&consultants.list().await?));
        return Ok(());
    }

    let token = file_config.telegram.require_token()?;
    let bot = build_bot(token)?;
    let transport = Arc::new(TelegramTransport::new(
        bot.clone(),
        file_config.telegram.request_timeout(),
        routing.messages.ask_button.clone(),
    ));

    let engine = Arc::new(RoutingEngine::new(
        routing,
        RoutingDeps {
            users,
            consultants,
            transport: transport.clone(),
            sessions: Arc::new(InMemorySessionStore::new()),
            clock: Arc::new(SystemClock),
        },
    ));
    engine.prepare().await.context("failed to prepare consultant roster")?;
    info!("consultant roster ensured");

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
            shutdown.cancel();
        }
    });

    let handler = UpdateHandler::new(engine, transport);
    if let Err(e) = run_polling(bot, handler, cancel).await {
        bail!("telegram polling failed: {e}");
    }
    Ok(())
}

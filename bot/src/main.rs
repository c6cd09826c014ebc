use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tegridy_bot::{build_config, Args, Bot, ConsoleGateway, EconomyService, FileConfig, SqliteLedger};
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Stdin reads cannot be cancelled, so shutdown does not wait for them.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(?err, "ctrl-c handler unavailable; stop by closing stdin");
        std::future::pending::<()>().await;
    }
}

async fn run(args: Args) -> Result<()> {
    let file = args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let config = build_config(&args, file).context("invalid configuration")?;

    init_tracing(config.log_file.as_deref())?;
    info!(
        database = %config.database_path.display(),
        daily_reward = config.economy.daily_reward,
        cooldown_policy = config.economy.cooldown_policy.as_str(),
        "configuration loaded"
    );
    if let Some(seed) = config.deterministic_seed {
        warn!(seed, "dice are seeded; rolls are reproducible");
    }

    let ledger = SqliteLedger::open(&config.database_path)?;
    let accounts = ledger.account_count().await?;
    info!(accounts, "ledger ready");

    let service = EconomyService::new(
        Arc::new(ledger),
        config.economy.clone(),
        config.deterministic_seed,
    );
    let bot = Bot::new(Arc::new(service), config.display_name.clone());
    let gateway = ConsoleGateway::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());

    bot.run(gateway, shutdown_signal())
        .await
        .context("console gateway failed")?;
    info!("bot stopped");
    Ok(())
}

fn main_result() -> Result<()> {
    let args = Args::parse();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    let result = runtime.block_on(run(args));
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

fn main() {
    if let Err(err) = main_result() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tegridy_types::economy::{
    DEFAULT_CURRENCY_NAME, DEFAULT_CURRENCY_SYMBOL, DEFAULT_DAILY_REWARD, MAX_AMOUNT,
};
use tegridy_types::CooldownPolicy;
use thiserror::Error;

pub const DEFAULT_DATABASE_PATH: &str = "data/database.sqlite";
pub const DEFAULT_DISPLAY_NAME: &str = "Randy Marsh";
pub const DEFAULT_LOG_FILE: &str = "bot.log";

pub const ENV_DAILY_REWARD: &str = "DAILY_REWARD";
pub const ENV_CURRENCY_SYMBOL: &str = "CURRENCY_SYMBOL";
pub const ENV_CURRENCY_NAME: &str = "CURRENCY_NAME";
pub const ENV_DATABASE_PATH: &str = "DATABASE_PATH";
pub const ENV_COOLDOWN_POLICY: &str = "DAILY_COOLDOWN_POLICY";
pub const ENV_DISPLAY_NAME: &str = "BOT_DISPLAY_NAME";
pub const ENV_LOG_FILE: &str = "BOT_LOG_FILE";
pub const ENV_DICE_SEED: &str = "BOT_DICE_SEED";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {field}: {value:?} is not a non-negative integer")]
    InvalidNumber { field: &'static str, value: String },
    #[error("daily_reward must be > 0")]
    ZeroDailyReward,
    #[error("daily_reward must be <= {max} (got={value})")]
    DailyRewardTooLarge { value: u64, max: u64 },
    #[error("currency_name must not be empty")]
    EmptyCurrencyName,
    #[error("invalid cooldown policy {value:?} ({reason})")]
    InvalidCooldownPolicy { value: String, reason: &'static str },
}

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// YAML file providing any of the settings below (flags and env vars take precedence).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Currency granted by a daily claim (env: DAILY_REWARD, default: 1000).
    #[arg(long)]
    pub daily_reward: Option<u64>,

    /// Currency symbol shown in replies (env: CURRENCY_SYMBOL).
    #[arg(long)]
    pub currency_symbol: Option<String>,

    /// Currency name shown in replies (env: CURRENCY_NAME).
    #[arg(long)]
    pub currency_name: Option<String>,

    /// Path to the SQLite ledger (env: DATABASE_PATH, default: data/database.sqlite).
    #[arg(long)]
    pub database_path: Option<PathBuf>,

    /// Daily cooldown policy: rolling or calendar-day (env: DAILY_COOLDOWN_POLICY).
    #[arg(long)]
    pub cooldown_policy: Option<String>,

    /// Display name the bot asks the platform to use (env: BOT_DISPLAY_NAME).
    #[arg(long)]
    pub display_name: Option<String>,

    /// Log file appended alongside stdout; empty disables (env: BOT_LOG_FILE, default: bot.log).
    #[arg(long)]
    pub log_file: Option<String>,

    /// Seed for reproducible dice (env: BOT_DICE_SEED; entropy when unset).
    #[arg(long)]
    pub deterministic_seed: Option<u64>,
}

/// Settings accepted from `--config`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub daily_reward: Option<u64>,
    pub currency_symbol: Option<String>,
    pub currency_name: Option<String>,
    pub database_path: Option<PathBuf>,
    pub cooldown_policy: Option<String>,
    pub display_name: Option<String>,
    pub log_file: Option<String>,
    pub deterministic_seed: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        serde_yaml::from_str(&contents).context("Could not parse config file")
    }
}

/// Inputs consumed by the reward and wager engines and by reply rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EconomyConfig {
    pub daily_reward: u64,
    pub cooldown_policy: CooldownPolicy,
    pub currency_symbol: String,
    pub currency_name: String,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            daily_reward: DEFAULT_DAILY_REWARD,
            cooldown_policy: CooldownPolicy::default(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            currency_name: DEFAULT_CURRENCY_NAME.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BotConfig {
    pub economy: EconomyConfig,
    pub database_path: PathBuf,
    pub display_name: String,
    pub log_file: Option<PathBuf>,
    pub deterministic_seed: Option<u64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            economy: EconomyConfig::default(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            deterministic_seed: None,
        }
    }
}

fn read_env(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    env(key).and_then(|value| {
        let trimmed = value.trim().to_string();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}

fn read_env_u64(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
    field: &'static str,
) -> Result<Option<u64>, ConfigError> {
    read_env(env, key)
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber { field, value: raw })
        })
        .transpose()
}

/// Resolve the process configuration from the process environment.
pub fn build_config(args: &Args, file: Option<FileConfig>) -> Result<BotConfig, ConfigError> {
    build_config_with_env(args, file, |key| std::env::var(key).ok())
}

/// Fold flags, environment, file and defaults (in that precedence) into a validated config.
pub fn build_config_with_env(
    args: &Args,
    file: Option<FileConfig>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<BotConfig, ConfigError> {
    let defaults = BotConfig::default();
    let file = file.unwrap_or_default();

    let daily_reward = match args.daily_reward {
        Some(value) => value,
        None => read_env_u64(&env, ENV_DAILY_REWARD, "daily_reward")?
            .or(file.daily_reward)
            .unwrap_or(defaults.economy.daily_reward),
    };
    if daily_reward == 0 {
        return Err(ConfigError::ZeroDailyReward);
    }
    if daily_reward > MAX_AMOUNT {
        return Err(ConfigError::DailyRewardTooLarge {
            value: daily_reward,
            max: MAX_AMOUNT,
        });
    }

    let cooldown_policy = match args
        .cooldown_policy
        .clone()
        .or_else(|| read_env(&env, ENV_COOLDOWN_POLICY))
        .or(file.cooldown_policy)
    {
        Some(value) => value
            .parse::<CooldownPolicy>()
            .map_err(|reason| ConfigError::InvalidCooldownPolicy { value, reason })?,
        None => defaults.economy.cooldown_policy,
    };

    let currency_symbol = args
        .currency_symbol
        .clone()
        .or_else(|| read_env(&env, ENV_CURRENCY_SYMBOL))
        .or(file.currency_symbol)
        .unwrap_or(defaults.economy.currency_symbol);
    let currency_name = args
        .currency_name
        .clone()
        .or_else(|| read_env(&env, ENV_CURRENCY_NAME))
        .or(file.currency_name)
        .unwrap_or(defaults.economy.currency_name);
    if currency_name.trim().is_empty() {
        return Err(ConfigError::EmptyCurrencyName);
    }

    let database_path = args
        .database_path
        .clone()
        .or_else(|| read_env(&env, ENV_DATABASE_PATH).map(PathBuf::from))
        .or(file.database_path)
        .unwrap_or(defaults.database_path);
    let display_name = args
        .display_name
        .clone()
        .or_else(|| read_env(&env, ENV_DISPLAY_NAME))
        .or(file.display_name)
        .unwrap_or(defaults.display_name);

    // An explicitly empty value disables file logging, so read the raw env var here.
    let log_file = match args
        .log_file
        .clone()
        .or_else(|| env(ENV_LOG_FILE))
        .or(file.log_file)
    {
        Some(value) if value.trim().is_empty() => None,
        Some(value) => Some(PathBuf::from(value.trim())),
        None => defaults.log_file,
    };

    let deterministic_seed = match args.deterministic_seed {
        Some(seed) => Some(seed),
        None => read_env_u64(&env, ENV_DICE_SEED, "deterministic_seed")?
            .or(file.deterministic_seed),
    };

    Ok(BotConfig {
        economy: EconomyConfig {
            daily_reward,
            cooldown_policy,
            currency_symbol,
            currency_name,
        },
        database_path,
        display_name,
        log_file,
        deterministic_seed,
    })
}

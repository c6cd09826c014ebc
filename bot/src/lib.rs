//! Tegridy economy bot.
//!
//! Wires the SQLite ledger, the reward and wager engines, and a chat gateway together. The binary
//! in `main.rs` serves the line-oriented console gateway; other platforms plug in through
//! [`gateway::Gateway`].

pub mod bot;
pub mod commands;
pub mod config;
pub mod gateway;
pub mod ledger;
pub mod locks;
pub mod render;
pub mod service;

pub use bot::Bot;
pub use config::{build_config, Args, BotConfig, ConfigError, EconomyConfig, FileConfig};
pub use gateway::{ConsoleGateway, DeliveryError, Gateway, Responder};
pub use ledger::SqliteLedger;
pub use service::{EconomyService, ServiceError};

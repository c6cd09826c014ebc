//! Tegridy execution layer.
//!
//! This crate contains the account transaction ([`Layer`]), the store abstraction
//! ([`State`]), and the reward and wager engines used by the bot.
//!
//! ## Invariants
//! - A wager never drives a balance negative: the stake is validated against the balance
//!   before any dice are drawn.
//! - `total_earned` only grows, and only through daily claims.
//! - Engines never read the wall clock; callers pass `now` explicitly.
//!
//! ## Minimal claim (example)
//! ```rust,ignore
//! use tegridy_execution::{economy, Layer, State};
//! use tegridy_types::CooldownPolicy;
//!
//! # async fn example<S: State>(store: &S, now: u64) -> anyhow::Result<()> {
//! let mut layer = Layer::new(store);
//! let account = layer.get_or_create("1234").await?;
//! let outcome = economy::claim_daily(account, now, 1_000, CooldownPolicy::Rolling)?;
//! store.apply(layer.commit()).await?;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

pub mod economy;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

mod layer;

mod state;

pub use economy::{DiceRoller, RngDice};
pub use layer::Layer;
pub use state::State;

#[cfg(any(test, feature = "mocks"))]
pub use state::Memory;

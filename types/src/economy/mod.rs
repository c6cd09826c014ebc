//! Economy domain types.
//!
//! Defines the account record, daily-claim and wager outcomes, and constants used by the
//! execution layer and the bot.

mod account;
mod constants;
mod reward;
mod wager;

pub use account::*;
pub use constants::*;
pub use reward::*;
pub use wager::*;

#[cfg(test)]
mod tests;

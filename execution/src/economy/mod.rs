//! Reward and wager engines.
//!
//! Both engines are pure functions over an [`Account`](tegridy_types::Account): they never
//! read the clock, touch storage, or draw randomness other than from the provided
//! [`DiceRoller`].

pub mod dice;
pub mod reward;
pub mod wager;

pub use dice::{DiceRoller, RngDice};
pub use reward::claim_daily;
pub use wager::{place_bet, resolve_stake};

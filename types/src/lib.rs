//! Common types for the tegridy economy bot.

pub mod economy;

pub use economy::{
    Account, AccountInvariantError, BalanceView, BetOutcome, BetReceipt, ClaimOutcome,
    CooldownPolicy, RemainingWait, RewardError, StakeArg, WagerError,
};

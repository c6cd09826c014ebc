use serde::Serialize;
use thiserror::Error as ThisError;

use super::STAKE_ALL;

/// Validation failures of a bet. All are user-correctable.
#[derive(Clone, Debug, ThisError, PartialEq, Eq)]
pub enum WagerError {
    #[error("stake {0:?} is neither a number nor 'all'")]
    InvalidStake(String),
    #[error("stake must be positive (got={0})")]
    NonPositiveStake(i64),
    #[error("insufficient funds (stake={stake}, balance={balance})")]
    InsufficientFunds { stake: i64, balance: i64 },
    #[error("a win would overflow the balance (stake={stake}, balance={balance})")]
    BalanceOverflow { stake: i64, balance: i64 },
}

/// Parsed stake argument, before it is resolved against a balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StakeArg {
    Amount(i64),
    All,
}

impl StakeArg {
    pub fn parse(text: &str) -> Result<Self, WagerError> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case(STAKE_ALL) {
            return Ok(Self::All);
        }
        trimmed
            .parse::<i64>()
            .map(Self::Amount)
            .map_err(|_| WagerError::InvalidStake(text.to_string()))
    }

    pub fn resolve(&self, balance: i64) -> i64 {
        match self {
            Self::Amount(amount) => *amount,
            Self::All => balance,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BetOutcome {
    Win,
    Lose,
    Push,
}

impl BetOutcome {
    pub fn from_rolls(player_roll: u8, house_roll: u8) -> Self {
        match player_roll.cmp(&house_roll) {
            std::cmp::Ordering::Greater => Self::Win,
            std::cmp::Ordering::Less => Self::Lose,
            std::cmp::Ordering::Equal => Self::Push,
        }
    }

    /// Signed balance change for `stake` under this outcome.
    pub fn net_change(&self, stake: i64) -> i64 {
        match self {
            Self::Win => stake,
            Self::Lose => -stake,
            Self::Push => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "won",
            Self::Lose => "lost",
            Self::Push => "tied",
        }
    }
}

/// Result of a resolved bet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BetReceipt {
    pub player_roll: u8,
    pub house_roll: u8,
    pub outcome: BetOutcome,
    pub stake: i64,
    pub net_change: i64,
    pub new_balance: i64,
}

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use super::MAX_AMOUNT;

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum AccountInvariantError {
    #[error("user id must not be empty")]
    EmptyUserId,
    #[error("balance went negative (balance={balance})")]
    NegativeBalance { balance: i64 },
    #[error("total earned exceeds storable maximum (total_earned={total_earned})")]
    TotalEarnedTooLarge { total_earned: u64 },
}

/// Per-user ledger record.
///
/// Created lazily the first time any operation references an unknown user id and never
/// deleted. Only reward claims and bet resolution mutate it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub user_id: String,
    /// Spendable currency.
    pub balance: i64,
    /// Lifetime sum of daily rewards. Wager winnings do not count.
    pub total_earned: u64,
    /// Unix seconds (UTC) of the last successful daily claim.
    pub last_daily: Option<u64>,
}

impl Account {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            balance: 0,
            total_earned: 0,
            last_daily: None,
        }
    }

    pub fn validate_invariants(&self) -> Result<(), AccountInvariantError> {
        if self.user_id.is_empty() {
            return Err(AccountInvariantError::EmptyUserId);
        }
        if self.balance < 0 {
            return Err(AccountInvariantError::NegativeBalance {
                balance: self.balance,
            });
        }
        if self.total_earned > MAX_AMOUNT {
            return Err(AccountInvariantError::TotalEarnedTooLarge {
                total_earned: self.total_earned,
            });
        }
        Ok(())
    }
}

/// Read-only view returned by a balance check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BalanceView {
    pub user_id: String,
    pub balance: i64,
    pub total_earned: u64,
}

impl BalanceView {
    pub fn from_account(account: &Account) -> Self {
        Self {
            user_id: account.user_id.clone(),
            balance: account.balance,
            total_earned: account.total_earned,
        }
    }
}

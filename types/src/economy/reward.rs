use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use super::{DAILY_COOLDOWN_SECS, SECS_PER_DAY, SECS_PER_HOUR, SECS_PER_MINUTE};

/// How the daily claim window is measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CooldownPolicy {
    /// At least 24 hours must have elapsed since the last claim.
    #[default]
    Rolling,
    /// The claim must fall on a later UTC day than the last claim.
    CalendarDay,
}

impl CooldownPolicy {
    /// First instant (unix seconds) at which a claim after `last_daily` is allowed.
    pub fn next_eligible(&self, last_daily: u64) -> u64 {
        match self {
            Self::Rolling => last_daily.saturating_add(DAILY_COOLDOWN_SECS),
            Self::CalendarDay => (last_daily / SECS_PER_DAY)
                .saturating_add(1)
                .saturating_mul(SECS_PER_DAY),
        }
    }

    pub fn is_eligible(&self, last_daily: Option<u64>, now: u64) -> bool {
        match last_daily {
            None => true,
            Some(last) => now >= self.next_eligible(last),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rolling => "rolling",
            Self::CalendarDay => "calendar-day",
        }
    }
}

impl std::str::FromStr for CooldownPolicy {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rolling" => Ok(Self::Rolling),
            "calendar-day" | "calendar_day" | "calendar" => Ok(Self::CalendarDay),
            _ => Err("valid values: rolling, calendar-day"),
        }
    }
}

/// Time left before the next claim, truncated to whole minutes.
///
/// Leftover seconds are dropped, so 59 seconds of remaining wait displays as `0h 0m`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RemainingWait {
    pub hours: u64,
    pub minutes: u64,
}

impl RemainingWait {
    pub fn from_secs(remaining: u64) -> Self {
        Self {
            hours: remaining / SECS_PER_HOUR,
            minutes: (remaining % SECS_PER_HOUR) / SECS_PER_MINUTE,
        }
    }
}

/// A claim that would push the account past [`MAX_AMOUNT`](super::MAX_AMOUNT).
#[derive(Clone, Debug, ThisError, PartialEq, Eq)]
pub enum RewardError {
    #[error("reward overflows account (reward={reward}, balance={balance}, total_earned={total_earned})")]
    Overflow {
        reward: u64,
        balance: i64,
        total_earned: u64,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ClaimOutcome {
    Claimed { amount: u64, new_balance: i64 },
    OnCooldown(RemainingWait),
}

impl ClaimOutcome {
    pub fn is_claimed(&self) -> bool {
        matches!(self, Self::Claimed { .. })
    }
}

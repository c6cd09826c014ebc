/// Default amount granted by a successful daily claim.
pub const DEFAULT_DAILY_REWARD: u64 = 1_000;

/// Default currency display symbol.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "🌿";

/// Default currency display name.
pub const DEFAULT_CURRENCY_NAME: &str = "Tegridy Bucks";

/// Largest balance, reward or lifetime total the ledger can store (SQLite `INTEGER`).
pub const MAX_AMOUNT: u64 = i64::MAX as u64;

/// Length of the daily claim window.
pub const DAILY_COOLDOWN_SECS: u64 = 24 * 60 * 60;

/// Seconds in a UTC calendar day (day buckets for [`CooldownPolicy::CalendarDay`]).
///
/// [`CooldownPolicy::CalendarDay`]: super::CooldownPolicy::CalendarDay
pub const SECS_PER_DAY: u64 = 86_400;

pub const SECS_PER_HOUR: u64 = 3_600;
pub const SECS_PER_MINUTE: u64 = 60;

/// Faces on each die rolled by the wager engine.
pub const DIE_FACES: u8 = 6;

/// Stake text that resolves to the entire current balance.
pub const STAKE_ALL: &str = "all";

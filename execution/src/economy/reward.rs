use tegridy_types::economy::MAX_AMOUNT;
use tegridy_types::{Account, ClaimOutcome, CooldownPolicy, RemainingWait, RewardError};
use tracing::debug;

/// Grant the daily reward if the account's cooldown has elapsed.
///
/// On cooldown the account is left untouched and the remaining wait is reported, truncated
/// to whole minutes. A reward that would push the balance or the lifetime total past
/// [`MAX_AMOUNT`] fails without touching the account.
pub fn claim_daily(
    account: &mut Account,
    now: u64,
    reward: u64,
    policy: CooldownPolicy,
) -> Result<ClaimOutcome, RewardError> {
    if let Some(last_daily) = account.last_daily {
        if !policy.is_eligible(Some(last_daily), now) {
            let remaining = policy.next_eligible(last_daily).saturating_sub(now);
            debug!(
                user_id = %account.user_id,
                last_daily,
                now,
                remaining,
                policy = policy.as_str(),
                "daily claim on cooldown"
            );
            return Ok(ClaimOutcome::OnCooldown(RemainingWait::from_secs(remaining)));
        }
    }

    let overflow = RewardError::Overflow {
        reward,
        balance: account.balance,
        total_earned: account.total_earned,
    };
    let balance = i64::try_from(reward)
        .ok()
        .and_then(|credit| account.balance.checked_add(credit))
        .ok_or_else(|| overflow.clone())?;
    let total_earned = account
        .total_earned
        .checked_add(reward)
        .filter(|total| *total <= MAX_AMOUNT)
        .ok_or(overflow)?;

    account.balance = balance;
    account.total_earned = total_earned;
    account.last_daily = Some(now);

    Ok(ClaimOutcome::Claimed {
        amount: reward,
        new_balance: balance,
    })
}

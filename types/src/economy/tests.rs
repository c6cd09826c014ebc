use super::*;
use proptest::prelude::*;

#[test]
fn test_new_account_defaults() {
    let account = Account::new("42");
    assert_eq!(account.balance, 0);
    assert_eq!(account.total_earned, 0);
    assert_eq!(account.last_daily, None);
    account.validate_invariants().expect("valid invariants");
}

#[test]
fn test_account_validate_rejects_negative_balance() {
    let mut account = Account::new("42");
    account.balance = -1;
    assert_eq!(
        account.validate_invariants(),
        Err(AccountInvariantError::NegativeBalance { balance: -1 })
    );
}

#[test]
fn test_account_validate_rejects_empty_user_id() {
    let account = Account::new("");
    assert_eq!(
        account.validate_invariants(),
        Err(AccountInvariantError::EmptyUserId)
    );
}

#[test]
fn test_account_validate_rejects_unstorable_total_earned() {
    let mut account = Account::new("42");
    account.total_earned = MAX_AMOUNT;
    assert_eq!(account.validate_invariants(), Ok(()));
    account.total_earned = MAX_AMOUNT + 1;
    assert_eq!(
        account.validate_invariants(),
        Err(AccountInvariantError::TotalEarnedTooLarge {
            total_earned: MAX_AMOUNT + 1
        })
    );
}

#[test]
fn test_stake_parse() {
    assert_eq!(StakeArg::parse("500"), Ok(StakeArg::Amount(500)));
    assert_eq!(StakeArg::parse(" 12 "), Ok(StakeArg::Amount(12)));
    assert_eq!(StakeArg::parse("+7"), Ok(StakeArg::Amount(7)));
    assert_eq!(StakeArg::parse("-3"), Ok(StakeArg::Amount(-3)));
    assert_eq!(StakeArg::parse("all"), Ok(StakeArg::All));
    assert_eq!(StakeArg::parse("ALL"), Ok(StakeArg::All));
    assert_eq!(
        StakeArg::parse("lots"),
        Err(WagerError::InvalidStake("lots".to_string()))
    );
    assert_eq!(
        StakeArg::parse("1.5"),
        Err(WagerError::InvalidStake("1.5".to_string()))
    );
    assert_eq!(
        StakeArg::parse(""),
        Err(WagerError::InvalidStake(String::new()))
    );
}

#[test]
fn test_stake_resolve() {
    assert_eq!(StakeArg::Amount(10).resolve(99), 10);
    assert_eq!(StakeArg::All.resolve(99), 99);
}

#[test]
fn test_bet_outcome_from_rolls() {
    assert_eq!(BetOutcome::from_rolls(6, 2), BetOutcome::Win);
    assert_eq!(BetOutcome::from_rolls(1, 5), BetOutcome::Lose);
    assert_eq!(BetOutcome::from_rolls(3, 3), BetOutcome::Push);
    assert_eq!(BetOutcome::Win.net_change(50), 50);
    assert_eq!(BetOutcome::Lose.net_change(50), -50);
    assert_eq!(BetOutcome::Push.net_change(50), 0);
}

#[test]
fn test_remaining_wait_truncates_seconds() {
    assert_eq!(
        RemainingWait::from_secs(3_600),
        RemainingWait { hours: 1, minutes: 0 }
    );
    assert_eq!(
        RemainingWait::from_secs(3_659),
        RemainingWait { hours: 1, minutes: 0 }
    );
    assert_eq!(
        RemainingWait::from_secs(59),
        RemainingWait { hours: 0, minutes: 0 }
    );
    assert_eq!(
        RemainingWait::from_secs(DAILY_COOLDOWN_SECS - 1),
        RemainingWait { hours: 23, minutes: 59 }
    );
}

#[test]
fn test_rolling_policy_window() {
    let policy = CooldownPolicy::Rolling;
    assert!(policy.is_eligible(None, 0));
    assert!(!policy.is_eligible(Some(1_000), 1_000 + DAILY_COOLDOWN_SECS - 1));
    assert!(policy.is_eligible(Some(1_000), 1_000 + DAILY_COOLDOWN_SECS));
}

#[test]
fn test_calendar_day_policy_crosses_midnight() {
    let policy = CooldownPolicy::CalendarDay;
    // 23:59 on day 10, then 00:01 on day 11.
    let last = 10 * SECS_PER_DAY + 23 * SECS_PER_HOUR + 59 * SECS_PER_MINUTE;
    let now = 11 * SECS_PER_DAY + SECS_PER_MINUTE;
    assert!(policy.is_eligible(Some(last), now));
    assert!(!CooldownPolicy::Rolling.is_eligible(Some(last), now));
    assert_eq!(policy.next_eligible(last), 11 * SECS_PER_DAY);
}

#[test]
fn test_cooldown_policy_parse() {
    assert_eq!("rolling".parse::<CooldownPolicy>(), Ok(CooldownPolicy::Rolling));
    assert_eq!("Calendar-Day".parse::<CooldownPolicy>(), Ok(CooldownPolicy::CalendarDay));
    assert!("weekly".parse::<CooldownPolicy>().is_err());
    assert_eq!(CooldownPolicy::default().as_str(), "rolling");
}

proptest! {
    #[test]
    fn prop_net_change_matches_outcome(player in 1u8..=6, house in 1u8..=6, stake in 1i64..1_000_000) {
        let outcome = BetOutcome::from_rolls(player, house);
        let net = outcome.net_change(stake);
        prop_assert!(net == stake || net == -stake || net == 0);
        prop_assert_eq!(net > 0, player > house);
        prop_assert_eq!(net < 0, player < house);
    }

    #[test]
    fn prop_rolling_eligible_iff_full_day_elapsed(last in 0u64..1_000_000_000, delta in 0u64..200_000) {
        let eligible = CooldownPolicy::Rolling.is_eligible(Some(last), last + delta);
        prop_assert_eq!(eligible, delta >= DAILY_COOLDOWN_SECS);
    }
}

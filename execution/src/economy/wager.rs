use tegridy_types::{Account, BetOutcome, BetReceipt, StakeArg, WagerError};
use tracing::debug;

use super::DiceRoller;

/// Parse `stake` and check it against `balance`. First failure wins.
pub fn resolve_stake(stake: &str, balance: i64) -> Result<i64, WagerError> {
    let stake = StakeArg::parse(stake)?.resolve(balance);
    if stake <= 0 {
        return Err(WagerError::NonPositiveStake(stake));
    }
    if stake > balance {
        return Err(WagerError::InsufficientFunds { stake, balance });
    }
    if balance.checked_add(stake).is_none() {
        return Err(WagerError::BalanceOverflow { stake, balance });
    }
    Ok(stake)
}

/// Roll one die for the player and one for the house and settle `stake`.
///
/// Validation failures draw no dice and leave the account untouched. `total_earned` is
/// never changed by a bet.
pub fn place_bet<D: DiceRoller + ?Sized>(
    account: &mut Account,
    stake: &str,
    dice: &mut D,
) -> Result<BetReceipt, WagerError> {
    let stake = resolve_stake(stake, account.balance)?;

    let player_roll = dice.roll();
    let house_roll = dice.roll();
    let outcome = BetOutcome::from_rolls(player_roll, house_roll);
    let net_change = outcome.net_change(stake);

    // stake <= balance, so a loss bottoms out at zero.
    account.balance = account
        .balance
        .checked_add(net_change)
        .ok_or(WagerError::BalanceOverflow {
            stake,
            balance: account.balance,
        })?;

    debug!(
        user_id = %account.user_id,
        stake,
        player_roll,
        house_roll,
        outcome = outcome.as_str(),
        balance = account.balance,
        "bet resolved"
    );

    Ok(BetReceipt {
        player_roll,
        house_roll,
        outcome,
        stake,
        net_change,
        new_balance: account.balance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::ScriptedDice;
    use proptest::prelude::*;

    fn funded(balance: i64) -> Account {
        let mut account = Account::new("u1");
        account.balance = balance;
        account
    }

    #[test]
    fn test_win_doubles_stake() {
        let mut account = funded(1_000);
        let mut dice = ScriptedDice::new([6, 2]);
        let receipt = place_bet(&mut account, "500", &mut dice).unwrap();
        assert_eq!(receipt.outcome, BetOutcome::Win);
        assert_eq!(receipt.net_change, 500);
        assert_eq!(receipt.new_balance, 1_500);
        assert_eq!(account.balance, 1_500);
    }

    #[test]
    fn test_lose_all() {
        let mut account = funded(1_500);
        let mut dice = ScriptedDice::new([1, 5]);
        let receipt = place_bet(&mut account, "all", &mut dice).unwrap();
        assert_eq!(receipt.outcome, BetOutcome::Lose);
        assert_eq!(receipt.stake, 1_500);
        assert_eq!(receipt.net_change, -1_500);
        assert_eq!(account.balance, 0);
    }

    #[test]
    fn test_push_returns_stake() {
        let mut account = funded(300);
        let mut dice = ScriptedDice::new([4, 4]);
        let receipt = place_bet(&mut account, "100", &mut dice).unwrap();
        assert_eq!(receipt.outcome, BetOutcome::Push);
        assert_eq!(receipt.net_change, 0);
        assert_eq!(account.balance, 300);
    }

    #[test]
    fn test_validation_order() {
        let mut account = funded(100);
        let mut dice = ScriptedDice::default();

        assert_eq!(
            place_bet(&mut account, "abc", &mut dice),
            Err(WagerError::InvalidStake("abc".to_string()))
        );
        assert_eq!(
            place_bet(&mut account, "0", &mut dice),
            Err(WagerError::NonPositiveStake(0))
        );
        assert_eq!(
            place_bet(&mut account, "-5", &mut dice),
            Err(WagerError::NonPositiveStake(-5))
        );
        assert_eq!(
            place_bet(&mut account, "101", &mut dice),
            Err(WagerError::InsufficientFunds {
                stake: 101,
                balance: 100
            })
        );
        assert_eq!(account.balance, 100);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn test_win_that_would_overflow_is_rejected_before_rolling() {
        let mut account = funded(i64::MAX);
        let mut dice = ScriptedDice::new([6, 1]);
        assert_eq!(
            place_bet(&mut account, "1", &mut dice),
            Err(WagerError::BalanceOverflow {
                stake: 1,
                balance: i64::MAX
            })
        );
        assert_eq!(account.balance, i64::MAX);
        assert_eq!(dice.remaining(), 2);

        // Largest stake that still settles exactly.
        let mut account = funded(i64::MAX / 2 + 1);
        let stake = (i64::MAX / 2).to_string();
        let receipt = place_bet(&mut account, &stake, &mut dice).unwrap();
        assert_eq!(receipt.new_balance, i64::MAX);
        assert_eq!(receipt.new_balance, i64::MAX / 2 + 1 + receipt.net_change);
    }

    #[test]
    fn test_all_on_empty_balance_is_non_positive() {
        let mut account = funded(0);
        let mut dice = ScriptedDice::default();
        assert_eq!(
            place_bet(&mut account, "all", &mut dice),
            Err(WagerError::NonPositiveStake(0))
        );
    }

    #[test]
    fn test_bet_does_not_touch_total_earned() {
        let mut account = funded(1_000);
        account.total_earned = 1_000;
        let mut dice = ScriptedDice::new([6, 1, 1, 6]);
        place_bet(&mut account, "400", &mut dice).unwrap();
        place_bet(&mut account, "200", &mut dice).unwrap();
        assert_eq!(account.total_earned, 1_000);
        assert_eq!(account.balance, 1_200);
    }

    proptest! {
        #[test]
        fn prop_balance_never_negative_and_zero_sum(
            start in 0i64..1_000_000,
            bets in proptest::collection::vec((1u8..=6, 1u8..=6, 0i64..2_000_000, any::<bool>()), 1..40),
        ) {
            let mut account = funded(start);
            for (player, house, amount, all_in) in bets {
                let before = account.balance;
                let stake = if all_in { "all".to_string() } else { amount.to_string() };
                let mut dice = ScriptedDice::new([player, house]);
                match place_bet(&mut account, &stake, &mut dice) {
                    Ok(receipt) => {
                        prop_assert_eq!(receipt.new_balance, before + receipt.net_change);
                        prop_assert_eq!(receipt.net_change, receipt.outcome.net_change(receipt.stake));
                    }
                    Err(_) => prop_assert_eq!(account.balance, before),
                }
                prop_assert!(account.balance >= 0);
                prop_assert_eq!(account.total_earned, 0);
            }
        }
    }
}

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use tegridy_execution::{economy, DiceRoller, Layer, RngDice, State};
use anyhow::Context;
use tegridy_types::{BalanceView, BetReceipt, ClaimOutcome, RewardError, WagerError};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::EconomyConfig;
use crate::locks::AccountLocks;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Wager(#[from] WagerError),
    #[error(transparent)]
    Reward(#[from] RewardError),
    #[error("persistence failure: {0:#}")]
    Persistence(anyhow::Error),
}

/// Entry point for the three economy operations.
///
/// Every operation runs as one read-modify-write transaction while holding the user's
/// account lock, so concurrent commands for one user never lose updates.
pub struct EconomyService<S: State, D: DiceRoller + Send = RngDice<StdRng>> {
    ledger: Arc<S>,
    config: EconomyConfig,
    dice: Mutex<D>,
    locks: AccountLocks,
}

impl<S: State> EconomyService<S> {
    /// Service with uniform dice, seeded for reproducible runs when `seed` is set.
    pub fn new(ledger: Arc<S>, config: EconomyConfig, seed: Option<u64>) -> Self {
        let dice = match seed {
            Some(seed) => RngDice::seeded(seed),
            None => RngDice::from_entropy(),
        };
        Self::with_dice(ledger, config, dice)
    }
}

impl<S: State, D: DiceRoller + Send> EconomyService<S, D> {
    pub fn with_dice(ledger: Arc<S>, config: EconomyConfig, dice: D) -> Self {
        Self {
            ledger,
            config,
            dice: Mutex::new(dice),
            locks: AccountLocks::default(),
        }
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Arc<S> {
        &self.ledger
    }

    /// Current balance. Materializes the account if the user has never been seen.
    pub async fn get_balance(&self, user_id: &str) -> Result<BalanceView, ServiceError> {
        let _guard = self.locks.lock(user_id).await;
        let mut layer = Layer::new(self.ledger.as_ref());
        let view = BalanceView::from_account(
            layer
                .get_or_create(user_id)
                .await
                .map_err(|err| self.persistence(user_id, "balance", err))?,
        );
        self.commit(user_id, "balance", layer).await?;
        Ok(view)
    }

    /// Claim the daily reward at `now` (unix seconds).
    pub async fn claim_daily(&self, user_id: &str, now: u64) -> Result<ClaimOutcome, ServiceError> {
        let _guard = self.locks.lock(user_id).await;
        let mut layer = Layer::new(self.ledger.as_ref());
        let account = layer
            .get_or_create(user_id)
            .await
            .map_err(|err| self.persistence(user_id, "daily", err))?;
        let outcome = match economy::claim_daily(
            account,
            now,
            self.config.daily_reward,
            self.config.cooldown_policy,
        ) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(user_id, %err, "daily reward rejected");
                return Err(err.into());
            }
        };
        self.commit(user_id, "daily", layer).await?;

        match &outcome {
            ClaimOutcome::Claimed {
                amount,
                new_balance,
            } => info!(user_id, amount, new_balance, "daily reward claimed"),
            ClaimOutcome::OnCooldown(wait) => info!(
                user_id,
                hours = wait.hours,
                minutes = wait.minutes,
                "daily reward on cooldown"
            ),
        }
        Ok(outcome)
    }

    /// Claim the daily reward using the wall clock.
    pub async fn claim_daily_now(&self, user_id: &str) -> Result<ClaimOutcome, ServiceError> {
        self.claim_daily(user_id, unix_now()).await
    }

    /// Wager `stake` (a number or `all`) on one dice roll against the house.
    pub async fn place_bet(&self, user_id: &str, stake: &str) -> Result<BetReceipt, ServiceError> {
        let _guard = self.locks.lock(user_id).await;
        let mut layer = Layer::new(self.ledger.as_ref());
        let account = layer
            .get_or_create(user_id)
            .await
            .map_err(|err| self.persistence(user_id, "roll", err))?;

        let receipt = {
            let mut dice = self.dice.lock().unwrap_or_else(PoisonError::into_inner);
            economy::place_bet(account, stake, &mut *dice)
        };
        // A rejected stake leaves nothing worth persisting.
        let receipt = match receipt {
            Ok(receipt) => receipt,
            Err(err) => {
                info!(user_id, stake, %err, "bet rejected");
                return Err(err.into());
            }
        };
        self.commit(user_id, "roll", layer).await?;

        info!(
            user_id,
            stake = receipt.stake,
            player_roll = receipt.player_roll,
            house_roll = receipt.house_roll,
            outcome = receipt.outcome.as_str(),
            new_balance = receipt.new_balance,
            "bet settled"
        );
        Ok(receipt)
    }

    async fn commit(
        &self,
        user_id: &str,
        operation: &'static str,
        layer: Layer<'_, S>,
    ) -> Result<(), ServiceError> {
        let changes = layer.commit();
        for account in &changes {
            account
                .validate_invariants()
                .with_context(|| format!("refusing to store account {:?}", account.user_id))
                .map_err(|err| self.persistence(user_id, operation, err))?;
        }
        self.ledger
            .apply(changes)
            .await
            .map_err(|err| self.persistence(user_id, operation, err))
    }

    fn persistence(&self, user_id: &str, operation: &'static str, err: anyhow::Error) -> ServiceError {
        error!(user_id, operation, "ledger operation failed: {err:#}");
        ServiceError::Persistence(err)
    }
}

pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

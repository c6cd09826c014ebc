//! User-facing reply text.

use tegridy_types::{BalanceView, BetOutcome, BetReceipt, ClaimOutcome, WagerError};

use crate::commands::{render_help, CommandError};
use crate::config::EconomyConfig;
use crate::service::ServiceError;

pub const GENERIC_FAILURE: &str = "Something went wrong, please try again.";

pub fn claim(outcome: &ClaimOutcome, config: &EconomyConfig) -> String {
    match outcome {
        ClaimOutcome::Claimed {
            amount,
            new_balance,
        } => format!(
            "🌿 Got Tegridy! Here's your daily {amount} {symbol} {name}!\nCurrent Tegridy: {new_balance} {symbol}",
            symbol = config.currency_symbol,
            name = config.currency_name,
        ),
        ClaimOutcome::OnCooldown(wait) => format!(
            "Hey hey hey, you need to wait {}h {}m before getting more Tegridy!",
            wait.hours, wait.minutes
        ),
    }
}

pub fn balance(view: &BalanceView, config: &EconomyConfig) -> String {
    format!(
        "Your Tegridy balance: {} {} {}",
        view.balance, config.currency_symbol, config.currency_name
    )
}

pub fn bet(receipt: &BetReceipt, config: &EconomyConfig) -> String {
    let symbol = &config.currency_symbol;
    let verdict = match receipt.outcome {
        BetOutcome::Win => format!("You won {} {symbol}!", receipt.stake),
        BetOutcome::Lose => format!("You lost {} {symbol}!", receipt.stake),
        BetOutcome::Push => "It's a tie! Your bet has been returned.".to_string(),
    };
    format!(
        "🎲 You rolled: {}\n🤖 Bot rolled: {}\n\nYou {}! {verdict}\nNew balance: {} {symbol}",
        receipt.player_roll,
        receipt.house_roll,
        receipt.outcome.as_str(),
        receipt.new_balance,
    )
}

pub fn wager_error(err: &WagerError) -> &'static str {
    match err {
        WagerError::InvalidStake(_) => "Please enter a valid number or 'all'",
        WagerError::NonPositiveStake(_) => "Bet amount must be positive!",
        WagerError::InsufficientFunds { .. } => "You don't have enough currency!",
        WagerError::BalanceOverflow { .. } => "Your Tegridy stash can't hold any more winnings!",
    }
}

pub fn service_error(err: &ServiceError) -> &'static str {
    match err {
        ServiceError::Wager(err) => wager_error(err),
        ServiceError::Reward(_) => "Your Tegridy stash can't hold any more!",
        ServiceError::Persistence(_) => GENERIC_FAILURE,
    }
}

pub fn command_error(err: &CommandError) -> String {
    match err {
        CommandError::MissingArgument { usage } => format!("Usage: {usage}"),
        CommandError::Empty | CommandError::Unknown(_) => {
            format!("{}\n{}", capitalize(&err.to_string()), render_help())
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

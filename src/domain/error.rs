use chrono::TimeDelta;
use rust_decimal::Decimal;

use crate::domain::AccountId;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Account {0} not found")]
    AccountNotFound(AccountId),

    #[error("Account is locked for another {}s", .remaining.num_seconds())]
    Locked {
        remaining: TimeDelta,
        just_locked: bool,
    },

    #[error("Incorrect passcode, {attempts_left} attempts left")]
    BadPasscode { attempts_left: u32 },

    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Decimal, requested: Decimal },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Passcode must be exactly 4 digits")]
    InvalidPasscode,

    #[error("Passcode hashing failed with: {0}")]
    Hashing(String),

    #[error("Input closed before the operation could finish")]
    InputClosed,
}

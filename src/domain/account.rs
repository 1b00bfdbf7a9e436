use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{BankName, Passcode, to_cents};

/// Ten-digit account number. Any `u64` can be looked up, but only the
/// store's generator hands out new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub u64);

impl AccountId {
    pub const MIN: u64 = 1_000_000_000;
    pub const MAX: u64 = 9_999_999_999;
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl core::str::FromStr for AccountId {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[derive(Debug)]
pub struct Account {
    pub id: AccountId,
    pub bank_name: BankName,
    pub holder_name: String,
    pub account_type: String,
    pub balance: Decimal,                  // mutated only by the transaction engine
    pub passcode: Passcode,                // hashed at creation
    pub failed_attempts: u32,              // consecutive mismatches since last reset
    pub lock_until: Option<DateTime<Utc>>, // set on the final failed attempt
}

impl Account {
    pub fn new(id: AccountId, details: NewAccount, passcode: Passcode) -> Self {
        Self {
            id,
            bank_name: details.bank_name,
            holder_name: details.holder_name,
            account_type: details.account_type,
            balance: details.initial_balance,
            passcode,
            failed_attempts: 0,
            lock_until: None,
        }
    }

    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            id: self.id,
            bank_name: self.bank_name,
            holder_name: self.holder_name.clone(),
            account_type: self.account_type.clone(),
            balance: self.balance,
        }
    }
}

/// Caller-supplied fields for a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub bank_name: BankName,
    pub holder_name: String,
    pub account_type: String,
    pub initial_balance: Decimal,
    pub passcode: String,
}

/// Read-only projection of an account for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    pub id: AccountId,
    pub bank_name: BankName,
    pub holder_name: String,
    pub account_type: String,
    pub balance: Decimal,
}

impl core::fmt::Display for AccountSnapshot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Bank: {}", self.bank_name)?;
        writeln!(f, "Account Number: {}", self.id)?;
        writeln!(f, "Account Holder: {}", self.holder_name)?;
        writeln!(f, "Account Type: {}", self.account_type)?;
        write!(f, "Balance: {:.2}", to_cents(self.balance))
    }
}

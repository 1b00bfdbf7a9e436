use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::{Account, AccountSnapshot, Amount, LedgerError};

/// Balance mutations. Callers must have authorized the passcode first.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransactionEngine;

impl TransactionEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn deposit(&self, account: &mut Account, amount: Amount) -> Result<Decimal, LedgerError> {
        let Some(balance) = account.balance.checked_add(amount.value()) else {
            debug!(account = %account.id, %amount, "deposit would overflow balance");
            return Err(LedgerError::InvalidAmount(amount.value().to_string()));
        };

        account.balance = balance;
        info!(account = %account.id, %amount, "deposit applied");
        Ok(account.balance)
    }

    pub fn withdraw(&self, account: &mut Account, amount: Amount) -> Result<Decimal, LedgerError> {
        if amount.value() > account.balance {
            debug!(account = %account.id, %amount, "withdrawal exceeds balance");
            return Err(LedgerError::InsufficientFunds {
                balance: account.balance,
                requested: amount.value(),
            });
        }

        account.balance -= amount.value();
        info!(account = %account.id, %amount, "withdrawal applied");
        Ok(account.balance)
    }

    pub fn inspect(&self, account: &Account) -> AccountSnapshot {
        account.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountId, BankName, NewAccount, Passcode};
    use rust_decimal::dec;

    fn account(balance: Decimal) -> Account {
        let details = NewAccount {
            bank_name: BankName::AuroraNational,
            holder_name: "Grace".to_string(),
            account_type: "savings".to_string(),
            initial_balance: balance,
            passcode: "4321".to_string(),
        };
        let passcode = Passcode::hash(&details.passcode).unwrap();
        Account::new(AccountId(2_000_000_002), details, passcode)
    }

    fn amount(value: Decimal) -> Amount {
        Amount::new(value).unwrap()
    }

    #[test]
    fn deposit_order_does_not_matter() {
        let engine = TransactionEngine::new();
        let mut first = account(dec!(10.00));
        let mut second = account(dec!(10.00));

        engine.deposit(&mut first, amount(dec!(2.50))).unwrap();
        engine.deposit(&mut first, amount(dec!(7.25))).unwrap();
        engine.deposit(&mut second, amount(dec!(7.25))).unwrap();
        engine.deposit(&mut second, amount(dec!(2.50))).unwrap();

        assert_eq!(first.balance, dec!(19.75));
        assert_eq!(first.balance, second.balance);
    }

    #[test]
    fn deposit_overflow_is_refused() {
        let engine = TransactionEngine::new();
        let mut account = account(Decimal::MAX);

        let result = engine.deposit(&mut account, amount(dec!(1)));

        assert!(matches!(result, Err(LedgerError::InvalidAmount(_))));
        assert_eq!(account.balance, Decimal::MAX);
    }

    #[test]
    fn overdraw_leaves_balance_untouched() {
        let engine = TransactionEngine::new();
        let mut account = account(dec!(100.00));

        let result = engine.withdraw(&mut account, amount(dec!(150.00)));

        assert!(matches!(
            result,
            Err(LedgerError::InsufficientFunds { balance, requested })
                if balance == dec!(100.00) && requested == dec!(150.00)
        ));
        assert_eq!(account.balance, dec!(100.00));
    }

    #[test]
    fn withdraw_exact_balance_reaches_zero() {
        let engine = TransactionEngine::new();
        let mut account = account(dec!(40.00));

        assert_eq!(engine.withdraw(&mut account, amount(dec!(40.00))).unwrap(), dec!(0));
    }

    #[test]
    fn inspect_projects_fields() {
        let engine = TransactionEngine::new();
        let fractional = engine.inspect(&account(dec!(0.999)));
        let account = account(dec!(5));
        let snapshot = engine.inspect(&account);

        assert_eq!(snapshot.id, AccountId(2_000_000_002));
        assert_eq!(snapshot.bank_name, BankName::AuroraNational);
        assert_eq!(snapshot.holder_name, "Grace");
        assert_eq!(snapshot.balance, dec!(5));
        assert!(snapshot.to_string().contains("Balance: 5.00"));
        assert!(fractional.to_string().contains("Balance: 1.00"));
    }
}

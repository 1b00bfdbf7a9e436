use std::str::FromStr;
use std::sync::Arc;

use chrono::TimeDelta;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::Config;
use crate::domain::{
    AccountId, BankName, Clock, LedgerError, NewAccount, Passcode, SystemClock, to_cents,
};
use crate::lockout::LockoutGuard;
use crate::prompt::Console;
use crate::reporter::ConsoleReporter;
use crate::session::{OperationKind, Outcome, SessionController};
use crate::store::AccountStore;

/// Menu-driven front end. Everything printed here is presentation; the
/// decisions are made by the session controller.
pub struct Shell<C: Clock> {
    controller: SessionController<C, ConsoleReporter>,
    console: Console,
}

impl Shell<SystemClock> {
    pub fn new(config: &Config, console: Console) -> Self {
        let store = Arc::new(AccountStore::with_generator(config.id_generator()));
        let controller = SessionController::new(
            store,
            LockoutGuard::new(config.policy()),
            SystemClock,
            ConsoleReporter::default(),
        )
        .with_prompt_timeout(config.prompt_timeout());

        Self::with_controller(controller, console)
    }
}

impl<C: Clock> Shell<C> {
    pub fn with_controller(controller: SessionController<C, ConsoleReporter>, console: Console) -> Self {
        Self {
            controller,
            console,
        }
    }

    pub fn controller(&self) -> &SessionController<C, ConsoleReporter> {
        &self.controller
    }

    pub async fn run(&self) -> Result<(), LedgerError> {
        loop {
            println!();
            println!("Banking System");
            println!("1. Create new account");
            println!("2. Deposit funds");
            println!("3. Withdraw funds");
            println!("4. Check account details");
            println!("5. Exit");

            let Some(choice) = self.console.ask("Enter choice: ").await? else {
                break;
            };

            let result = match choice.parse::<u32>() {
                Ok(1) => self.create_account().await,
                Ok(2) => self.operate(OperationKind::Deposit).await,
                Ok(3) => self.operate(OperationKind::Withdraw).await,
                Ok(4) => self.operate(OperationKind::Inspect).await,
                Ok(5) => break,
                _ => {
                    println!("Invalid choice. Please try again.");
                    Ok(())
                }
            };

            match result {
                Ok(()) => {}
                Err(LedgerError::InputClosed) => {
                    debug!("input closed mid-operation");
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        println!("Exiting system. Thank you!");
        Ok(())
    }

    async fn create_account(&self) -> Result<(), LedgerError> {
        println!();
        println!("Select a Bank:");
        for (idx, bank) in BankName::ALL.iter().enumerate() {
            println!("{}. {}", idx + 1, bank);
        }

        let bank_name = loop {
            let raw = self
                .console
                .require("Enter the number of your chosen bank: ")
                .await?;
            if let Some(bank) = raw.parse().ok().and_then(BankName::from_menu_choice) {
                break bank;
            }
            println!("Invalid choice. Please select a valid bank number.");
        };

        let holder_name = self.console.require("Enter account holder name: ").await?;
        let account_type = self
            .console
            .require("Enter account type (e.g., savings, checking): ")
            .await?;

        let initial_balance = loop {
            let raw = self.console.require("Enter initial balance: ").await?;
            match Decimal::from_str(&raw) {
                Ok(balance) if balance >= Decimal::ZERO => break balance,
                _ => println!("Invalid balance. Please enter a non-negative amount."),
            }
        };

        let passcode = loop {
            let raw = self.console.require("Enter a passcode (4 digits): ").await?;
            if Passcode::is_well_formed(&raw) {
                break raw;
            }
            println!("Invalid passcode. Please enter a 4-digit passcode.");
        };

        let created = self
            .controller
            .create_account(NewAccount {
                bank_name,
                holder_name,
                account_type,
                initial_balance,
                passcode,
            })
            .await?;

        println!("Account created successfully!");
        println!("Bank: {}", created.bank_name);
        println!("Account Holder: {}", created.holder_name);
        println!("Account Number: {}", created.id);
        Ok(())
    }

    async fn operate(&self, kind: OperationKind) -> Result<(), LedgerError> {
        let question = match kind {
            OperationKind::Inspect => "Enter account number to check: ",
            _ => "Enter account number: ",
        };
        let raw = self.console.require(question).await?;
        let Ok(id) = raw.parse::<AccountId>() else {
            println!("Account not found.");
            return Ok(());
        };

        let mut passcodes = self.console.answers("Enter passcode: ");
        let mut amounts = self.console.answers(match kind {
            OperationKind::Withdraw => "Enter withdrawal amount: ",
            _ => "Enter deposit amount: ",
        });

        let result = self
            .controller
            .request_operation(id, kind, &mut passcodes, &mut amounts)
            .await;
        self.render(result)
    }

    fn render(&self, result: Result<Outcome, LedgerError>) -> Result<(), LedgerError> {
        match result {
            Ok(Outcome::Deposited { balance }) => {
                println!("Deposit successful. New balance is {:.2}", to_cents(balance))
            }
            Ok(Outcome::Withdrawn { balance }) => {
                println!("Withdrawal successful. New balance is {:.2}", to_cents(balance))
            }
            Ok(Outcome::Inspected(snapshot)) => {
                println!("Account Details:");
                println!("{}", snapshot);
            }
            Err(LedgerError::AccountNotFound(_)) => println!("Account not found."),
            Err(LedgerError::Locked {
                remaining,
                just_locked: true,
            }) => {
                println!();
                println!(
                    "You have entered the wrong passcode {} times. Your account is blocked for {}.",
                    self.controller.policy().max_attempts,
                    describe_remaining(remaining)
                );
            }
            Err(LedgerError::Locked { remaining, .. }) => {
                println!();
                println!(
                    "Your account is blocked. Please try again after {}.",
                    describe_remaining(remaining)
                );
            }
            Err(LedgerError::BadPasscode { attempts_left }) => {
                println!("Operation cancelled with {} attempts left.", attempts_left)
            }
            Err(LedgerError::InsufficientFunds { .. }) => println!("Insufficient funds."),
            Err(LedgerError::InvalidAmount(raw)) => println!("Invalid amount: {}", raw),
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

pub fn describe_remaining(remaining: TimeDelta) -> String {
    format!(
        "{} hour(s) and {} minute(s)",
        remaining.num_hours(),
        remaining.num_minutes() % 60
    )
}

use std::sync::Arc;
use std::time::Duration;

use futures::{Stream, StreamExt};
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{
    Account, AccountId, AccountSnapshot, Amount, AttemptReporter, Clock, LedgerError, NewAccount,
};
use crate::engine::TransactionEngine;
use crate::lockout::{AttemptOutcome, LockStatus, LockoutGuard, LockoutPolicy};
use crate::store::AccountStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Deposit,
    Withdraw,
    Inspect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Deposited { balance: Decimal },
    Withdrawn { balance: Decimal },
    Inspected(AccountSnapshot),
}

/// Runs one requested operation end to end: lookup, lock check, passcode
/// retries, then the balance change.
///
/// The target account stays locked for the whole operation, including while
/// waiting on the passcode and amount streams.
#[derive(Debug)]
pub struct SessionController<C, R>
where
    C: Clock,
    R: AttemptReporter,
{
    store: Arc<AccountStore>,
    guard: LockoutGuard,
    engine: TransactionEngine,
    clock: C,
    reporter: R,
    prompt_timeout: Option<Duration>,
}

impl<C, R> SessionController<C, R>
where
    C: Clock,
    R: AttemptReporter,
{
    pub fn new(store: Arc<AccountStore>, guard: LockoutGuard, clock: C, reporter: R) -> Self {
        Self {
            store,
            guard,
            engine: TransactionEngine::new(),
            clock,
            reporter,
            prompt_timeout: None,
        }
    }

    pub fn with_prompt_timeout(mut self, prompt_timeout: Option<Duration>) -> Self {
        self.prompt_timeout = prompt_timeout;
        self
    }

    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    pub fn policy(&self) -> LockoutPolicy {
        self.guard.policy()
    }

    pub async fn create_account(&self, details: NewAccount) -> Result<AccountSnapshot, LedgerError> {
        self.store.create(details).await
    }

    pub async fn request_operation<P, A>(
        &self,
        id: AccountId,
        kind: OperationKind,
        passcodes: &mut P,
        amounts: &mut A,
    ) -> Result<Outcome, LedgerError>
    where
        P: Stream<Item = Result<String, LedgerError>> + Unpin,
        A: Stream<Item = Result<String, LedgerError>> + Unpin,
    {
        let shared = self.store.find(id).await?;
        let mut account = shared.lock().await;

        let budget = match self.guard.check_lock(&mut account, self.clock.now()) {
            LockStatus::Locked { remaining } => {
                debug!(account = %id, ?kind, "operation refused, account locked");
                return Err(LedgerError::Locked {
                    remaining,
                    just_locked: false,
                });
            }
            LockStatus::Open { attempts_left } => attempts_left,
        };

        self.authorize(&mut account, budget, passcodes).await?;

        match kind {
            OperationKind::Inspect => Ok(Outcome::Inspected(self.engine.inspect(&account))),
            OperationKind::Deposit => {
                let amount = self.next_amount(amounts).await?;
                let balance = self.engine.deposit(&mut account, amount)?;
                Ok(Outcome::Deposited { balance })
            }
            OperationKind::Withdraw => {
                let amount = self.next_amount(amounts).await?;
                let balance = self.engine.withdraw(&mut account, amount)?;
                Ok(Outcome::Withdrawn { balance })
            }
        }
    }

    async fn authorize<P>(
        &self,
        account: &mut Account,
        budget: u32,
        passcodes: &mut P,
    ) -> Result<(), LedgerError>
    where
        P: Stream<Item = Result<String, LedgerError>> + Unpin,
    {
        let mut attempts_left = budget;

        for _ in 0..budget {
            let Some(submitted) = self.pull(passcodes).await? else {
                if attempts_left < budget {
                    return Err(LedgerError::BadPasscode { attempts_left });
                }
                return Err(LedgerError::InputClosed);
            };

            match self.guard.record_attempt(account, &submitted, self.clock.now()) {
                AttemptOutcome::Authorized => return Ok(()),
                AttemptOutcome::Rejected { attempts_left: left } => {
                    self.reporter.rejected(account.id, left);
                    attempts_left = left;
                }
                AttemptOutcome::JustLocked { remaining } => {
                    self.reporter.locked(account.id, remaining);
                    return Err(LedgerError::Locked {
                        remaining,
                        just_locked: true,
                    });
                }
                AttemptOutcome::StillLocked { remaining } => {
                    return Err(LedgerError::Locked {
                        remaining,
                        just_locked: false,
                    });
                }
            }
        }

        Err(LedgerError::BadPasscode { attempts_left })
    }

    async fn next_amount<A>(&self, amounts: &mut A) -> Result<Amount, LedgerError>
    where
        A: Stream<Item = Result<String, LedgerError>> + Unpin,
    {
        let raw = self.pull(amounts).await?.ok_or(LedgerError::InputClosed)?;
        Amount::parse(&raw)
    }

    async fn pull<S>(&self, input: &mut S) -> Result<Option<String>, LedgerError>
    where
        S: Stream<Item = Result<String, LedgerError>> + Unpin,
    {
        let item = match self.prompt_timeout {
            Some(limit) => match tokio::time::timeout(limit, input.next()).await {
                Ok(item) => item,
                Err(_) => {
                    debug!(?limit, "prompt timed out");
                    None
                }
            },
            None => input.next().await,
        };
        item.transpose()
    }
}

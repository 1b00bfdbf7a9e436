use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::domain::{Account, AccountId, AccountSnapshot, LedgerError, NewAccount, Passcode};

/// Each account sits behind its own mutex so operations on one account are
/// serialized while different accounts proceed independently.
pub type SharedAccount = Arc<Mutex<Account>>;

#[derive(Debug)]
pub struct IdGenerator {
    rng: StdRng,
}

impl IdGenerator {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_id(&mut self) -> AccountId {
        AccountId(self.rng.gen_range(AccountId::MIN..=AccountId::MAX))
    }
}

#[derive(Debug)]
struct Inner {
    accounts: HashMap<AccountId, SharedAccount>,
    ids: IdGenerator,
}

#[derive(Debug)]
pub struct AccountStore {
    inner: RwLock<Inner>,
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore {
    pub fn new() -> Self {
        Self::with_generator(IdGenerator::from_entropy())
    }

    pub fn with_generator(ids: IdGenerator) -> Self {
        Self {
            inner: RwLock::new(Inner {
                accounts: HashMap::new(),
                ids,
            }),
        }
    }

    pub async fn create(&self, details: NewAccount) -> Result<AccountSnapshot, LedgerError> {
        if details.initial_balance < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(
                details.initial_balance.to_string(),
            ));
        }
        let raw = details.passcode.clone();
        let passcode = tokio::task::spawn_blocking(move || Passcode::hash(&raw))
            .await
            .map_err(|e| LedgerError::Hashing(e.to_string()))??;

        let mut inner = self.inner.write().await;
        let Inner { accounts, ids } = &mut *inner;

        loop {
            let id = ids.next_id();
            match accounts.entry(id) {
                Entry::Vacant(e) => {
                    let account = Account::new(id, details, passcode);
                    let snapshot = account.snapshot();
                    e.insert(Arc::new(Mutex::new(account)));
                    info!(account = %id, bank = %snapshot.bank_name, "account created");
                    return Ok(snapshot);
                }
                Entry::Occupied(_) => debug!(account = %id, "account number taken, regenerating"),
            }
        }
    }

    pub async fn find(&self, id: AccountId) -> Result<SharedAccount, LedgerError> {
        self.inner
            .read()
            .await
            .accounts
            .get(&id)
            .cloned()
            .ok_or(LedgerError::AccountNotFound(id))
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.accounts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

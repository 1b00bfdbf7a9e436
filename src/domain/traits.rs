use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::AccountId;

/// Source of the current time for lockout decisions.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Receives passcode failures as they happen inside an operation.
pub trait AttemptReporter {
    fn rejected(&self, account_id: AccountId, attempts_left: u32);

    fn locked(&self, account_id: AccountId, remaining: TimeDelta);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<T: Clock + ?Sized> Clock for std::sync::Arc<T> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<T: AttemptReporter + ?Sized> AttemptReporter for std::sync::Arc<T> {
    fn rejected(&self, account_id: AccountId, attempts_left: u32) {
        (**self).rejected(account_id, attempts_left)
    }

    fn locked(&self, account_id: AccountId, remaining: TimeDelta) {
        (**self).locked(account_id, remaining)
    }
}

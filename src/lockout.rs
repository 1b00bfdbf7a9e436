use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, warn};

use crate::domain::Account;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutPolicy {
    pub max_attempts: u32,
    pub lock_duration: TimeDelta,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            lock_duration: TimeDelta::hours(24),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStatus {
    Open { attempts_left: u32 },
    Locked { remaining: TimeDelta },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Authorized,
    Rejected { attempts_left: u32 },
    /// This attempt exhausted the budget and armed the lock.
    JustLocked { remaining: TimeDelta },
    /// A lock was already active; the attempt was not evaluated.
    StillLocked { remaining: TimeDelta },
}

/// Failed-attempt accounting and the timed lock that follows it.
///
/// Time is always passed in, so expiry can be driven from tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct LockoutGuard {
    policy: LockoutPolicy,
}

impl LockoutGuard {
    pub fn new(policy: LockoutPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> LockoutPolicy {
        self.policy
    }

    /// Must run before any passcode is requested. An expired lock is cleared
    /// here and the attempt counter starts a fresh cycle.
    pub fn check_lock(&self, account: &mut Account, now: DateTime<Utc>) -> LockStatus {
        if let Some(until) = account.lock_until {
            if now < until {
                return LockStatus::Locked {
                    remaining: until - now,
                };
            }
            debug!(account = %account.id, "lock expired");
            account.lock_until = None;
            account.failed_attempts = 0;
        }

        LockStatus::Open {
            attempts_left: self.attempts_left(account),
        }
    }

    pub fn record_attempt(
        &self,
        account: &mut Account,
        submitted: &str,
        now: DateTime<Utc>,
    ) -> AttemptOutcome {
        if let LockStatus::Locked { remaining } = self.check_lock(account, now) {
            return AttemptOutcome::StillLocked { remaining };
        }

        if account.passcode.verify(submitted) {
            account.failed_attempts = 0;
            return AttemptOutcome::Authorized;
        }

        account.failed_attempts = (account.failed_attempts + 1).min(self.policy.max_attempts);
        if account.failed_attempts >= self.policy.max_attempts {
            account.lock_until = Some(now + self.policy.lock_duration);
            warn!(account = %account.id, "too many failed passcode attempts, account locked");
            return AttemptOutcome::JustLocked {
                remaining: self.policy.lock_duration,
            };
        }

        let attempts_left = self.attempts_left(account);
        warn!(account = %account.id, attempts_left, "incorrect passcode");
        AttemptOutcome::Rejected { attempts_left }
    }

    fn attempts_left(&self, account: &Account) -> u32 {
        self.policy
            .max_attempts
            .saturating_sub(account.failed_attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountId, BankName, NewAccount, Passcode};
    use chrono::TimeZone;
    use rust_decimal::dec;

    fn account() -> Account {
        let details = NewAccount {
            bank_name: BankName::Pinnacle,
            holder_name: "Ada".to_string(),
            account_type: "checking".to_string(),
            initial_balance: dec!(100.00),
            passcode: "1234".to_string(),
        };
        let passcode = Passcode::hash(&details.passcode).unwrap();
        Account::new(AccountId(1_000_000_001), details, passcode)
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn wrong_passcodes_count_down_then_success_resets() {
        let guard = LockoutGuard::default();
        let mut account = account();

        for expected in [4, 3, 2, 1] {
            assert_eq!(
                guard.record_attempt(&mut account, "0000", t0()),
                AttemptOutcome::Rejected {
                    attempts_left: expected
                }
            );
        }
        assert_eq!(account.failed_attempts, 4);

        assert_eq!(
            guard.record_attempt(&mut account, "1234", t0()),
            AttemptOutcome::Authorized
        );
        assert_eq!(account.failed_attempts, 0);
        assert!(account.lock_until.is_none());
    }

    #[test]
    fn fifth_failure_locks_for_a_full_day() {
        let guard = LockoutGuard::default();
        let mut account = account();

        for _ in 0..4 {
            guard.record_attempt(&mut account, "0000", t0());
        }
        assert_eq!(
            guard.record_attempt(&mut account, "0000", t0()),
            AttemptOutcome::JustLocked {
                remaining: TimeDelta::hours(24)
            }
        );
        assert_eq!(account.lock_until, Some(t0() + TimeDelta::hours(24)));

        let almost = t0() + TimeDelta::hours(24) - TimeDelta::seconds(1);
        assert_eq!(
            guard.check_lock(&mut account, almost),
            LockStatus::Locked {
                remaining: TimeDelta::seconds(1)
            }
        );
    }

    #[test]
    fn correct_passcode_during_lock_is_not_evaluated() {
        let guard = LockoutGuard::default();
        let mut account = account();
        for _ in 0..5 {
            guard.record_attempt(&mut account, "9999", t0());
        }

        let later = t0() + TimeDelta::minutes(1);
        assert_eq!(
            guard.record_attempt(&mut account, "1234", later),
            AttemptOutcome::StillLocked {
                remaining: TimeDelta::hours(24) - TimeDelta::minutes(1)
            }
        );
        assert_eq!(account.failed_attempts, 5);
    }

    #[test]
    fn expiry_opens_a_fresh_cycle() {
        let guard = LockoutGuard::default();
        let mut account = account();
        for _ in 0..5 {
            guard.record_attempt(&mut account, "0000", t0());
        }

        let expiry = t0() + TimeDelta::hours(24);
        assert_eq!(
            guard.check_lock(&mut account, expiry),
            LockStatus::Open { attempts_left: 5 }
        );
        assert!(account.lock_until.is_none());
        assert_eq!(
            guard.record_attempt(&mut account, "1234", expiry),
            AttemptOutcome::Authorized
        );
    }

    #[test]
    fn failures_accumulate_across_checks() {
        let guard = LockoutGuard::default();
        let mut account = account();
        guard.record_attempt(&mut account, "0000", t0());
        guard.record_attempt(&mut account, "0000", t0());

        assert_eq!(
            guard.check_lock(&mut account, t0()),
            LockStatus::Open { attempts_left: 3 }
        );
    }

    #[test]
    fn custom_policy_is_honoured() {
        let guard = LockoutGuard::new(LockoutPolicy {
            max_attempts: 2,
            lock_duration: TimeDelta::minutes(10),
        });
        let mut account = account();

        assert_eq!(
            guard.record_attempt(&mut account, "0000", t0()),
            AttemptOutcome::Rejected { attempts_left: 1 }
        );
        assert_eq!(
            guard.record_attempt(&mut account, "0000", t0()),
            AttemptOutcome::JustLocked {
                remaining: TimeDelta::minutes(10)
            }
        );
    }
}

use std::time::Duration;

use chrono::TimeDelta;
use clap::Parser;

use crate::lockout::LockoutPolicy;
use crate::store::IdGenerator;

/// Interactive account ledger with passcode lockout
#[derive(Debug, Parser)]
#[command(name = "passcode_ledger", version)]
pub struct Config {
    /// Consecutive wrong passcodes before the account is blocked
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// How long a blocked account stays blocked, in hours
    #[arg(long, default_value_t = 24, value_parser = clap::value_parser!(u32).range(1..))]
    pub lock_hours: u32,

    /// Give up on a passcode or amount prompt after this many seconds
    #[arg(long)]
    pub prompt_timeout_secs: Option<u64>,

    /// Seed for account number generation (reproducible runs)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn policy(&self) -> LockoutPolicy {
        LockoutPolicy {
            max_attempts: self.max_attempts,
            lock_duration: TimeDelta::hours(i64::from(self.lock_hours)),
        }
    }

    pub fn prompt_timeout(&self) -> Option<Duration> {
        self.prompt_timeout_secs.map(Duration::from_secs)
    }

    pub fn id_generator(&self) -> IdGenerator {
        match self.seed {
            Some(seed) => IdGenerator::seeded(seed),
            None => IdGenerator::from_entropy(),
        }
    }

    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "error" }
    }
}

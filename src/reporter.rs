use chrono::TimeDelta;

use crate::domain::{AccountId, AttemptReporter};

/// Prints passcode feedback inline with the interactive prompts.
#[derive(Default, Debug)]
pub struct ConsoleReporter {}

impl AttemptReporter for ConsoleReporter {
    fn rejected(&self, _account_id: AccountId, attempts_left: u32) {
        println!("Incorrect passcode. You have {} attempts left.", attempts_left);
    }

    fn locked(&self, _account_id: AccountId, _remaining: TimeDelta) {
        println!("Incorrect passcode. You have 0 attempts left.");
    }
}

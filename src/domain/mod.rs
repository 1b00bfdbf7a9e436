pub mod account;
pub mod amount;
pub mod bank;
pub mod error;
pub mod passcode;
pub mod traits;

pub use account::{Account, AccountId, AccountSnapshot, NewAccount};
pub use amount::{Amount, to_cents};
pub use bank::BankName;
pub use error::LedgerError;
pub use passcode::Passcode;
pub use traits::{AttemptReporter, Clock, SystemClock};

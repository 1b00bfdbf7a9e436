use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;

use crate::domain::LedgerError;

pub const PASSCODE_LEN: usize = 4;

// Four digits leave a tiny keyspace; the lockout is the real defence, so a
// light work factor keeps each check cheap.
const M_COST_KIB: u32 = 4096;
const T_COST: u32 = 2;

/// Argon2id hash of a four-digit passcode.
#[derive(Clone)]
pub struct Passcode {
    phc: String,
}

impl Passcode {
    pub fn is_well_formed(raw: &str) -> bool {
        raw.len() == PASSCODE_LEN && raw.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn hash(raw: &str) -> Result<Self, LedgerError> {
        if !Self::is_well_formed(raw) {
            return Err(LedgerError::InvalidPasscode);
        }

        let params = Params::new(M_COST_KIB, T_COST, 1, None)
            .map_err(|e| LedgerError::Hashing(e.to_string()))?;
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(raw.as_bytes(), &salt)
            .map_err(|e| LedgerError::Hashing(e.to_string()))?
            .to_string();

        Ok(Self { phc })
    }

    pub fn verify(&self, submitted: &str) -> bool {
        // parameters are read back from the PHC string
        match PasswordHash::new(&self.phc) {
            Ok(parsed) => Argon2::default()
                .verify_password(submitted.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

impl core::fmt::Debug for Passcode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Passcode(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::Passcode;
    use crate::domain::LedgerError;

    #[test]
    fn verifies_only_the_hashed_digits() {
        let passcode = Passcode::hash("1234").unwrap();
        assert!(passcode.verify("1234"));
        assert!(!passcode.verify("0000"));
        assert!(!passcode.verify("12345"));
        assert!(!format!("{:?}", passcode).contains("argon2"));
    }

    #[test]
    fn rejects_malformed_passcodes() {
        for raw in ["", "123", "12345", "12a4", "１２３４", " 123"] {
            assert!(
                matches!(Passcode::hash(raw), Err(LedgerError::InvalidPasscode)),
                "{raw:?} should be rejected"
            );
        }
    }
}

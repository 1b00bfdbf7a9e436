use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::LedgerError;

/// Rounds to cents for display, halves away from zero.
pub fn to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Strictly positive amount for a deposit or withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, LedgerError> {
        if value <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn parse(s: &str) -> Result<Self, LedgerError> {
        let s = s.trim();
        let value =
            Decimal::from_str(s).map_err(|_| LedgerError::InvalidAmount(s.to_string()))?;
        Self::new(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", to_cents(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::{Amount, to_cents};
    use crate::domain::LedgerError;
    use rust_decimal::dec;

    #[test]
    fn parses_positive_decimals() {
        assert_eq!(Amount::parse(" 150.00 ").unwrap().value(), dec!(150));
        assert_eq!(Amount::parse("0.01").unwrap().value(), dec!(0.01));
    }

    #[test]
    fn cents_round_instead_of_truncating() {
        assert_eq!(format!("{:.2}", to_cents(dec!(0.999))), "1.00");
        assert_eq!(format!("{:.2}", to_cents(dec!(2.345))), "2.35");
        assert_eq!(format!("{:.2}", to_cents(dec!(-2.345))), "-2.35");
        assert_eq!(format!("{:.2}", to_cents(dec!(7))), "7.00");
        assert_eq!(Amount::parse("2.345").unwrap().to_string(), "2.35");
    }

    #[test]
    fn rejects_zero_negative_and_garbage() {
        for raw in ["0", "-5", "", "abc", "1.2.3"] {
            assert!(
                matches!(Amount::parse(raw), Err(LedgerError::InvalidAmount(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}

//! Lenient parsing for UI number fields.
//!
//! Malformed or empty input is coerced to zero before it reaches the
//! engine; a half-typed cost is just a zero-cost item until the user
//! finishes, never an error.

use engine::{Money, Percent};

#[must_use]
pub fn money_or_zero(input: &str) -> Money {
    input.parse().unwrap_or(Money::ZERO)
}

#[must_use]
pub fn percent_or_zero(input: &str) -> Percent {
    input.parse().unwrap_or(Percent::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_input_parses() {
        assert_eq!(money_or_zero("12.34"), Money::new(12_34));
        assert_eq!(percent_or_zero("33,33"), Percent::new(33_33));
    }

    #[test]
    fn malformed_input_coerces_to_zero() {
        assert_eq!(money_or_zero(""), Money::ZERO);
        assert_eq!(money_or_zero("abc"), Money::ZERO);
        assert_eq!(money_or_zero("1.2.3"), Money::ZERO);
        assert_eq!(money_or_zero("-5"), Money::ZERO);
        assert_eq!(percent_or_zero("12.345"), Percent::ZERO);
    }
}

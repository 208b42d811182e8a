//! Monthly local-currency salary derivation.

use serde::{Deserialize, Serialize};

/// Months per year used to turn an annual salary into a monthly one.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Fixed conversion rate from the survey's reporting currency to local currency.
pub const DEFAULT_EXCHANGE_RATE: f64 = 5.6;

/// Conversion applied to every annual salary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryPolicy {
    pub exchange_rate: f64,
}

impl Default for SalaryPolicy {
    fn default() -> Self {
        Self {
            exchange_rate: DEFAULT_EXCHANGE_RATE,
        }
    }
}

impl SalaryPolicy {
    #[must_use]
    pub const fn new(exchange_rate: f64) -> Self {
        Self { exchange_rate }
    }

    /// `round((annual / 12) * rate, 2)`, ties to even.
    #[must_use]
    pub fn monthly(self, annual: f64) -> f64 {
        round_cents(annual / MONTHS_PER_YEAR * self.exchange_rate)
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(12000.0, 5600.0)]
    #[case(0.0, 0.0)]
    #[case(1000.0, 466.67)]
    #[case(50000.0, 23333.33)]
    fn default_rate(#[case] annual: f64, #[case] expected: f64) {
        let monthly = SalaryPolicy::default().monthly(annual);
        assert!(
            (monthly - expected).abs() < 1e-9,
            "{annual} -> {monthly}, expected {expected}"
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let policy = SalaryPolicy::default();
        assert_eq!(
            policy.monthly(98_765.0).to_bits(),
            policy.monthly(98_765.0).to_bits()
        );
    }

    #[test]
    fn custom_rate() {
        let monthly = SalaryPolicy::new(1.0).monthly(1200.0);
        assert!((monthly - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rounds_half_to_even() {
        assert!((round_cents(0.125) - 0.12).abs() < 1e-12);
        assert!((round_cents(0.375) - 0.38).abs() < 1e-12);
    }
}

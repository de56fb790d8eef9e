//! Salary change policy band
//!
//! The allowed percentage band is deployment configuration, loaded once into
//! [`SalaryPolicy`] and threaded into validation — there is exactly one copy
//! of these bounds in the whole system.

use rust_decimal::Decimal;

/// Allowed percentage band for a single salary change, inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryPolicy {
    pub min_percent_change: Decimal,
    pub max_percent_change: Decimal,
}

impl SalaryPolicy {
    pub fn new(min_percent_change: Decimal, max_percent_change: Decimal) -> Self {
        Self {
            min_percent_change,
            max_percent_change,
        }
    }

    pub fn contains(&self, percent: Decimal) -> bool {
        percent >= self.min_percent_change && percent <= self.max_percent_change
    }
}

impl Default for SalaryPolicy {
    /// Deployment default: a raise of up to +50%, a cut of up to −25%.
    fn default() -> Self {
        Self {
            min_percent_change: Decimal::from(-25),
            max_percent_change: Decimal::from(50),
        }
    }
}

/// Percentage change from `old` to `new`, rounded to 2 decimal places.
///
/// Caller guarantees `old > 0` (validated before any percent math runs).
pub fn percent_change(old: Decimal, new: Decimal) -> Decimal {
    ((new - old) * Decimal::from(100) / old).round_dp(2)
}

use std::{fmt, ops::Neg};

use serde::{Deserialize, Serialize};

/// Fine accrued for each overdue item on every advanced day (0.10 currency units).
pub const DAILY_OVERDUE_FINE: FineAmount = FineAmount::from_cents(10);

/// A signed currency amount, stored as a fixed-point count of whole cents.
///
/// The amount is signed so that an overpaid fine leaves a negative balance
/// (a credit) instead of being clamped or rejected.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct FineAmount(i64);

impl FineAmount {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Create an amount from a count of whole cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount as a count of whole cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Add a signed delta, saturating at the numeric bounds.
    #[must_use]
    pub const fn saturating_add(self, delta: Self) -> Self {
        Self(self.0.saturating_add(delta.0))
    }

    /// True when the balance has gone negative through overpayment.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Neg for FineAmount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl fmt::Display for FineAmount {
    #[allow(clippy::arithmetic_side_effects)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Successful outcome of a circulation desk operation.
///
/// The rendered form of each variant is the operation's literal status
/// string, which callers and tests may match on exactly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum CirculationSuccess {
    /// The item was checked out to the patron.
    CheckedOut,
    /// The item came back to a shelf.
    Returned,
    /// The hold was recorded for the patron.
    RequestPlaced,
    /// The payment was applied to the patron's balance.
    PaymentAccepted,
}

impl CirculationSuccess {
    /// The literal status string for this outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CheckedOut => "check out successful",
            Self::Returned => "return successful",
            Self::RequestPlaced => "request successful",
            Self::PaymentAccepted => "payment successful",
        }
    }
}

impl fmt::Display for CirculationSuccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failed outcome of a circulation desk operation.
///
/// Every anticipated failure (missing id, invalid transition) is a normal
/// value rather than a panic, and the rendered form is the operation's
/// literal status string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum CirculationError {
    /// No member matches the given patron id.
    PatronNotFound,
    /// No holding matches the given item id.
    ItemNotFound,
    /// The item is already checked out to somebody.
    ItemAlreadyCheckedOut,
    /// The item is held for a different patron.
    ItemOnHoldByOtherPatron,
    /// The item is not checked out, so there is nothing to return.
    ItemAlreadyInLibrary,
    /// The item already carries its single outstanding hold.
    ItemAlreadyOnHold,
}

impl CirculationError {
    /// The literal status string for this failure.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PatronNotFound => "patron not found",
            Self::ItemNotFound => "item not found",
            Self::ItemAlreadyCheckedOut => "item already checked out",
            Self::ItemOnHoldByOtherPatron => "item on hold by other patron",
            Self::ItemAlreadyInLibrary => "item already in library",
            Self::ItemAlreadyOnHold => "item already on hold",
        }
    }
}

impl std::error::Error for CirculationError {}

impl fmt::Display for CirculationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

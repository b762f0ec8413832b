use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{fine::FineAmount, item::ItemId};

/// Unique identifier for a library member.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PatronId(pub u32);

impl fmt::Display for PatronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A member of the library.
///
/// The patron tracks which items it currently has out by id only; the items
/// themselves live in the library's holdings. State is mutated exclusively by
/// [`Library`](crate::library::Library) operations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Patron {
    /// Identifier, unique across the library's members.
    id: PatronId,
    /// The patron's name.
    name: String,
    /// Ids of the items the patron currently has checked out.
    checked_out_items: Vec<ItemId>,
    /// Outstanding fine balance; negative after an overpayment.
    fine_balance: FineAmount,
}

impl Patron {
    /// Create a member with no checkouts and no fines.
    #[must_use]
    pub fn new(id: PatronId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            checked_out_items: Vec::new(),
            fine_balance: FineAmount::ZERO,
        }
    }

    /// The patron's identifier.
    #[must_use]
    pub fn id(&self) -> PatronId {
        self.id
    }

    /// The patron's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ids of the items the patron currently has checked out.
    #[must_use]
    pub fn checked_out_items(&self) -> &[ItemId] {
        &self.checked_out_items
    }

    /// Whether the patron currently has the given item checked out.
    #[must_use]
    pub fn has_item(&self, item_id: ItemId) -> bool {
        self.checked_out_items.contains(&item_id)
    }

    /// The patron's outstanding fine balance.
    #[must_use]
    pub fn fine_balance(&self) -> FineAmount {
        self.fine_balance
    }

    /// Record a checkout. The library guarantees the id is not already present.
    pub(crate) fn add_item(&mut self, item_id: ItemId) {
        self.checked_out_items.push(item_id);
    }

    /// Drop a returned item from the checkout list. A no-op when the id is absent.
    pub(crate) fn remove_item(&mut self, item_id: ItemId) {
        if let Some(pos) = self.checked_out_items.iter().position(|id| *id == item_id) {
            self.checked_out_items.remove(pos);
        }
    }

    /// Apply a signed delta to the fine balance: positive accrues, negative pays down.
    pub(crate) fn amend_fine(&mut self, delta: FineAmount) {
        self.fine_balance = self.fine_balance.saturating_add(delta);
    }
}

impl fmt::Display for Patron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "patron {} ({})", self.id, self.name)
    }
}

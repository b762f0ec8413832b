use std::{collections::HashMap, fmt};

use crate::{
    fine::{DAILY_OVERDUE_FINE, FineAmount},
    item::{ItemId, LibraryItem, Location},
    observers::CirculationObserver,
    patron::{Patron, PatronId},
    status::{CirculationError, CirculationSuccess},
};

/// The circulation desk: owner of every item, every member, and the clock.
///
/// All mutation of item and patron state flows through the operations here.
/// Each operation checks its preconditions in full before touching any state,
/// so no operation ever needs to undo a partial effect. Lookups that miss are
/// normal outcomes reported through [`CirculationError`], never panics.
pub struct Library {
    /// Every item the library owns, keyed by id.
    holdings: HashMap<ItemId, LibraryItem>,
    /// Every member, keyed by id.
    members: HashMap<PatronId, Patron>,
    /// The simulated day counter, advanced explicitly.
    current_day: u32,
    /// Registered circulation observers.
    observers: Vec<Box<dyn CirculationObserver>>,
}

// Manual implementation of Debug for Library (observers are not Debug).
impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("holdings", &self.holdings)
            .field("members", &self.members)
            .field("current_day", &self.current_day)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl Library {
    /// Create an empty library at day 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            holdings: HashMap::new(),
            members: HashMap::new(),
            current_day: 0,
            observers: Vec::new(),
        }
    }

    /// Add an item to the holdings.
    ///
    /// When an item with the same id is already present the existing entry is
    /// kept. Items are never removed.
    pub fn add_item(&mut self, item: LibraryItem) {
        self.holdings.entry(item.id()).or_insert(item);
    }

    /// Add a patron to the members.
    ///
    /// When a patron with the same id is already present the existing entry
    /// is kept. Members are never removed.
    pub fn add_patron(&mut self, patron: Patron) {
        self.members.entry(patron.id()).or_insert(patron);
    }

    /// Register an observer to be notified of circulation activity.
    pub fn register_observer(&mut self, observer: Box<dyn CirculationObserver>) {
        self.observers.push(observer);
    }

    /// Look up an item by id.
    #[must_use]
    pub fn item(&self, item_id: ItemId) -> Option<&LibraryItem> {
        self.holdings.get(&item_id)
    }

    /// Look up a patron by id.
    #[must_use]
    pub fn patron(&self, patron_id: PatronId) -> Option<&Patron> {
        self.members.get(&patron_id)
    }

    /// Iterate over every item in the holdings, in no particular order.
    pub fn items(&self) -> impl Iterator<Item = &LibraryItem> {
        self.holdings.values()
    }

    /// Iterate over every member, in no particular order.
    pub fn patrons(&self) -> impl Iterator<Item = &Patron> {
        self.members.values()
    }

    /// The current simulated day.
    #[must_use]
    pub fn current_day(&self) -> u32 {
        self.current_day
    }

    /// Check an item out to a patron.
    ///
    /// # Errors
    ///
    /// Returns `PatronNotFound` or `ItemNotFound` when an id misses,
    /// `ItemAlreadyCheckedOut` when somebody has the item out, and
    /// `ItemOnHoldByOtherPatron` when a different patron's hold is waiting.
    pub fn check_out_item(
        &mut self,
        patron_id: PatronId,
        item_id: ItemId,
    ) -> Result<CirculationSuccess, CirculationError> {
        if !self.members.contains_key(&patron_id) {
            return Err(CirculationError::PatronNotFound);
        }
        let Some(item) = self.holdings.get_mut(&item_id) else {
            return Err(CirculationError::ItemNotFound);
        };
        if item.checked_out_by().is_some() {
            return Err(CirculationError::ItemAlreadyCheckedOut);
        }
        if item.requested_by().is_some_and(|holder| holder != patron_id) {
            return Err(CirculationError::ItemOnHoldByOtherPatron);
        }

        let from = item.location();
        item.set_checked_out_by(Some(patron_id));
        item.set_date_checked_out(Some(self.current_day));
        item.set_location(Location::CheckedOut);

        // A hold collected by its own requester is fulfilled by the checkout.
        if item.requested_by() == Some(patron_id) {
            item.set_requested_by(None);
        }

        if let Some(patron) = self.members.get_mut(&patron_id) {
            patron.add_item(item_id);
        }

        self.notify_location_change(item_id, from, Location::CheckedOut);
        Ok(CirculationSuccess::CheckedOut)
    }

    /// Return a checked-out item to the library.
    ///
    /// The item lands on the hold shelf when a request is waiting, otherwise
    /// on the open shelf.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` when the id misses and `ItemAlreadyInLibrary`
    /// when the item is not checked out.
    pub fn return_item(
        &mut self,
        item_id: ItemId,
    ) -> Result<CirculationSuccess, CirculationError> {
        let Some(item) = self.holdings.get_mut(&item_id) else {
            return Err(CirculationError::ItemNotFound);
        };
        let Some(borrower) = item.checked_out_by() else {
            return Err(CirculationError::ItemAlreadyInLibrary);
        };

        if let Some(patron) = self.members.get_mut(&borrower) {
            patron.remove_item(item_id);
        }

        let destination = if item.requested_by().is_some() {
            Location::OnHoldShelf
        } else {
            Location::OnShelf
        };
        item.set_location(destination);
        item.set_checked_out_by(None);

        self.notify_location_change(item_id, Location::CheckedOut, destination);
        Ok(CirculationSuccess::Returned)
    }

    /// Place a hold on an item for a patron.
    ///
    /// An item on the open shelf moves to the hold shelf immediately; a
    /// checked-out item keeps circulating and the hold waits for the return.
    /// An item may hold at most one outstanding request.
    ///
    /// # Errors
    ///
    /// Returns `PatronNotFound` or `ItemNotFound` when an id misses, and
    /// `ItemAlreadyOnHold` when a request is already outstanding.
    pub fn request_item(
        &mut self,
        patron_id: PatronId,
        item_id: ItemId,
    ) -> Result<CirculationSuccess, CirculationError> {
        if !self.members.contains_key(&patron_id) {
            return Err(CirculationError::PatronNotFound);
        }
        let Some(item) = self.holdings.get_mut(&item_id) else {
            return Err(CirculationError::ItemNotFound);
        };
        if item.requested_by().is_some() {
            return Err(CirculationError::ItemAlreadyOnHold);
        }

        item.set_requested_by(Some(patron_id));
        if item.location() == Location::OnShelf {
            item.set_location(Location::OnHoldShelf);
            self.notify_location_change(item_id, Location::OnShelf, Location::OnHoldShelf);
        }
        Ok(CirculationSuccess::RequestPlaced)
    }

    /// Apply a payment against a patron's fine balance.
    ///
    /// The amount is not validated: paying more than is owed leaves a
    /// negative balance, a credit toward future fines.
    ///
    /// # Errors
    ///
    /// Returns `PatronNotFound` when the id misses.
    pub fn pay_fine(
        &mut self,
        patron_id: PatronId,
        amount: FineAmount,
    ) -> Result<CirculationSuccess, CirculationError> {
        let Some(patron) = self.members.get_mut(&patron_id) else {
            return Err(CirculationError::PatronNotFound);
        };
        patron.amend_fine(-amount);
        Ok(CirculationSuccess::PaymentAccepted)
    }

    /// Advance the clock by one day and sweep for overdue checkouts.
    ///
    /// Every item in a member's checkout list whose due day has passed
    /// accrues [`DAILY_OVERDUE_FINE`] on that member, once per overdue item
    /// per call, cumulative across items and days. Days skipped between calls
    /// are never back-filled.
    pub fn advance_day(&mut self) {
        self.current_day = self.current_day.saturating_add(1);
        let current_day = self.current_day;

        // Assess first, then fine: the sweep reads holdings while members mutate.
        let mut assessed: Vec<(PatronId, ItemId)> = Vec::new();
        for patron in self.members.values() {
            for &item_id in patron.checked_out_items() {
                if self.holdings.get(&item_id).is_some_and(|item| item.is_overdue(current_day)) {
                    assessed.push((patron.id(), item_id));
                }
            }
        }

        for (patron_id, item_id) in assessed {
            if let Some(patron) = self.members.get_mut(&patron_id) {
                patron.amend_fine(DAILY_OVERDUE_FINE);
            }
            self.notify_fine_accrued(patron_id, item_id, DAILY_OVERDUE_FINE);
        }
    }

    /// Tell every registered observer that an item changed location.
    fn notify_location_change(&self, item_id: ItemId, from: Location, to: Location) {
        for observer in &self.observers {
            observer.on_location_change(item_id, from, to);
        }
    }

    /// Tell every registered observer that a fine was accrued.
    fn notify_fine_accrued(&self, patron_id: PatronId, item_id: ItemId, amount: FineAmount) {
        for observer in &self.observers {
            observer.on_fine_accrued(patron_id, item_id, amount);
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "circulation desk: {} items, {} members, day {}",
            self.holdings.len(),
            self.members.len(),
            self.current_day
        )
    }
}

// Include tests module
#[cfg(test)]
mod tests;

use crate::{
    fine::FineAmount,
    item::{ItemId, Location},
    patron::PatronId,
};

/// Trait for observing circulation activity at the desk.
pub trait CirculationObserver {
    /// Called when an item moves between locations.
    fn on_location_change(&self, item_id: ItemId, from: Location, to: Location);

    /// Called when the daily sweep fines a patron for one overdue item.
    fn on_fine_accrued(&self, patron_id: PatronId, item_id: ItemId, amount: FineAmount);
}

/// Logs every location change and fine accrual.
#[derive(Debug)]
pub struct TransitionLogger;

impl CirculationObserver for TransitionLogger {
    fn on_location_change(&self, item_id: ItemId, from: Location, to: Location) {
        println!("LOGGER: item {item_id} moved: {from} --> {to}");
    }

    fn on_fine_accrued(&self, patron_id: PatronId, item_id: ItemId, amount: FineAmount) {
        println!("LOGGER: patron {patron_id} fined {amount} for overdue item {item_id}");
    }
}

/// Prints patron-facing notices for noteworthy circulation moments.
#[derive(Debug)]
pub struct NotificationService;

impl CirculationObserver for NotificationService {
    fn on_location_change(&self, item_id: ItemId, _from: Location, to: Location) {
        match to {
            Location::OnHoldShelf => {
                println!("NOTIFICATION: item {item_id} is ready for pickup!");
            }
            Location::OnShelf => {
                println!("NOTIFICATION: item {item_id} is back on the shelf!");
            }
            Location::CheckedOut => {}
        }
    }

    fn on_fine_accrued(&self, patron_id: PatronId, item_id: ItemId, _amount: FineAmount) {
        println!("NOTIFICATION: item {item_id} is overdue, patron {patron_id}'s fine has grown");
    }
}

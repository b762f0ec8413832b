//! In-memory simulation of a library's circulation desk.
//!
//! This crate models items, patrons, checkouts, holds, and overdue fines
//! across a simulated timeline of discrete days, driven by explicit
//! operations on a [`Library`] value.

pub mod fine;
pub mod item;
pub mod library;
pub mod observers;
pub mod patron;
pub mod report;
pub mod status;

pub use fine::{DAILY_OVERDUE_FINE, FineAmount};
pub use item::{ItemId, ItemKind, LibraryItem, Location};
pub use library::Library;
pub use observers::{CirculationObserver, NotificationService, TransitionLogger};
pub use patron::{Patron, PatronId};
pub use report::CirculationReport;
pub use status::{CirculationError, CirculationSuccess};

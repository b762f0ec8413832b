use std::fmt;

use serde::{Deserialize, Serialize};

use crate::patron::PatronId;

/// Unique identifier for a circulating item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The variant-specific half of an item: what kind of work it is and who made it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ItemKind {
    /// A book, checked out for 21 days at a time.
    Book {
        /// The book's author.
        author: String,
    },
    /// An album, checked out for 14 days at a time.
    Album {
        /// The album's recording artist.
        artist: String,
    },
    /// A movie, checked out for 7 days at a time.
    Movie {
        /// The movie's director.
        director: String,
    },
}

impl ItemKind {
    /// Number of simulated days this kind of item may be held before it is overdue.
    #[must_use]
    pub const fn checkout_length_days(&self) -> u32 {
        match self {
            Self::Book { .. } => 21,
            Self::Album { .. } => 14,
            Self::Movie { .. } => 7,
        }
    }

    /// Lowercase label for the kind, used in log lines and reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Book { .. } => "book",
            Self::Album { .. } => "album",
            Self::Movie { .. } => "movie",
        }
    }

    /// The person credited for the work: its author, artist, or director.
    #[must_use]
    pub fn creator(&self) -> &str {
        match self {
            Self::Book { author } => author,
            Self::Album { artist } => artist,
            Self::Movie { director } => director,
        }
    }
}

/// Where an item currently sits in the circulation cycle.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Location {
    /// On the open shelf, available for checkout or request.
    #[default]
    OnShelf,
    /// Checked out by a patron.
    CheckedOut,
    /// Waiting on the hold shelf for the patron who requested it.
    OnHoldShelf,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OnShelf => "ON_SHELF",
            Self::CheckedOut => "CHECKED_OUT",
            Self::OnHoldShelf => "ON_HOLD_SHELF",
        };
        f.write_str(name)
    }
}

/// A single circulating unit held by the library.
///
/// Identity, title, and kind are fixed at creation. The circulation state
/// (location, borrower, requester, checkout day) is mutated exclusively by
/// [`Library`](crate::library::Library) operations; the setters here perform
/// no validation of their own.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LibraryItem {
    /// Identifier, unique across the library's holdings.
    id: ItemId,
    /// Title of the work.
    title: String,
    /// Variant payload: book, album, or movie.
    kind: ItemKind,
    /// Current place in the circulation cycle.
    location: Location,
    /// The borrower, while the item is checked out.
    checked_out_by: Option<PatronId>,
    /// The patron holding the single outstanding request, if any.
    requested_by: Option<PatronId>,
    /// Day of the current (or most recent) checkout.
    date_checked_out: Option<u32>,
}

impl LibraryItem {
    /// Create an item of the given kind, starting on the open shelf.
    #[must_use]
    pub fn new(id: ItemId, title: &str, kind: ItemKind) -> Self {
        Self {
            id,
            title: title.to_string(),
            kind,
            location: Location::OnShelf,
            checked_out_by: None,
            requested_by: None,
            date_checked_out: None,
        }
    }

    /// Create a book (21-day checkout).
    #[must_use]
    pub fn book(id: ItemId, title: &str, author: &str) -> Self {
        Self::new(id, title, ItemKind::Book { author: author.to_string() })
    }

    /// Create an album (14-day checkout).
    #[must_use]
    pub fn album(id: ItemId, title: &str, artist: &str) -> Self {
        Self::new(id, title, ItemKind::Album { artist: artist.to_string() })
    }

    /// Create a movie (7-day checkout).
    #[must_use]
    pub fn movie(id: ItemId, title: &str, director: &str) -> Self {
        Self::new(id, title, ItemKind::Movie { director: director.to_string() })
    }

    /// The item's identifier.
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// The item's title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The variant payload.
    #[must_use]
    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Current location in the circulation cycle.
    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    /// The borrower, while the item is checked out.
    #[must_use]
    pub fn checked_out_by(&self) -> Option<PatronId> {
        self.checked_out_by
    }

    /// The patron with the outstanding request, if any.
    #[must_use]
    pub fn requested_by(&self) -> Option<PatronId> {
        self.requested_by
    }

    /// Day of the current (or most recent) checkout.
    #[must_use]
    pub fn date_checked_out(&self) -> Option<u32> {
        self.date_checked_out
    }

    /// Day the current checkout falls due, or `None` when not checked out.
    #[must_use]
    pub fn due_day(&self) -> Option<u32> {
        // The checkout day survives a return; only a live checkout has a due day.
        if self.checked_out_by.is_none() {
            return None;
        }
        self.date_checked_out.map(|day| day.saturating_add(self.kind.checkout_length_days()))
    }

    /// Whether the current checkout is overdue as of the given day.
    #[must_use]
    pub fn is_overdue(&self, current_day: u32) -> bool {
        self.due_day().is_some_and(|due| current_day > due)
    }

    /// Set the current location.
    pub(crate) fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    /// Set or clear the borrower.
    pub(crate) fn set_checked_out_by(&mut self, patron_id: Option<PatronId>) {
        self.checked_out_by = patron_id;
    }

    /// Set or clear the outstanding request.
    pub(crate) fn set_requested_by(&mut self, patron_id: Option<PatronId>) {
        self.requested_by = patron_id;
    }

    /// Set the day of the current checkout.
    pub(crate) fn set_date_checked_out(&mut self, day: Option<u32>) {
        self.date_checked_out = day;
    }
}

impl fmt::Display for LibraryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} \"{}\"", self.kind.label(), self.id, self.title)
    }
}

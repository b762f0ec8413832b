use crate::{
    fine::FineAmount,
    item::{ItemId, LibraryItem, Location},
    library::Library,
    patron::{Patron, PatronId},
    status::{CirculationError, CirculationSuccess},
};

/// Helper function to set up a small desk: three items, two patrons
fn setup_test_library() -> Library {
    let mut library = Library::new();

    library.add_item(LibraryItem::book(ItemId(1), "The Dispossessed", "Ursula K. Le Guin"));
    library.add_item(LibraryItem::album(ItemId(2), "Kind of Blue", "Miles Davis"));
    library.add_item(LibraryItem::movie(ItemId(3), "Seven Samurai", "Akira Kurosawa"));

    library.add_patron(Patron::new(PatronId(1), "Alice"));
    library.add_patron(Patron::new(PatronId(2), "Bob"));

    library
}

/// Helper to fetch an item that the test knows exists
#[allow(clippy::expect_used)]
fn item(library: &Library, id: u32) -> &LibraryItem {
    library.item(ItemId(id)).expect("Item should exist")
}

/// Helper to fetch a patron that the test knows exists
#[allow(clippy::expect_used)]
fn patron(library: &Library, id: u32) -> &Patron {
    library.patron(PatronId(id)).expect("Patron should exist")
}

#[test]
fn test_items_start_on_shelf() {
    let library = setup_test_library();

    for id in 1..=3 {
        let item = item(&library, id);
        assert_eq!(item.location(), Location::OnShelf);
        assert_eq!(item.checked_out_by(), None);
        assert_eq!(item.requested_by(), None);
        assert_eq!(item.date_checked_out(), None);
    }
}

#[test]
fn test_check_out_unknown_patron() {
    let mut library = setup_test_library();

    let result = library.check_out_item(PatronId(99), ItemId(1));
    assert_eq!(result, Err(CirculationError::PatronNotFound));

    // Nothing was mutated
    assert_eq!(item(&library, 1).location(), Location::OnShelf);
}

#[test]
fn test_check_out_unknown_item() {
    let mut library = setup_test_library();

    let result = library.check_out_item(PatronId(1), ItemId(99));
    assert_eq!(result, Err(CirculationError::ItemNotFound));
    assert!(patron(&library, 1).checked_out_items().is_empty());
}

#[test]
fn test_check_out_updates_item_and_patron() {
    let mut library = setup_test_library();

    let result = library.check_out_item(PatronId(1), ItemId(1));
    assert_eq!(result, Ok(CirculationSuccess::CheckedOut));

    let book = item(&library, 1);
    assert_eq!(book.location(), Location::CheckedOut);
    assert_eq!(book.checked_out_by(), Some(PatronId(1)));
    assert_eq!(book.date_checked_out(), Some(0));
    assert_eq!(book.due_day(), Some(21));
    assert!(patron(&library, 1).has_item(ItemId(1)));
}

#[test]
fn test_check_out_already_checked_out() {
    let mut library = setup_test_library();

    assert!(library.check_out_item(PatronId(1), ItemId(1)).is_ok());
    let result = library.check_out_item(PatronId(2), ItemId(1));
    assert_eq!(result, Err(CirculationError::ItemAlreadyCheckedOut));

    // The first checkout stands
    assert_eq!(item(&library, 1).checked_out_by(), Some(PatronId(1)));
    assert!(!patron(&library, 2).has_item(ItemId(1)));
}

#[test]
fn test_check_out_blocked_by_other_patrons_hold() {
    let mut library = setup_test_library();

    assert!(library.request_item(PatronId(2), ItemId(1)).is_ok());
    let result = library.check_out_item(PatronId(1), ItemId(1));
    assert_eq!(result, Err(CirculationError::ItemOnHoldByOtherPatron));

    let book = item(&library, 1);
    assert_eq!(book.location(), Location::OnHoldShelf);
    assert_eq!(book.requested_by(), Some(PatronId(2)));
}

#[test]
fn test_holder_check_out_clears_hold() {
    let mut library = setup_test_library();

    assert!(library.request_item(PatronId(2), ItemId(1)).is_ok());
    assert_eq!(item(&library, 1).location(), Location::OnHoldShelf);

    let result = library.check_out_item(PatronId(2), ItemId(1));
    assert_eq!(result, Ok(CirculationSuccess::CheckedOut));

    let book = item(&library, 1);
    assert_eq!(book.location(), Location::CheckedOut);
    assert_eq!(book.checked_out_by(), Some(PatronId(2)));
    assert_eq!(book.requested_by(), None);
}

#[test]
fn test_check_out_return_round_trip() {
    let mut library = setup_test_library();

    assert!(library.check_out_item(PatronId(1), ItemId(1)).is_ok());
    let result = library.return_item(ItemId(1));
    assert_eq!(result, Ok(CirculationSuccess::Returned));

    let book = item(&library, 1);
    assert_eq!(book.location(), Location::OnShelf);
    assert_eq!(book.checked_out_by(), None);
    assert!(!patron(&library, 1).has_item(ItemId(1)));

    // The checkout day is only overwritten by the next checkout
    assert_eq!(book.date_checked_out(), Some(0));
    assert_eq!(book.due_day(), None);
}

#[test]
fn test_return_unknown_item() {
    let mut library = setup_test_library();
    assert_eq!(library.return_item(ItemId(99)), Err(CirculationError::ItemNotFound));
}

#[test]
fn test_return_item_already_in_library() {
    let mut library = setup_test_library();
    assert_eq!(library.return_item(ItemId(1)), Err(CirculationError::ItemAlreadyInLibrary));
    assert_eq!(item(&library, 1).location(), Location::OnShelf);
}

#[test]
fn test_return_with_pending_hold_goes_to_hold_shelf() {
    let mut library = setup_test_library();

    assert!(library.check_out_item(PatronId(1), ItemId(1)).is_ok());
    assert!(library.request_item(PatronId(2), ItemId(1)).is_ok());

    // The hold queues behind the borrower
    assert_eq!(item(&library, 1).location(), Location::CheckedOut);

    assert!(library.return_item(ItemId(1)).is_ok());
    let book = item(&library, 1);
    assert_eq!(book.location(), Location::OnHoldShelf);
    assert_eq!(book.requested_by(), Some(PatronId(2)));
    assert_eq!(book.checked_out_by(), None);
}

#[test]
fn test_request_moves_shelf_item_to_hold_shelf() {
    let mut library = setup_test_library();

    let result = library.request_item(PatronId(1), ItemId(2));
    assert_eq!(result, Ok(CirculationSuccess::RequestPlaced));

    let album = item(&library, 2);
    assert_eq!(album.location(), Location::OnHoldShelf);
    assert_eq!(album.requested_by(), Some(PatronId(1)));
}

#[test]
fn test_request_unknown_ids() {
    let mut library = setup_test_library();

    assert_eq!(library.request_item(PatronId(99), ItemId(1)), Err(CirculationError::PatronNotFound));
    assert_eq!(library.request_item(PatronId(1), ItemId(99)), Err(CirculationError::ItemNotFound));
    assert_eq!(item(&library, 1).requested_by(), None);
}

#[test]
fn test_second_request_is_rejected() {
    let mut library = setup_test_library();

    assert!(library.request_item(PatronId(1), ItemId(1)).is_ok());
    let result = library.request_item(PatronId(2), ItemId(1));
    assert_eq!(result, Err(CirculationError::ItemAlreadyOnHold));

    // The first hold is untouched
    assert_eq!(item(&library, 1).requested_by(), Some(PatronId(1)));
}

#[test]
fn test_self_request_while_borrowing_is_allowed() {
    let mut library = setup_test_library();

    assert!(library.check_out_item(PatronId(1), ItemId(1)).is_ok());
    let result = library.request_item(PatronId(1), ItemId(1));
    assert_eq!(result, Ok(CirculationSuccess::RequestPlaced));
    assert_eq!(item(&library, 1).location(), Location::CheckedOut);

    // The return parks the item on the hold shelf for the same patron,
    // whose next checkout collects it and clears the hold.
    assert!(library.return_item(ItemId(1)).is_ok());
    assert_eq!(item(&library, 1).location(), Location::OnHoldShelf);
    assert_eq!(item(&library, 1).requested_by(), Some(PatronId(1)));

    assert!(library.check_out_item(PatronId(1), ItemId(1)).is_ok());
    assert_eq!(item(&library, 1).requested_by(), None);
}

#[test]
fn test_day_counter_advances() {
    let mut library = setup_test_library();
    assert_eq!(library.current_day(), 0);

    for _ in 0..5 {
        library.advance_day();
    }
    assert_eq!(library.current_day(), 5);
}

#[test]
fn test_book_fine_walk() {
    let mut library = setup_test_library();

    // Book checked out on day 0 is due on day 21
    assert!(library.check_out_item(PatronId(1), ItemId(1)).is_ok());

    for _ in 0..21 {
        library.advance_day();
    }
    assert_eq!(library.current_day(), 21);
    assert_eq!(patron(&library, 1).fine_balance(), FineAmount::ZERO);

    // Day 22 is the first day past due
    library.advance_day();
    assert_eq!(patron(&library, 1).fine_balance(), FineAmount::from_cents(10));

    // Each further day accrues another increment
    library.advance_day();
    library.advance_day();
    assert_eq!(patron(&library, 1).fine_balance(), FineAmount::from_cents(30));
}

#[test]
fn test_fines_accrue_per_overdue_item() {
    let mut library = setup_test_library();

    // Movie due day 7, album due day 14, both out to Alice on day 0
    assert!(library.check_out_item(PatronId(1), ItemId(3)).is_ok());
    assert!(library.check_out_item(PatronId(1), ItemId(2)).is_ok());

    for _ in 0..8 {
        library.advance_day();
    }
    // Only the movie is overdue on day 8
    assert_eq!(patron(&library, 1).fine_balance(), FineAmount::from_cents(10));

    for _ in 0..6 {
        library.advance_day();
    }
    // Days 9 through 14: movie only, album still due exactly on day 14
    assert_eq!(patron(&library, 1).fine_balance(), FineAmount::from_cents(70));

    library.advance_day();
    // Day 15 fines both
    assert_eq!(patron(&library, 1).fine_balance(), FineAmount::from_cents(90));
}

#[test]
fn test_returned_item_stops_accruing() {
    let mut library = setup_test_library();

    assert!(library.check_out_item(PatronId(1), ItemId(3)).is_ok());
    for _ in 0..8 {
        library.advance_day();
    }
    assert_eq!(patron(&library, 1).fine_balance(), FineAmount::from_cents(10));

    assert!(library.return_item(ItemId(3)).is_ok());
    for _ in 0..5 {
        library.advance_day();
    }
    assert_eq!(patron(&library, 1).fine_balance(), FineAmount::from_cents(10));
}

#[test]
fn test_pay_fine_unknown_patron() {
    let mut library = setup_test_library();
    let result = library.pay_fine(PatronId(99), FineAmount::from_cents(10));
    assert_eq!(result, Err(CirculationError::PatronNotFound));
}

#[test]
fn test_pay_fine_decreases_balance_exactly() {
    let mut library = setup_test_library();

    assert!(library.check_out_item(PatronId(1), ItemId(3)).is_ok());
    for _ in 0..10 {
        library.advance_day();
    }
    assert_eq!(patron(&library, 1).fine_balance(), FineAmount::from_cents(30));

    let result = library.pay_fine(PatronId(1), FineAmount::from_cents(20));
    assert_eq!(result, Ok(CirculationSuccess::PaymentAccepted));
    assert_eq!(patron(&library, 1).fine_balance(), FineAmount::from_cents(10));
}

#[test]
fn test_overpayment_leaves_credit() {
    let mut library = setup_test_library();

    assert!(library.pay_fine(PatronId(2), FineAmount::from_cents(50)).is_ok());
    let balance = patron(&library, 2).fine_balance();
    assert!(balance.is_negative());
    assert_eq!(balance, FineAmount::from_cents(-50));
}

#[test]
fn test_duplicate_ids_keep_first_entry() {
    let mut library = setup_test_library();

    library.add_item(LibraryItem::book(ItemId(1), "Impostor", "Nobody"));
    library.add_patron(Patron::new(PatronId(1), "Mallory"));

    assert_eq!(item(&library, 1).title(), "The Dispossessed");
    assert_eq!(patron(&library, 1).name(), "Alice");
}

#[test]
fn test_status_strings_match_contract() {
    assert_eq!(CirculationSuccess::CheckedOut.to_string(), "check out successful");
    assert_eq!(CirculationSuccess::Returned.to_string(), "return successful");
    assert_eq!(CirculationSuccess::RequestPlaced.to_string(), "request successful");
    assert_eq!(CirculationSuccess::PaymentAccepted.to_string(), "payment successful");

    assert_eq!(CirculationError::PatronNotFound.to_string(), "patron not found");
    assert_eq!(CirculationError::ItemNotFound.to_string(), "item not found");
    assert_eq!(CirculationError::ItemAlreadyCheckedOut.to_string(), "item already checked out");
    assert_eq!(
        CirculationError::ItemOnHoldByOtherPatron.to_string(),
        "item on hold by other patron"
    );
    assert_eq!(CirculationError::ItemAlreadyInLibrary.to_string(), "item already in library");
    assert_eq!(CirculationError::ItemAlreadyOnHold.to_string(), "item already on hold");
}

mod properties {
    use proptest::prelude::*;

    use super::{FineAmount, ItemId, Location, PatronId, setup_test_library};

    /// One randomly generated desk operation.
    #[derive(Debug, Clone)]
    enum Op {
        /// Attempt a checkout (patron id, item id).
        CheckOut(u32, u32),
        /// Attempt a return (item id).
        Return(u32),
        /// Attempt a hold (patron id, item id).
        Request(u32, u32),
        /// Attempt a payment (patron id, cents).
        Pay(u32, i64),
        /// Advance the clock one day.
        AdvanceDay,
    }

    /// Strategy producing operations over a mix of known and unknown ids.
    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u32..4, 0u32..5).prop_map(|(p, i)| Op::CheckOut(p, i)),
            (0u32..5).prop_map(Op::Return),
            (0u32..4, 0u32..5).prop_map(|(p, i)| Op::Request(p, i)),
            (0u32..4, -100i64..500).prop_map(|(p, cents)| Op::Pay(p, cents)),
            Just(Op::AdvanceDay),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: after any operation sequence, an item is checked out
        /// exactly when it has a borrower, and the patron checkout lists and
        /// item back-references agree with each other.
        #[test]
        fn desk_invariants_hold_under_any_operation_sequence(
            ops in prop::collection::vec(op_strategy(), 1..40)
        ) {
            let mut library = setup_test_library();

            for op in ops {
                match op {
                    Op::CheckOut(p, i) => {
                        let _ = library.check_out_item(PatronId(p), ItemId(i));
                    }
                    Op::Return(i) => {
                        let _ = library.return_item(ItemId(i));
                    }
                    Op::Request(p, i) => {
                        let _ = library.request_item(PatronId(p), ItemId(i));
                    }
                    Op::Pay(p, cents) => {
                        let _ = library.pay_fine(PatronId(p), FineAmount::from_cents(cents));
                    }
                    Op::AdvanceDay => library.advance_day(),
                }
            }

            for item in library.items() {
                prop_assert_eq!(
                    item.location() == Location::CheckedOut,
                    item.checked_out_by().is_some()
                );
                if let Some(borrower) = item.checked_out_by() {
                    prop_assert!(
                        library.patron(borrower).is_some_and(|patron| patron.has_item(item.id()))
                    );
                }
            }

            for patron in library.patrons() {
                for &item_id in patron.checked_out_items() {
                    prop_assert!(
                        library
                            .item(item_id)
                            .is_some_and(|item| item.checked_out_by() == Some(patron.id()))
                    );
                }
            }
        }

        /// Property: fine balances never decrease during the daily sweep.
        #[test]
        fn advance_day_never_lowers_a_balance(days in 1usize..60) {
            let mut library = setup_test_library();
            let _ = library.check_out_item(PatronId(1), ItemId(1));
            let _ = library.check_out_item(PatronId(2), ItemId(3));

            let mut previous = FineAmount::ZERO;
            for _ in 0..days {
                library.advance_day();
                let total = library
                    .patrons()
                    .fold(FineAmount::ZERO, |sum, patron| sum.saturating_add(patron.fine_balance()));
                prop_assert!(total >= previous);
                previous = total;
            }
        }
    }
}

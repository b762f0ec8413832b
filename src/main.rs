use circulation_system::{
    CirculationReport, FineAmount, ItemId, Library, LibraryItem, NotificationService, Patron,
    PatronId, TransitionLogger,
};

fn setup_circulation_desk(library: &mut Library) {
    // Holdings
    library.add_item(LibraryItem::book(ItemId(1), "The Dispossessed", "Ursula K. Le Guin"));
    library.add_item(LibraryItem::album(ItemId(2), "Kind of Blue", "Miles Davis"));
    library.add_item(LibraryItem::movie(ItemId(3), "Seven Samurai", "Akira Kurosawa"));

    // Members
    library.add_patron(Patron::new(PatronId(1), "Alice"));
    library.add_patron(Patron::new(PatronId(2), "Bob"));
}

fn main() {
    let mut library = Library::new();

    // Register observers
    library.register_observer(Box::new(TransitionLogger));
    library.register_observer(Box::new(NotificationService));

    setup_circulation_desk(&mut library);

    let alice = PatronId(1);
    let bob = PatronId(2);
    let book = ItemId(1);
    let movie = ItemId(3);

    println!("Initial state: {library}");

    // Alice checks out the book
    match library.check_out_item(alice, book) {
        Ok(status) => println!("{status}"),
        Err(e) => println!("Error: {e}"),
    }

    // Bob requests the same book; the hold queues behind Alice's checkout
    match library.request_item(bob, book) {
        Ok(status) => println!("{status}"),
        Err(e) => println!("Error: {e}"),
    }

    // Bob cannot check it out while Alice has it
    match library.check_out_item(bob, book) {
        Ok(status) => println!("{status}"),
        Err(e) => println!("Error: {e}"),
    }

    // Alice returns the book; it lands on the hold shelf for Bob
    match library.return_item(book) {
        Ok(status) => println!("{status}"),
        Err(e) => println!("Error: {e}"),
    }

    // Alice cannot collect Bob's hold
    match library.check_out_item(alice, book) {
        Ok(status) => println!("{status}"),
        Err(e) => println!("Error: {e}"),
    }

    // Bob collects his hold
    match library.check_out_item(bob, book) {
        Ok(status) => println!("{status}"),
        Err(e) => println!("Error: {e}"),
    }

    // Alice takes the movie, which is due back in 7 days
    match library.check_out_item(alice, movie) {
        Ok(status) => println!("{status}"),
        Err(e) => println!("Error: {e}"),
    }

    // Ten days pass; the movie is overdue from day 8 on
    for _ in 0..10 {
        library.advance_day();
    }
    println!("Day {} now", library.current_day());

    if let Some(patron) = library.patron(alice) {
        println!("Alice owes {}", patron.fine_balance());
    }

    // Alice pays most of it down
    match library.pay_fine(alice, FineAmount::from_cents(20)) {
        Ok(status) => println!("{status}"),
        Err(e) => println!("Error: {e}"),
    }

    if let Some(patron) = library.patron(alice) {
        println!("Alice owes {}", patron.fine_balance());
    }

    // An id nobody knows
    match library.pay_fine(PatronId(42), FineAmount::from_cents(5)) {
        Ok(status) => println!("{status}"),
        Err(e) => println!("Error: {e}"),
    }

    println!();
    CirculationReport::print_desk(&library);

    println!();
    CirculationReport::print_locations(&library);

    println!("\nDOT graph of the desk:\n{}", CirculationReport::generate_dot(&library));
}

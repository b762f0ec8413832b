use crate::{
    item::{LibraryItem, Location},
    library::Library,
    patron::Patron,
};

/// Reporting tools for the circulation desk.
#[derive(Debug)]
pub struct CirculationReport;

impl CirculationReport {
    /// Print a textual summary of the desk: every holding, every member, the clock.
    pub fn print_desk(library: &Library) {
        println!("=== Circulation Desk (day {}) ===", library.current_day());

        let mut items: Vec<&LibraryItem> = library.items().collect();
        items.sort_by_key(|item| item.id());

        println!("\nHoldings:");
        for item in items {
            let mut line = format!("  {} by {} - {}", item, item.kind().creator(), item.location());
            if let Some(borrower) = item.checked_out_by() {
                line.push_str(&format!(", checked out by patron {borrower}"));
                if let Some(due) = item.due_day() {
                    line.push_str(&format!(", due day {due}"));
                }
            }
            if let Some(requester) = item.requested_by() {
                line.push_str(&format!(", requested by patron {requester}"));
            }
            println!("{line}");
        }

        let mut patrons: Vec<&Patron> = library.patrons().collect();
        patrons.sort_by_key(|patron| patron.id());

        println!("\nMembers:");
        for patron in patrons {
            println!(
                "  {} - {} item(s) out, balance {}",
                patron,
                patron.checked_out_items().len(),
                patron.fine_balance()
            );
        }
    }

    /// Print the desk roster with a glyph per location
    pub fn print_locations(library: &Library) {
        let mut items: Vec<&LibraryItem> = library.items().collect();
        items.sort_by_key(|item| item.id());

        println!("=== Locations ===");
        for item in items {
            println!("{}: {}", Self::format_location(item.location()), item);
        }
    }

    /// Format a location for display
    fn format_location(location: Location) -> &'static str {
        match location {
            Location::OnShelf => "📚 ON_SHELF",
            Location::CheckedOut => "📖 CHECKED_OUT",
            Location::OnHoldShelf => "🔖 ON_HOLD_SHELF",
        }
    }

    /// Generate a DOT graph of the live desk: items colored by location,
    /// with edges to their borrowers and requesters.
    #[must_use]
    pub fn generate_dot(library: &Library) -> String {
        let mut dot = String::from("digraph circulation_desk {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=circle, style=filled, fillcolor=lightblue];\n");

        let mut patrons: Vec<&Patron> = library.patrons().collect();
        patrons.sort_by_key(|patron| patron.id());

        for patron in &patrons {
            let label = Self::escape_label(patron.name());
            let id = patron.id();
            dot.push_str(&format!(
                "  p{id} [label=\"{label}\", shape=box, fillcolor=lightyellow];\n"
            ));
        }

        let mut items: Vec<&LibraryItem> = library.items().collect();
        items.sort_by_key(|item| item.id());

        for item in &items {
            let fillcolor = match item.location() {
                Location::OnShelf => "palegreen",
                Location::CheckedOut => "gold",
                Location::OnHoldShelf => "orange",
            };
            let label = Self::escape_label(item.title());
            let id = item.id();
            dot.push_str(&format!("  i{id} [label=\"{label}\", fillcolor={fillcolor}];\n"));
        }

        for item in &items {
            let id = item.id();
            if let Some(borrower) = item.checked_out_by() {
                dot.push_str(&format!(
                    "  i{id} -> p{borrower} [label=\"checked out by\", color=black];\n"
                ));
            }
            if let Some(requester) = item.requested_by() {
                dot.push_str(&format!(
                    "  i{id} -> p{requester} [label=\"requested by\", style=dashed];\n"
                ));
            }
        }

        dot.push_str("}\n");
        dot
    }

    /// Escape a node label for DOT, quoting embedded double quotes
    fn escape_label(label: &str) -> String {
        label.replace('"', "\\\"")
    }
}

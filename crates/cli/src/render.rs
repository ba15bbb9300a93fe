//! Console rendering of structured results.

use stockroom_core::DomainError;
use stockroom_inventory::Item;

pub const HELP: &str = "\
commands:
  register <user> <pass> <admin|manager|user>
  login <user> <pass>
  logout
  whoami
  add <id> <name> <qty> <price> <category>
  edit <id> [name=..] [qty=..] [price=..] [category=..] [status=..]
  delete <id>
  list
  search <free text, e.g. 'show items under $50 in stock'>
  quit";

/// One-line item rendering.
pub fn item_line(item: &Item) -> String {
    format!(
        "ID: {}, Name: {}, Qty: {}, Price: ${}, Category: {}, Status: {}",
        item.id(),
        item.name(),
        item.quantity(),
        item.price(),
        item.category(),
        item.status()
    )
}

/// Multi-line listing, or the given placeholder when empty.
pub fn item_table(items: &[&Item], empty_message: &str) -> String {
    if items.is_empty() {
        return empty_message.to_string();
    }
    items
        .iter()
        .map(|item| item_line(item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human-readable error rendering; the distinct denial reasons come through
/// the error's own Display.
pub fn error(err: &DomainError) -> String {
    format!("error: {err}")
}

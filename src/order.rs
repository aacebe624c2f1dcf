use std::fmt;

use crate::Rupiah;
use crate::model::Item;

/// Items picked during one session, in the order they were added.
///
/// Entries borrow from the catalog; the same entry may appear more than once.
#[derive(Debug, Clone, Default)]
pub struct Order<'c> {
    items: Vec<&'c Item>,
}

impl<'c> Order<'c> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn add_item(&mut self, item: &'c Item) {
        self.items.push(item);
    }

    /// Sum of item prices, recomputed on every call.
    pub fn calculate_total(&self) -> Rupiah {
        self.items.iter().map(|item| item.price()).sum()
    }

    pub fn items(&self) -> &[&'c Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Printable bill: header, one line per item and the total.
    pub fn show_order(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Order<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== RINCIAN PESANAN ===")?;
        if self.items.is_empty() {
            writeln!(f, "Tidak ada item yang dipesan.")?;
        }
        for item in &self.items {
            writeln!(f, "- {}", item.info())?;
        }
        write!(f, "Total Tagihan: {}", self.calculate_total())
    }
}

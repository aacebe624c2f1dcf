//! Core domain types for the laundry order flow.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::Rupiah;

/// Errors raised while constructing an [`Item`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemError {
    #[error("item name must not be empty")]
    EmptyName,
}

/// What kind of entry an item is. Serialized as its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// A laundry service.
    #[serde(rename = "Layanan")]
    Service,
    /// An add-on product.
    #[serde(rename = "Produk")]
    Product,
}

impl ItemKind {
    pub const fn label(self) -> &'static str {
        match self {
            ItemKind::Service => "Layanan",
            ItemKind::Product => "Produk",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A purchasable catalog entry.
///
/// Items are immutable once built; orders borrow them from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    name: String,
    price: Rupiah,
    kind: ItemKind,
}

impl Item {
    pub fn new(kind: ItemKind, name: impl Into<String>, price: u64) -> Result<Self, ItemError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ItemError::EmptyName);
        }
        Ok(Self {
            name,
            price: Rupiah::new(price),
            kind,
        })
    }

    pub fn service(name: impl Into<String>, price: u64) -> Result<Self, ItemError> {
        Self::new(ItemKind::Service, name, price)
    }

    pub fn product(name: impl Into<String>, price: u64) -> Result<Self, ItemError> {
        Self::new(ItemKind::Product, name, price)
    }

    /// Builds an item from a built-in table entry with a known non-empty name.
    pub(crate) fn fixed(kind: ItemKind, name: &'static str, price: u64) -> Self {
        debug_assert!(!name.trim().is_empty());
        Self {
            name: name.to_string(),
            price: Rupiah::new(price),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Rupiah {
        self.price
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// `"Layanan"` for services, `"Produk"` for products.
    pub fn type_label(&self) -> &'static str {
        self.kind.label()
    }

    /// One-line description, e.g. `Layanan: Cuci Basah - Rp8,000`.
    pub fn info(&self) -> String {
        format!("{}: {} - {}", self.kind, self.name, self.price)
    }
}

/// Accepted payment methods, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    GoPay,
    #[serde(rename = "OVO")]
    Ovo,
    ShopeePay,
    Bank,
    #[serde(rename = "QRIS")]
    Qris,
    Tunai,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 6] = [
        PaymentMethod::GoPay,
        PaymentMethod::Ovo,
        PaymentMethod::ShopeePay,
        PaymentMethod::Bank,
        PaymentMethod::Qris,
        PaymentMethod::Tunai,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            PaymentMethod::GoPay => "GoPay",
            PaymentMethod::Ovo => "OVO",
            PaymentMethod::ShopeePay => "ShopeePay",
            PaymentMethod::Bank => "Bank",
            PaymentMethod::Qris => "QRIS",
            PaymentMethod::Tunai => "Tunai",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

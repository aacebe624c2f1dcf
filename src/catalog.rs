//! Fixed catalog of laundry services, add-on products and payment methods.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use thiserror::Error;

use crate::model::{Item, ItemKind, PaymentMethod};

const SERVICES: [(u32, &str, u64); 10] = [
    (1, "Cuci Kering", 10_000),
    (2, "Cuci Basah", 8_000),
    (3, "Self Service", 5_000),
    (4, "Cuci Rapi", 12_000),
    (5, "Cuci Sepatu", 15_000),
    (6, "Cuci Tas", 18_000),
    (7, "Cuci Gorden", 25_000),
    (8, "Cuci Karpet", 30_000),
    (9, "Cuci Boneka", 20_000),
    (10, "Cuci Selimut", 22_000),
];

const PRODUCTS: [(u32, &str, u64); 3] = [
    (1, "Deterjen", 10_000),
    (2, "Pemutih", 8_000),
    (3, "Tas Plastik Besar", 5_000),
];

/// Which of the two item maps to look in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Services,
    Products,
}

impl Section {
    /// Heading shown above the item list.
    pub const fn title(self) -> &'static str {
        match self {
            Section::Services => "DAFTAR LAYANAN",
            Section::Products => "DAFTAR PRODUK",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Services => f.write_str("services"),
            Section::Products => f.write_str("products"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no entry {key} in {section}")]
    NotFound { section: Section, key: u32 },

    #[error("duplicate key {key} in {section}")]
    DuplicateKey { section: Section, key: u32 },

    #[error("key 0 is reserved in {section}")]
    ZeroKey { section: Section },
}

/// Read-only table of everything a customer can order and pay with.
#[derive(Debug, Clone)]
pub struct Catalog {
    services: BTreeMap<u32, Item>,
    products: BTreeMap<u32, Item>,
    payment_methods: Vec<PaymentMethod>,
}

impl Catalog {
    /// Build a catalog, rejecting key 0 (it means "back" in menus) and duplicate keys.
    pub fn new(
        services: impl IntoIterator<Item = (u32, Item)>,
        products: impl IntoIterator<Item = (u32, Item)>,
        payment_methods: impl IntoIterator<Item = PaymentMethod>,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            services: Self::index(Section::Services, services)?,
            products: Self::index(Section::Products, products)?,
            payment_methods: payment_methods.into_iter().collect(),
        })
    }

    /// The shop's built-in price list.
    pub fn laundry() -> Self {
        Self {
            services: Self::fixed_table(ItemKind::Service, &SERVICES),
            products: Self::fixed_table(ItemKind::Product, &PRODUCTS),
            payment_methods: PaymentMethod::ALL.to_vec(),
        }
    }

    /// Entries of a section in key order.
    pub fn entries(&self, section: Section) -> impl Iterator<Item = (u32, &Item)> + '_ {
        self.section(section).iter().map(|(key, item)| (*key, item))
    }

    pub fn lookup(&self, section: Section, key: u32) -> Result<&Item, CatalogError> {
        self.section(section)
            .get(&key)
            .ok_or(CatalogError::NotFound { section, key })
    }

    pub fn payment_methods(&self) -> &[PaymentMethod] {
        &self.payment_methods
    }

    /// Payment method by its 1-based menu number.
    pub fn payment_method(&self, choice: u32) -> Option<PaymentMethod> {
        let idx = usize::try_from(choice).ok()?.checked_sub(1)?;
        self.payment_methods.get(idx).copied()
    }

    fn section(&self, section: Section) -> &BTreeMap<u32, Item> {
        match section {
            Section::Services => &self.services,
            Section::Products => &self.products,
        }
    }

    fn fixed_table(kind: ItemKind, rows: &[(u32, &'static str, u64)]) -> BTreeMap<u32, Item> {
        rows.iter()
            .map(|&(key, name, price)| (key, Item::fixed(kind, name, price)))
            .collect()
    }

    fn index(
        section: Section,
        entries: impl IntoIterator<Item = (u32, Item)>,
    ) -> Result<BTreeMap<u32, Item>, CatalogError> {
        let mut map = BTreeMap::new();
        for (key, item) in entries {
            if key == 0 {
                return Err(CatalogError::ZeroKey { section });
            }
            match map.entry(key) {
                Entry::Occupied(_) => return Err(CatalogError::DuplicateKey { section, key }),
                Entry::Vacant(slot) => {
                    slot.insert(item);
                }
            }
        }
        Ok(map)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::laundry()
    }
}

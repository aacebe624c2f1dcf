pub mod catalog;
pub mod config;
pub mod ledger;
pub mod model;
pub mod order;
pub mod payment;
pub mod rupiah;
pub mod session;

pub use catalog::{Catalog, Section};
pub use config::Config;
pub use ledger::{TransactionLog, TransactionRecord};
pub use model::{Item, ItemKind, PaymentMethod};
pub use order::Order;
pub use payment::{Confirmation, Payment};
pub use rupiah::Rupiah;
pub use session::Session;

//! Append-only CSV log of completed checkouts.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::info;

use crate::Rupiah;
use crate::model::{ItemKind, PaymentMethod};
use crate::order::Order;

/// Column names written once at the top of a new log.
pub const HEADER: [&str; 6] = ["Date", "Item Name", "Kind", "Price", "Payment Method", "Total"];

/// Format of the `Date` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors that can occur when writing or reading the log
#[derive(Debug, Error)]
pub enum LogError {
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to encode rows: {0}")]
    Encode(#[from] csv::Error),

    #[error("line {line}: failed to parse record: {source}")]
    Parse { line: usize, source: csv::Error },
}

/// One logged row: a single item of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "Date", deserialize_with = "deserialize_timestamp")]
    pub date: NaiveDateTime,
    #[serde(rename = "Item Name")]
    pub item_name: String,
    #[serde(rename = "Kind")]
    pub kind: ItemKind,
    #[serde(rename = "Price")]
    pub price: Rupiah,
    #[serde(rename = "Payment Method")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "Total")]
    pub total: Rupiah,
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    date: &'a str,
    item_name: &'a str,
    kind: ItemKind,
    price: Rupiah,
    payment_method: PaymentMethod,
    total: Rupiah,
}

/// Handle to the transaction log file.
///
/// Appends from the same handle never interleave.
#[derive(Debug)]
pub struct TransactionLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl TransactionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row per order item, stamped with `at`, and return the number of rows.
    ///
    /// The header goes first when the file is missing or empty. The batch is
    /// encoded in memory and written with a single append, so a failure never
    /// leaves a success behind it.
    pub fn append(
        &self,
        order: &Order<'_>,
        method: PaymentMethod,
        at: NaiveDateTime,
    ) -> Result<usize, LogError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let write_header = self.needs_header()?;
        let date = at.format(TIMESTAMP_FORMAT).to_string();
        let total = order.calculate_total();

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        if write_header {
            writer.write_record(HEADER)?;
        }
        for item in order.items() {
            writer.serialize(OutputRow {
                date: &date,
                item_name: item.name(),
                kind: item.kind(),
                price: item.price(),
                payment_method: method,
                total,
            })?;
        }
        let batch = writer
            .into_inner()
            .map_err(|e| LogError::Encode(e.into_error().into()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        file.write_all(&batch)
            .and_then(|()| file.sync_data())
            .map_err(|source| self.io_error(source))?;

        info!(
            path = %self.path.display(),
            rows = order.len(),
            method = %method,
            total = %total,
            "checkout logged"
        );
        Ok(order.len())
    }

    /// Read every logged row back, in file order.
    pub fn records(
        &self,
    ) -> Result<impl Iterator<Item = Result<TransactionRecord, LogError>>, LogError> {
        let file = File::open(&self.path).map_err(|source| self.io_error(source))?;
        let reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

        Ok(reader
            .into_deserialize::<TransactionRecord>()
            .enumerate()
            .map(|(idx, result)| {
                let line = idx + 2; // 1-indexed, skip header
                result.map_err(|source| LogError::Parse { line, source })
            }))
    }

    fn needs_header(&self) -> Result<bool, LogError> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() == 0),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(true),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: io::Error) -> LogError {
        LogError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Section};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(hour, min, sec)
            .unwrap()
    }

    fn kering_and_deterjen(catalog: &Catalog) -> Order<'_> {
        let mut order = Order::new();
        order.add_item(catalog.lookup(Section::Services, 1).unwrap());
        order.add_item(catalog.lookup(Section::Products, 1).unwrap());
        order
    }

    #[test]
    fn append_to_new_file_writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let log = TransactionLog::new(dir.path().join("transaksi.csv"));
        let catalog = Catalog::laundry();
        let order = kering_and_deterjen(&catalog);

        let rows = log.append(&order, PaymentMethod::Qris, at(9, 30, 0)).unwrap();
        assert_eq!(rows, 2);

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            [
                "Date,Item Name,Kind,Price,Payment Method,Total",
                "2024-05-17 09:30:00,Cuci Kering,Layanan,10000,QRIS,20000",
                "2024-05-17 09:30:00,Deterjen,Produk,10000,QRIS,20000",
            ]
        );
    }

    #[test]
    fn append_to_existing_file_keeps_single_header() {
        let dir = TempDir::new().unwrap();
        let log = TransactionLog::new(dir.path().join("transaksi.csv"));
        let catalog = Catalog::laundry();
        let order = kering_and_deterjen(&catalog);

        log.append(&order, PaymentMethod::Qris, at(9, 30, 0)).unwrap();

        let mut second = Order::new();
        second.add_item(catalog.lookup(Section::Services, 8).unwrap());
        log.append(&second, PaymentMethod::Tunai, at(10, 0, 0)).unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.matches("Date,Item Name").count(), 1);
        assert_eq!(content.lines().count(), 4);
        assert_eq!(
            content.lines().last(),
            Some("2024-05-17 10:00:00,Cuci Karpet,Layanan,30000,Tunai,30000")
        );
    }

    #[test]
    fn append_to_empty_file_writes_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transaksi.csv");
        File::create(&path).unwrap();
        let log = TransactionLog::new(&path);
        let catalog = Catalog::laundry();

        log.append(&kering_and_deterjen(&catalog), PaymentMethod::GoPay, at(8, 0, 0))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Date,Item Name,Kind,Price,Payment Method,Total\n"));
    }

    #[test]
    fn append_never_rewrites_prior_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transaksi.csv");
        let existing = "Date,Item Name,Kind,Price,Payment Method,Total\n\
                        2024-01-01 00:00:00,Pemutih,Produk,8000,OVO,8000\n";
        fs::write(&path, existing).unwrap();
        let log = TransactionLog::new(&path);
        let catalog = Catalog::laundry();

        log.append(&kering_and_deterjen(&catalog), PaymentMethod::Bank, at(12, 0, 0))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(existing));
        assert_eq!(content.lines().count(), 4);
    }

    #[test]
    fn append_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let log = TransactionLog::new(dir.path().join("missing").join("transaksi.csv"));
        let catalog = Catalog::laundry();

        let err = log
            .append(&kering_and_deterjen(&catalog), PaymentMethod::Qris, at(9, 0, 0))
            .unwrap_err();
        assert!(matches!(err, LogError::Io { .. }));
        assert!(err.to_string().contains("transaksi.csv"));
    }

    #[test]
    fn records_read_back_logged_rows() {
        let dir = TempDir::new().unwrap();
        let log = TransactionLog::new(dir.path().join("transaksi.csv"));
        let catalog = Catalog::laundry();
        log.append(&kering_and_deterjen(&catalog), PaymentMethod::Ovo, at(14, 5, 9))
            .unwrap();

        let records: Vec<_> = log.records().unwrap().map(Result::unwrap).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[1],
            TransactionRecord {
                date: at(14, 5, 9),
                item_name: "Deterjen".to_string(),
                kind: ItemKind::Product,
                price: Rupiah::new(10_000),
                payment_method: PaymentMethod::Ovo,
                total: Rupiah::new(20_000),
            }
        );
        assert!(records.iter().all(|r| r.date == records[0].date));
    }

    #[test]
    fn records_report_bad_rows_with_line_number() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transaksi.csv");
        fs::write(
            &path,
            "Date,Item Name,Kind,Price,Payment Method,Total\n\
             2024-01-01 00:00:00,Pemutih,Produk,8000,OVO,8000\n\
             2024-01-01 00:00:00,Pemutih,Barang,8000,OVO,8000\n",
        )
        .unwrap();
        let log = TransactionLog::new(&path);

        let results: Vec<_> = log.records().unwrap().collect();
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(LogError::Parse { line: 3, .. })));
    }

    #[test]
    fn records_reject_malformed_dates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transaksi.csv");
        fs::write(
            &path,
            "Date,Item Name,Kind,Price,Payment Method,Total\n\
             2024-01-01 00:00:00,Pemutih,Produk,8000,OVO,8000\n\
             17/05/2024 09:30,Pemutih,Produk,8000,OVO,8000\n",
        )
        .unwrap();
        let log = TransactionLog::new(&path);

        let results: Vec<_> = log.records().unwrap().collect();
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0].as_ref().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert!(matches!(results[1], Err(LogError::Parse { line: 3, .. })));
    }

    #[test]
    fn records_of_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let log = TransactionLog::new(dir.path().join("nothing.csv"));
        assert!(matches!(log.records(), Err(LogError::Io { .. })));
    }
}

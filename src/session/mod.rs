//! Interactive ordering session.
//!
//! The session is a menu state machine. It consumes one line of input at a
//! time, updates the order, and writes the next screen to its output.
//! Also supports an async stream of input lines.

use chrono::Local;
use std::io::Write;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Section};
use crate::ledger::TransactionLog;
use crate::model::PaymentMethod;
use crate::order::Order;
use crate::payment::Payment;

mod state;
pub use state::{MainChoice, Screen};

mod error;
pub use error::{InputError, SessionError};

/// Parse a menu selection.
///
/// Negative or oversized numbers parse but are reported as out of range.
pub fn parse_choice(input: &str) -> Result<u32, InputError> {
    let trimmed = input.trim();
    let number: i64 = trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;
    u32::try_from(number).map_err(|_| InputError::OutOfRange(number))
}

/// How much of the current screen to draw after handling input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Render {
    /// Title, options and prompt.
    Full,
    /// Only the prompt line.
    Prompt,
}

/// One customer's ordering session.
///
/// Borrows the catalog and the transaction log; owns the order and the console output.
pub struct Session<'c, W> {
    catalog: &'c Catalog,
    ledger: &'c TransactionLog,
    order: Order<'c>,
    screen: Screen,
    finished: bool,
    out: W,
}

/// Public API
impl<'c, W: Write> Session<'c, W> {
    pub fn new(catalog: &'c Catalog, ledger: &'c TransactionLog, out: W) -> Self {
        Self {
            catalog,
            ledger,
            order: Order::new(),
            screen: Screen::Main,
            finished: false,
            out,
        }
    }

    /// Run the session over the given input lines until the user exits,
    /// completes a checkout, or the input ends.
    pub async fn run(
        &mut self,
        mut input: impl Stream<Item = String> + Unpin,
    ) -> Result<(), SessionError> {
        self.start()?;
        while !self.finished {
            let Some(line) = input.next().await else {
                info!("input closed, ending session");
                break;
            };
            self.handle(&line)?;
        }
        Ok(())
    }

    /// Draw the first screen.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.render(Render::Full)
    }

    /// Handle one line of input on the current screen.
    ///
    /// Bad input is reported on the output and never returned as an error;
    /// only console failures are.
    pub fn handle(&mut self, input: &str) -> Result<(), SessionError> {
        if self.finished {
            return Ok(());
        }

        let next = match self.screen {
            Screen::Main => self.handle_main(input)?,
            Screen::Browse(section) => self.handle_browse(section, input)?,
            Screen::Payment => self.handle_payment(input)?,
        };

        if !self.finished {
            self.render(next)?;
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn order(&self) -> &Order<'c> {
        &self.order
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consume the session and return its output sink.
    pub fn into_output(self) -> W {
        self.out
    }
}

/// Private API
impl<'c, W: Write> Session<'c, W> {
    fn handle_main(&mut self, input: &str) -> Result<Render, SessionError> {
        let choice = parse_choice(input).and_then(|number| {
            MainChoice::try_from(number).map_err(|n| InputError::OutOfRange(n.into()))
        });

        match choice {
            Ok(MainChoice::AddService) => self.screen = Screen::Browse(Section::Services),
            Ok(MainChoice::AddProduct) => self.screen = Screen::Browse(Section::Products),
            Ok(MainChoice::ShowOrder) => {
                writeln!(self.out)?;
                writeln!(self.out, "{}", self.order)?;
            }
            Ok(MainChoice::Checkout) => {
                if self.order.calculate_total().is_zero() {
                    debug!("checkout refused: order is empty");
                    writeln!(self.out, "❌ Anda belum menambahkan item apa pun.")?;
                } else {
                    self.screen = Screen::Payment;
                }
            }
            Ok(MainChoice::Exit) => {
                info!(items = self.order.len(), "session exited without payment");
                writeln!(self.out, "👋 Terima kasih. Sampai jumpa!")?;
                self.finished = true;
            }
            Err(e) => self.reject(&e, "⚠ Masukkan angka saja.", "❌ Menu tidak tersedia.")?,
        }
        Ok(Render::Full)
    }

    fn handle_browse(&mut self, section: Section, input: &str) -> Result<Render, SessionError> {
        let catalog = self.catalog;
        match parse_choice(input) {
            Ok(0) => self.screen = Screen::Main,
            Ok(key) => match catalog.lookup(section, key) {
                Ok(item) => {
                    self.order.add_item(item);
                    info!(
                        item = item.name(),
                        price = %item.price(),
                        total = %self.order.calculate_total(),
                        "item added"
                    );
                    writeln!(self.out, "✔ {} ditambahkan ke pesanan.", item.name())?;
                }
                Err(e) => {
                    debug!(reason = %e, "selection rejected");
                    writeln!(self.out, "❌ Pilihan tidak valid.")?;
                }
            },
            Err(e) => self.reject(&e, "⚠ Masukkan angka yang valid.", "❌ Pilihan tidak valid.")?,
        }
        Ok(Render::Full)
    }

    fn handle_payment(&mut self, input: &str) -> Result<Render, SessionError> {
        match parse_choice(input) {
            Ok(0) => {
                self.screen = Screen::Main;
                Ok(Render::Full)
            }
            Ok(choice) => match self.catalog.payment_method(choice) {
                Some(method) => {
                    self.checkout(method)?;
                    Ok(Render::Full)
                }
                None => {
                    debug!(choice, "payment method rejected");
                    writeln!(self.out, "❌ Pilihan tidak valid.")?;
                    Ok(Render::Prompt)
                }
            },
            Err(e) => {
                self.reject(&e, "⚠ Masukkan angka yang valid.", "❌ Pilihan tidak valid.")?;
                Ok(Render::Prompt)
            }
        }
    }

    /// Confirm the payment first, then log it. A logging failure is reported
    /// but does not undo the confirmed payment.
    fn checkout(&mut self, method: PaymentMethod) -> Result<(), SessionError> {
        let total = self.order.calculate_total();
        let confirmation = Payment::new(method, total).process();
        writeln!(self.out)?;
        writeln!(self.out, "{confirmation}")?;
        self.out.flush()?;

        match self
            .ledger
            .append(&self.order, method, Local::now().naive_local())
        {
            Ok(_) => writeln!(
                self.out,
                "📁 Transaksi berhasil disimpan ke file '{}'",
                self.ledger.path().display()
            )?,
            Err(e) => {
                warn!(error = %e, "failed to log transaction");
                writeln!(self.out, "❌ Gagal menyimpan transaksi: {e}")?;
            }
        }

        self.finished = true;
        Ok(())
    }

    fn reject(
        &mut self,
        error: &InputError,
        not_a_number: &str,
        out_of_range: &str,
    ) -> Result<(), SessionError> {
        debug!(screen = ?self.screen, reason = %error, "input rejected");
        let message = match error {
            InputError::NotANumber(_) => not_a_number,
            InputError::OutOfRange(_) => out_of_range,
        };
        writeln!(self.out, "{message}")?;
        Ok(())
    }

    fn render(&mut self, render: Render) -> Result<(), SessionError> {
        let catalog = self.catalog;
        match (self.screen, render) {
            (Screen::Main, _) => {
                writeln!(self.out)?;
                writeln!(self.out, "=== MENU UTAMA ===")?;
                writeln!(self.out, "1. Tambah Layanan Laundry")?;
                writeln!(self.out, "2. Tambah Produk Tambahan")?;
                writeln!(self.out, "3. Lihat Rincian Pesanan")?;
                writeln!(self.out, "4. Proses Pembayaran")?;
                writeln!(self.out, "0. Keluar")?;
                write!(self.out, "Pilih menu: ")?;
            }
            (Screen::Browse(section), _) => {
                writeln!(self.out)?;
                writeln!(self.out, "=== {} ===", section.title())?;
                for (key, item) in catalog.entries(section) {
                    writeln!(self.out, "{key}. {}", item.info())?;
                }
                writeln!(self.out, "0. Kembali")?;
                write!(self.out, "Pilih nomor (0 untuk kembali): ")?;
            }
            (Screen::Payment, Render::Full) => {
                writeln!(self.out)?;
                writeln!(self.out, "=== PILIH METODE PEMBAYARAN ===")?;
                for (idx, method) in catalog.payment_methods().iter().enumerate() {
                    writeln!(self.out, "{}. {method}", idx + 1)?;
                }
                writeln!(self.out, "0. Kembali")?;
                write!(self.out, "Pilih metode (angka): ")?;
            }
            (Screen::Payment, Render::Prompt) => {
                write!(self.out, "Pilih metode (angka): ")?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

use std::fmt;
use tracing::info;

use crate::Rupiah;
use crate::model::PaymentMethod;

/// A payment for an order total. There is no gateway: processing always succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payment {
    method: PaymentMethod,
    amount: Rupiah,
}

impl Payment {
    pub fn new(method: PaymentMethod, amount: Rupiah) -> Self {
        Self { method, amount }
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn amount(&self) -> Rupiah {
        self.amount
    }

    pub fn process(&self) -> Confirmation {
        info!(method = %self.method, amount = %self.amount, "payment processed");
        Confirmation {
            method: self.method,
            amount: self.amount,
        }
    }
}

/// Proof of a processed payment, shown to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub method: PaymentMethod,
    pub amount: Rupiah,
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "💵 Pembayaran sebesar {} melalui {} berhasil!",
            self.amount, self.method
        )?;
        write!(
            f,
            "✅ Transaksi selesai. Terima kasih telah menggunakan layanan kami!"
        )
    }
}

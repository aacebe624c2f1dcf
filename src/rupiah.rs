use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;

/// Whole-rupiah amount. Prices carry no minor unit.
///
/// Addition saturates at `u64::MAX`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rupiah(u64);

impl Rupiah {
    pub const ZERO: Rupiah = Rupiah(0);

    pub const fn new(value: u64) -> Self {
        Rupiah(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// Formats as `Rp` followed by the amount grouped in thousands, e.g. `Rp10,000`.
impl fmt::Display for Rupiah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (idx, ch) in digits.chars().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "Rp{grouped}")
    }
}

impl std::ops::Add for Rupiah {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Rupiah(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::AddAssign for Rupiah {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Rupiah {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Rupiah::ZERO, |acc, amount| acc + amount)
    }
}

impl From<u64> for Rupiah {
    fn from(value: u64) -> Self {
        Rupiah(value)
    }
}

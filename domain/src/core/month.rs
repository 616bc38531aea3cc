//! Billing month value object

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month (year + month) used to scope the message quota.
///
/// Stored as the integer key `year * 100 + month` (e.g. `202606`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BillingMonth {
    year: i32,
    month: u32,
}

impl BillingMonth {
    /// Create a billing month, returning `None` if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Integer storage key (`yyyymm`).
    pub fn as_key(&self) -> i64 {
        i64::from(self.year) * 100 + i64::from(self.month)
    }

    /// Decode a storage key. `0` (never asked) and malformed keys yield `None`.
    pub fn from_key(key: i64) -> Option<Self> {
        if key <= 0 {
            return None;
        }
        let year = i32::try_from(key / 100).ok()?;
        let month = u32::try_from(key % 100).ok()?;
        Self::new(year, month)
    }
}

impl fmt::Display for BillingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_month() {
        assert!(BillingMonth::new(2026, 0).is_none());
        assert!(BillingMonth::new(2026, 13).is_none());
        assert!(BillingMonth::new(2026, 6).is_some());
    }

    #[test]
    fn test_key_roundtrip_and_sentinel() {
        let month = BillingMonth::new(2026, 6).unwrap();
        assert_eq!(month.as_key(), 202606);
        assert_eq!(BillingMonth::from_key(202606), Some(month));
        assert_eq!(BillingMonth::from_key(0), None);
        assert_eq!(BillingMonth::from_key(202613), None);
    }

    #[test]
    fn test_same_month_different_year_differs() {
        let a = BillingMonth::new(2025, 6).unwrap();
        let b = BillingMonth::new(2026, 6).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_display() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert_eq!(BillingMonth::from_date(date).to_string(), "2026-03");
    }
}

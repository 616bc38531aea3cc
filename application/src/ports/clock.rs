//! Clock port
//!
//! Quota windows are calendar months in the service's local time zone.

use consult_domain::BillingMonth;

pub trait Clock: Send + Sync {
    fn current_month(&self) -> BillingMonth;
}

/// Wall-clock implementation using the local time zone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_month(&self) -> BillingMonth {
        BillingMonth::from_date(chrono::Local::now().date_naive())
    }
}

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::DonorRecord;

/// Minimum gap between whole-blood donations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryPolicy {
    pub gap_days: u32,
}

impl Default for RecoveryPolicy {
    fn default() -> Self {
        Self { gap_days: 56 }
    }
}

impl RecoveryPolicy {
    pub fn new(gap_days: u32) -> Self {
        Self { gap_days }
    }

    /// First day the donor may give again; `None` for first-time donors.
    pub fn next_eligible_date(&self, donor: &DonorRecord) -> Option<NaiveDate> {
        let last = donor.last_donation_date?.date_naive();
        Some(
            last.checked_add_signed(Duration::days(i64::from(self.gap_days)))
                .unwrap_or(NaiveDate::MAX),
        )
    }

    pub fn is_eligible_on(&self, donor: &DonorRecord, today: NaiveDate) -> bool {
        self.days_remaining(donor, today) == 0
    }

    /// Whole days until the donor may give again; zero once eligible.
    pub fn days_remaining(&self, donor: &DonorRecord, today: NaiveDate) -> u32 {
        self.next_eligible_date(donor)
            .map(|eligible_from| (eligible_from - today).num_days())
            .filter(|days| *days > 0)
            .map_or(0, |days| u32::try_from(days).unwrap_or(u32::MAX))
    }
}

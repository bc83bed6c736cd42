use serde::Serialize;

use super::domain::DonorRecord;

/// Display counters. `total`, `available`, and `verified` cover the full
/// fetched list; `displayed` is the size of the filtered result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DonorSummary {
    pub total: usize,
    pub available: usize,
    pub verified: usize,
    pub displayed: usize,
}

impl DonorSummary {
    pub fn collect(all: &[DonorRecord], displayed: usize) -> Self {
        let (available, verified) = all.iter().fold((0, 0), |(available, verified), donor| {
            (
                available + usize::from(donor.is_available),
                verified + usize::from(donor.is_verified),
            )
        });

        Self {
            total: all.len(),
            available,
            verified,
            displayed,
        }
    }
}

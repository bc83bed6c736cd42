//! Donor discovery: filtering, relevance scoring, and ordering of donor
//! snapshots fetched from an external data source.
//!
//! The engine itself (`filter`, `scoring`, `sort`, `summary`) is pure and
//! synchronous. `service` and `router` wrap it for HTTP callers.

pub mod criteria;
pub mod domain;
pub mod eligibility;
mod filter;
pub mod router;
mod scoring;
pub mod service;
mod sort;
pub mod source;
mod summary;
pub mod views;

#[cfg(test)]
mod tests;

use chrono::NaiveDate;

pub use criteria::{CriteriaError, SearchCriteria, SortMode};
pub use domain::{BloodGroup, DonorContact, DonorId, DonorRecord};
pub use eligibility::RecoveryPolicy;
pub use filter::filter_donors;
pub use router::discovery_router;
pub use scoring::{location_match, relevance_score};
pub use service::{DiscoveryServiceError, DonorDiscoveryService};
pub use sort::sort_donors;
pub use source::{DonorSource, InMemoryDonorSource, SourceError, SourceQuery};
pub use summary::DonorSummary;
pub use views::{DonorView, SearchReport};

/// Filtered, ordered donors borrowed from the caller's snapshot.
#[derive(Debug, Clone)]
pub struct RankedDonors<'a> {
    pub donors: Vec<&'a DonorRecord>,
    pub summary: DonorSummary,
}

impl RankedDonors<'_> {
    pub fn report(
        &self,
        criteria: &SearchCriteria,
        today: NaiveDate,
        policy: &RecoveryPolicy,
    ) -> SearchReport {
        SearchReport {
            sort_mode: criteria.sort_mode,
            sort_label: criteria.sort_mode.label(),
            active_filters: criteria.active_filter_count(),
            summary: self.summary,
            donors: self
                .donors
                .iter()
                .map(|donor| DonorView::project(donor, criteria, today, policy))
                .collect(),
        }
    }
}

/// Filter, sort, and count in one pass over an immutable snapshot.
pub fn rank_donors<'a>(donors: &'a [DonorRecord], criteria: &SearchCriteria) -> RankedDonors<'a> {
    let mut selected = filter_donors(donors, criteria);
    sort_donors(&mut selected, criteria);
    let summary = DonorSummary::collect(donors, selected.len());

    RankedDonors {
        donors: selected,
        summary,
    }
}

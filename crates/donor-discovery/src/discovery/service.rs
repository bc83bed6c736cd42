use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::criteria::SearchCriteria;
use super::domain::DonorRecord;
use super::eligibility::RecoveryPolicy;
use super::source::{DonorSource, SourceError, SourceQuery};
use super::views::SearchReport;
use super::rank_donors;
use crate::snapshot::{self, SnapshotError};

/// Service composing the donor source with the ranking engine.
pub struct DonorDiscoveryService<S> {
    source: Arc<S>,
    policy: RecoveryPolicy,
}

impl<S> DonorDiscoveryService<S>
where
    S: DonorSource + 'static,
{
    pub fn new(source: Arc<S>, policy: RecoveryPolicy) -> Self {
        Self { source, policy }
    }

    pub fn policy(&self) -> RecoveryPolicy {
        self.policy
    }

    fn fetch(&self, criteria: &SearchCriteria) -> Result<Vec<DonorRecord>, SourceError> {
        let query = SourceQuery::from_criteria(criteria);
        self.source.fetch(&query).inspect_err(|err| {
            warn!(error = %err, "donor source fetch failed");
        })
    }

    /// Fetch, filter, and order donors, returning display-ready views.
    pub fn search(
        &self,
        criteria: &SearchCriteria,
        today: NaiveDate,
    ) -> Result<SearchReport, DiscoveryServiceError> {
        let fetched = self.fetch(criteria)?;
        let ranked = rank_donors(&fetched, criteria);
        let report = ranked.report(criteria, today, &self.policy);

        debug!(
            blood_group = ?criteria.blood_group,
            district = ?criteria.district_filter(),
            upazila = ?criteria.upazila_filter(),
            sort = criteria.sort_mode.key(),
            fetched = report.summary.total,
            displayed = report.summary.displayed,
            "donor search completed"
        );

        Ok(report)
    }

    /// Ranked donor records for export, in display order.
    pub fn matching(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<DonorRecord>, DiscoveryServiceError> {
        let fetched = self.fetch(criteria)?;
        let ranked = rank_donors(&fetched, criteria);
        Ok(ranked.donors.into_iter().cloned().collect())
    }

    pub fn export_csv(&self, criteria: &SearchCriteria) -> Result<String, DiscoveryServiceError> {
        let donors = self.matching(criteria)?;
        Ok(snapshot::export_csv(&donors)?)
    }

    pub fn export_json(&self, criteria: &SearchCriteria) -> Result<String, DiscoveryServiceError> {
        let donors = self.matching(criteria)?;
        Ok(snapshot::export_json(&donors)?)
    }
}

/// Error raised by the discovery service.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryServiceError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Export(#[from] SnapshotError),
}

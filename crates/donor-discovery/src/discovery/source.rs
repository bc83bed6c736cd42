use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::criteria::SearchCriteria;
use super::domain::{BloodGroup, DonorRecord};

/// Server-side narrowing forwarded to the donor data source.
///
/// Mirrors the upstream API: blood group is an exact match while district and
/// upazila are case-insensitive substring matches. The engine re-applies the
/// exact predicates afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceQuery {
    pub blood_group: Option<BloodGroup>,
    pub district: Option<String>,
    pub upazila: Option<String>,
}

impl SourceQuery {
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        Self {
            blood_group: criteria.blood_group,
            district: criteria.district_filter().map(str::to_string),
            upazila: criteria.upazila_filter().map(str::to_string),
        }
    }

    pub fn admits(&self, donor: &DonorRecord) -> bool {
        if self
            .blood_group
            .is_some_and(|group| group != donor.blood_group)
        {
            return false;
        }

        contains_ignore_case(&donor.district, self.district.as_deref())
            && contains_ignore_case(&donor.upazila, self.upazila.as_deref())
    }
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

/// Fetch boundary for donor snapshots so the service can run against any backend.
pub trait DonorSource: Send + Sync {
    fn fetch(&self, query: &SourceQuery) -> Result<Vec<DonorRecord>, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("donor source unavailable: {0}")]
    Unavailable(String),
    #[error("donor source returned malformed data: {0}")]
    Malformed(String),
}

/// Donor source backed by a snapshot held in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDonorSource {
    donors: Arc<Vec<DonorRecord>>,
}

impl InMemoryDonorSource {
    pub fn new(donors: Vec<DonorRecord>) -> Self {
        Self {
            donors: Arc::new(donors),
        }
    }
}

impl DonorSource for InMemoryDonorSource {
    /// Matches are returned newest registration first, like the upstream API.
    fn fetch(&self, query: &SourceQuery) -> Result<Vec<DonorRecord>, SourceError> {
        let mut matches: Vec<DonorRecord> = self
            .donors
            .iter()
            .filter(|donor| query.admits(donor))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches)
    }
}

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::domain::BloodGroup;

/// Ordering strategy applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    Relevance,
    #[serde(alias = "location")]
    Nearest,
    Newest,
    #[serde(alias = "lastDonation", alias = "last_donation")]
    Eligibility,
    Name,
}

impl SortMode {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Relevance,
            Self::Nearest,
            Self::Newest,
            Self::Eligibility,
            Self::Name,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Nearest => "nearest",
            Self::Newest => "newest",
            Self::Eligibility => "eligibility",
            Self::Name => "name",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Relevance => "Best Match",
            Self::Nearest => "Nearest First",
            Self::Newest => "Newest First",
            Self::Eligibility => "Donation Eligibility",
            Self::Name => "Name A-Z",
        }
    }

    /// Modes whose ordering consults the relevance score.
    pub const fn uses_score(self) -> bool {
        matches!(self, Self::Relevance | Self::Nearest)
    }
}

impl FromStr for SortMode {
    type Err = CriteriaError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "relevance" => Ok(Self::Relevance),
            "nearest" | "location" => Ok(Self::Nearest),
            "newest" => Ok(Self::Newest),
            "eligibility" | "lastdonation" | "last_donation" => Ok(Self::Eligibility),
            "name" => Ok(Self::Name),
            _ => Err(CriteriaError::UnknownSortMode(raw.to_string())),
        }
    }
}

/// Input to a single ranking call.
///
/// Blank strings are treated the same as absent values so that form and
/// query-string inputs like `district=` do not narrow the search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchCriteria {
    #[serde(deserialize_with = "deserialize_blood_group")]
    pub blood_group: Option<BloodGroup>,
    pub district: Option<String>,
    pub upazila: Option<String>,
    pub only_available: bool,
    pub only_verified: bool,
    pub sort_mode: SortMode,
    pub query: Option<String>,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            blood_group: None,
            district: None,
            upazila: None,
            only_available: true,
            only_verified: false,
            sort_mode: SortMode::Relevance,
            query: None,
        }
    }
}

impl SearchCriteria {
    pub fn district_filter(&self) -> Option<&str> {
        non_blank(self.district.as_deref())
    }

    pub fn upazila_filter(&self) -> Option<&str> {
        non_blank(self.upazila.as_deref())
    }

    pub fn text_query(&self) -> Option<&str> {
        non_blank(self.query.as_deref())
    }

    /// True when the searcher narrowed by district or upazila.
    pub fn narrows_location(&self) -> bool {
        self.district_filter().is_some() || self.upazila_filter().is_some()
    }

    /// Number of inputs currently narrowing the result away from the defaults.
    pub fn active_filter_count(&self) -> usize {
        [
            self.blood_group.is_some(),
            self.district_filter().is_some(),
            self.upazila_filter().is_some(),
            !self.only_available,
            self.only_verified,
            self.text_query().is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn deserialize_blood_group<'de, D>(deserializer: D) -> Result<Option<BloodGroup>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt {
        Some(raw) if !raw.trim().is_empty() => raw
            .parse::<BloodGroup>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Raised when textual criteria cannot be mapped onto the engine's enums.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CriteriaError {
    #[error("unknown blood group '{0}' (expected one of A+, A-, B+, B-, AB+, AB-, O+, O-)")]
    UnknownBloodGroup(String),
    #[error("unknown sort mode '{0}' (expected relevance, nearest, newest, eligibility, or name)")]
    UnknownSortMode(String),
}

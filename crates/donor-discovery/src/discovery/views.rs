use chrono::NaiveDate;
use serde::Serialize;

use super::criteria::{SearchCriteria, SortMode};
use super::domain::{BloodGroup, DonorId, DonorRecord};
use super::eligibility::RecoveryPolicy;
use super::scoring::{location_match, relevance_score};
use super::summary::DonorSummary;

#[derive(Debug, Clone, Serialize)]
pub struct DonorView {
    pub id: DonorId,
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub blood_group: BloodGroup,
    pub location: String,
    pub district: String,
    pub upazila: String,
    pub is_verified: bool,
    pub is_available: bool,
    pub availability_label: &'static str,
    pub score: u32,
    pub nearby: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_donation_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_eligible_date: Option<NaiveDate>,
    pub eligible_today: bool,
    pub days_remaining: u32,
}

impl DonorView {
    pub fn project(
        donor: &DonorRecord,
        criteria: &SearchCriteria,
        today: NaiveDate,
        policy: &RecoveryPolicy,
    ) -> Self {
        Self {
            id: donor.id.clone(),
            name: donor.contact.name.clone(),
            phone: donor.contact.phone.clone(),
            email: donor.contact.email.clone(),
            blood_group: donor.blood_group,
            location: donor.location_line(),
            district: donor.district.clone(),
            upazila: donor.upazila.clone(),
            is_verified: donor.is_verified,
            is_available: donor.is_available,
            availability_label: donor.availability_label(),
            score: relevance_score(donor, criteria),
            nearby: location_match(donor, criteria),
            last_donation_date: donor.last_donation_date.map(|dt| dt.date_naive()),
            next_eligible_date: policy.next_eligible_date(donor),
            eligible_today: policy.is_eligible_on(donor, today),
            days_remaining: policy.days_remaining(donor, today),
        }
    }
}

/// Ordered result handed to the rendering layer.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub sort_mode: SortMode,
    pub sort_label: &'static str,
    pub active_filters: usize,
    pub summary: DonorSummary,
    pub donors: Vec<DonorView>,
}

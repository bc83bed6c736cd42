use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::discovery::domain::{BloodGroup, DonorContact, DonorId, DonorRecord};
use crate::discovery::eligibility::RecoveryPolicy;
use crate::discovery::service::DonorDiscoveryService;
use crate::discovery::source::{DonorSource, InMemoryDonorSource, SourceError, SourceQuery};

pub(super) fn timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
}

/// Available, unverified Dhaka/Savar donor registered at the start of 2024.
pub(super) fn donor(id: &str, name: &str, blood_group: BloodGroup) -> DonorRecord {
    DonorRecord {
        id: DonorId(id.to_string()),
        blood_group,
        is_verified: false,
        is_available: true,
        village: None,
        upazila: "Savar".to_string(),
        district: "Dhaka".to_string(),
        last_donation_date: None,
        created_at: timestamp("2024-01-01T00:00:00Z"),
        contact: DonorContact {
            name: name.to_string(),
            phone: format!("+880-{id}"),
            email: None,
        },
    }
}

pub(super) fn located(mut record: DonorRecord, district: &str, upazila: &str) -> DonorRecord {
    record.district = district.to_string();
    record.upazila = upazila.to_string();
    record
}

pub(super) fn flagged(mut record: DonorRecord, verified: bool, available: bool) -> DonorRecord {
    record.is_verified = verified;
    record.is_available = available;
    record
}

pub(super) fn ids(donors: &[&DonorRecord]) -> Vec<String> {
    donors.iter().map(|donor| donor.id.0.clone()).collect()
}

/// Mixed roster across three districts used by the service and routing tests.
pub(super) fn roster() -> Vec<DonorRecord> {
    let mut ahmed = flagged(
        located(
            donor("d1", "Ahmed Rahman", BloodGroup::OPositive),
            "Chittagong",
            "Patiya",
        ),
        true,
        true,
    );
    ahmed.last_donation_date = Some(timestamp("2024-03-15T00:00:00Z"));
    ahmed.created_at = timestamp("2023-05-01T00:00:00Z");

    let fatima = flagged(
        located(
            donor("d2", "Fatima Khan", BloodGroup::APositive),
            "Chittagong",
            "Raozan",
        ),
        false,
        true,
    );

    let mut ali = flagged(
        donor("d3", "Mohammad Ali", BloodGroup::BPositive),
        true,
        false,
    );
    ali.created_at = timestamp("2024-04-01T00:00:00Z");

    let rashida = flagged(
        located(
            donor("d4", "Rashida Begum", BloodGroup::OPositive),
            "Chittagong",
            "Raozan",
        ),
        false,
        true,
    );

    let karim = flagged(
        located(
            donor("d5", "Karim Hassan", BloodGroup::ONegative),
            "Sylhet",
            "Zakiganj",
        ),
        true,
        true,
    );

    vec![ahmed, fatima, ali, rashida, karim]
}

pub(super) fn build_service() -> (
    DonorDiscoveryService<InMemoryDonorSource>,
    Arc<InMemoryDonorSource>,
) {
    let source = Arc::new(InMemoryDonorSource::new(roster()));
    let service = DonorDiscoveryService::new(source.clone(), RecoveryPolicy::default());
    (service, source)
}

pub(super) struct UnavailableSource;

impl DonorSource for UnavailableSource {
    fn fetch(&self, _query: &SourceQuery) -> Result<Vec<DonorRecord>, SourceError> {
        Err(SourceError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct MalformedSource;

impl DonorSource for MalformedSource {
    fn fetch(&self, _query: &SourceQuery) -> Result<Vec<DonorRecord>, SourceError> {
        Err(SourceError::Malformed("expected an array of donors".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

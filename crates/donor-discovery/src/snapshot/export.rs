use std::io;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::SnapshotError;
use crate::discovery::DonorRecord;

pub const EXPORT_HEADERS: [&str; 11] = [
    "Name",
    "Phone",
    "Email",
    "Blood Group",
    "District",
    "Upazila",
    "Village",
    "Verified",
    "Available",
    "Last Donation",
    "Registered Date",
];

/// Renders donors as a fully quoted CSV document in the given order.
pub fn export_csv<'a, I>(donors: I) -> Result<String, SnapshotError>
where
    I: IntoIterator<Item = &'a DonorRecord>,
{
    let mut donors = donors.into_iter().peekable();
    if donors.peek().is_none() {
        return Err(SnapshotError::Empty);
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;

    for donor in donors {
        let last_donation = donor
            .last_donation_date
            .map(|dt| dt.date_naive().to_string())
            .unwrap_or_default();
        let registered = donor.created_at.date_naive().to_string();
        writer.write_record([
            donor.contact.name.as_str(),
            donor.contact.phone.as_str(),
            donor.contact.email.as_deref().unwrap_or_default(),
            donor.blood_group.label(),
            donor.district.as_str(),
            donor.upazila.as_str(),
            donor.village.as_deref().unwrap_or_default(),
            yes_no(donor.is_verified),
            yes_no(donor.is_available),
            last_donation.as_str(),
            registered.as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    String::from_utf8(bytes)
        .map_err(|err| SnapshotError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

/// Renders donors as a pretty-printed JSON array in the given order.
pub fn export_json<'a, I>(donors: I) -> Result<String, SnapshotError>
where
    I: IntoIterator<Item = &'a DonorRecord>,
{
    let rows: Vec<ExportRow<'a>> = donors.into_iter().map(ExportRow::from).collect();
    if rows.is_empty() {
        return Err(SnapshotError::Empty);
    }
    Ok(serde_json::to_string_pretty(&rows)?)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRow<'a> {
    name: &'a str,
    phone: &'a str,
    email: Option<&'a str>,
    blood_group: &'static str,
    district: &'a str,
    upazila: &'a str,
    village: Option<&'a str>,
    is_verified: bool,
    is_available: bool,
    last_donation_date: Option<DateTime<Utc>>,
    registered_at: DateTime<Utc>,
}

impl<'a> From<&'a DonorRecord> for ExportRow<'a> {
    fn from(donor: &'a DonorRecord) -> Self {
        Self {
            name: &donor.contact.name,
            phone: &donor.contact.phone,
            email: donor.contact.email.as_deref(),
            blood_group: donor.blood_group.label(),
            district: &donor.district,
            upazila: &donor.upazila,
            village: donor.village.as_deref(),
            is_verified: donor.is_verified,
            is_available: donor.is_available,
            last_donation_date: donor.last_donation_date,
            registered_at: donor.created_at,
        }
    }
}

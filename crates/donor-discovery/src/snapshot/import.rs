use std::collections::HashSet;
use std::io::Read;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use super::{SnapshotError, SnapshotFormat};
use crate::discovery::domain::parse_timestamp;
use crate::discovery::{BloodGroup, DonorContact, DonorId, DonorRecord};

const MISSING_FIELDS: &str = "Missing required fields: name, phone, bloodGroup, district, upazila";

/// Per-row failure recorded during bulk import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRowError {
    pub index: usize,
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub total: usize,
    pub imported: usize,
    pub failed: usize,
    pub errors: Vec<ImportRowError>,
}

#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    pub records: Vec<DonorRecord>,
    pub report: ImportReport,
}

impl ImportOutcome {
    fn reject(&mut self, index: usize, name: Option<&str>, error: impl Into<String>) {
        let error = error.into();
        debug!(index, %error, "donor import row rejected");
        self.report.failed += 1;
        self.report.errors.push(ImportRowError {
            index,
            name: name.unwrap_or("Unknown").to_string(),
            error,
        });
    }
}

/// Validates flat donor rows (export layout) and converts the accepted ones.
///
/// A bad row is reported and skipped; only unreadable input aborts the import.
pub fn import_reader<R: Read>(
    reader: R,
    format: SnapshotFormat,
    imported_at: DateTime<Utc>,
) -> Result<ImportOutcome, SnapshotError> {
    let rows: Vec<Result<ImportRow, String>> = match format {
        SnapshotFormat::Csv => {
            let mut csv_reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .flexible(true)
                .from_reader(reader);
            let mut rows = Vec::new();
            for record in csv_reader.deserialize::<ImportRow>() {
                match record {
                    Ok(row) => rows.push(Ok(row)),
                    Err(err) if err.is_io_error() => return Err(err.into()),
                    Err(err) => rows.push(Err(err.to_string())),
                }
            }
            rows
        }
        SnapshotFormat::Json => {
            let values: Vec<serde_json::Value> = serde_json::from_reader(reader)?;
            values
                .into_iter()
                .map(|value| serde_json::from_value(value).map_err(|err| err.to_string()))
                .collect()
        }
    };

    let mut outcome = ImportOutcome::default();
    outcome.report.total = rows.len();
    let mut seen_phones: HashSet<String> = HashSet::new();

    for (index, row) in rows.into_iter().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(error) => {
                outcome.reject(index, None, error);
                continue;
            }
        };

        let name = row.name.clone();
        match row.into_record(index, imported_at, &seen_phones) {
            Ok(record) => {
                seen_phones.insert(record.contact.phone.clone());
                outcome.records.push(record);
                outcome.report.imported += 1;
            }
            Err(error) => outcome.reject(index, name.as_deref(), error),
        }
    }

    Ok(outcome)
}

#[derive(Debug, Deserialize)]
struct ImportRow {
    #[serde(alias = "Name", default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(alias = "Phone", default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
    #[serde(alias = "Email", default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
    #[serde(
        rename = "bloodGroup",
        alias = "Blood Group",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    blood_group: Option<String>,
    #[serde(alias = "District", default, deserialize_with = "empty_string_as_none")]
    district: Option<String>,
    #[serde(alias = "Upazila", default, deserialize_with = "empty_string_as_none")]
    upazila: Option<String>,
    #[serde(alias = "Village", default, deserialize_with = "empty_string_as_none")]
    village: Option<String>,
    #[serde(rename = "isVerified", alias = "Verified", default)]
    is_verified: Option<Flag>,
    #[serde(rename = "isAvailable", alias = "Available", default)]
    is_available: Option<Flag>,
    #[serde(
        rename = "lastDonationDate",
        alias = "Last Donation",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    last_donation: Option<String>,
    #[serde(
        rename = "registeredAt",
        alias = "Registered Date",
        alias = "createdAt",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    registered_at: Option<String>,
}

impl ImportRow {
    fn into_record(
        self,
        index: usize,
        imported_at: DateTime<Utc>,
        seen_phones: &HashSet<String>,
    ) -> Result<DonorRecord, String> {
        let (Some(name), Some(phone), Some(blood_group), Some(district), Some(upazila)) = (
            self.name,
            self.phone,
            self.blood_group,
            self.district,
            self.upazila,
        ) else {
            return Err(MISSING_FIELDS.to_string());
        };

        let blood_group: BloodGroup = blood_group.parse().map_err(|err| format!("{err}"))?;

        if seen_phones.contains(&phone) {
            return Err("Donor profile already exists for this phone".to_string());
        }

        let last_donation_date = self
            .last_donation
            .map(|raw| {
                parse_timestamp(&raw).ok_or_else(|| format!("invalid last donation date '{raw}'"))
            })
            .transpose()?;
        let created_at = match self.registered_at {
            Some(raw) => parse_timestamp(&raw)
                .ok_or_else(|| format!("invalid registration date '{raw}'"))?,
            None => imported_at,
        };

        let is_verified = resolve_flag(self.is_verified, "Verified", false)?;
        let is_available = resolve_flag(self.is_available, "Available", true)?;

        Ok(DonorRecord {
            id: DonorId(format!("donor-{:06}", index + 1)),
            blood_group,
            is_verified,
            is_available,
            village: self.village,
            upazila,
            district,
            last_donation_date,
            created_at,
            contact: DonorContact {
                name,
                phone,
                email: self.email,
            },
        })
    }
}

/// CSV exports carry `Yes`/`No`; JSON rows carry real booleans.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Number(i64),
    Text(String),
}

fn resolve_flag(flag: Option<Flag>, column: &str, default: bool) -> Result<bool, String> {
    match flag {
        None => Ok(default),
        Some(Flag::Bool(value)) => Ok(value),
        Some(Flag::Number(1)) => Ok(true),
        Some(Flag::Number(0)) => Ok(false),
        Some(Flag::Number(other)) => Err(format!("invalid {column} value '{other}'")),
        Some(Flag::Text(raw)) => match raw.trim().to_ascii_lowercase().as_str() {
            "" => Ok(default),
            "yes" | "y" | "true" => Ok(true),
            "no" | "n" | "false" => Ok(false),
            _ => Err(format!("invalid {column} value '{raw}'")),
        },
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

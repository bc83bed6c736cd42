use crate::infra::{parse_date, snapshot_service};
use chrono::{Local, NaiveDate, Utc};
use clap::{Args, ValueEnum};
use donor_discovery::discovery::{
    BloodGroup, RecoveryPolicy, SearchCriteria, SearchReport, SortMode,
};
use donor_discovery::error::AppError;
use donor_discovery::snapshot::{self, ImportReport, SnapshotError, SnapshotFormat};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Filter flags shared by `search` and `export`.
#[derive(Args, Debug, Default)]
pub(crate) struct FilterArgs {
    /// Exact blood group (A+, A-, B+, B-, AB+, AB-, O+, O-)
    #[arg(long, value_parser = parse_blood_group)]
    pub(crate) blood_group: Option<BloodGroup>,
    /// District to match exactly
    #[arg(long)]
    pub(crate) district: Option<String>,
    /// Upazila to match exactly
    #[arg(long)]
    pub(crate) upazila: Option<String>,
    /// Keep donors who are currently unavailable
    #[arg(long)]
    pub(crate) include_unavailable: bool,
    /// Keep only verified donors
    #[arg(long)]
    pub(crate) only_verified: bool,
    /// Free-text match on name, phone, blood group, or district
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Ordering: relevance, nearest, newest, eligibility, or name
    #[arg(long, default_value = "relevance", value_parser = parse_sort_mode)]
    pub(crate) sort: SortMode,
}

impl FilterArgs {
    pub(crate) fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            blood_group: self.blood_group,
            district: self.district.clone(),
            upazila: self.upazila.clone(),
            only_available: !self.include_unavailable,
            only_verified: self.only_verified,
            sort_mode: self.sort,
            query: self.query.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Donor snapshot (.json in API shape or .csv in export layout)
    #[arg(long)]
    pub(crate) donors: PathBuf,
    #[command(flatten)]
    pub(crate) filters: FilterArgs,
    /// Evaluation date for donation eligibility (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Days a donor must wait between donations
    #[arg(long, default_value_t = 56, value_parser = clap::value_parser!(u32).range(1..=365))]
    pub(crate) recovery_days: u32,
    /// Print at most this many donors
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Emit the full report as JSON instead of a text listing
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ExportFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Donor snapshot to export from
    #[arg(long)]
    pub(crate) donors: PathBuf,
    #[command(flatten)]
    pub(crate) filters: FilterArgs,
    #[arg(long, value_enum, default_value = "csv")]
    pub(crate) format: ExportFormat,
    /// Destination file (defaults to stdout)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// Bulk donor file (.csv or .json rows in export layout)
    #[arg(long)]
    pub(crate) donors: PathBuf,
    /// Write accepted donors as a JSON snapshot the server can load
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

fn parse_blood_group(raw: &str) -> Result<BloodGroup, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

fn parse_sort_mode(raw: &str) -> Result<SortMode, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let SearchArgs {
        donors,
        filters,
        today,
        recovery_days,
        limit,
        json,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let criteria = filters.criteria();
    let service = snapshot_service(&donors, RecoveryPolicy::new(recovery_days))?;
    let mut report = service.search(&criteria, today)?;

    if let Some(limit) = limit {
        report.donors.truncate(limit);
    }

    if json {
        let body = serde_json::to_string_pretty(&report).map_err(SnapshotError::from)?;
        println!("{body}");
    } else {
        render_search_report(&report, &criteria, today);
    }

    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let ExportArgs {
        donors,
        filters,
        format,
        output,
    } = args;

    let criteria = filters.criteria();
    let service = snapshot_service(&donors, RecoveryPolicy::default())?;
    let body = match format {
        ExportFormat::Csv => service.export_csv(&criteria)?,
        ExportFormat::Json => service.export_json(&criteria)?,
    };

    match output {
        Some(path) => {
            std::fs::write(&path, body)?;
            println!("Exported donors to {}", path.display());
        }
        None => {
            std::io::stdout().write_all(body.as_bytes())?;
        }
    }

    Ok(())
}

pub(crate) fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let ImportArgs { donors, output } = args;

    let format = SnapshotFormat::from_path(&donors)?;
    let file = File::open(&donors)?;
    let outcome = snapshot::import_reader(file, format, Utc::now())?;
    render_import_report(&outcome.report);

    if let Some(path) = output {
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(file, &outcome.records).map_err(SnapshotError::from)?;
        println!(
            "Wrote {} donors to {}",
            outcome.records.len(),
            path.display()
        );
    }

    Ok(())
}

fn render_search_report(report: &SearchReport, criteria: &SearchCriteria, today: NaiveDate) {
    let summary = &report.summary;
    println!("Donor search ({} as of {})", report.sort_label, today);
    println!(
        "- Showing {} of {} donors | {} available | {} verified | {} active filters",
        summary.displayed, summary.total, summary.available, summary.verified, report.active_filters
    );
    if let Some(group) = criteria.blood_group {
        println!("- Blood group: {group}");
    }
    if let Some(district) = criteria.district_filter() {
        match criteria.upazila_filter() {
            Some(upazila) => println!("- Location: {upazila}, {district}"),
            None => println!("- Location: {district}"),
        }
    }

    if report.donors.is_empty() {
        println!("\nNo donors matched. Try widening the location or clearing filters.");
        return;
    }

    println!();
    for (position, donor) in report.donors.iter().enumerate() {
        let verified = if donor.is_verified {
            "verified"
        } else {
            "unverified"
        };
        println!(
            "{:>3}. {} [{}] {} | {} | {}",
            position + 1,
            donor.name,
            donor.blood_group,
            donor.phone,
            donor.location,
            verified
        );

        let mut details = vec![donor.availability_label.to_string()];
        if report.sort_mode.uses_score() {
            details.push(format!("score {}", donor.score));
        }
        if donor.nearby {
            details.push("nearby".to_string());
        }
        match (donor.last_donation_date, donor.next_eligible_date) {
            (Some(last), Some(next)) if donor.eligible_today => {
                details.push(format!("last donated {last}, eligible since {next}"));
            }
            (Some(last), Some(next)) => {
                details.push(format!(
                    "last donated {last}, eligible from {next} ({} days remaining)",
                    donor.days_remaining
                ));
            }
            _ => details.push("no recorded donations".to_string()),
        }
        println!("     {}", details.join(" | "));
    }
}

fn render_import_report(report: &ImportReport) {
    println!(
        "Processed {} rows: {} imported, {} failed",
        report.total, report.imported, report.failed
    );
    for row in &report.errors {
        println!("  - row {} ({}): {}", row.index + 1, row.name, row.error);
    }
}

use chrono::NaiveDate;
use donor_discovery::config::DiscoveryConfig;
use donor_discovery::discovery::{DonorDiscoveryService, InMemoryDonorSource, RecoveryPolicy};
use donor_discovery::snapshot::{self, SnapshotError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type SnapshotService = DonorDiscoveryService<InMemoryDonorSource>;

/// Loads a snapshot file into an in-memory source.
pub(crate) fn snapshot_source(path: &Path) -> Result<InMemoryDonorSource, SnapshotError> {
    let donors = snapshot::load_path(path)?;
    info!(path = %path.display(), donors = donors.len(), "donor snapshot loaded");
    Ok(InMemoryDonorSource::new(donors))
}

/// Builds the service backing the HTTP routes from discovery settings.
///
/// Without a configured snapshot the service starts empty and every search
/// reports zero donors.
pub(crate) fn discovery_service(config: &DiscoveryConfig) -> Result<SnapshotService, SnapshotError> {
    let source = match config.snapshot_path.as_deref() {
        Some(path) => snapshot_source(path)?,
        None => {
            warn!("DONOR_SNAPSHOT_PATH not set; serving an empty donor snapshot");
            InMemoryDonorSource::default()
        }
    };
    Ok(DonorDiscoveryService::new(
        Arc::new(source),
        config.recovery_policy(),
    ))
}

pub(crate) fn snapshot_service(
    path: &Path,
    policy: RecoveryPolicy,
) -> Result<SnapshotService, SnapshotError> {
    Ok(DonorDiscoveryService::new(
        Arc::new(snapshot_source(path)?),
        policy,
    ))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

use crate::cli::ServeArgs;
use crate::infra::{discovery_service, AppState};
use crate::routes::with_discovery_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use donor_discovery::config::AppConfig;
use donor_discovery::error::AppError;
use donor_discovery::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(discovery_service(&config.discovery)?);

    let app = with_discovery_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        recovery_days = config.discovery.recovery_days,
        "donor discovery service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

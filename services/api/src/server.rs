use crate::cli::ServeArgs;
use crate::infra::{AppState, DashboardState};
use crate::routes::with_dashboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use skillradar::config::AppConfig;
use skillradar::dashboard::dataset::cache;
use skillradar::error::AppError;
use skillradar::telemetry;
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

    // The whole dashboard serves one table; a failed load is fatal here
    // rather than on the first request.
    let table = cache::load(&config.dashboard.data_file)?;
    let dashboard_state = DashboardState::new(table);

    let app = with_dashboard_routes(dashboard_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        data_file = %config.dashboard.data_file.display(),
        "competency dashboard ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

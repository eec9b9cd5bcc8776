use metrics_exporter_prometheus::PrometheusHandle;
use skillradar::dashboard::dataset::Table;
use skillradar::dashboard::session::SessionState;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read-only table plus the splash/dashboard page flag, shared by every
/// dashboard handler.
#[derive(Clone)]
pub(crate) struct DashboardState {
    pub(crate) table: Arc<Table>,
    pub(crate) session: Arc<SessionState>,
}

impl DashboardState {
    pub(crate) fn new(table: Arc<Table>) -> Self {
        Self {
            table,
            session: Arc::new(SessionState::new()),
        }
    }
}

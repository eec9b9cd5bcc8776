use crate::infra::{AppState, DashboardState};
use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use skillradar::dashboard::chart::render_radar_svg;
use skillradar::dashboard::profile::CompetencyProfile;
use skillradar::dashboard::report::{render_profile_pdf, suggested_file_name};
use skillradar::dashboard::session::Page;
use skillradar::error::AppError;

#[derive(Debug, Deserialize)]
pub(crate) struct SelectionQuery {
    pub(crate) cluster: String,
    pub(crate) name: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SessionView {
    pub(crate) page: Page,
    pub(crate) label: &'static str,
}

impl From<Page> for SessionView {
    fn from(page: Page) -> Self {
        Self {
            page,
            label: page.label(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ClustersResponse {
    pub(crate) clusters: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NamesResponse {
    pub(crate) cluster: String,
    pub(crate) names: Vec<String>,
}

pub(crate) fn with_dashboard_routes(state: DashboardState) -> axum::Router {
    axum::Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/session", get(session_endpoint))
        .route("/api/v1/session/enter", post(enter_dashboard_endpoint))
        .route("/api/v1/clusters", get(clusters_endpoint))
        .route("/api/v1/clusters/:cluster/names", get(names_endpoint))
        .route("/api/v1/profile", get(profile_endpoint))
        .route("/api/v1/profile/radar.svg", get(radar_endpoint))
        .route("/api/v1/profile/report.pdf", get(report_endpoint))
        .layer(Extension(state))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn session_endpoint(
    Extension(state): Extension<DashboardState>,
) -> Json<SessionView> {
    Json(state.session.page().into())
}

pub(crate) async fn enter_dashboard_endpoint(
    Extension(state): Extension<DashboardState>,
) -> Json<SessionView> {
    Json(state.session.enter_dashboard().into())
}

pub(crate) async fn clusters_endpoint(
    Extension(state): Extension<DashboardState>,
) -> Json<ClustersResponse> {
    let clusters = state
        .table
        .clusters()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(ClustersResponse { clusters })
}

pub(crate) async fn names_endpoint(
    Extension(state): Extension<DashboardState>,
    Path(cluster): Path<String>,
) -> Result<Json<NamesResponse>, AppError> {
    if !state.table.clusters().contains(&cluster.as_str()) {
        return Err(AppError::UnknownCluster { cluster });
    }

    let names = state
        .table
        .names_in(&cluster)
        .into_iter()
        .map(str::to_string)
        .collect();
    Ok(Json(NamesResponse { cluster, names }))
}

pub(crate) async fn profile_endpoint(
    Extension(state): Extension<DashboardState>,
    Query(selection): Query<SelectionQuery>,
) -> Result<Json<CompetencyProfile>, AppError> {
    let profile = resolve_profile(&state, &selection.cluster, &selection.name)?;
    Ok(Json(profile))
}

pub(crate) async fn radar_endpoint(
    Extension(state): Extension<DashboardState>,
    Query(selection): Query<SelectionQuery>,
) -> Result<Response, AppError> {
    let profile = resolve_profile(&state, &selection.cluster, &selection.name)?;
    let svg = render_radar_svg(
        &profile.dimension_labels(),
        &profile.scores(),
        &profile.radar_title(),
    )?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

pub(crate) async fn report_endpoint(
    Extension(state): Extension<DashboardState>,
    Query(selection): Query<SelectionQuery>,
) -> Result<Response, AppError> {
    let profile = resolve_profile(&state, &selection.cluster, &selection.name)?;
    let pdf = render_profile_pdf(&profile)?;
    let file_name = suggested_file_name(&profile.cluster, &profile.name);

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ),
    ];
    Ok((headers, pdf).into_response())
}

fn resolve_profile(
    state: &DashboardState,
    cluster: &str,
    name: &str,
) -> Result<CompetencyProfile, AppError> {
    let record = state
        .table
        .select(cluster, name)
        .ok_or_else(|| AppError::SelectionNotFound {
            cluster: cluster.to_string(),
            name: name.to_string(),
        })?;
    Ok(CompetencyProfile::build(&state.table, record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillradar::dashboard::dataset::{Category, Table};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn sample_state() -> DashboardState {
        let table = Table::from_reader(
            "Klaster,Nama,P1,P2,P3\n\
             Klaster1,Jane,5,5,5\n\
             Klaster1,Budi,1,2,3\n\
             Klaster2,Sari,4,4,4\n"
                .as_bytes(),
        )
        .expect("sample table parses");
        DashboardState::new(Arc::new(table))
    }

    #[tokio::test]
    async fn clusters_endpoint_lists_sorted_clusters() {
        let Json(body) = clusters_endpoint(Extension(sample_state())).await;
        assert_eq!(body.clusters, vec!["Klaster1", "Klaster2"]);
    }

    #[tokio::test]
    async fn names_endpoint_is_scoped_to_the_cluster() {
        let state = sample_state();
        let Json(body) = names_endpoint(Extension(state.clone()), Path("Klaster1".to_string()))
            .await
            .expect("names resolve");
        assert_eq!(body.names, vec!["Budi", "Jane"]);

        let err = names_endpoint(Extension(state), Path("Klaster9".to_string()))
            .await
            .expect_err("unknown cluster is rejected");
        assert!(matches!(err, AppError::UnknownCluster { .. }));
    }

    #[tokio::test]
    async fn profile_endpoint_returns_the_summary_figures() {
        let Json(profile) = profile_endpoint(
            Extension(sample_state()),
            Query(SelectionQuery {
                cluster: "Klaster1".to_string(),
                name: "Budi".to_string(),
            }),
        )
        .await
        .expect("profile resolves");

        assert!((profile.average - 2.0).abs() < f64::EPSILON);
        assert_eq!(profile.category, Category::Developing);
        assert_eq!(profile.strongest, "P3");
        assert_eq!(profile.weakest, "P1");
    }

    #[tokio::test]
    async fn profile_endpoint_rejects_cross_cluster_selection() {
        let err = profile_endpoint(
            Extension(sample_state()),
            Query(SelectionQuery {
                cluster: "Klaster2".to_string(),
                name: "Jane".to_string(),
            }),
        )
        .await
        .expect_err("Jane is not in Klaster2");
        assert!(matches!(err, AppError::SelectionNotFound { .. }));
    }

    #[tokio::test]
    async fn session_endpoints_move_forward_only() {
        let state = sample_state();
        let Json(view) = session_endpoint(Extension(state.clone())).await;
        assert_eq!(view.page, Page::Splash);

        let Json(view) = enter_dashboard_endpoint(Extension(state.clone())).await;
        assert_eq!(view.page, Page::Dashboard);

        let Json(view) = session_endpoint(Extension(state)).await;
        assert_eq!(view.page, Page::Dashboard);
        assert_eq!(view.label, "Dashboard");
    }

    #[tokio::test]
    async fn report_endpoint_sets_download_headers() {
        let response = report_endpoint(
            Extension(sample_state()),
            Query(SelectionQuery {
                cluster: "Klaster2".to_string(),
                name: "Sari".to_string(),
            }),
        )
        .await
        .expect("report renders")
        .into_response();

        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE.as_str()], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION.as_str()],
            "attachment; filename=\"Profil_Klaster2_Sari.pdf\""
        );
    }

    #[tokio::test]
    async fn router_serves_the_dashboard_surface() {
        let app = with_dashboard_routes(sample_state());

        let response = app
            .clone()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/api/v1/profile/radar.svg?cluster=Klaster1&name=Jane")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE.as_str()],
            "image/svg+xml"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body collects");
        assert!(std::str::from_utf8(&body)
            .expect("svg is utf-8")
            .contains("<svg"));
    }
}

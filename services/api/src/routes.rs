use crate::infra::{AppState, Dashboard};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use talentpro::access::{Decision, Screen};
use talentpro::error::AppError;
use talentpro::remote::{
    ApiFailure, GatewayError, PendingRedirect, RegistrationForm, RemoteGateway,
};
use talentpro::roster::{
    candidate_filters, Candidate, CandidateId, FetchOutcome, FetchTicket, FilterState,
    NewCandidate,
};
use talentpro::session::ProfileView;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NavigateQuery {
    #[serde(default)]
    pub(crate) path: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CandidateSearchRequest {
    #[serde(default)]
    pub(crate) query: String,
    #[serde(default)]
    pub(crate) filters: FilterState,
}

#[derive(Debug, Serialize)]
pub(crate) struct CandidateSearchResponse {
    pub(crate) total: usize,
    pub(crate) matched: usize,
    pub(crate) stale: bool,
    pub(crate) candidates: Vec<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) notice: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SessionResponse {
    pub(crate) authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) profile: Option<ProfileView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) redirect: Option<PendingRedirect>,
}

pub(crate) fn dashboard_router<G>(dashboard: Arc<Dashboard<G>>) -> Router
where
    G: RemoteGateway + 'static,
{
    Router::new()
        .route("/api/v1/session", get(session_handler::<G>))
        .route("/api/v1/session/login", post(login_handler::<G>))
        .route("/api/v1/session/logout", post(logout_handler::<G>))
        .route("/api/v1/session/register", post(register_handler::<G>))
        .route("/api/v1/navigate", get(navigate_handler::<G>))
        .route("/api/v1/profile", get(profile_handler::<G>))
        .route("/api/v1/filters", get(filters_handler))
        .route("/api/v1/candidates", post(add_candidate_handler::<G>))
        .route("/api/v1/candidates/search", post(search_handler::<G>))
        .route("/api/v1/candidates/:id", get(candidate_handler::<G>))
        .route("/api/v1/job-roles", get(job_roles_handler::<G>))
        .route("/api/v1/job-roles/:id", get(job_role_handler::<G>))
        .route("/api/v1/dashboard/metrics", get(metrics_handler::<G>))
        .with_state(dashboard)
}

pub(crate) fn with_dashboard_routes<G>(dashboard: Arc<Dashboard<G>>) -> Router
where
    G: RemoteGateway + 'static,
{
    dashboard_router(dashboard)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
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

/// Gate a handler on the screen it backs. Redirects come back as 403 with the target path.
fn guard<G>(dashboard: &Dashboard<G>, screen: Screen) -> Result<(), Response>
where
    G: RemoteGateway + 'static,
{
    match dashboard.gate.check(&screen) {
        Decision::Render => Ok(()),
        Decision::RedirectTo(target) => {
            let payload = json!({
                "screen": screen.path(),
                "redirect": target.path(),
            });
            Err((StatusCode::FORBIDDEN, Json(payload)).into_response())
        }
    }
}

fn remote_failure<G>(dashboard: &Dashboard<G>, failure: ApiFailure) -> Response
where
    G: RemoteGateway + 'static,
{
    if failure == ApiFailure::SessionInvalidated {
        dashboard.forget_roster();
    }
    AppError::from(failure).into_response()
}

pub(crate) async fn session_handler<G>(State(dashboard): State<Arc<Dashboard<G>>>) -> Response
where
    G: RemoteGateway + 'static,
{
    let session = dashboard.client.session().snapshot();
    let body = SessionResponse {
        authenticated: session.is_authenticated(),
        profile: session.principal().map(|principal| principal.profile()),
        redirect: dashboard.client.navigator().take(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) async fn login_handler<G>(
    State(dashboard): State<Arc<Dashboard<G>>>,
    Json(request): Json<LoginRequest>,
) -> Response
where
    G: RemoteGateway + 'static,
{
    match dashboard
        .client
        .login(&request.email, &request.password)
        .await
    {
        Ok(principal) => {
            dashboard.client.navigator().take();
            (StatusCode::OK, Json(principal.profile())).into_response()
        }
        Err(ApiFailure::Remote(GatewayError::Unauthorized)) => {
            let payload = json!({ "error": "Invalid email or password" });
            (StatusCode::UNAUTHORIZED, Json(payload)).into_response()
        }
        Err(other) => AppError::from(other).into_response(),
    }
}

pub(crate) async fn logout_handler<G>(State(dashboard): State<Arc<Dashboard<G>>>) -> Response
where
    G: RemoteGateway + 'static,
{
    dashboard.client.logout();
    dashboard.forget_roster();
    let payload = json!({ "status": "signed_out", "redirect": Screen::Login.path() });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn register_handler<G>(
    State(dashboard): State<Arc<Dashboard<G>>>,
    Json(form): Json<RegistrationForm>,
) -> Response
where
    G: RemoteGateway + 'static,
{
    match dashboard.client.register(form).await {
        Ok(ack) => {
            let message = ack
                .message
                .unwrap_or_else(|| "Registration successful! Please login.".to_string());
            let payload = json!({ "message": message, "redirect": Screen::Login.path() });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(failure) => AppError::from(failure).into_response(),
    }
}

pub(crate) async fn navigate_handler<G>(
    State(dashboard): State<Arc<Dashboard<G>>>,
    Query(query): Query<NavigateQuery>,
) -> Response
where
    G: RemoteGateway + 'static,
{
    let navigation = dashboard.gate.navigate(&query.path);
    (StatusCode::OK, Json(navigation)).into_response()
}

pub(crate) async fn profile_handler<G>(State(dashboard): State<Arc<Dashboard<G>>>) -> Response
where
    G: RemoteGateway + 'static,
{
    if let Err(redirect) = guard(&dashboard, Screen::Profile) {
        return redirect;
    }

    match dashboard.client.refresh_profile().await {
        Ok(principal) => (StatusCode::OK, Json(principal.profile())).into_response(),
        Err(ApiFailure::Remote(err)) => {
            warn!(error = %err, "profile refresh failed; serving session copy");
            match dashboard.client.session().snapshot().principal() {
                Some(principal) => (StatusCode::OK, Json(principal.profile())).into_response(),
                None => AppError::from(ApiFailure::MissingCredentials).into_response(),
            }
        }
        Err(failure) => remote_failure(&dashboard, failure),
    }
}

pub(crate) async fn filters_handler() -> Json<serde_json::Value> {
    Json(json!({ "filters": candidate_filters() }))
}

pub(crate) async fn search_handler<G>(
    State(dashboard): State<Arc<Dashboard<G>>>,
    Json(request): Json<CandidateSearchRequest>,
) -> Response
where
    G: RemoteGateway + 'static,
{
    if let Err(redirect) = guard(&dashboard, Screen::Candidates) {
        return redirect;
    }

    let ticket = {
        let mut view = dashboard.roster();
        view.set_query(request.query);
        view.set_filters(request.filters);
        view.begin_fetch()
    };

    let outcome = match refresh_roster(&dashboard, ticket).await {
        Ok(outcome) => outcome,
        Err(failure) => return remote_failure(&dashboard, failure),
    };

    let view = dashboard.roster();
    let body = CandidateSearchResponse {
        total: view.source().len(),
        matched: view.visible().len(),
        stale: outcome == FetchOutcome::Stale,
        candidates: view.visible().to_vec(),
        message: view.empty_message(),
        notice: view.notice().map(str::to_string),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Completes a roster fetch for `ticket`.
///
/// Session invalidation is surfaced even when a newer fetch has already landed. Any other
/// failure is absorbed by the view, which keeps its candidates and records a notice.
async fn refresh_roster<G>(
    dashboard: &Dashboard<G>,
    ticket: FetchTicket,
) -> Result<FetchOutcome, ApiFailure>
where
    G: RemoteGateway + 'static,
{
    let result = dashboard.client.list_candidates().await;
    let invalidated = matches!(result, Err(ApiFailure::SessionInvalidated));

    let outcome = dashboard.roster().complete_fetch(ticket, result);
    if invalidated {
        return Err(ApiFailure::SessionInvalidated);
    }
    Ok(outcome)
}

pub(crate) async fn add_candidate_handler<G>(
    State(dashboard): State<Arc<Dashboard<G>>>,
    Json(candidate): Json<NewCandidate>,
) -> Response
where
    G: RemoteGateway + 'static,
{
    if let Err(redirect) = guard(&dashboard, Screen::Candidates) {
        return redirect;
    }

    let created = match dashboard.client.add_candidate(&candidate).await {
        Ok(created) => created,
        Err(failure) => return remote_failure(&dashboard, failure),
    };

    let ticket = dashboard.roster().begin_fetch();
    if let Err(failure) = refresh_roster(&dashboard, ticket).await {
        return remote_failure(&dashboard, failure);
    }

    let payload = json!({
        "message": "Candidate added successfully!",
        "candidate": created,
        "total": dashboard.roster().source().len(),
    });
    (StatusCode::CREATED, Json(payload)).into_response()
}

pub(crate) async fn candidate_handler<G>(
    State(dashboard): State<Arc<Dashboard<G>>>,
    Path(id): Path<String>,
) -> Response
where
    G: RemoteGateway + 'static,
{
    if let Err(redirect) = guard(&dashboard, Screen::CandidateDetail(id.clone())) {
        return redirect;
    }

    match dashboard.client.get_candidate(&CandidateId(id)).await {
        Ok(candidate) => (StatusCode::OK, Json(candidate)).into_response(),
        Err(failure) => remote_failure(&dashboard, failure),
    }
}

pub(crate) async fn job_roles_handler<G>(State(dashboard): State<Arc<Dashboard<G>>>) -> Response
where
    G: RemoteGateway + 'static,
{
    if let Err(redirect) = guard(&dashboard, Screen::JobRoles) {
        return redirect;
    }

    match dashboard.client.list_job_roles().await {
        Ok(roles) => (StatusCode::OK, Json(roles)).into_response(),
        Err(failure) => remote_failure(&dashboard, failure),
    }
}

pub(crate) async fn job_role_handler<G>(
    State(dashboard): State<Arc<Dashboard<G>>>,
    Path(id): Path<String>,
) -> Response
where
    G: RemoteGateway + 'static,
{
    if let Err(redirect) = guard(&dashboard, Screen::JobRoleDetail(id.clone())) {
        return redirect;
    }

    match dashboard.client.get_job_role(&id).await {
        Ok(role) => (StatusCode::OK, Json(role)).into_response(),
        Err(failure) => remote_failure(&dashboard, failure),
    }
}

pub(crate) async fn metrics_handler<G>(State(dashboard): State<Arc<Dashboard<G>>>) -> Response
where
    G: RemoteGateway + 'static,
{
    if let Err(redirect) = guard(&dashboard, Screen::Dashboard) {
        return redirect;
    }

    match dashboard.client.dashboard_metrics().await {
        Ok(metrics) => (StatusCode::OK, Json(metrics)).into_response(),
        Err(failure) => remote_failure(&dashboard, failure),
    }
}

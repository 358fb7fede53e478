use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::gateway::{GatewayError, RemoteGateway};
use super::models::{
    CredentialBody, JobRole, LoginResponse, Metric, RegisterAck, RegistrationRequest, UserRecord,
};
use crate::config::RemoteConfig;
use crate::roster::{Candidate, CandidateId, NewCandidate};
use crate::session::Credentials;

/// [`RemoteGateway`] over HTTPS.
///
/// The candidates service takes HTTP Basic auth; the account, job-role and metrics
/// endpoints expect the credential pair as a JSON body.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: Client,
    api_base: String,
    candidates_url: String,
}

impl HttpGateway {
    pub fn new(config: &RemoteConfig) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        Ok(Self {
            http,
            api_base: config.api_base_url.trim_end_matches('/').to_string(),
            candidates_url: config.candidates_url.trim_end_matches('/').to_string(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    fn candidate_url(&self, id: &CandidateId) -> String {
        format!("{}/{}", self.candidates_url, id.0)
    }

    fn with_basic_auth(request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        request.basic_auth(credentials.email(), Some(credentials.password()))
    }

    async fn send<T: DeserializeOwned>(
        request: RequestBuilder,
        operation: &'static str,
    ) -> Result<T, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        debug!(operation, status = %response.status(), "remote call completed");
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|err| GatewayError::Decode(err.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    Err(map_failure(status, &body))
}

/// Classifies a non-success answer. Only 401 triggers session invalidation upstream.
fn map_failure(status: StatusCode, body: &str) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED => GatewayError::Unauthorized,
        StatusCode::NOT_FOUND => GatewayError::NotFound,
        _ => GatewayError::Rejected {
            status: status.as_u16(),
            message: error_message(body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
        },
    }
}

fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, GatewayError> {
        let request = self
            .http
            .post(self.api_url("login"))
            .json(&CredentialBody::from(credentials));
        Self::send(request, "login").await
    }

    async fn register(&self, request: &RegistrationRequest) -> Result<RegisterAck, GatewayError> {
        let request = self.http.post(self.api_url("register")).json(request);
        Self::send(request, "register").await
    }

    async fn profile(&self, credentials: &Credentials) -> Result<UserRecord, GatewayError> {
        let request = self
            .http
            .post(self.api_url("profile"))
            .json(&CredentialBody::from(credentials));
        Self::send(request, "profile").await
    }

    async fn list_candidates(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<Candidate>, GatewayError> {
        let request = Self::with_basic_auth(self.http.get(&self.candidates_url), credentials);
        Self::send(request, "list_candidates").await
    }

    async fn get_candidate(
        &self,
        id: &CandidateId,
        credentials: &Credentials,
    ) -> Result<Candidate, GatewayError> {
        let request = Self::with_basic_auth(self.http.get(self.candidate_url(id)), credentials);
        Self::send(request, "get_candidate").await
    }

    async fn add_candidate(
        &self,
        candidate: &NewCandidate,
        credentials: &Credentials,
    ) -> Result<Candidate, GatewayError> {
        let request = Self::with_basic_auth(self.http.post(&self.candidates_url), credentials)
            .json(candidate);
        Self::send(request, "add_candidate").await
    }

    async fn list_job_roles(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<JobRole>, GatewayError> {
        let request = self
            .http
            .post(self.api_url("job-roles"))
            .json(&CredentialBody::from(credentials));
        Self::send(request, "list_job_roles").await
    }

    async fn get_job_role(
        &self,
        id: &str,
        credentials: &Credentials,
    ) -> Result<JobRole, GatewayError> {
        let request = self
            .http
            .post(self.api_url(&format!("job-roles/{id}")))
            .json(&CredentialBody::from(credentials));
        Self::send(request, "get_job_role").await
    }

    async fn dashboard_metrics(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<Metric>, GatewayError> {
        let request = self
            .http
            .post(self.api_url("dashboard/metrics"))
            .json(&CredentialBody::from(credentials));
        Self::send(request, "dashboard_metrics").await
    }
}

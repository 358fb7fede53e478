use async_trait::async_trait;

use super::models::{JobRole, LoginResponse, Metric, RegisterAck, RegistrationRequest, UserRecord};
use crate::roster::{Candidate, CandidateId, NewCandidate};
use crate::session::Credentials;

/// Failure reported by the remote transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("remote service rejected the credentials")]
    Unauthorized,
    #[error("remote resource not found")]
    NotFound,
    #[error("remote service returned {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("remote service unreachable: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Unauthorized)
    }
}

/// Outbound calls to the talent API. Implementations only move bytes; session handling
/// belongs to [`super::CredentialedClient`].
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, GatewayError>;

    async fn register(&self, request: &RegistrationRequest) -> Result<RegisterAck, GatewayError>;

    async fn profile(&self, credentials: &Credentials) -> Result<UserRecord, GatewayError>;

    async fn list_candidates(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<Candidate>, GatewayError>;

    async fn get_candidate(
        &self,
        id: &CandidateId,
        credentials: &Credentials,
    ) -> Result<Candidate, GatewayError>;

    async fn add_candidate(
        &self,
        candidate: &NewCandidate,
        credentials: &Credentials,
    ) -> Result<Candidate, GatewayError>;

    async fn list_job_roles(&self, credentials: &Credentials)
        -> Result<Vec<JobRole>, GatewayError>;

    async fn get_job_role(
        &self,
        id: &str,
        credentials: &Credentials,
    ) -> Result<JobRole, GatewayError>;

    async fn dashboard_metrics(&self, credentials: &Credentials)
        -> Result<Vec<Metric>, GatewayError>;
}

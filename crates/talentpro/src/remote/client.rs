use std::sync::Arc;

use tracing::{info, warn};

use super::account::{RegistrationError, RegistrationForm};
use super::gateway::{GatewayError, RemoteGateway};
use super::models::{JobRole, Metric, RegisterAck};
use super::navigation::{Navigator, Notice};
use crate::access::Screen;
use crate::roster::{Candidate, CandidateId, NewCandidate};
use crate::session::{Credentials, Principal, SessionStore};

/// Failure surfaced to the calling screen.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiFailure {
    /// The remote rejected the credentials; the session has already been cleared.
    #[error("session expired; sign in again")]
    SessionInvalidated,
    #[error("no active session; sign in first")]
    MissingCredentials,
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    #[error(transparent)]
    Remote(GatewayError),
}

/// API client bound to the shared session.
///
/// Protected calls attach the current principal's credentials. Any "unauthorized" answer clears
/// the whole session and forces navigation to the login screen before the failure is returned.
pub struct CredentialedClient<G, N> {
    gateway: Arc<G>,
    navigator: Arc<N>,
    session: SessionStore,
}

impl<G, N> CredentialedClient<G, N>
where
    G: RemoteGateway + 'static,
    N: Navigator + 'static,
{
    pub fn new(gateway: Arc<G>, navigator: Arc<N>, session: SessionStore) -> Self {
        Self {
            gateway,
            navigator,
            session,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Signs in and stores the returned principal. A rejected login leaves the session as it was.
    pub async fn login(&self, email: &str, password: &str) -> Result<Principal, ApiFailure> {
        let credentials = Credentials::new(email.trim(), password);
        let response = self.gateway.login(&credentials).await.map_err(|err| {
            warn!(error = %err, "login rejected");
            ApiFailure::Remote(err)
        })?;

        let principal = response.user.into_principal(credentials);
        self.session.sign_in(principal.clone());
        info!(role = %principal.role, "principal signed in");
        Ok(principal)
    }

    pub fn logout(&self) -> Option<Principal> {
        let previous = self.session.sign_out();
        if previous.is_some() {
            info!("principal signed out");
        }
        previous
    }

    pub async fn register(&self, form: RegistrationForm) -> Result<RegisterAck, ApiFailure> {
        let request = form.validate()?;
        self.gateway.register(&request).await.map_err(|err| {
            warn!(error = %err, "registration rejected");
            ApiFailure::Remote(err)
        })
    }

    /// Re-reads the principal's account record and stores it in the session.
    ///
    /// Fails with [`ApiFailure::MissingCredentials`] if the session was cleared or switched to
    /// another account while the call was in flight.
    pub async fn refresh_profile(&self) -> Result<Principal, ApiFailure> {
        let credentials = self.credentials()?;
        let result = self.gateway.profile(&credentials).await;
        let record = self.settle("profile", result)?;

        let principal = record.into_principal(credentials);
        if self.session.refresh(principal.clone()) {
            Ok(principal)
        } else {
            Err(ApiFailure::MissingCredentials)
        }
    }

    pub async fn list_candidates(&self) -> Result<Vec<Candidate>, ApiFailure> {
        let credentials = self.credentials()?;
        let result = self.gateway.list_candidates(&credentials).await;
        self.settle("list_candidates", result)
    }

    pub async fn get_candidate(&self, id: &CandidateId) -> Result<Candidate, ApiFailure> {
        let credentials = self.credentials()?;
        let result = self.gateway.get_candidate(id, &credentials).await;
        self.settle("get_candidate", result)
    }

    pub async fn add_candidate(&self, candidate: &NewCandidate) -> Result<Candidate, ApiFailure> {
        let credentials = self.credentials()?;
        let result = self.gateway.add_candidate(candidate, &credentials).await;
        self.settle("add_candidate", result)
    }

    pub async fn list_job_roles(&self) -> Result<Vec<JobRole>, ApiFailure> {
        let credentials = self.credentials()?;
        let result = self.gateway.list_job_roles(&credentials).await;
        self.settle("list_job_roles", result)
    }

    pub async fn get_job_role(&self, id: &str) -> Result<JobRole, ApiFailure> {
        let credentials = self.credentials()?;
        let result = self.gateway.get_job_role(id, &credentials).await;
        self.settle("get_job_role", result)
    }

    pub async fn dashboard_metrics(&self) -> Result<Vec<Metric>, ApiFailure> {
        let credentials = self.credentials()?;
        let result = self.gateway.dashboard_metrics(&credentials).await;
        self.settle("dashboard_metrics", result)
    }

    fn credentials(&self) -> Result<Credentials, ApiFailure> {
        self.session
            .credentials()
            .ok_or(ApiFailure::MissingCredentials)
    }

    fn settle<T>(
        &self,
        operation: &'static str,
        result: Result<T, GatewayError>,
    ) -> Result<T, ApiFailure> {
        match result {
            Ok(value) => Ok(value),
            Err(GatewayError::Unauthorized) => {
                self.invalidate(operation);
                Err(ApiFailure::SessionInvalidated)
            }
            Err(err) => {
                warn!(operation, error = %err, "remote call failed");
                Err(ApiFailure::Remote(err))
            }
        }
    }

    // Only the call that actually cleared the session attaches a notice, so concurrent
    // failures redirect once visibly and then silently.
    fn invalidate(&self, operation: &'static str) {
        let cleared = self.session.invalidate();
        if cleared {
            warn!(operation, "remote rejected credentials; session invalidated");
        }
        let notice = cleared.then(Notice::session_expired);
        self.navigator.redirect(Screen::Login, notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::models::{LoginResponse, RegistrationRequest, UserRecord};
    use crate::remote::navigation::RedirectInbox;
    use crate::roster::Availability;
    use crate::session::Role;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedGateway {
        reject_protected: bool,
        seen_credentials: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        fn protected<T>(&self, credentials: &Credentials, value: T) -> Result<T, GatewayError> {
            self.seen_credentials
                .lock()
                .expect("credentials mutex")
                .push(credentials.email().to_string());
            if self.reject_protected {
                Err(GatewayError::Unauthorized)
            } else {
                Ok(value)
            }
        }
    }

    fn sample_candidate() -> Candidate {
        Candidate {
            id: CandidateId("c-1".to_string()),
            name: "Ada Lovelace".to_string(),
            role_title: "Software Engineer".to_string(),
            skills: vec!["Rust".to_string()],
            location: "London".to_string(),
            experience: 7,
            availability: Availability::Immediate,
            email: None,
            company: None,
            match_score: None,
        }
    }

    #[async_trait]
    impl RemoteGateway for ScriptedGateway {
        async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, GatewayError> {
            if credentials.password() != "correct" {
                return Err(GatewayError::Unauthorized);
            }
            Ok(LoginResponse {
                user: UserRecord {
                    name: "Hana Reyes".to_string(),
                    email: credentials.email().to_string(),
                    role: Role::Hr,
                    created_at: None,
                },
                message: None,
            })
        }

        async fn register(
            &self,
            _request: &RegistrationRequest,
        ) -> Result<RegisterAck, GatewayError> {
            Ok(RegisterAck::default())
        }

        async fn profile(&self, credentials: &Credentials) -> Result<UserRecord, GatewayError> {
            self.protected(
                credentials,
                UserRecord {
                    name: "Hana Reyes".to_string(),
                    email: credentials.email().to_string(),
                    role: Role::Hr,
                    created_at: Some("2023-11-02".to_string()),
                },
            )
        }

        async fn list_candidates(
            &self,
            credentials: &Credentials,
        ) -> Result<Vec<Candidate>, GatewayError> {
            self.protected(credentials, vec![sample_candidate()])
        }

        async fn get_candidate(
            &self,
            id: &CandidateId,
            credentials: &Credentials,
        ) -> Result<Candidate, GatewayError> {
            if id.0 != "c-1" {
                return Err(GatewayError::NotFound);
            }
            self.protected(credentials, sample_candidate())
        }

        async fn add_candidate(
            &self,
            _candidate: &NewCandidate,
            credentials: &Credentials,
        ) -> Result<Candidate, GatewayError> {
            self.protected(credentials, sample_candidate())
        }

        async fn list_job_roles(
            &self,
            credentials: &Credentials,
        ) -> Result<Vec<JobRole>, GatewayError> {
            self.protected(credentials, Vec::new())
        }

        async fn get_job_role(
            &self,
            _id: &str,
            _credentials: &Credentials,
        ) -> Result<JobRole, GatewayError> {
            Err(GatewayError::NotFound)
        }

        async fn dashboard_metrics(
            &self,
            credentials: &Credentials,
        ) -> Result<Vec<Metric>, GatewayError> {
            self.protected(credentials, Vec::new())
        }
    }

    fn client(
        gateway: ScriptedGateway,
    ) -> CredentialedClient<ScriptedGateway, RedirectInbox> {
        CredentialedClient::new(
            Arc::new(gateway),
            Arc::new(RedirectInbox::new()),
            SessionStore::new(),
        )
    }

    #[tokio::test]
    async fn login_stores_principal_and_attaches_credentials() {
        let client = client(ScriptedGateway::default());
        let principal = client
            .login(" hana@talent.io ", "correct")
            .await
            .expect("login succeeds");
        assert_eq!(principal.role, Role::Hr);
        assert!(client.session().is_authenticated());

        client.list_candidates().await.expect("list succeeds");
        let seen = client.gateway.seen_credentials.lock().expect("mutex").clone();
        assert_eq!(seen, ["hana@talent.io"]);
    }

    #[tokio::test]
    async fn rejected_login_leaves_session_untouched() {
        let client = client(ScriptedGateway::default());
        let err = client
            .login("hana@talent.io", "wrong")
            .await
            .expect_err("login rejected");
        assert_eq!(err, ApiFailure::Remote(GatewayError::Unauthorized));
        assert!(client.navigator().peek().is_none());
    }

    #[tokio::test]
    async fn protected_calls_without_session_fail_fast() {
        let client = client(ScriptedGateway::default());
        assert_eq!(
            client.dashboard_metrics().await.expect_err("no session"),
            ApiFailure::MissingCredentials
        );
        assert!(client
            .gateway
            .seen_credentials
            .lock()
            .expect("mutex")
            .is_empty());
    }

    #[tokio::test]
    async fn unauthorized_clears_session_and_redirects_with_notice() {
        let client = client(ScriptedGateway {
            reject_protected: true,
            ..ScriptedGateway::default()
        });
        client
            .login("hana@talent.io", "correct")
            .await
            .expect("login succeeds");

        let err = client.list_job_roles().await.expect_err("rejected");
        assert_eq!(err, ApiFailure::SessionInvalidated);
        assert!(!client.session().is_authenticated());

        let redirect = client.navigator().take().expect("redirect issued");
        assert_eq!(redirect.target, Screen::Login);
        assert_eq!(redirect.notice, Some(Notice::session_expired()));
    }

    #[tokio::test]
    async fn other_failures_do_not_touch_the_session() {
        let client = client(ScriptedGateway::default());
        client
            .login("hana@talent.io", "correct")
            .await
            .expect("login succeeds");

        let err = client
            .get_candidate(&CandidateId("missing".to_string()))
            .await
            .expect_err("not found");
        assert_eq!(err, ApiFailure::Remote(GatewayError::NotFound));
        assert!(client.session().is_authenticated());
        assert!(client.navigator().peek().is_none());
    }

    #[tokio::test]
    async fn profile_refresh_updates_the_session() {
        let client = client(ScriptedGateway::default());
        client
            .login("hana@talent.io", "correct")
            .await
            .expect("login succeeds");

        let principal = client.refresh_profile().await.expect("profile refreshed");
        assert_eq!(principal.email, "hana@talent.io");
        assert!(principal.created_at.is_some());
        assert_eq!(
            client.session().snapshot().principal().and_then(|p| p.created_at),
            principal.created_at
        );

        client.logout();
        assert_eq!(
            client.refresh_profile().await.expect_err("signed out"),
            ApiFailure::MissingCredentials
        );
    }

    #[tokio::test]
    async fn registration_is_validated_before_the_remote_call() {
        let client = client(ScriptedGateway::default());
        let form = RegistrationForm {
            name: "Ana".to_string(),
            email: "ana@talent.io".to_string(),
            password: "one".to_string(),
            confirm_password: "two".to_string(),
            role: Role::Guest,
        };
        assert_eq!(
            client.register(form).await.expect_err("mismatch"),
            ApiFailure::Registration(RegistrationError::PasswordMismatch)
        );
    }
}

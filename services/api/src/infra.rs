use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use talentpro::access::AuthorizationGate;
use talentpro::remote::{CredentialedClient, RedirectInbox, RemoteGateway};
use talentpro::roster::RosterView;
use talentpro::session::SessionStore;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Everything the dashboard screens share: one session, the gate and client bound to it, and
/// the live roster shown on the candidates screen.
pub(crate) struct Dashboard<G> {
    pub(crate) client: CredentialedClient<G, RedirectInbox>,
    pub(crate) gate: AuthorizationGate,
    roster: Mutex<RosterView>,
}

impl<G> Dashboard<G>
where
    G: RemoteGateway + 'static,
{
    pub(crate) fn new(gateway: Arc<G>, session: SessionStore) -> Self {
        Self {
            gate: AuthorizationGate::new(session.clone()),
            client: CredentialedClient::new(gateway, Arc::new(RedirectInbox::new()), session),
            roster: Mutex::new(RosterView::new()),
        }
    }

    pub(crate) fn roster(&self) -> MutexGuard<'_, RosterView> {
        self.roster.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drops roster data belonging to a principal that is no longer signed in.
    pub(crate) fn forget_roster(&self) {
        let mut view = self.roster();
        view.replace_candidates(Vec::new());
        view.set_filters(Default::default());
        view.set_query("");
    }
}

use std::sync::{Arc, PoisonError, RwLock};

use super::principal::{Credentials, Principal, Role};

/// Authentication state. The flag is derived from the principal, so the two can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    principal: Option<Principal>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { principal: None }
    }

    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.principal.as_ref().map(|principal| principal.role)
    }
}

/// Shared handle to the single process-wide [`Session`].
///
/// Cloning the store clones the handle, not the session. Writes are confined to
/// [`SessionStore::sign_in`], [`SessionStore::sign_out`] and [`SessionStore::invalidate`].
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    /// Copy of the session as it is right now; callers never hold the lock.
    pub fn snapshot(&self) -> Session {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated()
    }

    pub fn credentials(&self) -> Option<Credentials> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .principal()
            .map(|principal| principal.credentials.clone())
    }

    pub fn sign_in(&self, principal: Principal) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Session::authenticated(principal);
    }

    pub fn sign_out(&self) -> Option<Principal> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard.principal.take()
    }

    /// Swaps in fresher account data, but only while the same account is still signed in.
    pub fn refresh(&self, principal: Principal) -> bool {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match guard.principal.as_mut() {
            Some(current) if current.credentials.email() == principal.credentials.email() => {
                *current = principal;
                true
            }
            _ => false,
        }
    }

    /// Clears the session. Returns `true` only for the call that actually removed a principal,
    /// so repeated or concurrent invalidations converge on the same state.
    pub fn invalidate(&self) -> bool {
        self.sign_out().is_some()
    }
}

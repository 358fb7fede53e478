use serde::Serialize;
use tracing::{debug, info};

use super::routes::{AccessLevel, Screen};
use crate::session::{Role, Session, SessionStore};

/// Outcome of a navigation check. Denial is a redirect, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "target", rename_all = "snake_case")]
pub enum Decision {
    Render,
    RedirectTo(Screen),
}

impl Decision {
    pub fn is_render(&self) -> bool {
        matches!(self, Decision::Render)
    }
}

/// Pure access rule: reads the session, never mutates it.
pub fn evaluate(session: &Session, required: AccessLevel) -> Decision {
    if required == AccessLevel::Public {
        return Decision::Render;
    }

    if !session.is_authenticated() {
        return Decision::RedirectTo(Screen::Login);
    }

    match (required, session.role()) {
        (AccessLevel::AuthenticatedHr, Some(Role::Hr)) => Decision::Render,
        (AccessLevel::AuthenticatedHr, _) => Decision::RedirectTo(Screen::Dashboard),
        _ => Decision::Render,
    }
}

/// Resolved navigation, as reported to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub screen: Screen,
    pub required: AccessLevel,
    pub decision: Decision,
}

/// Gate bound to the shared session store; evaluates fresh on every call.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    store: SessionStore,
}

impl AuthorizationGate {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    pub fn check(&self, screen: &Screen) -> Decision {
        let session = self.store.snapshot();
        let required = screen.required_level();
        let decision = evaluate(&session, required);

        match &decision {
            Decision::Render => debug!(%screen, level = required.label(), "navigation allowed"),
            Decision::RedirectTo(target) => info!(
                %screen,
                %target,
                level = required.label(),
                "navigation redirected"
            ),
        }

        decision
    }

    pub fn navigate(&self, path: &str) -> Navigation {
        let screen = Screen::resolve(path);
        let decision = self.check(&screen);
        Navigation {
            required: screen.required_level(),
            screen,
            decision,
        }
    }
}

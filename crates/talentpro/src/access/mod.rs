//! Navigation gate deciding render-vs-redirect from the current session.
//!
//! This is a rendering convenience only. The remote service remains the authority on what a
//! principal may read or change.

mod gate;
mod routes;

pub use gate::{evaluate, AuthorizationGate, Decision, Navigation};
pub use routes::{AccessLevel, Screen};

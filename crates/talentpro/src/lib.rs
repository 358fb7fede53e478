//! Core of the TalentPro HR dashboard backend.
//!
//! * [`session`] holds the single process-wide session.
//! * [`access`] decides whether a screen may render for that session.
//! * [`roster`] narrows the candidate roster by free text and facets.
//! * [`remote`] talks to the talent API and invalidates the session on rejection.

pub mod access;
pub mod config;
pub mod error;
pub mod remote;
pub mod roster;
pub mod session;
pub mod telemetry;

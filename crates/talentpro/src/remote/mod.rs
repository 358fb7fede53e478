//! Talent API access: transport seam, HTTP adapter, and the session-aware client.

mod account;
mod client;
mod gateway;
mod http;
pub mod models;
mod navigation;

pub use account::{RegistrationError, RegistrationForm};
pub use client::{ApiFailure, CredentialedClient};
pub use gateway::{GatewayError, RemoteGateway};
pub use http::HttpGateway;
pub use models::{JobRole, LoginResponse, Metric, RegisterAck, RegistrationRequest, UserRecord};
pub use navigation::{Navigator, Notice, PendingRedirect, RedirectInbox};

//! Process-wide authentication state read by the access gate and the remote client.

mod principal;
mod store;

pub use principal::{Credentials, Principal, ProfileView, Role};
pub use store::{Session, SessionStore};

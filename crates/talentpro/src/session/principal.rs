use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Account type chosen at registration; drives every access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Hr,
    Guest,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hr" => Some(Self::Hr),
            "guest" => Some(Self::Guest),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Hr => "hr",
            Role::Guest => "guest",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Role::Hr => "HR Manager",
            Role::Guest => "Guest User",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Role::Hr => "Full access to candidate management and analytics",
            Role::Guest => "Limited access to job roles and market data",
        }
    }

    pub fn access_summary(self) -> &'static str {
        match self {
            Role::Hr => "Full Platform Access",
            Role::Guest => "Limited Access",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Opaque credential material attached to protected remote calls.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Authenticated identity held by the session for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: Option<DateTime<Utc>>,
    pub credentials: Credentials,
}

impl Principal {
    pub fn profile(&self) -> ProfileView {
        ProfileView {
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            role_display: self.role.display_name(),
            role_description: self.role.description(),
            access_level: self.role.access_summary(),
            member_since: self.created_at.map(|at| at.date_naive()),
        }
    }
}

/// Profile page payload; never carries credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub role_display: &'static str,
    pub role_description: &'static str,
    pub access_level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_since: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_redacts_password() {
        let credentials = Credentials::new("ana@talent.io", "hunter2");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("ana@talent.io"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn role_parse_is_case_insensitive_and_closed() {
        assert_eq!(Role::parse(" HR "), Some(Role::Hr));
        assert_eq!(Role::parse("guest"), Some(Role::Guest));
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn profile_view_describes_role() {
        let principal = Principal {
            name: "Ana Silva".to_string(),
            email: "ana@talent.io".to_string(),
            role: Role::Guest,
            created_at: None,
            credentials: Credentials::new("ana@talent.io", "pw"),
        };

        let view = principal.profile();
        assert_eq!(view.role_display, "Guest User");
        assert_eq!(view.access_level, "Limited Access");
        assert!(view.member_since.is_none());
    }
}

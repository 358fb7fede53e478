use std::fmt;

use serde::{Serialize, Serializer};

/// Minimum requirement a screen declares once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Public,
    Authenticated,
    AuthenticatedHr,
}

impl AccessLevel {
    pub fn label(self) -> &'static str {
        match self {
            AccessLevel::Public => "none",
            AccessLevel::Authenticated => "authenticated",
            AccessLevel::AuthenticatedHr => "authenticated+hr",
        }
    }
}

/// Every screen the dashboard can navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Screen {
    Login,
    Register,
    Dashboard,
    Candidates,
    CandidateDetail(String),
    JobRoles,
    JobRoleDetail(String),
    Profile,
    About,
    /// Unmatched path rendered inside the authenticated layout.
    NotFound(String),
}

impl Screen {
    /// Maps a browser path onto a screen. Never fails; unknown paths become [`Screen::NotFound`].
    pub fn resolve(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] | ["login"] => Screen::Login,
            ["register"] => Screen::Register,
            ["dashboard"] => Screen::Dashboard,
            ["candidates"] => Screen::Candidates,
            ["candidates", id] => Screen::CandidateDetail((*id).to_string()),
            ["job-roles"] => Screen::JobRoles,
            ["job-roles", id] => Screen::JobRoleDetail((*id).to_string()),
            ["profile"] => Screen::Profile,
            ["about"] => Screen::About,
            _ => Screen::NotFound(format!("/{}", segments.join("/"))),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Screen::Login => "/login".to_string(),
            Screen::Register => "/register".to_string(),
            Screen::Dashboard => "/dashboard".to_string(),
            Screen::Candidates => "/candidates".to_string(),
            Screen::CandidateDetail(id) => format!("/candidates/{id}"),
            Screen::JobRoles => "/job-roles".to_string(),
            Screen::JobRoleDetail(id) => format!("/job-roles/{id}"),
            Screen::Profile => "/profile".to_string(),
            Screen::About => "/about".to_string(),
            Screen::NotFound(path) => path.clone(),
        }
    }

    /// Static route table.
    pub fn required_level(&self) -> AccessLevel {
        match self {
            Screen::Login | Screen::Register => AccessLevel::Public,
            Screen::Dashboard
            | Screen::Profile
            | Screen::About
            | Screen::JobRoles
            | Screen::JobRoleDetail(_)
            | Screen::NotFound(_) => AccessLevel::Authenticated,
            Screen::Candidates | Screen::CandidateDetail(_) => AccessLevel::AuthenticatedHr,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl Serialize for Screen {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path())
    }
}

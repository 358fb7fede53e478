use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the candidates service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How soon a candidate can start. Unknown labels from the service are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Availability {
    Immediate,
    TwoWeeks,
    OneMonth,
    ThreeMonths,
    Other(String),
}

impl Availability {
    pub const KNOWN: [Availability; 4] = [
        Availability::Immediate,
        Availability::TwoWeeks,
        Availability::OneMonth,
        Availability::ThreeMonths,
    ];

    pub fn label(&self) -> &str {
        match self {
            Availability::Immediate => "Immediate",
            Availability::TwoWeeks => "2 Weeks",
            Availability::OneMonth => "1 Month",
            Availability::ThreeMonths => "3 Months",
            Availability::Other(label) => label,
        }
    }
}

impl From<String> for Availability {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Immediate" => Availability::Immediate,
            "2 Weeks" => Availability::TwoWeeks,
            "1 Month" => Availability::OneMonth,
            "3 Months" => Availability::ThreeMonths,
            _ => Availability::Other(value),
        }
    }
}

impl From<Availability> for String {
    fn from(value: Availability) -> Self {
        match value {
            Availability::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Candidate snapshot as served by the remote roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    #[serde(rename = "role")]
    pub role_title: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub location: String,
    pub experience: u32,
    pub availability: Availability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(
        default,
        rename = "matchScore",
        alias = "match_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub match_score: Option<u8>,
}

/// Payload for adding a candidate; the service assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCandidate {
    pub name: String,
    #[serde(rename = "role")]
    pub role_title: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub location: String,
    pub experience: u32,
    pub availability: Availability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_service_payload() {
        let candidate: Candidate = serde_json::from_value(json!({
            "id": "c-1",
            "name": "Priya Nair",
            "role": "Data Scientist",
            "skills": ["Python", "Machine Learning"],
            "location": "Bangalore",
            "experience": 6,
            "availability": "2 Weeks",
            "matchScore": 91
        }))
        .expect("candidate parses");

        assert_eq!(candidate.role_title, "Data Scientist");
        assert_eq!(candidate.availability, Availability::TwoWeeks);
        assert_eq!(candidate.match_score, Some(91));
        assert!(candidate.company.is_none());
    }

    #[test]
    fn unknown_availability_is_preserved() {
        let availability = Availability::from("Next Quarter".to_string());
        assert_eq!(availability, Availability::Other("Next Quarter".to_string()));
        assert_eq!(String::from(availability), "Next Quarter");
    }
}

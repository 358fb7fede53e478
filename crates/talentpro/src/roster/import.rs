use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{Availability, Candidate, CandidateId};

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid roster JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported roster format '{0}'; expected .csv or .json")]
    UnsupportedFormat(String),
}

/// Loads a roster snapshot from a CSV or JSON export for offline filtering.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Candidate>, RosterImportError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Self::from_csv(std::fs::File::open(path)?),
            "json" => Self::from_json(std::fs::File::open(path)?),
            other => Err(RosterImportError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_json<R: Read>(reader: R) -> Result<Vec<Candidate>, RosterImportError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Skills are `;`-separated within their column.
    pub fn from_csv<R: Read>(reader: R) -> Result<Vec<Candidate>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut candidates = Vec::new();
        for row in csv_reader.deserialize::<RosterRow>() {
            candidates.push(row?.into_candidate());
        }
        Ok(candidates)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    id: String,
    name: String,
    role: String,
    #[serde(default)]
    skills: String,
    location: String,
    experience: u32,
    availability: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    company: Option<String>,
}

impl RosterRow {
    fn into_candidate(self) -> Candidate {
        let skills = self
            .skills
            .split(';')
            .map(str::trim)
            .filter(|skill| !skill.is_empty())
            .map(str::to_string)
            .collect();

        Candidate {
            id: CandidateId(self.id),
            name: self.name,
            role_title: self.role,
            skills,
            location: self.location,
            experience: self.experience,
            availability: Availability::from(self.availability),
            email: self.email,
            company: self.company,
            match_score: None,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|raw| !raw.trim().is_empty()))
}

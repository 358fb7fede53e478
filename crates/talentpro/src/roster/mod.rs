//! Candidate roster model and the faceted filtering engine behind the candidates screen.

pub mod catalog;
pub mod domain;
mod engine;
pub mod filters;
mod import;
mod view;

pub use catalog::{candidate_filters, FilterDefinition};
pub use domain::{Availability, Candidate, CandidateId, NewCandidate};
pub use engine::{apply, matches_query, predicate_for, Predicate};
pub use filters::{ExperienceRange, FilterCategory, FilterState};
pub use import::{RosterImportError, RosterImporter};
pub use view::{FetchOutcome, FetchTicket, RosterView};

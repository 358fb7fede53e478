use super::domain::Candidate;
use super::filters::{ExperienceRange, FilterCategory, FilterState};

/// Category predicate: does the candidate satisfy the selected values of one facet?
pub type Predicate = fn(&Candidate, &[String]) -> bool;

pub fn predicate_for(category: FilterCategory) -> Predicate {
    match category {
        FilterCategory::Role => role_matches,
        FilterCategory::Location => location_matches,
        FilterCategory::Experience => experience_matches,
        FilterCategory::Availability => availability_matches,
        FilterCategory::Skills => skills_match,
    }
}

/// Narrows `candidates` by free-text `query` and every active facet in `filters`.
///
/// Stable and pure: the output keeps input order, and re-applying the same inputs to the
/// output changes nothing. Unrecognized facet names pass every candidate.
pub fn apply(candidates: &[Candidate], query: &str, filters: &FilterState) -> Vec<Candidate> {
    let needle = query.to_lowercase();
    let active: Vec<(Predicate, &[String])> = filters
        .active()
        .filter_map(|(name, values)| {
            FilterCategory::from_name(name).map(|category| (predicate_for(category), values))
        })
        .collect();

    candidates
        .iter()
        .filter(|candidate| needle.is_empty() || matches_query(candidate, &needle))
        .filter(|candidate| {
            active
                .iter()
                .all(|&(predicate, values)| predicate(candidate, values))
        })
        .cloned()
        .collect()
}

/// `needle` must already be lower-cased.
pub fn matches_query(candidate: &Candidate, needle: &str) -> bool {
    candidate.name.to_lowercase().contains(needle)
        || candidate.role_title.to_lowercase().contains(needle)
        || candidate
            .skills
            .iter()
            .any(|skill| skill.to_lowercase().contains(needle))
}

fn contains_any(haystack: &str, values: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    values
        .iter()
        .any(|value| haystack.contains(&value.to_lowercase()))
}

fn role_matches(candidate: &Candidate, values: &[String]) -> bool {
    contains_any(&candidate.role_title, values)
}

fn location_matches(candidate: &Candidate, values: &[String]) -> bool {
    contains_any(&candidate.location, values)
}

// Only the first selection is consulted for this facet.
fn experience_matches(candidate: &Candidate, values: &[String]) -> bool {
    values
        .first()
        .map(|token| ExperienceRange::parse(token).contains(candidate.experience))
        .unwrap_or(true)
}

fn availability_matches(candidate: &Candidate, values: &[String]) -> bool {
    let label = candidate.availability.label();
    values.iter().any(|value| value == label)
}

fn skills_match(candidate: &Candidate, values: &[String]) -> bool {
    candidate
        .skills
        .iter()
        .any(|skill| contains_any(skill, values))
}

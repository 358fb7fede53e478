//! Integration specifications for the candidate roster filters.
//!
//! Scenarios drive the public `roster` facade the same way the candidates screen does: a roster
//! snapshot, a free-text query, and facet selections taken from the published catalog.

use talentpro::roster::{
    apply, candidate_filters, Availability, Candidate, CandidateId, FilterCategory, FilterState,
    RosterView,
};

fn candidate(
    id: &str,
    name: &str,
    role: &str,
    location: &str,
    experience: u32,
    skills: &[&str],
    availability: Availability,
) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        name: name.to_string(),
        role_title: role.to_string(),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        location: location.to_string(),
        experience,
        availability,
        email: None,
        company: None,
        match_score: None,
    }
}

fn roster() -> Vec<Candidate> {
    vec![
        candidate(
            "c-1",
            "Ada Lovelace",
            "Software Engineer",
            "London",
            8,
            &["Rust", "Python"],
            Availability::Immediate,
        ),
        candidate(
            "c-2",
            "Grace Hopper",
            "DevOps Engineer",
            "New York",
            12,
            &["AWS", "Java"],
            Availability::OneMonth,
        ),
        candidate(
            "c-3",
            "Alan Turing",
            "Data Scientist",
            "Remote",
            4,
            &["Machine Learning", "Python"],
            Availability::TwoWeeks,
        ),
        candidate(
            "c-4",
            "Margaret Hamilton",
            "Product Manager",
            "San Francisco",
            3,
            &["JavaScript"],
            Availability::ThreeMonths,
        ),
    ]
}

fn ids(candidates: &[Candidate]) -> Vec<&str> {
    candidates
        .iter()
        .map(|candidate| candidate.id.0.as_str())
        .collect()
}

fn sample_filter_sets() -> Vec<FilterState> {
    vec![
        FilterState::new(),
        FilterState::new().with("Role", &["Engineer"]),
        FilterState::new()
            .with("Location", &["london", "remote"])
            .with("Skills", &["python"]),
        FilterState::new().with("Experience", &["3-5"]),
        FilterState::new().with("Experience", &["not-a-range"]),
        FilterState::new().with("Availability", &["1 Month", "Immediate"]),
        FilterState::new().with("Department", &["Finance"]),
    ]
}

#[test]
fn empty_query_and_filters_keep_the_roster_intact() {
    let candidates = roster();
    assert_eq!(apply(&candidates, "", &FilterState::new()), candidates);
}

#[test]
fn filtering_is_a_projection() {
    let candidates = roster();
    for query in ["", "java", "an", "zzz"] {
        for filters in sample_filter_sets() {
            let once = apply(&candidates, query, &filters);
            let twice = apply(&once, query, &filters);
            assert_eq!(once, twice, "query {query:?} with {filters:?}");
        }
    }
}

#[test]
fn output_preserves_input_order() {
    let mut candidates = roster();
    candidates.reverse();
    let filters = FilterState::new().with("Skills", &["python"]);
    assert_eq!(ids(&apply(&candidates, "", &filters)), ["c-3", "c-1"]);
}

#[test]
fn categories_intersect_while_values_union() {
    let candidates = vec![
        candidate("a", "A", "Engineer", "NY", 1, &[], Availability::Immediate),
        candidate("b", "B", "Designer", "NY", 1, &[], Availability::Immediate),
        candidate("c", "C", "Engineer", "SF", 1, &[], Availability::Immediate),
    ];
    let filters = FilterState::new()
        .with("Role", &["Engineer"])
        .with("Location", &["NY"]);
    assert_eq!(ids(&apply(&candidates, "", &filters)), ["a"]);

    let designers_or_engineers = FilterState::new().with("Role", &["Designer", "Engineer"]);
    assert_eq!(
        ids(&apply(&candidates, "", &designers_or_engineers)),
        ["a", "b", "c"]
    );
}

#[test]
fn experience_bounds_follow_the_selected_token() {
    let candidates = roster();

    let mid = FilterState::new().with("Experience", &["3-5"]);
    assert_eq!(ids(&apply(&candidates, "", &mid)), ["c-3", "c-4"]);

    let at_least_five = FilterState::new().with("Experience", &["5"]);
    assert_eq!(ids(&apply(&candidates, "", &at_least_five)), ["c-1", "c-2"]);

    let open_ended = FilterState::new().with("Experience", &["10-"]);
    assert_eq!(ids(&apply(&candidates, "", &open_ended)), ["c-2"]);
}

#[test]
fn free_text_matches_skills_case_insensitively() {
    let candidates = roster();
    assert_eq!(
        ids(&apply(&candidates, "java", &FilterState::new())),
        ["c-2", "c-4"]
    );
    assert_eq!(
        ids(&apply(&candidates, "ENGINEER", &FilterState::new())),
        ["c-1", "c-2"]
    );
}

#[test]
fn catalog_options_drive_the_engine() {
    let candidates = roster();
    let catalog = candidate_filters();
    let locations = catalog
        .iter()
        .find(|definition| definition.name == FilterCategory::Location)
        .expect("location facet");

    let mut filters = FilterState::new();
    filters.select(
        FilterCategory::Location.name(),
        locations
            .options
            .iter()
            .filter(|option| option.as_str() == "Remote" || option.as_str() == "London")
            .cloned(),
    );

    assert_eq!(ids(&apply(&candidates, "", &filters)), ["c-1", "c-3"]);
}

#[test]
fn roster_view_tracks_latest_inputs() {
    let mut view = RosterView::new();
    let ticket = view.begin_fetch();
    view.set_query("python");
    assert!(view.visible().is_empty());

    view.complete_fetch::<String>(ticket, Ok(roster()));
    assert_eq!(ids(view.visible()), ["c-1", "c-3"]);

    let mut filters = FilterState::new();
    filters.select("Availability", vec!["2 Weeks".to_string()]);
    view.set_filters(filters);
    assert_eq!(ids(view.visible()), ["c-3"]);
}

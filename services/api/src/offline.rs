use clap::Args;
use std::path::PathBuf;
use talentpro::access::{AuthorizationGate, Decision, Navigation};
use talentpro::error::AppError;
use talentpro::roster::{apply, Candidate, FilterCategory, FilterState, RosterImporter};
use talentpro::session::{Credentials, Principal, Role, Session, SessionStore};

#[derive(Args, Debug)]
pub(crate) struct RosterFilterArgs {
    /// Roster export to read (.csv or .json)
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Free-text query matched against name, role, and skills
    #[arg(long, default_value = "")]
    pub(crate) query: String,
    /// Facet selection as Category=value1,value2 (repeatable)
    #[arg(long = "filter", value_parser = parse_filter)]
    pub(crate) filters: Vec<(String, Vec<String>)>,
    /// Print matching candidates as JSON instead of a listing
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AccessCheckArgs {
    /// Browser path to evaluate, e.g. /candidates/c-1
    #[arg(long)]
    pub(crate) path: String,
    /// Role of the signed-in principal; omit to evaluate an anonymous session
    #[arg(long, value_parser = parse_role)]
    pub(crate) role: Option<Role>,
}

pub(crate) fn parse_filter(value: &str) -> Result<(String, Vec<String>), String> {
    let (category, values) = value
        .split_once('=')
        .ok_or_else(|| format!("expected Category=value[,value], got `{value}`"))?;

    let category = category.trim();
    if FilterCategory::from_name(category).is_none() {
        let known: Vec<&str> = FilterCategory::ALL.iter().map(|c| c.name()).collect();
        return Err(format!(
            "unknown filter category `{category}` (expected one of {})",
            known.join(", ")
        ));
    }

    let values = values
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    Ok((category.to_string(), values))
}

pub(crate) fn parse_role(value: &str) -> Result<Role, String> {
    Role::parse(value).ok_or_else(|| format!("unknown role `{value}` (expected hr or guest)"))
}

pub(crate) fn run_roster_filter(args: RosterFilterArgs) -> Result<(), AppError> {
    let RosterFilterArgs {
        roster,
        query,
        filters,
        json,
    } = args;

    let candidates = RosterImporter::from_path(&roster)?;
    let state = filter_state(filters);
    let matched = apply(&candidates, &query, &state);

    if json {
        let rendered = serde_json::to_string_pretty(&matched)
            .map_err(|err| AppError::Io(err.into()))?;
        println!("{rendered}");
        return Ok(());
    }

    println!(
        "Roster {} | {} of {} candidates match",
        roster.display(),
        matched.len(),
        candidates.len()
    );
    if !query.is_empty() {
        println!("Query: {query}");
    }
    for (category, values) in state.active() {
        println!("Filter {category}: {}", values.join(" | "));
    }
    for line in render_candidates(&matched) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_access_check(args: AccessCheckArgs) -> Result<(), AppError> {
    let navigation = check_access(&args.path, args.role);
    let subject = args
        .role
        .map(|role| role.display_name())
        .unwrap_or("Anonymous visitor");

    println!(
        "{} -> {} (requires {})",
        subject,
        navigation.screen,
        navigation.required.label()
    );
    match &navigation.decision {
        Decision::Render => println!("Decision: render"),
        Decision::RedirectTo(target) => println!("Decision: redirect to {target}"),
    }
    Ok(())
}

fn filter_state(filters: Vec<(String, Vec<String>)>) -> FilterState {
    let mut state = FilterState::new();
    for (category, values) in filters {
        state.select(category, values);
    }
    state
}

fn check_access(path: &str, role: Option<Role>) -> Navigation {
    let session = match role {
        Some(role) => Session::authenticated(Principal {
            name: role.display_name().to_string(),
            email: "offline@talentpro.local".to_string(),
            role,
            created_at: None,
            credentials: Credentials::new("offline@talentpro.local", ""),
        }),
        None => Session::anonymous(),
    };
    AuthorizationGate::new(SessionStore::with_session(session)).navigate(path)
}

fn render_candidates(candidates: &[Candidate]) -> Vec<String> {
    candidates
        .iter()
        .map(|candidate| {
            format!(
                "- [{}] {} | {} | {} | {} yrs | {} | {}",
                candidate.id,
                candidate.name,
                candidate.role_title,
                candidate.location,
                candidate.experience,
                candidate.availability.label(),
                candidate.skills.join(", ")
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use talentpro::access::Screen;
    use talentpro::roster::{Availability, CandidateId};

    #[test]
    fn parses_filter_arguments() {
        let (category, values) = parse_filter("Location= London, Remote ,").expect("valid filter");
        assert_eq!(category, "Location");
        assert_eq!(values, ["London", "Remote"]);

        assert!(parse_filter("Location").is_err());
        assert!(parse_filter("Department=Finance").is_err());
    }

    #[test]
    fn repeated_filters_build_one_state() {
        let state = filter_state(vec![
            ("Role".to_string(), vec!["Engineer".to_string()]),
            ("Skills".to_string(), vec!["Rust".to_string(), "Go".to_string()]),
        ]);
        assert_eq!(state.values("Role"), ["Engineer"]);
        assert_eq!(state.values("Skills"), ["Rust", "Go"]);
    }

    #[test]
    fn access_check_follows_the_gate() {
        let anonymous = check_access("/candidates", None);
        assert_eq!(anonymous.decision, Decision::RedirectTo(Screen::Login));

        let guest = check_access("/candidates/c-9", Some(Role::Guest));
        assert_eq!(guest.decision, Decision::RedirectTo(Screen::Dashboard));

        let hr = check_access("/candidates/c-9", Some(Role::Hr));
        assert_eq!(hr.decision, Decision::Render);

        let login = check_access("/login", None);
        assert_eq!(login.decision, Decision::Render);
    }

    #[test]
    fn roles_parse_case_insensitively() {
        assert_eq!(parse_role("HR"), Ok(Role::Hr));
        assert!(parse_role("admin").is_err());
    }

    #[test]
    fn listing_shows_availability_labels() {
        let lines = render_candidates(&[Candidate {
            id: CandidateId("c-1".to_string()),
            name: "Ada Lovelace".to_string(),
            role_title: "Software Engineer".to_string(),
            skills: vec!["Rust".to_string(), "Python".to_string()],
            location: "London".to_string(),
            experience: 8,
            availability: Availability::TwoWeeks,
            email: None,
            company: None,
            match_score: None,
        }]);
        assert_eq!(
            lines,
            ["- [c-1] Ada Lovelace | Software Engineer | London | 8 yrs | 2 Weeks | Rust, Python"]
        );
    }
}

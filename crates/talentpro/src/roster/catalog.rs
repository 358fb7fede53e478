use serde::Serialize;

use super::domain::Availability;
use super::filters::FilterCategory;

/// One facet as offered by the filter panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterDefinition {
    pub name: FilterCategory,
    pub options: Vec<String>,
}

/// Option values offered for each recognized facet.
pub fn candidate_filters() -> Vec<FilterDefinition> {
    FilterCategory::ALL
        .into_iter()
        .map(|name| FilterDefinition {
            name,
            options: options_for(name),
        })
        .collect()
}

fn options_for(category: FilterCategory) -> Vec<String> {
    let options: &[&str] = match category {
        FilterCategory::Role => &[
            "Software Engineer",
            "Data Scientist",
            "Product Manager",
            "UX Designer",
            "DevOps Engineer",
        ],
        FilterCategory::Location => &["New York", "San Francisco", "London", "Remote", "Bangalore"],
        FilterCategory::Experience => &["0-2", "3-5", "6-10", "10-"],
        FilterCategory::Availability => {
            return Availability::KNOWN
                .iter()
                .map(|availability| availability.label().to_string())
                .collect()
        }
        FilterCategory::Skills => &[
            "JavaScript",
            "Python",
            "React",
            "Java",
            "AWS",
            "Machine Learning",
        ],
    };

    options.iter().map(|option| option.to_string()).collect()
}

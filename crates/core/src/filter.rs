//! Search and category filtering over the project list.
//!
//! The working set is small, so every change to the search term or the
//! selected category simply re-runs [`filter`] over the full list.

use std::collections::HashSet;
use std::fmt;

use crate::project::Project;

/// Category selector value that matches every project.
pub const ALL_CATEGORIES: &str = "All";

/// Distinct categories in first-seen order, prefixed with [`ALL_CATEGORIES`].
pub fn categories(projects: &[Project]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = vec![ALL_CATEGORIES.to_string()];
    for project in projects {
        if seen.insert(project.category.as_str()) {
            out.push(project.category.clone());
        }
    }
    out
}

/// Projects matching both the search term and the selected category, in
/// their original order.
///
/// An empty `search_term` matches everything; otherwise it must occur,
/// ignoring case, in the title, the description, or a technology tag.
pub fn filter<'a>(
    projects: &'a [Project],
    search_term: &str,
    selected_category: &str,
) -> Vec<&'a Project> {
    let needle = search_term.to_lowercase();
    projects
        .iter()
        .filter(|p| selected_category == ALL_CATEGORIES || p.category == selected_category)
        .filter(|p| needle.is_empty() || p.mentions(&needle))
        .collect()
}

/// The current search box and category selector state of a project listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectQuery {
    pub search: String,
    pub category: String,
}

impl Default for ProjectQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl ProjectQuery {
    /// Run the query against `projects`.
    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        filter(projects, &self.search, &self.category)
    }

    /// Counts for the "showing N of M" line under the filter controls.
    pub fn summary(&self, projects: &[Project]) -> FilterSummary {
        FilterSummary {
            shown: self.apply(projects).len(),
            total: projects.len(),
        }
    }
}

/// How many projects a query kept out of how many it saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub shown: usize,
    pub total: usize,
}

impl FilterSummary {
    /// `true` when the listing should render its empty state.
    pub fn is_empty(&self) -> bool {
        self.shown == 0
    }
}

impl fmt::Display for FilterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} of {} projects", self.shown, self.total)
    }
}

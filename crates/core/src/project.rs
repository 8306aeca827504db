use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single portfolio entry.
///
/// Projects are loaded once with the [`Catalog`](crate::Catalog) and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier within the catalog.
    pub id: u32,
    pub title: String,
    /// Short summary shown on project cards.
    pub description: String,
    /// Full write-up shown in the detail view.
    pub long_description: String,
    /// Technology tags, in display order.
    pub technologies: Vec<String>,
    /// Free-text grouping label. The set of categories is derived from the data.
    pub category: String,
    pub image: String,
    pub demo_url: String,
    pub github_url: String,
    /// Whether the project is highlighted on the landing page.
    pub featured: bool,
    pub completed_at: NaiveDate,
}

impl Project {
    /// Returns `true` if `needle` (already lowercased) occurs in the title,
    /// the description, or any technology tag, ignoring case.
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .technologies
                .iter()
                .any(|tech| tech.to_lowercase().contains(needle))
    }
}

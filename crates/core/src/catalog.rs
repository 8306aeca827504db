//! Static portfolio content.
//!
//! The catalog is parsed once and shared read-only. The built-in content is
//! embedded at compile time from `data/catalog.json`; callers that source
//! content elsewhere (a file, a fetched resource) hand the already-read JSON
//! to [`Catalog::from_json`].

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::profile::{Experience, SocialLink, Skill};
use crate::project::Project;

const EMBEDDED_JSON: &str = include_str!("../data/catalog.json");

static EMBEDDED: LazyLock<Catalog> =
    LazyLock::new(|| Catalog::from_json(EMBEDDED_JSON).expect("embedded catalog is valid"));

/// Errors raised while loading catalog content.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document is not valid JSON or does not match the catalog shape.
    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two projects share the same identifier.
    #[error("duplicate project id {0}")]
    DuplicateProjectId(u32),

    /// A skill level lies outside `0..=100`.
    #[error("skill '{name}' has level {level}, expected 0..=100")]
    SkillLevelOutOfRange { name: String, level: u8 },
}

/// All static content of the site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

impl Catalog {
    /// Parse and check a catalog document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.check()?;
        debug!(
            projects = catalog.projects.len(),
            skills = catalog.skills.len(),
            experiences = catalog.experiences.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// The content shipped with the crate, parsed on first access.
    pub fn embedded() -> &'static Self {
        &EMBEDDED
    }

    fn check(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::with_capacity(self.projects.len());
        for project in &self.projects {
            if !seen.insert(project.id) {
                return Err(CatalogError::DuplicateProjectId(project.id));
            }
        }
        if let Some(skill) = self.skills.iter().find(|s| s.level > 100) {
            return Err(CatalogError::SkillLevelOutOfRange {
                name: skill.name.clone(),
                level: skill.level,
            });
        }
        Ok(())
    }

    /// Look up a project by id.
    pub fn project(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Featured projects in catalog order, at most `limit` of them.
    pub fn featured_projects(&self, limit: usize) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| p.featured)
            .take(limit)
            .collect()
    }

    /// The first `n` skills in declared order.
    pub fn top_skills(&self, n: usize) -> &[Skill] {
        &self.skills[..n.min(self.skills.len())]
    }

    /// Skills carrying exactly the given category label.
    pub fn skills_in_category(&self, category: &str) -> Vec<&Skill> {
        self.skills
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }
}

//! Biography records shown alongside the project showcase.

use serde::{Deserialize, Serialize};

/// A skill with a self-assessed proficiency from 0 to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: u8,
    pub category: String,
}

/// One entry of the work history timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: u32,
    pub title: String,
    pub company: String,
    /// Human-readable span, e.g. `"2020 - 2022"`.
    pub period: String,
    pub description: String,
}

/// An external profile link (GitHub, LinkedIn, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    /// Icon identifier understood by the presentation layer.
    pub icon: String,
}

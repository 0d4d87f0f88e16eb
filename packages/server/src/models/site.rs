use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// One entry of the events timeline on the public site.
#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TimelineEntry {
    #[schema(example = "2024")]
    pub year: String,
    #[schema(example = "Codeclash 3.0")]
    pub title: String,
    #[schema(example = "February 1, 2024")]
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FacultyMember {
    pub name: String,
    pub position: String,
    pub image: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CoreTeamMember {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// Editable content of the public site.
#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SiteContent {
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    #[serde(default)]
    pub faculty: Vec<FacultyMember>,
    #[serde(default)]
    pub core_team: Vec<CoreTeamMember>,
}

impl SiteContent {
    /// Read the content document. A missing file yields empty content.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Site content file not found, serving empty content");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
    }
}

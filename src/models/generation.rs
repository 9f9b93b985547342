use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::artifact::ArtifactKind;

/// How the external response maps onto the four JSON sections
///
/// The service contract does not pin this down, so it is configurable:
/// either one request per section file, or a single combined request whose
/// response object carries all sections at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestMode {
    PerSection,
    Combined,
}

impl RequestMode {
    pub fn parse(s: &str) -> Option<RequestMode> {
        match s.to_lowercase().as_str() {
            "per-section" | "persection" | "per_section" => Some(RequestMode::PerSection),
            "combined" => Some(RequestMode::Combined),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RequestMode::PerSection => "per-section",
            RequestMode::Combined => "combined",
        }
    }
}

/// Metadata recorded with a generation result
#[derive(Debug, Clone)]
pub struct GenerationMetadata {
    pub created_at: DateTime<Utc>,
    pub model: String,
    pub mode: RequestMode,
}

/// A fully validated generation response
///
/// Only the generation job constructs this, and only after all four JSON
/// sections have been validated. A value of this type is always complete;
/// a partially populated response is reported as an error instead.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub interaction: Value,
    pub visualization: Value,
    pub states: Value,
    pub transitions: Value,
    pub usage: String,
    pub metadata: GenerationMetadata,
}

impl GenerationResult {
    /// JSON section for an artifact; `None` for the usage document
    pub fn section(&self, kind: ArtifactKind) -> Option<&Value> {
        match kind {
            ArtifactKind::InteractionElements => Some(&self.interaction),
            ArtifactKind::VisualizationElements => Some(&self.visualization),
            ArtifactKind::States => Some(&self.states),
            ArtifactKind::Transitions => Some(&self.transitions),
            ArtifactKind::Usage => None,
        }
    }
}

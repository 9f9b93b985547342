//! Typed shapes of the four section files as the Vivian loader expects them.
//!
//! The field names (`Elements`, `Type`, `Name`, `States`, `Conditions`,
//! `SourceState`, `DestinationState`) are the loader's contract and must not
//! be renamed. Entries may carry arbitrary extra fields; the top-level
//! object may not.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::artifact::ArtifactKind;

/// Shape of `InteractionElements.json` and `VisualizationElements.json`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementList {
    #[serde(rename = "Elements")]
    pub elements: Vec<ElementEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ElementEntry {
    #[serde(rename = "Type")]
    pub element_type: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Shape of `States.json`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateList {
    #[serde(rename = "States")]
    pub states: Vec<StateEntry>,
}

#[derive(Debug, Deserialize)]
pub struct StateEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Conditions")]
    pub conditions: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Shape of `Transitions.json`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionList {
    #[serde(rename = "Transitions")]
    pub transitions: Vec<TransitionEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TransitionEntry {
    #[serde(rename = "SourceState")]
    pub source_state: String,
    #[serde(rename = "DestinationState")]
    pub destination_state: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Check a section value against its typed shape
///
/// The usage document has no structured shape and always passes.
pub fn validate_section(kind: ArtifactKind, value: &Value) -> Result<(), String> {
    let outcome = match kind {
        ArtifactKind::InteractionElements | ArtifactKind::VisualizationElements => {
            serde_json::from_value::<ElementList>(value.clone()).map(|_| ())
        }
        ArtifactKind::States => serde_json::from_value::<StateList>(value.clone()).map(|_| ()),
        ArtifactKind::Transitions => {
            serde_json::from_value::<TransitionList>(value.clone()).map(|_| ())
        }
        ArtifactKind::Usage => return Ok(()),
    };

    outcome.map_err(|e| format!("{}: {}", kind.file_name(), e))
}

/// JSON-schema text embedded into per-section prompts so the model sees the
/// exact structure it has to produce.
pub fn schema_hint(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::InteractionElements | ArtifactKind::VisualizationElements => {
            ELEMENTS_SCHEMA
        }
        ArtifactKind::States => STATES_SCHEMA,
        ArtifactKind::Transitions => TRANSITIONS_SCHEMA,
        ArtifactKind::Usage => "",
    }
}

const ELEMENTS_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "type": "object",
  "properties": {
    "Elements": {
      "type": "array",
      "items": {
        "type": "object",
        "properties": {
          "Type": { "type": "string" },
          "Name": { "type": "string" }
        },
        "required": ["Type", "Name"],
        "additionalProperties": true
      }
    }
  },
  "required": ["Elements"],
  "additionalProperties": false
}"#;

const STATES_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "type": "object",
  "properties": {
    "States": {
      "type": "array",
      "items": {
        "type": "object",
        "properties": {
          "Name": { "type": "string" },
          "Conditions": { "type": "array" }
        },
        "required": ["Name", "Conditions"],
        "additionalProperties": true
      }
    }
  },
  "required": ["States"],
  "additionalProperties": false
}"#;

const TRANSITIONS_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "type": "object",
  "properties": {
    "Transitions": {
      "type": "array",
      "items": {
        "type": "object",
        "properties": {
          "SourceState": { "type": "string" },
          "DestinationState": { "type": "string" }
        },
        "required": ["SourceState", "DestinationState"],
        "additionalProperties": true
      }
    }
  },
  "required": ["Transitions"],
  "additionalProperties": false
}"#;

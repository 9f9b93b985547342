use chrono::Utc;
use log::{debug, info};
use serde_json::Value;

use crate::errors::{GenError, GenResult};
use crate::models::artifact::ArtifactKind;
use crate::models::generation::{GenerationMetadata, GenerationResult, RequestMode};
use crate::models::sections::{schema_hint, validate_section};
use crate::traits::ChatBackend;

const SYSTEM_PROMPT: &str = "You are a strict configurator for Vivian prototypes. \
Follow the given JSON schema exactly and stay within the supplied documentation. \
No explanations, only the plain JSON required by the schema.";

/// The generation job: issues requests against a chat backend and turns the
/// responses into a fully validated [`GenerationResult`].
///
/// All four JSON sections are validated before the result is handed to the
/// caller; any validation failure aborts the job with a
/// [`GenError::MalformedResponse`] and nothing reaches the filesystem. There
/// is no automatic retry.
pub struct ArtifactGenerator<'a> {
    backend: &'a dyn ChatBackend,
    mode: RequestMode,
    model: String,
}

impl<'a> ArtifactGenerator<'a> {
    pub fn new(backend: &'a dyn ChatBackend, mode: RequestMode, model: impl Into<String>) -> Self {
        Self {
            backend,
            mode,
            model: model.into(),
        }
    }

    /// Run the job against the project spec and bundled docs
    pub async fn generate(&self, spec_text: &str, docs_text: &str) -> GenResult<GenerationResult> {
        info!("Generating artifacts in {} mode", self.mode.label());

        match self.mode {
            RequestMode::PerSection => self.generate_per_section(spec_text, docs_text).await,
            RequestMode::Combined => self.generate_combined(spec_text, docs_text).await,
        }
    }

    /// One request per JSON section, each validated against its typed shape
    async fn generate_per_section(
        &self,
        spec_text: &str,
        docs_text: &str,
    ) -> GenResult<GenerationResult> {
        let mut sections: Vec<Value> = Vec::with_capacity(ArtifactKind::JSON_SECTIONS.len());

        for kind in ArtifactKind::JSON_SECTIONS {
            info!("Requesting {}", kind.file_name());
            let user = build_section_prompt(spec_text, docs_text, kind);

            let raw = self.backend.complete(SYSTEM_PROMPT, &user).await?;
            debug!("Received {} characters for {}", raw.len(), kind.file_name());

            let value: Value = serde_json::from_str(&raw).map_err(|e| {
                GenError::MalformedResponse(format!(
                    "{} is not valid JSON: {}",
                    kind.file_name(),
                    e
                ))
            })?;

            validate_section(kind, &value).map_err(GenError::MalformedResponse)?;
            sections.push(value);
        }

        let mut sections = sections.into_iter();
        // JSON_SECTIONS order: interaction, visualization, states, transitions
        let interaction = sections.next().unwrap_or(Value::Null);
        let visualization = sections.next().unwrap_or(Value::Null);
        let states = sections.next().unwrap_or(Value::Null);
        let transitions = sections.next().unwrap_or(Value::Null);

        let metadata = self.metadata();
        let usage = render_usage_doc(&metadata);

        Ok(GenerationResult {
            interaction,
            visualization,
            states,
            transitions,
            usage,
            metadata,
        })
    }

    /// A single request whose response object carries all sections at once
    async fn generate_combined(
        &self,
        spec_text: &str,
        docs_text: &str,
    ) -> GenResult<GenerationResult> {
        let user = build_combined_prompt(spec_text, docs_text);

        let raw = self.backend.complete(SYSTEM_PROMPT, &user).await?;
        debug!("Received {} characters for combined response", raw.len());

        let value: Value = serde_json::from_str(&raw).map_err(|e| {
            GenError::MalformedResponse(format!("Combined response is not valid JSON: {}", e))
        })?;

        let object = value.as_object().ok_or_else(|| {
            GenError::MalformedResponse("Combined response is not a JSON object".to_string())
        })?;

        let take_section = |kind: ArtifactKind| -> GenResult<Value> {
            object.get(kind.section_key()).cloned().ok_or_else(|| {
                GenError::MalformedResponse(format!(
                    "Combined response is missing section '{}'",
                    kind.section_key()
                ))
            })
        };

        let interaction = take_section(ArtifactKind::InteractionElements)?;
        let visualization = take_section(ArtifactKind::VisualizationElements)?;
        let states = take_section(ArtifactKind::States)?;
        let transitions = take_section(ArtifactKind::Transitions)?;

        let usage = object
            .get(ArtifactKind::Usage.section_key())
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                GenError::MalformedResponse(
                    "Combined response is missing the 'usage' narrative".to_string(),
                )
            })?
            .to_string();

        Ok(GenerationResult {
            interaction,
            visualization,
            states,
            transitions,
            usage,
            metadata: self.metadata(),
        })
    }

    fn metadata(&self) -> GenerationMetadata {
        GenerationMetadata {
            created_at: Utc::now(),
            model: self.model.clone(),
            mode: self.mode,
        }
    }
}

fn build_section_prompt(spec_text: &str, docs_text: &str, kind: ArtifactKind) -> String {
    format!(
        "Target file: {file}\n\n\
        Task: produce only the JSON content of the file above.\n\
        Project specification:\n\
        ---\n\
        {spec}\n\
        ---\n\n\
        Excerpts from the official docs and samples (reference only, use the relevant parts):\n\
        ---\n\
        {docs}\n\
        ---\n\n\
        The output MUST be a single JSON object matching this schema exactly (jsonschema):\n\
        {schema}\n",
        file = kind.file_name(),
        spec = spec_text,
        docs = docs_text,
        schema = schema_hint(kind),
    )
}

fn build_combined_prompt(spec_text: &str, docs_text: &str) -> String {
    format!(
        "Task: produce the complete functional specification of the prototype as a single \
        JSON object with exactly these keys: \"interaction\", \"visualization\", \"states\", \
        \"transitions\", \"usage\".\n\
        The first four keys hold the JSON content of InteractionElements.json, \
        VisualizationElements.json, States.json and Transitions.json respectively; \
        \"usage\" holds a short Markdown usage note as a string.\n\n\
        Project specification:\n\
        ---\n\
        {spec}\n\
        ---\n\n\
        Excerpts from the official docs and samples (reference only, use the relevant parts):\n\
        ---\n\
        {docs}\n\
        ---\n",
        spec = spec_text,
        docs = docs_text,
    )
}

/// Usage document written alongside the four section files when the response
/// mode does not deliver one
fn render_usage_doc(metadata: &GenerationMetadata) -> String {
    format!(
        "# Usage\n\n\
        Copy the four generated files into the *FunctionalSpecification* folder of your \
        prototype:\n\n\
        - InteractionElements.json\n\
        - VisualizationElements.json\n\
        - States.json\n\
        - Transitions.json\n\n\
        Then start the project; the loader picks the files up automatically according to \
        the predefined structure.\n\n\
        Generated at {} with model `{}`.\n",
        metadata.created_at.to_rfc3339(),
        metadata.model,
    )
}

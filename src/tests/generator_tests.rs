#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::config::{ConfigError, GeneratorConfig};
    use crate::errors::{GenError, GenResult};
    use crate::implementations::generator::ArtifactGenerator;
    use crate::implementations::llm::{strip_code_fences, OpenAiClient};
    use crate::implementations::writer::ArtifactWriter;
    use crate::models::artifact::ArtifactKind;
    use crate::models::generation::RequestMode;
    use crate::traits::ChatBackend;

    fn setup() {
        let _ = env_logger::try_init();
    }

    /// Backend double that replays queued completions and counts calls
    struct MockBackend {
        responses: Mutex<VecDeque<String>>,
        calls: AtomicUsize,
    }

    impl MockBackend {
        fn new(responses: Vec<String>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatBackend for MockBackend {
        async fn complete(&self, _system: &str, _user: &str) -> GenResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| GenError::Network("mock backend exhausted".to_string()))
        }
    }

    fn element_response(name: &str) -> String {
        json!({ "Elements": [{ "Type": "Button", "Name": name }] }).to_string()
    }

    #[tokio::test]
    async fn combined_mode_writes_all_five_artifacts() {
        setup();

        let backend = MockBackend::new(vec![
            r#"{"interaction":[],"visualization":[],"states":[],"transitions":[],"usage":"none"}"#
                .to_string(),
        ]);
        let generator = ArtifactGenerator::new(&backend, RequestMode::Combined, "gpt-4o");

        let result = generator
            .generate("A cube that turns red when touched", "")
            .await
            .expect("combined generation should succeed");

        assert_eq!(backend.calls(), 1, "combined mode issues exactly one request");

        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path());
        let written = writer.write(&result).expect("write should succeed");
        assert_eq!(written.len(), 5);

        for kind in ArtifactKind::JSON_SECTIONS {
            let path = dir.path().join(kind.file_name());
            let text = std::fs::read_to_string(&path).unwrap();
            let value: Value =
                serde_json::from_str(&text).expect("artifact should be valid JSON");
            assert_eq!(value, json!([]), "{} should contain []", kind.file_name());
        }

        let usage = std::fs::read_to_string(dir.path().join("USAGE.md")).unwrap();
        assert!(usage.contains("none"));
    }

    #[tokio::test]
    async fn per_section_mode_issues_four_requests() {
        setup();

        let backend = MockBackend::new(vec![
            element_response("StartButton"),
            element_response("StatusLight"),
            r#"{"States":[{"Name":"Idle","Conditions":[]}]}"#.to_string(),
            r#"{"Transitions":[{"SourceState":"Idle","DestinationState":"Active"}]}"#.to_string(),
        ]);
        let generator = ArtifactGenerator::new(&backend, RequestMode::PerSection, "gpt-4o");

        let result = generator
            .generate("A lamp with an on/off button", "docs excerpt")
            .await
            .expect("per-section generation should succeed");

        assert_eq!(backend.calls(), 4);
        assert!(result.usage.contains("FunctionalSpecification"));
        assert!(result.usage.contains("gpt-4o"));

        let dir = tempfile::tempdir().unwrap();
        let written = ArtifactWriter::new(dir.path()).write(&result).unwrap();
        assert_eq!(written.len(), 5);

        let states: Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("States.json")).unwrap())
                .unwrap();
        assert_eq!(states["States"][0]["Name"], json!("Idle"));
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_request() {
        setup();
        std::env::remove_var(crate::config::API_KEY_ENV_VAR);

        let backend = MockBackend::new(vec![]);
        let config = GeneratorConfig::default();

        // The command resolves the credential before building any client;
        // replay that order here and check that the backend stayed idle.
        let err = config.resolve_api_key().unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(_)));
        assert_eq!(backend.calls(), 0, "no request may be attempted without a key");

        let err = OpenAiClient::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            GenError::Config(ConfigError::MissingCredential(_))
        ));
        assert_eq!(err.kind(), "MissingCredential");
    }

    #[tokio::test]
    async fn placeholder_key_counts_as_missing() {
        setup();
        std::env::remove_var(crate::config::API_KEY_ENV_VAR);

        let config = GeneratorConfig {
            api_key: Some("sk-REPLACE_ME_please".to_string()),
            ..GeneratorConfig::default()
        };

        assert!(matches!(
            config.resolve_api_key(),
            Err(ConfigError::MissingCredential(_))
        ));
    }

    #[tokio::test]
    async fn combined_response_missing_section_writes_nothing() {
        setup();

        // "states" is absent
        let backend = MockBackend::new(vec![
            r#"{"interaction":[],"visualization":[],"transitions":[],"usage":"x"}"#.to_string(),
        ]);
        let generator = ArtifactGenerator::new(&backend, RequestMode::Combined, "gpt-4o");

        let dir = tempfile::tempdir().unwrap();
        let err = generator.generate("spec", "").await.unwrap_err();
        assert!(matches!(err, GenError::MalformedResponse(_)));
        assert!(err.to_string().contains("states"));

        // Validation failed before the writer ran, so the directory is untouched
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn combined_response_requires_usage_narrative() {
        setup();

        let backend = MockBackend::new(vec![
            r#"{"interaction":[],"visualization":[],"states":[],"transitions":[]}"#.to_string(),
        ]);
        let generator = ArtifactGenerator::new(&backend, RequestMode::Combined, "gpt-4o");

        let err = generator.generate("spec", "").await.unwrap_err();
        assert!(matches!(err, GenError::MalformedResponse(_)));
        assert!(err.to_string().contains("usage"));
    }

    #[tokio::test]
    async fn non_json_response_is_malformed() {
        setup();

        let backend = MockBackend::new(vec!["this is not json".to_string()]);
        let generator = ArtifactGenerator::new(&backend, RequestMode::Combined, "gpt-4o");

        let err = generator.generate("spec", "").await.unwrap_err();
        assert!(matches!(err, GenError::MalformedResponse(_)));
        assert_eq!(err.kind(), "MalformedResponseError");
    }

    #[tokio::test]
    async fn per_section_rejects_entry_missing_required_field() {
        setup();

        // Second section entry has no "Name"
        let backend = MockBackend::new(vec![
            element_response("StartButton"),
            r#"{"Elements":[{"Type":"Slider"}]}"#.to_string(),
        ]);
        let generator = ArtifactGenerator::new(&backend, RequestMode::PerSection, "gpt-4o");

        let err = generator.generate("spec", "").await.unwrap_err();
        assert!(matches!(err, GenError::MalformedResponse(_)));
        // The job stopped at the failing section instead of finishing the run
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn per_section_rejects_unknown_top_level_field() {
        setup();

        let backend = MockBackend::new(vec![
            r#"{"Elements":[],"Extra":true}"#.to_string(),
        ]);
        let generator = ArtifactGenerator::new(&backend, RequestMode::PerSection, "gpt-4o");

        let err = generator.generate("spec", "").await.unwrap_err();
        assert!(matches!(err, GenError::MalformedResponse(_)));
    }

    #[test]
    fn strip_code_fences_handles_fenced_and_plain_text() {
        assert_eq!(strip_code_fences(r#"{"a":1}"#), r#"{"a":1}"#);
        assert_eq!(
            strip_code_fences("```json\n{\"a\":1}\n```"),
            r#"{"a":1}"#
        );
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), r#"{"a":1}"#);
        assert_eq!(strip_code_fences("  {\"a\":1}  "), r#"{"a":1}"#);
        // Single-line fences, with and without a language tag
        assert_eq!(strip_code_fences("```json {\"a\":1}```"), r#"{"a":1}"#);
        assert_eq!(strip_code_fences("```{\"a\":1}```"), r#"{"a":1}"#);
    }

    #[test]
    fn client_debug_output_redacts_credential() {
        let config = GeneratorConfig {
            api_key: Some("sk-very-secret".to_string()),
            ..GeneratorConfig::default()
        };

        let client = OpenAiClient::from_config(&config).expect("key is set in the config");
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn request_mode_parses_cli_strings() {
        assert_eq!(RequestMode::parse("combined"), Some(RequestMode::Combined));
        assert_eq!(
            RequestMode::parse("per-section"),
            Some(RequestMode::PerSection)
        );
        assert_eq!(
            RequestMode::parse("PerSection"),
            Some(RequestMode::PerSection)
        );
        assert_eq!(RequestMode::parse("both"), None);
    }
}

use anyhow::{anyhow, Result};
use log::warn;
use std::fs;
use std::path::Path;

use vivigen::config::GeneratorConfig;
use vivigen::implementations::generator::ArtifactGenerator;
use vivigen::implementations::llm::OpenAiClient;
use vivigen::implementations::writer::ArtifactWriter;
use vivigen::models::artifact::ArtifactKind;
use vivigen::models::generation::RequestMode;

use crate::cli::ui;

/// Documentation files bundled into the prompt when a docs directory is given
const DOC_FILES: [&str; 5] = [
    "README.md",
    "InteractionElementsDocu.md",
    "VisualizationElementsDocu.md",
    "StatesDocu.md",
    "TransitionsDocu.md",
];

/// Artifact generation command: one configuration, one generation job, one
/// atomic write of the five files.
pub async fn execute(
    config: &GeneratorConfig,
    spec_path: &Path,
    docs_dir: Option<&Path>,
    out_override: Option<&Path>,
    model_override: Option<&str>,
    mode_str: Option<&str>,
    interactive: bool,
) -> Result<()> {
    ui::print_header("Generating Functional Specification");

    let mut config = config.clone();
    if let Some(model) = model_override {
        config.model = Some(model.to_string());
    }
    if let Some(out) = out_override {
        config.out_dir = Some(out.to_path_buf());
    }

    let mode = match mode_str {
        Some(s) => {
            RequestMode::parse(s).ok_or_else(|| anyhow!("Unsupported request mode: {}", s))?
        }
        None => config.request_mode(),
    };

    // The credential gate comes first: without a key, no request machinery
    // is ever constructed and no network call happens.
    let client = OpenAiClient::from_config(&config)?;

    ui::print_info("Loading project specification...");
    let spec_text = fs::read_to_string(spec_path)
        .map_err(|e| anyhow!("Failed to read specification {}: {}", spec_path.display(), e))?;
    ui::print_info(format!("Loaded {} characters", spec_text.len()).as_str());

    let docs_text = match docs_dir {
        Some(dir) => {
            let bundle = load_docs_bundle(dir);
            if bundle.is_empty() {
                ui::print_warning(
                    format!("No documentation files found in {}", dir.display()).as_str(),
                );
            }
            bundle
        }
        None => String::new(),
    };

    let out_dir = config.out_dir();
    if interactive && has_existing_artifacts(&out_dir) {
        let prompt = format!(
            "Existing artifacts in {} will be overwritten. Continue?",
            out_dir.display()
        );
        if !ui::confirm(&prompt)? {
            ui::print_info("Aborted, nothing was written.");
            return Ok(());
        }
    }

    let generator = ArtifactGenerator::new(&client, mode, config.model());

    let spinner = ui::spinner_with_message("Requesting artifacts from the generation service...");
    let result = generator.generate(&spec_text, &docs_text).await;
    match &result {
        Ok(_) => spinner.finish_with_message("Generation complete"),
        Err(_) => spinner.finish_with_message("Generation failed"),
    }
    let result = result?;

    let writer = ArtifactWriter::new(&out_dir);
    let written = writer.write(&result)?;

    ui::print_success(format!("Files written to {}:", out_dir.display()).as_str());
    for path in &written {
        println!("   - {}", path.display());
    }

    ui::print_result("Model", &result.metadata.model);
    ui::print_result("Mode", result.metadata.mode.label());
    ui::print_result(
        "Generated at",
        &result.metadata.created_at.to_rfc3339(),
    );

    println!();
    ui::print_text(&result.usage);

    Ok(())
}

/// Join the known documentation files into one prompt block; missing files
/// are skipped with a warning.
fn load_docs_bundle(dir: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();

    for name in DOC_FILES {
        let path = dir.join(name);
        match fs::read_to_string(&path) {
            Ok(text) => {
                parts.push(format!("==== {} ====", name));
                parts.push(text);
            }
            Err(e) => {
                warn!("Skipping doc {}: {}", path.display(), e);
            }
        }
    }

    parts.join("\n")
}

fn has_existing_artifacts(out_dir: &Path) -> bool {
    ArtifactKind::ALL
        .iter()
        .any(|kind| out_dir.join(kind.file_name()).exists())
}

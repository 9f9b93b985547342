use anyhow::Result;

use vivigen::config::GeneratorConfig;

use crate::cli::ui;

/// Offline configuration check: resolves the credential and prints the
/// effective settings without contacting the generation service.
pub fn execute(config: &GeneratorConfig) -> Result<()> {
    ui::print_header("Configuration Check");

    match config.resolve_api_key() {
        Ok(_) => ui::print_success("API credential resolved"),
        Err(e) => {
            ui::print_error(&e.to_string());
            return Err(e.into());
        }
    }

    ui::print_result("Endpoint", &config.endpoint());
    ui::print_result("Model", &config.model());
    ui::print_result("Mode", config.request_mode().label());
    ui::print_result(
        "Output directory",
        &config.out_dir().display().to_string(),
    );

    Ok(())
}

use log::{debug, info, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::errors::{GenError, GenResult};
use crate::models::artifact::ArtifactKind;
use crate::models::generation::GenerationResult;

/// Writes the five artifacts of a run as an atomic set
///
/// Every file is first staged as a temporary sibling inside the output
/// directory and only renamed to its final name once all five staged writes
/// have succeeded. If any rename fails, files already persisted in this run
/// are removed again; unpersisted staging files delete themselves on drop.
/// Either all five artifacts exist afterwards or none from this run do.
pub struct ArtifactWriter {
    out_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Write all five artifacts, overwriting existing files of the same name
    pub fn write(&self, result: &GenerationResult) -> GenResult<Vec<PathBuf>> {
        fs::create_dir_all(&self.out_dir).map_err(|e| {
            GenError::Write(format!(
                "Failed to create output directory {}: {}",
                self.out_dir.display(),
                e
            ))
        })?;

        // Stage everything before touching any final file name
        let mut staged: Vec<(NamedTempFile, PathBuf)> = Vec::with_capacity(ArtifactKind::ALL.len());
        for kind in ArtifactKind::ALL {
            let contents = self.render(result, kind)?;
            let mut tmp = NamedTempFile::new_in(&self.out_dir).map_err(|e| {
                GenError::Write(format!(
                    "Failed to stage {} in {}: {}",
                    kind.file_name(),
                    self.out_dir.display(),
                    e
                ))
            })?;

            tmp.write_all(contents.as_bytes()).map_err(|e| {
                GenError::Write(format!("Failed to write staged {}: {}", kind.file_name(), e))
            })?;

            staged.push((tmp, self.out_dir.join(kind.file_name())));
        }

        let mut persisted: Vec<PathBuf> = Vec::with_capacity(staged.len());
        for (tmp, path) in staged {
            match tmp.persist(&path) {
                Ok(_) => {
                    debug!("Wrote {}", path.display());
                    persisted.push(path);
                }
                Err(e) => {
                    warn!("Failed to persist {}: {}", path.display(), e.error);
                    self.rollback(&persisted);
                    return Err(GenError::Write(format!(
                        "Failed to write {}: {}",
                        path.display(),
                        e.error
                    )));
                }
            }
        }

        info!(
            "Wrote {} artifacts to {}",
            persisted.len(),
            self.out_dir.display()
        );
        Ok(persisted)
    }

    fn render(&self, result: &GenerationResult, kind: ArtifactKind) -> GenResult<String> {
        match result.section(kind) {
            Some(value) => {
                let mut text = serde_json::to_string_pretty(value).map_err(|e| {
                    GenError::Write(format!("Failed to serialize {}: {}", kind.file_name(), e))
                })?;
                text.push('\n');
                Ok(text)
            }
            None => Ok(result.usage.clone()),
        }
    }

    /// Remove files persisted earlier in a run that failed mid-write
    fn rollback(&self, persisted: &[PathBuf]) {
        for path in persisted {
            if let Err(e) = fs::remove_file(path) {
                warn!("Cleanup failed for {}: {}", path.display(), e);
            } else {
                debug!("Removed partial artifact {}", path.display());
            }
        }
    }
}

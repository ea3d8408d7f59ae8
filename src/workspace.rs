//! Writing downloaded templates into a project.
//!
//! [`TemplateWriter`] places template content under a destination
//! directory, asking through the [`UserInterface`] before replacing an
//! existing file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Result, TemplateError};
use crate::registry::TemplateMetadata;
use crate::ui::{ConfirmPrompt, UserInterface};

/// Prompt key for the overwrite question.
pub const OVERWRITE_PROMPT_KEY: &str = "overwrite";

/// Writes template files into a directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateWriter {
    force: bool,
}

impl TemplateWriter {
    /// Create a writer that asks before overwriting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite existing files without asking.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Write `content` to `dest_dir/<template.filename>`.
    ///
    /// Returns the path written.
    pub fn install(
        &self,
        template: &TemplateMetadata,
        content: &str,
        dest_dir: &Path,
        ui: &mut dyn UserInterface,
    ) -> Result<PathBuf> {
        let target = target_path(template, dest_dir)?;

        fs::create_dir_all(dest_dir).map_err(|e| write_error(e, dest_dir))?;

        if target.exists() && !self.force {
            let prompt = ConfirmPrompt::new(
                OVERWRITE_PROMPT_KEY,
                format!("{} already exists. Overwrite?", target.display()),
                false,
            );
            if !ui.confirm(&prompt)? {
                return Err(TemplateError::FileExists { path: target });
            }
        }

        let temp_path = target.with_extension("md.tmp");
        fs::write(&temp_path, content).map_err(|e| write_error(e, &target))?;
        fs::rename(&temp_path, &target).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            write_error(e, &target)
        })?;

        tracing::debug!("Wrote template '{}' to {}", template.name, target.display());
        Ok(target)
    }
}

fn target_path(template: &TemplateMetadata, dest_dir: &Path) -> Result<PathBuf> {
    let filename = Path::new(&template.filename);
    let is_plain_name = filename.file_name() == Some(filename.as_os_str());
    if !is_plain_name {
        return Err(TemplateError::Other(anyhow::anyhow!(
            "Refusing to write template with unsafe file name '{}'",
            template.filename
        )));
    }
    Ok(dest_dir.join(filename))
}

fn write_error(err: std::io::Error, path: &Path) -> TemplateError {
    match err.kind() {
        ErrorKind::PermissionDenied => TemplateError::PermissionDenied {
            path: path.to_path_buf(),
        },
        ErrorKind::StorageFull => TemplateError::DiskFull {
            path: path.to_path_buf(),
        },
        _ => TemplateError::Io(err),
    }
}

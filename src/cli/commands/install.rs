//! Install command implementation.
//!
//! The `steering install` command downloads a template into the project.

use std::path::{Path, PathBuf};

use crate::cli::args::InstallArgs;
use crate::error::Result;
use crate::registry::TemplateCatalog;
use crate::ui::UserInterface;
use crate::workspace::TemplateWriter;

use super::dispatcher::{Command, CommandResult};
use super::show::find_or_report;

/// Default install directory for a project root.
pub fn default_install_dir(project_root: &Path) -> PathBuf {
    project_root.join(".steering").join("templates")
}

/// The install command implementation.
pub struct InstallCommand<'a> {
    catalog: &'a TemplateCatalog,
    project_root: PathBuf,
    args: InstallArgs,
}

impl<'a> InstallCommand<'a> {
    /// Create a new install command.
    pub fn new(catalog: &'a TemplateCatalog, project_root: &Path, args: InstallArgs) -> Self {
        Self {
            catalog,
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Directory the template will be written to.
    pub fn dest_dir(&self) -> PathBuf {
        match &self.args.dest {
            Some(dest) if dest.is_absolute() => dest.clone(),
            Some(dest) => self.project_root.join(dest),
            None => default_install_dir(&self.project_root),
        }
    }
}

impl Command for InstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(template) = find_or_report(self.catalog, &self.args.source, &self.args.name, ui)?
        else {
            return Ok(CommandResult::failure(1));
        };

        let content = self.catalog.download(&template)?;
        let path = TemplateWriter::new().force(self.args.force).install(
            &template,
            &content,
            &self.dest_dir(),
            ui,
        )?;

        ui.success(&format!("Installed {} to {}", template.filename, path.display()));
        Ok(CommandResult::success())
    }
}

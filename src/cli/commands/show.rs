//! Show command implementation.
//!
//! The `steering show` command prints one template's metadata and content.

use crate::cli::args::{ShowArgs, SourceArgs};
use crate::error::Result;
use crate::registry::{TemplateCatalog, TemplateMetadata};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::format_size;

/// The show command implementation.
pub struct ShowCommand<'a> {
    catalog: &'a TemplateCatalog,
    args: ShowArgs,
}

impl<'a> ShowCommand<'a> {
    /// Create a new show command.
    pub fn new(catalog: &'a TemplateCatalog, args: ShowArgs) -> Self {
        Self { catalog, args }
    }
}

impl Command for ShowCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(template) = find_or_report(self.catalog, &self.args.source, &self.args.name, ui)?
        else {
            return Ok(CommandResult::failure(1));
        };

        ui.show_header(&template.name);
        ui.message(&format!("File:  {}", template.filename));
        ui.message(&format!("Path:  {}", template.path));
        ui.message(&format!("Size:  {}", format_size(template.size_bytes)));
        ui.message(&format!("SHA:   {}", template.content_hash));

        if !self.args.metadata_only {
            let content = self.catalog.download(&template)?;
            ui.message("");
            ui.message(content.trim_end());
        }

        Ok(CommandResult::success())
    }
}

/// Look a template up by name, printing a hint when it is missing.
pub(crate) fn find_or_report(
    catalog: &TemplateCatalog,
    source: &SourceArgs,
    name: &str,
    ui: &mut dyn UserInterface,
) -> Result<Option<TemplateMetadata>> {
    let repo = &source.repository;
    let found = catalog.find(&repo.owner, &repo.repo, source.path(), source.branch(), name)?;

    if found.is_none() {
        ui.error(&format!("No template named '{}' in {}", name, repo));
        ui.hint(&format!("Run `steering list {}` to see available templates", repo));
    }
    Ok(found)
}

//! List command implementation.
//!
//! The `steering list` command lists templates in a repository directory.

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::registry::TemplateCatalog;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::template_table;

/// The list command implementation.
pub struct ListCommand<'a> {
    catalog: &'a TemplateCatalog,
    args: ListArgs,
}

impl<'a> ListCommand<'a> {
    /// Create a new list command.
    pub fn new(catalog: &'a TemplateCatalog, args: ListArgs) -> Self {
        Self { catalog, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let source = &self.args.source;
        let repo = &source.repository;

        let templates = if self.args.refresh {
            self.catalog
                .refresh(&repo.owner, &repo.repo, source.path(), source.branch())?
        } else {
            self.catalog
                .list(&repo.owner, &repo.repo, source.path(), source.branch())?
        };

        if self.args.json {
            let output = serde_json::to_string_pretty(&templates).map_err(anyhow::Error::from)?;
            ui.message(&output);
            return Ok(CommandResult::success());
        }

        let location = match source.path() {
            Some(path) => format!("{}/{}", repo, path.trim_matches('/')),
            None => repo.to_string(),
        };

        if templates.is_empty() {
            ui.warning(&format!("No templates found in {}", location));
            return Ok(CommandResult::success());
        }

        ui.show_header(&format!("{} templates in {}", templates.len(), location));
        ui.message(&template_table(&templates).render());

        Ok(CommandResult::success())
    }
}

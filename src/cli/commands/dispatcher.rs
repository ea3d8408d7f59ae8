//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::CacheStore;
use crate::cli::args::{Cli, Commands};
use crate::config::{default_config_path, ConfigProvider, GithubSettings, YamlSettings};
use crate::error::Result;
use crate::registry::{GithubClient, TemplateCatalog};
use crate::state::{default_state_path, FileStore};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Settings file in effect for `cli`.
    pub fn config_path(&self, cli: &Cli) -> PathBuf {
        cli.config
            .clone()
            .unwrap_or_else(|| default_config_path(&self.project_root))
    }

    /// State file in effect for `cli`.
    pub fn state_path(&self, cli: &Cli) -> PathBuf {
        cli.state
            .clone()
            .unwrap_or_else(|| default_state_path(&self.project_root))
    }

    /// Build the catalog described by the global flags.
    ///
    /// Flags override the settings file for the token and API URL. An
    /// unreadable settings file is logged and treated as empty.
    pub fn open_catalog(&self, cli: &Cli) -> Result<TemplateCatalog> {
        let settings: Arc<dyn ConfigProvider> = Arc::new(YamlSettings::new(self.config_path(cli)));

        let github = GithubSettings::resolve(settings.as_ref())
            .unwrap_or_else(|e| {
                tracing::warn!("Ignoring GitHub settings, using defaults: {:#}", e);
                GithubSettings::default()
            })
            .with_token_override(cli.token.clone())
            .with_api_url_override(cli.api_url.clone());
        tracing::debug!(
            "Using GitHub API at {} ({})",
            github.api_url,
            if github.token.is_some() {
                "authenticated"
            } else {
                "anonymous"
            }
        );
        let client = GithubClient::from_settings(&github)?;

        let store = Arc::new(FileStore::new(self.state_path(cli)));
        let cache = CacheStore::new(store, settings);

        Ok(TemplateCatalog::new(client, cache))
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let catalog = self.open_catalog(cli)?;
        self.dispatch_with(&catalog, &cli.command, ui)
    }

    /// Execute `command` against an already opened catalog.
    pub fn dispatch_with(
        &self,
        catalog: &TemplateCatalog,
        command: &Commands,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        match command {
            Commands::List(args) => super::list::ListCommand::new(catalog, args.clone()).execute(ui),
            Commands::Show(args) => super::show::ShowCommand::new(catalog, args.clone()).execute(ui),
            Commands::Install(args) => {
                super::install::InstallCommand::new(catalog, &self.project_root, args.clone())
                    .execute(ui)
            }
            Commands::Validate(args) => {
                super::repo::ValidateCommand::new(catalog, args.clone()).execute(ui)
            }
            Commands::RateLimit(args) => {
                super::repo::RateLimitCommand::new(catalog, args.clone()).execute(ui)
            }
            Commands::Cache(args) => {
                super::cache::CacheCommand::new(catalog, args.clone()).execute(ui)
            }
        }
    }
}

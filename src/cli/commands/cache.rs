//! Cache command implementation.
//!
//! Provides `steering cache stats`, `steering cache clear` and
//! `steering cache invalidate`.

use clap::{Args, Subcommand};

use crate::cache::{format_duration, CacheStore};
use crate::cli::args::RepoRef;
use crate::error::Result;
use crate::registry::{cache_key, TemplateCatalog};
use crate::ui::{ConfirmPrompt, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Arguments for the cache command.
#[derive(Debug, Clone, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// Show cache statistics.
    Stats {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
        /// List every cached key.
        #[arg(short, long)]
        verbose: bool,
    },
    /// Remove every cached listing.
    Clear {
        /// Don't prompt for confirmation.
        #[arg(short, long)]
        force: bool,
    },
    /// Remove the cached listing for one repository directory.
    Invalidate {
        /// Repository as owner/repo.
        repository: RepoRef,
        /// Directory inside the repository.
        #[arg(long)]
        path: Option<String>,
    },
}

/// The cache command implementation.
pub struct CacheCommand<'a> {
    catalog: &'a TemplateCatalog,
    args: CacheArgs,
}

impl<'a> CacheCommand<'a> {
    /// Create a new cache command.
    pub fn new(catalog: &'a TemplateCatalog, args: CacheArgs) -> Self {
        Self { catalog, args }
    }
}

impl Command for CacheCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let cache = self.catalog.cache();

        match &self.args.command {
            CacheSubcommand::Stats { json, verbose } => {
                show_stats(cache, *json, *verbose, ui)?
            }
            CacheSubcommand::Clear { force } => clear_cache(cache, *force, ui)?,
            CacheSubcommand::Invalidate { repository, path } => {
                let key = cache_key(&repository.owner, &repository.repo, path.as_deref());
                cache.invalidate(&key)?;
                ui.success(&format!("Invalidated cached listing '{}'", key));
            }
        }

        Ok(CommandResult::success())
    }
}

fn show_stats(
    cache: &CacheStore,
    json: bool,
    verbose: bool,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let stats = cache.stats()?;

    if json {
        let output = serde_json::to_string_pretty(&stats).map_err(anyhow::Error::from)?;
        ui.message(&output);
        return Ok(());
    }

    let ttl = chrono::Duration::seconds(stats.configuration.ttl_seconds as i64);
    ui.message("Cache Statistics:\n");
    ui.message(&format!("  Total entries: {}", stats.total_entries));
    ui.message(&format!("  Fresh: {}", stats.fresh_entries));
    ui.message(&format!("  Stale: {}", stats.stale_entries));
    ui.message(&format!("  TTL: {}", format_duration(ttl)));
    ui.message(&format!("  Max entries: {}", stats.configuration.max_entries));

    if verbose {
        let keys = cache.keys()?;
        if !keys.is_empty() {
            ui.message("\nCached listings:");
            for key in keys {
                let marker = if cache.is_fresh(&key)? { "fresh" } else { "stale" };
                ui.message(&format!("  {} ({})", key, marker));
            }
        }
    }

    Ok(())
}

fn clear_cache(cache: &CacheStore, force: bool, ui: &mut dyn UserInterface) -> Result<()> {
    let count = cache.keys()?.len();
    if count == 0 {
        ui.message("Cache is already empty");
        return Ok(());
    }

    if !force && ui.is_interactive() {
        let prompt = ConfirmPrompt::new(
            "clear-cache",
            format!("Clear {} cached listings?", count),
            false,
        );
        if !ui.confirm(&prompt)? {
            ui.message("Cancelled");
            return Ok(());
        }
    }

    let cleared = cache.clear_all()?;
    ui.success(&format!("Cleared {} entries", cleared));
    Ok(())
}

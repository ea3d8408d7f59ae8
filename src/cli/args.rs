//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::commands::cache::CacheArgs;

/// Steering - Browse and install markdown steering templates from GitHub.
#[derive(Debug, Parser)]
#[command(name = "steering")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to settings file (overrides default .steering/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to cache state file (overrides default .steering/state.json)
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// GitHub token for authenticated requests
    #[arg(long, global = true, env = "STEERING_GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List templates in a repository directory
    List(ListArgs),

    /// Print a template's details and content
    Show(ShowArgs),

    /// Download a template into the project
    Install(InstallArgs),

    /// Check that a repository exists and is reachable
    Validate(ValidateArgs),

    /// Show the GitHub API rate-limit budget
    RateLimit(RateLimitArgs),

    /// Inspect and manage the listing cache
    Cache(CacheArgs),
}

/// A GitHub repository written as `owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl FromStr for RepoRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, repo))
                if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(format!("expected 'owner/repo', got '{}'", s)),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Where to look for templates.
#[derive(Debug, Clone, clap::Args)]
pub struct SourceArgs {
    /// Repository as owner/repo
    pub repository: RepoRef,

    /// Directory inside the repository
    #[arg(long)]
    pub path: Option<String>,

    /// Branch, tag or commit to read from
    #[arg(short, long)]
    pub branch: Option<String>,
}

impl SourceArgs {
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Ignore any cached listing and fetch again
    #[arg(long)]
    pub refresh: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Template name or file name
    pub name: String,

    /// Only print metadata, not content
    #[arg(long)]
    pub metadata_only: bool,
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, clap::Args)]
pub struct InstallArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Template name or file name
    pub name: String,

    /// Destination directory (default: .steering/templates in the project)
    #[arg(short, long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Overwrite an existing file without asking
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `validate` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ValidateArgs {
    /// Repository as owner/repo
    pub repository: RepoRef,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `rate-limit` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RateLimitArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

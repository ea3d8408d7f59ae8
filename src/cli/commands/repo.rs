//! Repository and API status commands.
//!
//! Provides `steering validate` and `steering rate-limit`.

use chrono::Utc;

use crate::cli::args::{RateLimitArgs, ValidateArgs};
use crate::error::Result;
use crate::registry::TemplateCatalog;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The validate command implementation.
pub struct ValidateCommand<'a> {
    catalog: &'a TemplateCatalog,
    args: ValidateArgs,
}

impl<'a> ValidateCommand<'a> {
    /// Create a new validate command.
    pub fn new(catalog: &'a TemplateCatalog, args: ValidateArgs) -> Self {
        Self { catalog, args }
    }
}

impl Command for ValidateCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let repo = &self.args.repository;
        let check = self.catalog.client().validate_repository(&repo.owner, &repo.repo);

        if self.args.json {
            let output = serde_json::to_string_pretty(&check).map_err(anyhow::Error::from)?;
            ui.message(&output);
        } else if check.valid {
            ui.success(&format!("{} is reachable", repo));
        } else {
            let reason = check.error.as_deref().unwrap_or("unknown error");
            match check.status_code {
                Some(status) => ui.error(&format!("{} (HTTP {})", reason, status)),
                None => ui.error(reason),
            }
        }

        Ok(if check.valid {
            CommandResult::success()
        } else {
            CommandResult::failure(1)
        })
    }
}

/// The rate-limit command implementation.
pub struct RateLimitCommand<'a> {
    catalog: &'a TemplateCatalog,
    args: RateLimitArgs,
}

impl<'a> RateLimitCommand<'a> {
    /// Create a new rate-limit command.
    pub fn new(catalog: &'a TemplateCatalog, args: RateLimitArgs) -> Self {
        Self { catalog, args }
    }
}

impl Command for RateLimitCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let status = self.catalog.client().rate_limit_status();

        if self.args.json {
            let output = serde_json::to_string_pretty(&status).map_err(anyhow::Error::from)?;
            ui.message(&output);
            return Ok(CommandResult::success());
        }

        let resets_in = (status.reset_time - Utc::now()).max(chrono::Duration::zero());
        ui.message(&format!("Remaining: {}/{}", status.remaining, status.limit));
        ui.message(&format!(
            "Resets:    {} (in {})",
            status.reset_time.format("%Y-%m-%d %H:%M:%S UTC"),
            crate::cache::format_duration(resets_in)
        ));
        ui.message(&format!(
            "Mode:      {}",
            if status.authenticated {
                "authenticated"
            } else {
                "anonymous"
            }
        ));

        if status.remaining == 0 && !status.authenticated {
            ui.hint("Set STEERING_GITHUB_TOKEN to raise the limit");
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::RepoRef;
    use crate::cli::commands::test_support::catalog;
    use crate::registry::fetch::{HttpResponse, MockTransport};
    use crate::ui::MockUI;
    use serde_json::json;
    use std::sync::Arc;

    fn validate_args(json: bool) -> ValidateArgs {
        ValidateArgs {
            repository: RepoRef {
                owner: "octo".to_string(),
                repo: "rules".to_string(),
            },
            json,
        }
    }

    #[test]
    fn validate_success() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!({"full_name": "octo/rules"}));
        let catalog = catalog(&transport);
        let mut ui = MockUI::new();

        let result = ValidateCommand::new(&catalog, validate_args(false))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_success("octo/rules is reachable"));
    }

    #[test]
    fn validate_not_found_fails() {
        let transport = Arc::new(MockTransport::new());
        transport.push_response(HttpResponse::new(404, ""));
        let catalog = catalog(&transport);
        let mut ui = MockUI::new();

        let result = ValidateCommand::new(&catalog, validate_args(false))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("HTTP 404"));
    }

    #[test]
    fn validate_json() {
        let transport = Arc::new(MockTransport::new());
        transport.push_response(HttpResponse::new(401, ""));
        let catalog = catalog(&transport);
        let mut ui = MockUI::new();

        ValidateCommand::new(&catalog, validate_args(true))
            .execute(&mut ui)
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(parsed["valid"], false);
        assert_eq!(parsed["status_code"], 401);
    }

    #[test]
    fn rate_limit_reports_budget() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!({
            "resources": {"core": {"limit": 60, "remaining": 42, "reset": 1700000000}}
        }));
        let catalog = catalog(&transport);
        let mut ui = MockUI::new();

        RateLimitCommand::new(&catalog, RateLimitArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_message("Remaining: 42/60"));
        assert!(ui.has_message("anonymous"));
        assert!(ui.hints().is_empty());
    }

    #[test]
    fn rate_limit_failure_suggests_token() {
        let transport = Arc::new(MockTransport::new());
        transport.push_connection_error("offline");
        let catalog = catalog(&transport);
        let mut ui = MockUI::new();

        let result = RateLimitCommand::new(&catalog, RateLimitArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_message("Remaining: 0/60"));
        assert!(ui.has_hint("STEERING_GITHUB_TOKEN"));
    }
}

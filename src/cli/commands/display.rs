//! Shared display helpers.
//!
//! These helpers are used by every command that renders templates or
//! reports a [`TemplateError`], so output stays consistent.

use crate::error::{RecoveryAction, TemplateError};
use crate::registry::TemplateMetadata;
use crate::ui::{Align, Table, UserInterface};

/// Concrete next step for a recovery action.
pub fn recovery_hint(action: RecoveryAction) -> &'static str {
    match action {
        RecoveryAction::ConfigureToken => {
            "set STEERING_GITHUB_TOKEN or github.token in .steering/config.yml"
        }
        RecoveryAction::ClearCache => "run `steering cache clear`",
        RecoveryAction::Retry => "try again in a moment",
        RecoveryAction::CheckRepository => "check the owner/repo and --path arguments",
    }
}

/// Print an error with its recovery suggestions.
pub fn report_error(ui: &mut dyn UserInterface, err: &TemplateError) {
    ui.error(&err.user_message());
    for action in err.recovery_actions() {
        ui.hint(&format!("{}: {}", action.label(), recovery_hint(action)));
    }
}

/// Format a byte count for display.
pub fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;

    if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Table of templates in listing order.
pub fn template_table(templates: &[TemplateMetadata]) -> Table {
    let mut table = Table::new(&["Name", "Path", "Size"]).align(2, Align::Right);
    for t in templates {
        table.add_row(vec![
            t.name.clone(),
            t.path.clone(),
            format_size(t.size_bytes),
        ]);
    }
    table
}

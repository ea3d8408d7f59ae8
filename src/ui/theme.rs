//! Visual theme and styling.

use console::Style;

/// Terminal theme for template output.
#[derive(Debug, Clone)]
pub struct SteeringTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
    /// Style for contextual hints (cyan dim).
    pub hint: Style,
}

impl Default for SteeringTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SteeringTheme {
    /// Create the colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            hint: Style::new().cyan().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or NO_COLOR).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            hint: Style::new(),
        }
    }

    /// Format a success message.
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message.
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message.
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a hint line.
    pub fn format_hint(&self, hint: &str) -> String {
        format!("  {}", self.hint.apply_to(format!("→ {}", hint)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("▸"),
            self.highlight.apply_to(title)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let msg = SteeringTheme::plain().format_success("Installed");
        assert!(msg.contains("✓ Installed"));
    }

    #[test]
    fn theme_formats_warning() {
        let msg = SteeringTheme::plain().format_warning("Cache corrupted");
        assert!(msg.contains("⚠"));
        assert!(msg.contains("Cache corrupted"));
    }

    #[test]
    fn theme_formats_error() {
        let msg = SteeringTheme::plain().format_error("Not found");
        assert!(msg.contains("✗ Not found"));
    }

    #[test]
    fn theme_formats_hint() {
        let msg = SteeringTheme::plain().format_hint("Retry");
        assert!(msg.starts_with("  "));
        assert!(msg.contains("→ Retry"));
    }

    #[test]
    fn theme_formats_header() {
        let msg = SteeringTheme::plain().format_header("octo/rules");
        assert!(msg.contains("octo/rules"));
    }

    #[test]
    fn colored_theme_creates_without_panic() {
        let theme = SteeringTheme::default();
        let _ = theme.format_success("test");
        let _ = theme.dim.apply_to("dim");
    }
}

//! Terminal color support detection and formatting.
//!
//! Respects the NO_COLOR environment variable and only emits ANSI codes
//! when both stdout and stderr are terminals.

use std::env;
use std::io::{self, IsTerminal};

/// Color support detection and formatting
pub struct ColorSupport {
    enabled: bool,
}

impl ColorSupport {
    /// Detect color support automatically
    pub fn detect() -> Self {
        let enabled = Self::should_use_colors();
        Self { enabled }
    }

    /// Check if colors should be used
    fn should_use_colors() -> bool {
        if env::var("NO_COLOR").is_ok() {
            return false;
        }

        io::stderr().is_terminal() && io::stdout().is_terminal()
    }

    /// Format text in green
    pub fn green(&self, text: &str) -> String {
        self.paint("32", text)
    }

    /// Format text in yellow
    pub fn yellow(&self, text: &str) -> String {
        self.paint("33", text)
    }

    /// Format text in red
    pub fn red(&self, text: &str) -> String {
        self.paint("31", text)
    }

    /// Format text as dim/gray
    pub fn dim(&self, text: &str) -> String {
        self.paint("2", text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_colors_pass_through() {
        let colors = ColorSupport { enabled: false };
        assert_eq!(colors.green("ok"), "ok");
        assert_eq!(colors.red("bad"), "bad");
    }

    #[test]
    fn test_enabled_colors_wrap_in_ansi() {
        let colors = ColorSupport { enabled: true };
        assert_eq!(colors.yellow("warn"), "\x1b[33mwarn\x1b[0m");
        assert!(colors.dim("note").starts_with("\x1b[2m"));
    }
}

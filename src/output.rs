//! # Terminal Output
//!
//! Status lines printed by the CLI while a build runs. Colour and emoji are
//! only used when the terminal and the user allow it:
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! Diagnostics go through `log`; this module is only for the short summary a
//! person watching the build reads.

use console::style;
use std::env;
use std::time::Duration;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `color_flag` is the value of `--color`: `always` overrides `NO_COLOR`,
    /// `never` turns colour off, anything else detects it from the
    /// environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Start,
    Success,
    Failure,
}

impl Status {
    fn emoji(self) -> &'static str {
        match self {
            Status::Start => "🔨",
            Status::Success => "✅",
            Status::Failure => "❌",
        }
    }

    fn plain(self) -> &'static str {
        match self {
            Status::Start => "[BUILD]",
            Status::Success => "[OK]",
            Status::Failure => "[FAIL]",
        }
    }
}

/// Returns the emoji when colors are enabled and `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Formats a status line with its prefix, styled when colors are enabled.
pub fn status_line(config: &OutputConfig, status: Status, message: &str) -> String {
    let prefix = emoji(config, status.emoji(), status.plain());
    if !config.use_color {
        return format!("{} {}", prefix, message);
    }

    let message = match status {
        Status::Start => style(message).bold(),
        Status::Success => style(message).green(),
        Status::Failure => style(message).red().bold(),
    };
    format!("{} {}", prefix, message.force_styling(true))
}

/// Human-readable build duration, e.g. `4.21s` or `2m 05s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        format!("{:.2}s", elapsed.as_secs_f64())
    } else {
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}

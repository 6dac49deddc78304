//! Output formatter for human-readable and JSON output

use serde::Serialize;

use super::OutputConfig;

/// Formatter for CLI output
///
/// In JSON mode stdout carries a single JSON document and errors are
/// reported as JSON objects on stderr.
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Check if JSON output mode is enabled
    pub fn is_json(&self) -> bool {
        self.config.json
    }

    /// Check if colors are enabled
    pub fn colors_enabled(&self) -> bool {
        !self.config.no_color && !self.config.json
    }

    /// Print the signed URL
    ///
    /// Always printed, quiet mode included; it is the program's result.
    pub fn url(&self, url: &str) {
        println!("{url}");
    }

    /// Output JSON to stdout
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing output: {e}"),
        }
    }

    /// Print a diagnostic line on stderr (respects quiet mode)
    pub fn diagnostic(&self, message: &str) {
        if let Some(line) = self.render_diagnostic(message) {
            eprintln!("{line}");
        }
    }

    /// Output an error message
    ///
    /// Errors are always printed, even in quiet mode.
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.render_error(message));
    }

    /// Suggest where to look next after a usage error
    pub fn hint(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }
        eprintln!("{message}");
    }

    pub(crate) fn render_diagnostic(&self, message: &str) -> Option<String> {
        (!self.config.quiet).then(|| message.to_string())
    }

    fn render_error(&self, message: &str) -> String {
        if self.config.json {
            let error = serde_json::json!({ "error": message });
            serde_json::to_string_pretty(&error).unwrap_or_else(|_| message.to_string())
        } else if self.colors_enabled() {
            format!("\x1b[31merror:\x1b[0m {message}")
        } else {
            format!("error: {message}")
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}

//! Output formatting
//!
//! Verbosity handling, tracing setup and error display for the CLI.

use tracing::Level;

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

/// Verbosity chosen on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Only errors are shown
    pub quiet: bool,
    /// Number of `-v` flags
    pub verbose: u8,
}

impl OutputConfig {
    /// Create an output configuration
    pub fn new(quiet: bool, verbose: u8) -> Self {
        Self { quiet, verbose }
    }

    /// Default log level; `RUST_LOG` directives still apply on top
    pub fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Install the global tracing subscriber
    pub fn init_tracing(&self) {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(self.log_level().into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Print an error and its cause chain to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} Error: {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  Caused by: {cause}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_is_warn() {
        assert_eq!(OutputConfig::default().log_level(), Level::WARN);
    }

    #[test]
    fn test_verbose_levels() {
        assert_eq!(OutputConfig::new(false, 1).log_level(), Level::INFO);
        assert_eq!(OutputConfig::new(false, 2).log_level(), Level::DEBUG);
        assert_eq!(OutputConfig::new(false, 5).log_level(), Level::TRACE);
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        assert_eq!(OutputConfig::new(true, 3).log_level(), Level::ERROR);
    }
}

//! Application configuration
//!
//! Command-line level settings, as opposed to the job configuration file.

use anyhow::Result;
use std::path::PathBuf;

/// Application configuration structure
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Working directory
    pub working_dir: PathBuf,
    /// Explicit job configuration file
    pub config_path: Option<PathBuf>,
    /// Filter directive from the job configuration, used when not verbose
    pub log_filter: Option<String>,
}

impl AppConfig {
    /// Create a new application configuration
    pub fn new(verbose: u8) -> Result<Self> {
        let working_dir = std::env::current_dir()
            .map_err(|e| anyhow::anyhow!("Failed to get current directory: {}", e))?;

        Ok(Self {
            verbose,
            working_dir,
            config_path: None,
            log_filter: None,
        })
    }

    /// Set the working directory
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = dir;
        self
    }

    /// Set the job configuration file
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Set the configured filter directive
    pub fn with_log_filter(mut self, filter: Option<String>) -> Self {
        self.log_filter = filter;
        self
    }

    /// Get the log filter based on verbosity
    ///
    /// `-v` flags win over the configured directive.
    pub fn log_level(&self) -> &str {
        match self.verbose {
            0 => self.log_filter.as_deref().unwrap_or("info"),
            1 => "debug",
            2 => "trace",
            _ => "trace,hyper=debug,reqwest=debug",
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            verbose: 0,
            working_dir: PathBuf::from("."),
            config_path: None,
            log_filter: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_by_verbosity() {
        let config = AppConfig::default();
        assert_eq!(config.log_level(), "info");
        assert_eq!(AppConfig { verbose: 1, ..config.clone() }.log_level(), "debug");
        assert_eq!(AppConfig { verbose: 2, ..config.clone() }.log_level(), "trace");
        assert!(AppConfig { verbose: 5, ..config }.log_level().starts_with("trace"));
    }

    #[test]
    fn test_configured_filter_applies_when_quiet() {
        let config = AppConfig::default().with_log_filter(Some("warn".to_string()));
        assert_eq!(config.log_level(), "warn");
        let verbose = AppConfig {
            verbose: 1,
            ..config
        };
        assert_eq!(verbose.log_level(), "debug");
    }
}

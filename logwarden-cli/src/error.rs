//! CLI-specific error types and exit code mapping

use logwarden_analyzer::AnalyzerError;
use logwarden_core::error::{AnalysisError, LogwardenError};

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Neither `--web` nor `--auth` was given.
    #[error("no input: {0}")]
    NoInput(String),

    /// A log or blacklist file could not be read.
    #[error("input error: {0}")]
    Input(String),

    /// CSV export failed.
    #[error("export error: {0}")]
    Export(String),

    /// Analysis raised alerts and `--fail-on-alert` was set.
    #[error("{0} alert(s) raised")]
    AlertsFound(usize),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from logwarden-core.
    #[error("{0}")]
    Core(#[from] LogwardenError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                 |
    /// |------|-----------------------------------------|
    /// | 0    | Success                                 |
    /// | 1    | General / command error                 |
    /// | 2    | Configuration error                     |
    /// | 3    | No input log given                      |
    /// | 4    | Alerts raised with `--fail-on-alert`    |
    /// | 10   | IO error (input, export, stdout)        |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::NoInput(_) => 3,
            Self::AlertsFound(_) => 4,
            Self::Input(_) | Self::Export(_) | Self::Io(_) => 10,
            Self::Core(inner) => match inner {
                LogwardenError::Config(_) => 2,
                LogwardenError::Analysis(AnalysisError::NoSources) => 3,
                LogwardenError::Analysis(_) | LogwardenError::Io(_) => 10,
            },
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

impl From<AnalyzerError> for CliError {
    fn from(e: AnalyzerError) -> Self {
        match e {
            AnalyzerError::NoSources => Self::NoInput(e.to_string()),
            AnalyzerError::Read { .. } | AnalyzerError::Blacklist { .. } => {
                Self::Input(e.to_string())
            }
            AnalyzerError::Export { .. } => Self::Export(e.to_string()),
            AnalyzerError::Config { .. } => Self::Config(e.to_string()),
            AnalyzerError::Regex(_) => Self::Command(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logwarden_core::error::ConfigError;

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("test error".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_no_input() {
        let err = CliError::NoInput("select at least one log file".to_owned());
        assert_eq!(err.exit_code(), 3, "no input should return exit code 3");
    }

    #[test]
    fn test_exit_code_alerts_found() {
        let err = CliError::AlertsFound(2);
        assert_eq!(err.exit_code(), 4, "alerts found should return exit code 4");
        assert_eq!(err.to_string(), "2 alert(s) raised");
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CliError::Io(io_err);
        assert_eq!(err.exit_code(), 10, "io error should return exit code 10");
    }

    #[test]
    fn test_exit_code_input_and_export() {
        assert_eq!(CliError::Input("x".to_owned()).exit_code(), 10);
        assert_eq!(CliError::Export("x".to_owned()).exit_code(), 10);
    }

    #[test]
    fn test_exit_code_command_error() {
        let err = CliError::Command("test error".to_owned());
        assert_eq!(err.exit_code(), 1, "command error should return exit code 1");
    }

    #[test]
    fn test_exit_code_json_serialize_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid json")
            .expect_err("should fail parsing");
        let err = CliError::JsonSerialize(json_err);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_core_errors() {
        let config: CliError = LogwardenError::Config(ConfigError::FileNotFound {
            path: "x.toml".to_owned(),
        })
        .into();
        assert_eq!(config.exit_code(), 2);

        let no_sources: CliError = LogwardenError::Analysis(AnalysisError::NoSources).into();
        assert_eq!(no_sources.exit_code(), 3);
    }

    #[test]
    fn test_from_analyzer_no_sources() {
        let err: CliError = AnalyzerError::NoSources.into();
        assert!(matches!(err, CliError::NoInput(_)));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_from_analyzer_read_error() {
        let err: CliError = AnalyzerError::Read {
            source_kind: "web".to_owned(),
            path: "/missing/access.log".to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        }
        .into();
        assert!(matches!(err, CliError::Input(_)));
        assert!(err.to_string().contains("/missing/access.log"));
    }

    #[test]
    fn test_from_analyzer_config_error() {
        let err: CliError = AnalyzerError::Config {
            field: "dos.threshold".to_owned(),
            reason: "must be greater than 0".to_owned(),
        }
        .into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_error_display_config() {
        let err = CliError::Config("invalid TOML syntax".to_owned());
        let display_str = format!("{}", err);
        assert!(display_str.contains("configuration error"));
        assert!(display_str.contains("invalid TOML syntax"));
    }

    #[test]
    fn test_error_display_command() {
        let err = CliError::Command("execution failed".to_owned());
        assert_eq!(format!("{}", err), "execution failed");
    }
}

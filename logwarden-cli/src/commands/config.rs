//! `logwarden config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use logwarden_core::config::LogwardenConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::commands::load_config;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Sections accepted by `config show --section`.
const SECTIONS: [&str; 4] = ["general", "detection", "input", "report"];

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => {
            let report = validate(config_path).await;
            writer.render(&report)?;
            if !report.valid {
                return Err(CliError::Config("configuration is invalid".to_owned()));
            }
            Ok(())
        }
        ConfigAction::Show { section } => {
            let report = show(config_path, section.as_deref()).await?;
            writer.render(&report)
        }
    }
}

/// Load and validate the configuration file, collecting the error if any.
pub async fn validate(config_path: &Path) -> ConfigValidationReport {
    info!(path = %config_path.display(), "validating configuration");

    match load_config(config_path).await {
        Ok(loaded) => ConfigValidationReport {
            source: loaded.source,
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: false,
            errors: vec![e.to_string()],
        },
    }
}

/// Build the effective configuration report (file + env overrides + defaults).
///
/// # Errors
///
/// Returns `CliError::Config` if loading fails or `CliError::Command` if the
/// section name is unknown.
pub async fn show(config_path: &Path, section: Option<&str>) -> Result<ConfigReport, CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let loaded = load_config(config_path).await?;
    let config_toml = match section {
        Some(name) => section_toml(&loaded.config, name)?,
        None => to_toml(&loaded.config),
    };

    Ok(ConfigReport {
        source: loaded.source,
        section: section.map(str::to_owned),
        config_toml,
    })
}

fn section_toml(config: &LogwardenConfig, name: &str) -> Result<String, CliError> {
    match name {
        "general" => Ok(to_toml(&config.general)),
        "detection" => Ok(to_toml(&config.detection)),
        "input" => Ok(to_toml(&config.input)),
        "report" => Ok(to_toml(&config.report)),
        _ => Err(CliError::Command(format!(
            "unknown section: {} (expected: {})",
            name,
            SECTIONS.join(", ")
        ))),
    }
}

fn to_toml<T: Serialize>(value: &T) -> String {
    toml::to_string_pretty(value).unwrap_or_else(|e| format!("(serialization error: {})", e))
}

/// Configuration display report.
///
/// `config_toml` is only used for text rendering.
#[derive(Serialize)]
pub struct ConfigReport {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{}]", section);
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    pub source: String,
    pub valid: bool,
    /// Empty when valid.
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("logwarden.toml");
        tokio::fs::write(&path, content)
            .await
            .expect("write config");
        path
    }

    #[tokio::test]
    async fn test_validate_valid_config() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, "[general]\nlog_level = \"debug\"\n").await;

        let report = validate(&path).await;
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[tokio::test]
    async fn test_validate_reports_parse_error() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, "[general\nlog_level = ").await;

        let report = validate(&path).await;
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("parse"));
    }

    #[tokio::test]
    async fn test_validate_reports_invalid_value() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, "[detection.brute_force]\nwindow_minutes = 0\n").await;

        let report = validate(&path).await;
        assert!(!report.valid);
        assert!(report.errors[0].contains("detection.brute_force.window_minutes"));
    }

    #[tokio::test]
    async fn test_show_full_config_contains_all_sections() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, "[detection.dos]\nthreshold = 250\n").await;

        let report = show(&path, None).await.expect("show should succeed");
        assert!(report.section.is_none());
        for section in SECTIONS {
            assert!(
                report.config_toml.contains(section),
                "missing section {section}"
            );
        }
        assert!(report.config_toml.contains("threshold = 250"));
    }

    #[tokio::test]
    async fn test_show_single_section() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, "[report]\ntop_n = 9\n").await;

        let report = show(&path, Some("report")).await.expect("show report");
        assert_eq!(report.section.as_deref(), Some("report"));
        assert!(report.config_toml.contains("top_n = 9"));
        assert!(!report.config_toml.contains("log_level"));
    }

    #[tokio::test]
    async fn test_show_unknown_section_is_command_error() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, "").await;

        let err = show(&path, Some("ebpf")).await.err().expect("unknown section");
        assert!(matches!(err, CliError::Command(_)));
        assert!(err.to_string().contains("detection"));
    }

    #[test]
    fn test_config_report_json_skips_toml_body() {
        let report = ConfigReport {
            source: "logwarden.toml".to_owned(),
            section: None,
            config_toml: "[general]\n".to_owned(),
        };
        let json = serde_json::to_string(&report).expect("serialize");
        assert!(!json.contains("config_toml"));
        assert!(!json.contains("section"));
    }

    #[test]
    fn test_validation_report_text_lists_errors() {
        colored::control::set_override(false);
        let report = ConfigValidationReport {
            source: "x.toml".to_owned(),
            valid: false,
            errors: vec!["bad threshold".to_owned()],
        };
        let mut buf = Vec::new();
        report.render_text(&mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("INVALID"));
        assert!(text.contains("Error: bad threshold"));
    }
}

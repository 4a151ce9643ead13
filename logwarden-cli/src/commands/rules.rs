//! `logwarden rules` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use logwarden_analyzer::{AnalyzerBuilder, AnalyzerConfig, RuleDescription};
use logwarden_core::config::LogwardenConfig;

use crate::error::CliError;
use crate::output::{OutputWriter, Render, fit};

/// Execute the `rules` command.
pub fn execute(config: &LogwardenConfig, writer: &OutputWriter) -> Result<(), CliError> {
    let report = build_report(config)?;
    info!(total = report.total, "listing detection rules");
    writer.render(&report)
}

/// Describe the rules exactly as `analyze` would build them.
pub fn build_report(config: &LogwardenConfig) -> Result<RulesReport, CliError> {
    let analyzer = AnalyzerBuilder::new()
        .config(AnalyzerConfig::from_core(config))
        .build()?;
    let rules = analyzer.rules().describe();

    Ok(RulesReport {
        total: rules.len(),
        rules,
    })
}

#[derive(Serialize)]
pub struct RulesReport {
    pub total: usize,
    pub rules: Vec<RuleDescription>,
}

impl Render for RulesReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Detection Rules ({} total)", self.total.to_string().bold())?;
        writeln!(w)?;

        writeln!(
            w,
            "{} {} {} {} {} {}",
            fit("ID", 12).bold(),
            fit("CATEGORY", 16).bold(),
            fit("SOURCE", 6).bold(),
            fit("THRESHOLD", 9).bold(),
            fit("WINDOW", 8).bold(),
            "METRIC".bold(),
        )?;

        for rule in &self.rules {
            let window = match rule.window_minutes {
                Some(minutes) => format!("{} min", minutes),
                None => "-".to_owned(),
            };
            writeln!(
                w,
                "{} {} {} {} {} {}",
                fit(rule.id, 12),
                fit(rule.category.label(), 16).yellow(),
                fit(&rule.source.to_string(), 6),
                fit(&rule.threshold.to_string(), 9),
                fit(&window, 8),
                rule.metric,
            )?;
        }

        Ok(())
    }
}

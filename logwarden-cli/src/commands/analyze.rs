//! `logwarden analyze` command handler

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use logwarden_analyzer::export::CSV_TIME_FORMAT;
use logwarden_analyzer::{
    ActorCount, AnalysisReport, AnalysisRequest, AnalyzerBuilder, AnalyzerConfig, Blacklist,
    export_csv,
};
use logwarden_core::config::LogwardenConfig;
use logwarden_core::types::Alert;

use crate::cli::AnalyzeArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render, fit};

/// Execute the `analyze` command.
pub async fn execute(
    args: AnalyzeArgs,
    config: &LogwardenConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let fail_on_alert = args.fail_on_alert;
    let output = run(args, config).await?;
    writer.render(&output)?;

    if fail_on_alert && !output.report.alerts.is_empty() {
        return Err(CliError::AlertsFound(output.report.alerts.len()));
    }
    Ok(())
}

/// Run the analysis and the optional export without rendering anything.
pub async fn run(args: AnalyzeArgs, config: &LogwardenConfig) -> Result<AnalyzeOutput, CliError> {
    if args.web.is_none() && args.auth.is_none() {
        return Err(CliError::NoInput(
            "select at least one log file: pass --web and/or --auth".to_owned(),
        ));
    }

    let mut analyzer_config = AnalyzerConfig::from_core(config);
    if let Some(year) = args.year {
        analyzer_config.auth_year = Some(year);
    }
    let analyzer = AnalyzerBuilder::new().config(analyzer_config).build()?;

    let blacklist_path = args
        .blacklist
        .unwrap_or_else(|| PathBuf::from(&config.input.blacklist_path));
    let blacklist = Blacklist::load(&blacklist_path).await?;

    let mut request = AnalysisRequest::new();
    if let Some(web) = args.web {
        request = request.web_log(web);
    }
    if let Some(auth) = args.auth {
        request = request.auth_log(auth);
    }

    let report = analyzer.analyze(&request, &blacklist).await?;

    let exported_to = match args.export {
        Some(dir) => {
            let dir = dir.unwrap_or_else(|| PathBuf::from(&config.report.reports_dir));
            export(&report.alerts, &dir).await?
        }
        None => None,
    };

    Ok(AnalyzeOutput {
        report,
        auth_year: analyzer.auth_year(),
        blacklist_entries: blacklist.len(),
        exported_to,
    })
}

/// An empty alert table is not exported.
async fn export(alerts: &[Alert], dir: &Path) -> Result<Option<String>, CliError> {
    if alerts.is_empty() {
        warn!(dir = %dir.display(), "no alerts to export, skipping CSV export");
        return Ok(None);
    }

    let path = export_csv(alerts, dir).await?;
    info!(path = %path.display(), alerts = alerts.len(), "alerts exported");
    Ok(Some(path.display().to_string()))
}

/// Analysis result as shown to the user.
#[derive(Serialize)]
pub struct AnalyzeOutput {
    #[serde(flatten)]
    pub report: AnalysisReport,
    pub auth_year: i32,
    pub blacklist_entries: usize,
    pub exported_to: Option<String>,
}

const TIME_WIDTH: usize = 19;
const IP_WIDTH: usize = 15;
const CATEGORY_WIDTH: usize = 15;
const DETAILS_WIDTH: usize = 32;

impl Render for AnalyzeOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let report = &self.report;

        writeln!(w, "Analysis {}", report.run_id.to_string().bold())?;
        writeln!(
            w,
            "  Web records: {}  Auth records: {}  Skipped lines: {}",
            report.web_records, report.auth_records, report.lines_skipped
        )?;
        writeln!(w)?;

        if report.alerts.is_empty() {
            writeln!(w, "{}", "No threats detected.".green())?;
        } else {
            writeln!(
                w,
                "{} {} {} {} {}",
                fit("TIME", TIME_WIDTH).bold(),
                fit("IP", IP_WIDTH).bold(),
                fit("CATEGORY", CATEGORY_WIDTH).bold(),
                fit("DETAILS", DETAILS_WIDTH).bold(),
                "BLACKLISTED".bold(),
            )?;

            for alert in &report.alerts {
                let time = alert
                    .time
                    .map(|t| t.format(CSV_TIME_FORMAT).to_string())
                    .unwrap_or_else(|| "-".to_owned());
                let blacklisted = if alert.blacklisted {
                    "YES".red().bold()
                } else {
                    "NO".normal()
                };
                writeln!(
                    w,
                    "{} {} {} {} {}",
                    fit(&time, TIME_WIDTH),
                    fit(&alert.ip, IP_WIDTH),
                    fit(alert.category.label(), CATEGORY_WIDTH).yellow(),
                    fit(&alert.details, DETAILS_WIDTH),
                    blacklisted,
                )?;
            }
        }

        writeln!(w)?;
        writeln!(w, "{}", "Summary".bold())?;
        writeln!(
            w,
            "  Total alerts: {} ({} blacklisted)",
            report.alerts.len(),
            report.blacklisted_count()
        )?;
        for (category, count) in report.count_by_category() {
            writeln!(w, "  {}: {}", category, count)?;
        }

        render_actors(w, "Top web actors (requests)", &report.top_web_actors)?;
        render_actors(w, "Top auth actors (failed logins)", &report.top_auth_actors)?;

        if let Some(ref path) = self.exported_to {
            writeln!(w)?;
            writeln!(w, "Exported: {}", path.bold())?;
        }

        Ok(())
    }
}

fn render_actors(w: &mut dyn Write, title: &str, actors: &[ActorCount]) -> std::io::Result<()> {
    use colored::Colorize;

    if actors.is_empty() {
        return Ok(());
    }

    writeln!(w)?;
    writeln!(w, "{}", title.bold())?;
    for (rank, actor) in actors.iter().enumerate() {
        writeln!(
            w,
            "  {:>2}. {} {}",
            rank + 1,
            fit(&actor.actor, IP_WIDTH),
            actor.count
        )?;
    }
    Ok(())
}

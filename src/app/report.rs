use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::args::{OutputFormat, TesterArgs};
use crate::error::{AppError, AppResult, MetricsError};
use crate::metrics::RunSummary;

use super::runner::RunOutcome;

const RULE_WIDTH: usize = 50;
const MS_PER_SEC: u64 = 1_000;
const CENTIS_PER_MS: u64 = 10;

/// Everything printed at the end of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: String,
    pub api_url: String,
    pub problem_id: u64,
    pub users: usize,
    pub concurrency: usize,
    pub seed: u64,
    pub peak_outstanding: usize,
    #[serde(flatten)]
    pub summary: RunSummary,
}

impl RunReport {
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, args: &TesterArgs, outcome: RunOutcome) -> Self {
        Self {
            started_at: started_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            api_url: args.api_url.clone(),
            problem_id: args.problem_id,
            users: args.users.get(),
            concurrency: args.concurrency.get(),
            seed: args.seed,
            peak_outstanding: outcome.peak_outstanding,
            summary: outcome.summary,
        }
    }

    #[must_use]
    pub fn text_lines(&self) -> Vec<String> {
        let summary = &self.summary;
        let rule = "-".repeat(RULE_WIDTH);
        let mut lines = Vec::new();
        lines.push(rule.clone());
        lines.push(format!("API: {}", self.api_url));
        lines.push(format!("Problem ID: {}", self.problem_id));
        lines.push(format!("Users: {}", self.users));
        lines.push(format!(
            "Concurrency: {} (peak outstanding {})",
            self.concurrency, self.peak_outstanding
        ));
        lines.push(format!("Seed: {}", self.seed));
        lines.push(format!("Started: {}", self.started_at));
        lines.push(rule);
        lines.push(format!("Submitted: {}", summary.submitted));
        lines.push(format!("Submit failures: {}", summary.submit_failures));
        lines.push(format!("Completed: {}", summary.completed));
        lines.push(format!(
            "Duration: {}.{:02}s",
            summary.duration_ms / MS_PER_SEC,
            (summary.duration_ms % MS_PER_SEC) / CENTIS_PER_MS
        ));
        lines.push(format!(
            "Avg submit latency: {} ms",
            summary.avg_submit_latency_ms
        ));
        lines.push(format!(
            "P95 submit latency: {} ms",
            summary.p95_submit_latency_ms
        ));
        lines.push("Verdicts:".to_owned());
        for (verdict, count) in &summary.verdicts {
            lines.push(format!("  {}: {}", verdict, count));
        }
        lines.push("Case mix:".to_owned());
        for (case, count) in &summary.case_mix {
            lines.push(format!("  {}: {}", case, count));
        }
        if summary.turnaround.count > 0 {
            lines.push(format!(
                "Verdict turnaround: p50 {} ms, p90 {} ms, p99 {} ms, max {} ms",
                summary.turnaround.p50_ms,
                summary.turnaround.p90_ms,
                summary.turnaround.p99_ms,
                summary.turnaround.max_ms
            ));
        }
        if summary.poll_timeouts > 0 {
            lines.push(format!("Poll timeouts: {}", summary.poll_timeouts));
        }
        if summary.unpolled > 0 {
            lines.push(format!("Unpolled (poll phase deadline): {}", summary.unpolled));
        }
        lines
    }

    /// Renders the report in the requested format.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(&self, format: OutputFormat) -> AppResult<String> {
        match format {
            OutputFormat::Text => Ok(self.text_lines().join("\n")),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

/// Writes the report to `output`, or to stdout when no path is given.
///
/// # Errors
///
/// Returns an error if rendering fails or the destination cannot be
/// written.
pub fn emit_report(report: &RunReport, format: OutputFormat, output: Option<&str>) -> AppResult<()> {
    let mut rendered = report.render(format)?;
    rendered.push('\n');

    match output {
        Some(path) => std::fs::write(path, rendered).map_err(|err| {
            AppError::metrics(MetricsError::WriteReport {
                path: path.to_owned(),
                source: err,
            })
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

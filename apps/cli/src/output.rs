//! Output formatting utilities

use crate::OutputFormat;
use console::style;
use modget_types::{BatchReport, ModOutcome, OutcomeStatus};

/// Print the batch report in the specified format
pub fn print_report(report: &BatchReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Table => {
            use tabled::{Table, Tabled};

            #[derive(Tabled)]
            struct OutcomeRow {
                mod_id: String,
                name: String,
                status: String,
                file: String,
                detail: String,
            }

            let rows: Vec<OutcomeRow> = report
                .outcomes
                .iter()
                .map(|o| OutcomeRow {
                    mod_id: o.mod_id.to_string(),
                    name: o.mod_name.clone().unwrap_or_else(|| "?".to_string()),
                    status: format!("{:?}", o.status),
                    file: o
                        .file_name
                        .as_deref()
                        .map(truncate)
                        .unwrap_or_else(|| "-".to_string()),
                    detail: detail(o),
                })
                .collect();

            println!("{}", Table::new(rows));
            println!("{}", report);
        }
        OutputFormat::Human => {
            if report.outcomes.is_empty() {
                println!("{}", style("No mods requested").dim());
                return Ok(());
            }

            for outcome in &report.outcomes {
                print_outcome(outcome);
            }
            println!();
            println!("{}", style(report).bold());
        }
    }
    Ok(())
}

fn print_outcome(outcome: &ModOutcome) {
    let icon = match outcome.status {
        OutcomeStatus::Downloaded | OutcomeStatus::Resolved => style("✓").green(),
        OutcomeStatus::Skipped => style("-").yellow(),
        OutcomeStatus::Failed => style("✗").red(),
    };
    let name = outcome
        .mod_name
        .as_deref()
        .unwrap_or_else(|| outcome.mod_id.as_str());

    println!(
        "{} {} {} [{}]",
        icon,
        style(name).bold(),
        style(outcome.file_name.as_deref().unwrap_or("")).dim(),
        style(format!("{:?}", outcome.status)).dim()
    );

    let text = detail(outcome);
    if !text.is_empty() {
        match outcome.status {
            OutcomeStatus::Failed => println!("    {}", style(text).red()),
            _ => println!("    {}", text),
        }
    }
}

/// Human-readable detail column for an outcome
fn detail(outcome: &ModOutcome) -> String {
    match outcome.status {
        OutcomeStatus::Downloaded => outcome
            .bytes
            .map(format_bytes)
            .unwrap_or_default(),
        OutcomeStatus::Resolved => outcome.url.clone().unwrap_or_default(),
        OutcomeStatus::Skipped => outcome
            .skip_reason
            .map(|r| r.to_string())
            .unwrap_or_default(),
        OutcomeStatus::Failed => outcome.error.clone().unwrap_or_default(),
    }
}

fn truncate(name: &str) -> String {
    if name.chars().count() > 40 {
        let head: String = name.chars().take(37).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

/// Format bytes as human-readable
pub fn format_bytes(bytes: u64) -> String {
    human_bytes::human_bytes(bytes as f64)
}

//! Display functions for install reports and errors

use console::{Style, style};
use miette::Diagnostic;

use crate::domain::{InstallReport, ItemOutcome, Outcome};
use crate::error::VibeFlowError;

fn outcome_style(outcome: Outcome) -> Style {
    match outcome {
        Outcome::Created => Style::new().green(),
        Outcome::Updated => Style::new().cyan(),
        Outcome::Merged => Style::new().blue(),
        Outcome::Skipped | Outcome::UpToDate => Style::new().dim(),
        Outcome::Failed => Style::new().red().bold(),
    }
}

fn outcome_marker(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Created | Outcome::Updated | Outcome::Merged => "✓",
        Outcome::Skipped | Outcome::UpToDate => "-",
        Outcome::Failed => "✗",
    }
}

/// One status line, e.g. `  ✓ .claude/agents (created)`
pub(crate) fn format_entry(entry: &ItemOutcome) -> String {
    let style = outcome_style(entry.outcome);
    let mut line = format!(
        "  {} {} {}",
        style.apply_to(outcome_marker(entry.outcome)),
        entry.name,
        style.apply_to(format!("({})", entry.outcome)),
    );
    if let Some(detail) = &entry.detail {
        line.push_str(&format!(" {}", Style::new().dim().apply_to(detail)));
    }
    line
}

/// Summary counts, e.g. `3 created, 1 merged, 2 skipped`
pub(crate) fn format_counts(report: &InstallReport) -> String {
    let parts: Vec<String> = [
        Outcome::Created,
        Outcome::Updated,
        Outcome::Merged,
        Outcome::UpToDate,
        Outcome::Skipped,
        Outcome::Failed,
    ]
    .into_iter()
    .filter_map(|outcome| {
        let count = report.count(outcome);
        (count > 0).then(|| format!("{count} {outcome}"))
    })
    .collect();

    if parts.is_empty() {
        "nothing to do".to_string()
    } else {
        parts.join(", ")
    }
}

pub fn print_banner(version: &str, source: &str, target: &std::path::Path) {
    println!(
        "{} {}",
        Style::new().bold().cyan().apply_to("Claude Vibe Flow"),
        Style::new().dim().apply_to(format!("v{version}"))
    );
    println!("Installing from {source}");
    println!("Target: {}", target.display());
    println!();
}

/// Print every item of the report in order
pub fn print_report(report: &InstallReport) {
    for entry in report.entries() {
        println!("{}", format_entry(entry));
    }
    if report.has_failures() {
        println!();
        println!(
            "{}",
            Style::new()
                .yellow()
                .apply_to("Some items failed, the installation was not stamped.")
        );
    }
}

/// Print the closing line of a run
pub fn print_summary(report: &InstallReport, previous: Option<&str>, installed: &str) {
    println!();
    let headline = match previous {
        Some(old) if old != installed => format!("Upgraded {old} -> {installed}"),
        Some(_) => format!("Reinstalled {installed}"),
        None => format!("Installed {installed}"),
    };
    println!(
        "{} {} ({})",
        Style::new().green().bold().apply_to("Done!"),
        headline,
        format_counts(report)
    );
}

/// Print the top-level error: one message and one suggestion.
/// With `debug` the diagnostic code and the full error structure follow.
pub fn print_error(err: &VibeFlowError, debug: bool) {
    eprintln!("{} {}", style("Error:").red().bold(), err);
    eprintln!("  {} {}", style("Suggestion:").yellow(), err.suggestion());
    if debug {
        if let Some(code) = err.code() {
            eprintln!("  {} {}", style("Code:").dim(), code);
        }
        eprintln!("  {} {}", style("Exit code:").dim(), err.exit_code());
        eprintln!("{err:#?}");
    }
}

use crate::error::Error;
use crate::eval::Severity;
use crate::probe::ProbeReport;
use colored::{ColoredString, Colorize};

const LABEL_W: usize = 10;

/// The one-line monitoring contract: joined fragments, or the fallback.
pub fn print_plugin_line(report: &ProbeReport) {
    println!("{}", report.message);
}

pub fn print_report_json(report: &ProbeReport) {
    println!("{}", serde_json::to_string_pretty(report).unwrap());
}

fn severity_colored(severity: Severity) -> ColoredString {
    match severity {
        Severity::Ok => severity.label().green().bold(),
        Severity::Warning => severity.label().yellow().bold(),
        Severity::Critical => severity.label().red().bold(),
        Severity::Unknown => severity.label().magenta().bold(),
    }
}

fn print_box(title: &str, rows: &[(String, String)]) {
    let inner_w = rows
        .iter()
        .map(|(l, v)| l.len().max(LABEL_W) + 2 + v.len())
        .max()
        .unwrap_or(40);

    let fill = inner_w.saturating_sub(1 + title.len());
    println!("╭─ {} {}╮", title.bold(), "─".repeat(fill));

    for (label, value) in rows {
        let padded = format!("{:<w$}", label, w = LABEL_W);
        let pad = inner_w.saturating_sub(LABEL_W + 2 + value.len());
        println!("│ {}  {}{} │", padded.dimmed(), value, " ".repeat(pad));
    }

    println!("╰{}╯", "─".repeat(inner_w + 2));
}

/// Boxed per-controller report for interactive use.
pub fn print_detail(report: &ProbeReport) {
    for ctrl in &report.controllers {
        let mut rows: Vec<(String, String)> = vec![
            ("Model".to_string(), ctrl.model.clone()),
            ("Status".to_string(), ctrl.status.clone()),
        ];

        for (j, pd) in ctrl.physical_drives.iter().enumerate() {
            rows.push((
                format!("PD{}", j),
                format!("{} {} [{}]", pd.model, pd.size, pd.state),
            ));
        }
        for (k, vd) in ctrl.virtual_drives.iter().enumerate() {
            let mut value = format!("{} [{}]", vd.kind, vd.state);
            if !vd.consistent {
                value.push_str(" (Inconsistent)");
            }
            rows.push((format!("VD{}", k), value));
        }
        if let Some(ref bbu) = ctrl.bbu_state {
            rows.push(("BBU".to_string(), bbu.clone()));
        }

        print_box(&format!("Controller {}", ctrl.index), &rows);
    }

    if report.controllers.is_empty() {
        println!("  {}", "No controllers reported.".dimmed());
    }

    println!();
    println!(
        "  {} {}",
        severity_colored(report.severity),
        report.message
    );
}

/// Status line for a probe that failed before evaluation.
pub fn print_error_line(error: &Error) {
    println!("{}: {}", Severity::Unknown.label(), error);
}

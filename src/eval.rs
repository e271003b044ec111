use crate::model::ControllerEntry;
use log::debug;
use serde::Serialize;

/// Plugin severity, ordered worst-last. The numeric exit code follows the
/// monitoring-system convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    pub fn exit_code(self) -> u8 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
            Severity::Unknown => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Status line printed when no fragment was produced.
pub const NO_PROBLEMS: &str = "No problems detected";

/// Controller states that do not raise severity.
const HEALTHY_CONTROLLER: [&str; 2] = ["Optimal", "OK"];
/// Physical drive states that do not raise severity.
const HEALTHY_DRIVE: [&str; 3] = ["Onln", "UGood", "GHS"];
const REBUILDING: &str = "Rbld";
const VD_OPTIMAL: &str = "Optl";
const BBU_OPTIMAL: &str = "Optimal";

/// Result of evaluating one controller report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub severity: Severity,
    pub fragments: Vec<String>,
}

impl Evaluation {
    /// The joined status message, or the fixed fallback when nothing was
    /// reported (empty controller list).
    pub fn message(&self) -> String {
        if self.fragments.is_empty() {
            NO_PROBLEMS.to_string()
        } else {
            self.fragments.join(", ")
        }
    }
}

/// Map controller, drive, and battery states to an overall severity plus
/// per-entity status fragments.
///
/// Severity only ever goes up over the course of an evaluation. Fragments
/// are appended in input order: controller status, its physical drives, its
/// virtual drives, its battery, then the next controller.
pub fn evaluate(controllers: &[ControllerEntry]) -> Evaluation {
    let mut severity = Severity::Ok;
    let mut fragments = Vec::new();

    debug!("evaluating {} controller(s)", controllers.len());

    for (i, entry) in controllers.iter().enumerate() {
        let data = &entry.response_data;
        let status = data.status.controller_status.as_str();
        debug!("C{}: model '{}', status '{}'", i, data.basics.model, status);

        if !HEALTHY_CONTROLLER.contains(&status) {
            severity = Severity::Critical;
        }
        fragments.push(format!("C{}: {}", i, status));

        for (j, pd) in data.physical_drives.iter().flatten().enumerate() {
            debug!("C{} PD{}: {} {} '{}'", i, j, pd.model, pd.size, pd.state);
            if pd.state == REBUILDING {
                // A rebuild warns only from a clean state; anything worse
                // already recorded stands.
                if severity < Severity::Warning {
                    severity = Severity::Warning;
                }
            } else if !HEALTHY_DRIVE.contains(&pd.state.as_str()) {
                severity = Severity::Critical;
            }
            fragments.push(format!("PD{}: {}", j, pd.state));
        }

        for (k, vd) in data.virtual_drives.iter().flatten().enumerate() {
            let inconsistent = vd.consist == "No";
            debug!(
                "C{} VD{}: {} '{}', consist '{}'",
                i, k, vd.kind, vd.state, vd.consist
            );
            // Guard checks below-WARNING while raising to CRITICAL; kept
            // as observed in the field, see DESIGN.md.
            if vd.state != VD_OPTIMAL && severity < Severity::Warning {
                severity = Severity::Critical;
            }
            if inconsistent && severity < Severity::Warning {
                severity = Severity::Warning;
            }
            if inconsistent {
                fragments.push(format!("VD{}: {} (Inconsistent)", k, vd.state));
            } else {
                fragments.push(format!("VD{}: {}", k, vd.state));
            }
        }

        if let Some(bbu) = data.battery() {
            debug!("C{} BBU: '{}'", i, bbu.state);
            if bbu.state != BBU_OPTIMAL {
                severity = Severity::Critical;
            }
            fragments.push(format!("BBU: {}", bbu.state));
        }
    }

    Evaluation {
        severity,
        fragments,
    }
}

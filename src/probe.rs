use crate::config::RaidcheckConfig;
use crate::error::Result;
use crate::eval::{self, Severity};
use crate::model::{ResponseData, StorcliReport};
use crate::transport::RemoteShell;
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DriveSummary {
    pub model: String,
    pub size: String,
    pub state: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VolumeSummary {
    pub kind: String,
    pub state: String,
    pub consistent: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ControllerSummary {
    pub index: usize,
    pub model: String,
    pub status: String,
    pub physical_drives: Vec<DriveSummary>,
    pub virtual_drives: Vec<VolumeSummary>,
    pub bbu_state: Option<String>,
}

/// Full probe result: the verdict plus the per-controller detail backing
/// the JSON and pretty renderings.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub timestamp: String,
    pub severity: Severity,
    pub message: String,
    pub fragments: Vec<String>,
    pub controllers: Vec<ControllerSummary>,
}

/// The remote command line for the configured tool path and selector.
pub fn command(config: &RaidcheckConfig) -> String {
    format!(
        "{} {} show all j",
        config.tool.storcli_path.display(),
        config.tool.controller_selector
    )
}

/// Run the probe: execute the vendor tool remotely, decode its report,
/// evaluate it. Collaborator failures are terminal; there is no partial
/// evaluation.
pub fn run(config: &RaidcheckConfig, shell: &dyn RemoteShell) -> Result<ProbeReport> {
    let cmd = command(config);
    let raw = shell.run(&cmd)?;
    let report = StorcliReport::parse(&raw)?;
    debug!("decoded report with {} controller(s)", report.controllers.len());
    Ok(build_report(&report))
}

/// Evaluate an already-decoded report and assemble the probe result.
pub fn build_report(report: &StorcliReport) -> ProbeReport {
    let evaluation = eval::evaluate(&report.controllers);
    let controllers = report
        .controllers
        .iter()
        .enumerate()
        .map(|(index, entry)| summarize(index, &entry.response_data))
        .collect();

    ProbeReport {
        timestamp: chrono::Utc::now().to_rfc3339(),
        severity: evaluation.severity,
        message: evaluation.message(),
        fragments: evaluation.fragments,
        controllers,
    }
}

fn summarize(index: usize, data: &ResponseData) -> ControllerSummary {
    ControllerSummary {
        index,
        model: data.basics.model.clone(),
        status: data.status.controller_status.clone(),
        physical_drives: data
            .physical_drives
            .iter()
            .flatten()
            .map(|pd| DriveSummary {
                model: pd.model.clone(),
                size: pd.size.clone(),
                state: pd.state.clone(),
            })
            .collect(),
        virtual_drives: data
            .virtual_drives
            .iter()
            .flatten()
            .map(|vd| VolumeSummary {
                kind: vd.kind.clone(),
                state: vd.state.clone(),
                consistent: vd.consist != "No",
            })
            .collect(),
        bbu_state: data.battery().map(|bbu| bbu.state.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_defaults() {
        let config = RaidcheckConfig::default();
        assert_eq!(
            command(&config),
            "/opt/MegaRAID/storcli/storcli64 /call show all j"
        );
    }

    #[test]
    fn test_command_line_custom_selector() {
        let mut config = RaidcheckConfig::default();
        config.tool.storcli_path = "/usr/sbin/storcli64".into();
        config.tool.controller_selector = "/c0".to_string();
        assert_eq!(command(&config), "/usr/sbin/storcli64 /c0 show all j");
    }

    #[test]
    fn test_build_report_summaries() {
        let raw = r#"{
            "Controllers": [{
                "Response Data": {
                    "Basics": { "Model": "AVAGO MegaRAID SAS 9361-8i" },
                    "Status": { "Controller Status": "Optimal" },
                    "PD LIST": [
                        { "Model": "ST4000NM0023", "Size": "3.638 TB", "State": "Onln" }
                    ],
                    "VD LIST": [
                        { "TYPE": "RAID5", "State": "Optl", "Consist": "No" }
                    ],
                    "BBU_Info": [ { "State": "Optimal" } ]
                }
            }]
        }"#;
        let decoded = StorcliReport::parse(raw).unwrap();

        let report = build_report(&decoded);
        assert_eq!(report.severity, Severity::Warning);
        assert_eq!(
            report.message,
            "C0: Optimal, PD0: Onln, VD0: Optl (Inconsistent), BBU: Optimal"
        );
        assert_eq!(report.controllers.len(), 1);

        let ctrl = &report.controllers[0];
        assert_eq!(ctrl.index, 0);
        assert_eq!(ctrl.model, "AVAGO MegaRAID SAS 9361-8i");
        assert_eq!(ctrl.physical_drives.len(), 1);
        assert!(!ctrl.virtual_drives[0].consistent);
        assert_eq!(ctrl.bbu_state.as_deref(), Some("Optimal"));
    }
}

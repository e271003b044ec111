use serde::Deserialize;

/// Top-level document produced by `storcli /call show all j`.
///
/// Field names carry the vendor tool's spellings; decoding is strict for
/// required fields so a truncated or garbled report fails before evaluation
/// instead of silently reading as healthy.
#[derive(Debug, Clone, Deserialize)]
pub struct StorcliReport {
    #[serde(rename = "Controllers")]
    pub controllers: Vec<ControllerEntry>,
}

impl StorcliReport {
    pub fn parse(raw: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ControllerEntry {
    #[serde(rename = "Response Data")]
    pub response_data: ResponseData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseData {
    #[serde(rename = "Basics")]
    pub basics: Basics,

    #[serde(rename = "Status")]
    pub status: ControllerStatus,

    /// Absent when no drives are attached.
    #[serde(rename = "PD LIST", default)]
    pub physical_drives: Option<Vec<PhysicalDrive>>,

    /// Absent when no virtual drives are configured.
    #[serde(rename = "VD LIST", default)]
    pub virtual_drives: Option<Vec<VirtualDrive>>,

    /// Absent or null when the controller has no battery unit.
    #[serde(rename = "BBU_Info", default)]
    pub bbu_info: Option<Vec<BbuInfo>>,
}

impl ResponseData {
    /// At most one battery unit exists per controller; the vendor tool
    /// still wraps it in a list.
    pub fn battery(&self) -> Option<&BbuInfo> {
        self.bbu_info.as_deref().and_then(<[BbuInfo]>::first)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Basics {
    #[serde(rename = "Model")]
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ControllerStatus {
    #[serde(rename = "Controller Status")]
    pub controller_status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhysicalDrive {
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Size")]
    pub size: String,
    #[serde(rename = "State")]
    pub state: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VirtualDrive {
    #[serde(rename = "TYPE")]
    pub kind: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Consist")]
    pub consist: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BbuInfo {
    #[serde(rename = "State")]
    pub state: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let raw = r#"{
            "Controllers": [{
                "Response Data": {
                    "Basics": { "Model": "AVAGO MegaRAID SAS 9361-8i" },
                    "Status": { "Controller Status": "Optimal" },
                    "PD LIST": [
                        { "Model": "ST4000NM0023", "Size": "3.638 TB", "State": "Onln" },
                        { "Model": "ST4000NM0023", "Size": "3.638 TB", "State": "GHS" }
                    ],
                    "VD LIST": [
                        { "TYPE": "RAID5", "State": "Optl", "Consist": "Yes" }
                    ],
                    "BBU_Info": [
                        { "State": "Optimal" }
                    ]
                }
            }]
        }"#;

        let report = StorcliReport::parse(raw).unwrap();
        assert_eq!(report.controllers.len(), 1);

        let data = &report.controllers[0].response_data;
        assert_eq!(data.basics.model, "AVAGO MegaRAID SAS 9361-8i");
        assert_eq!(data.status.controller_status, "Optimal");
        assert_eq!(data.physical_drives.as_ref().unwrap().len(), 2);
        assert_eq!(data.physical_drives.as_ref().unwrap()[1].state, "GHS");
        assert_eq!(data.virtual_drives.as_ref().unwrap()[0].kind, "RAID5");
        assert_eq!(data.battery().unwrap().state, "Optimal");
    }

    #[test]
    fn test_parse_absent_lists() {
        let raw = r#"{
            "Controllers": [{
                "Response Data": {
                    "Basics": { "Model": "PERC H740P" },
                    "Status": { "Controller Status": "OK" }
                }
            }]
        }"#;

        let report = StorcliReport::parse(raw).unwrap();
        let data = &report.controllers[0].response_data;
        assert!(data.physical_drives.is_none());
        assert!(data.virtual_drives.is_none());
        assert!(data.battery().is_none());
    }

    #[test]
    fn test_parse_null_bbu() {
        let raw = r#"{
            "Controllers": [{
                "Response Data": {
                    "Basics": { "Model": "PERC H740P" },
                    "Status": { "Controller Status": "OK" },
                    "BBU_Info": null
                }
            }]
        }"#;

        let report = StorcliReport::parse(raw).unwrap();
        assert!(report.controllers[0].response_data.battery().is_none());
    }

    #[test]
    fn test_parse_empty_bbu_list() {
        let raw = r#"{
            "Controllers": [{
                "Response Data": {
                    "Basics": { "Model": "PERC H740P" },
                    "Status": { "Controller Status": "OK" },
                    "BBU_Info": []
                }
            }]
        }"#;

        let report = StorcliReport::parse(raw).unwrap();
        assert!(report.controllers[0].response_data.battery().is_none());
    }

    #[test]
    fn test_parse_missing_status_fails() {
        let raw = r#"{
            "Controllers": [{
                "Response Data": {
                    "Basics": { "Model": "PERC H740P" }
                }
            }]
        }"#;

        assert!(StorcliReport::parse(raw).is_err());
    }

    #[test]
    fn test_parse_missing_controllers_fails() {
        assert!(StorcliReport::parse("{}").is_err());
        assert!(StorcliReport::parse("not json").is_err());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let raw = r#"{
            "Controllers": [{
                "Command Status": { "Status": "Success" },
                "Response Data": {
                    "Basics": { "Model": "PERC H740P", "Serial Number": "12345" },
                    "Status": { "Controller Status": "OK", "BBU Status": 0 },
                    "Version": { "Firmware Version": "5.110.00-2155" }
                }
            }]
        }"#;

        assert!(StorcliReport::parse(raw).is_ok());
    }
}

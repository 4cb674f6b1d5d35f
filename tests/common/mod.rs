//! Shared fixtures: a small training schema, label table and decision tree written to a temp dir.

#![allow(dead_code)]

use attack_classifier::config::ServiceConfig;
use attack_classifier::features::RawRecord;
use attack_classifier::predict::ClassifierContext;
use serde_json::json;
use tempfile::TempDir;

pub const COLUMNS: &[&str] = &[
    "Packet Length",
    "Anomaly Scores",
    "Year",
    "Protocol_ICMP",
    "Protocol_TCP",
    "Protocol_UDP",
    "Packet Type_Control",
    "Packet Type_Data",
    "Traffic Type_DNS",
    "Traffic Type_FTP",
    "Traffic Type_HTTP",
    "Malware Indicators_IoC Detected",
    "Malware Indicators_No IoC Detected",
    "Alerts/Warnings_Alert Triggered",
    "Alerts/Warnings_No Alert Triggered",
    "Attack Signature_Known Pattern A",
    "Attack Signature_Known Pattern B",
    "Action Taken_Blocked",
    "Action Taken_Ignored",
    "Action Taken_Logged",
    "Severity Level_High",
    "Severity Level_Low",
    "Severity Level_Medium",
    "Network Segment_Segment A",
    "Network Segment_Segment B",
    "Network Segment_Segment C",
    "Firewall Logs_Log Data",
    "Firewall Logs_No Log",
    "IDS/IPS Alerts_Alert Data",
    "IDS/IPS Alerts_No Alert Data",
    "Log Source_Firewall",
    "Log Source_Server",
    "Proxy Information_No Proxy",
    "Month_3",
    "Month_5",
    "Day_15",
    "Day_30",
    "OS Family_Mac OS X",
    "OS Family_Windows",
    "OS Version_10",
    "OS Version_8",
    "Device Family_Other",
    "Device Family_iPhone",
    "Device Brand_Apple",
    "Device Brand_Unknown",
    "Device Model_Unknown",
    "Device Model_iPhone",
    "Browser Family_Chrome",
    "Browser Family_IE",
    "State_CA",
    "State_TX",
];

pub const LABELS: &[&str] = &["DDoS", "Intrusion", "Malware"];

pub fn column_index(name: &str) -> usize {
    COLUMNS
        .iter()
        .position(|c| *c == name)
        .unwrap_or_else(|| panic!("no column {name}"))
}

/// UDP → DDoS, TCP → Intrusion, anything else → Malware.
pub fn tree_json(n_features: usize) -> serde_json::Value {
    let udp = column_index("Protocol_UDP") as i64;
    let tcp = column_index("Protocol_TCP") as i64;
    json!({
        "n_features": n_features,
        "children_left":  [1, 2, -1, -1, -1],
        "children_right": [4, 3, -1, -1, -1],
        "feature":        [udp, tcp, -2, -2, -2],
        "threshold":      [0.5, 0.5, -2.0, -2.0, -2.0],
        "value": [[1, 1, 1], [0, 1, 1], [0, 0, 3], [0, 3, 0], [3, 0, 0]]
    })
}

pub struct Fixture {
    pub dir: TempDir,
    pub config: ServiceConfig,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_tree(tree_json(COLUMNS.len()))
    }

    pub fn with_tree(tree: serde_json::Value) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let schema_path = dir.path().join("columns_train.json");
        let labels_path = dir.path().join("label_encoder.json");
        let model_path = dir.path().join("model.json");
        std::fs::write(&schema_path, serde_json::to_vec(COLUMNS).unwrap()).unwrap();
        std::fs::write(&labels_path, serde_json::to_vec(LABELS).unwrap()).unwrap();
        std::fs::write(&model_path, serde_json::to_vec(&tree).unwrap()).unwrap();

        let mut config = ServiceConfig::default();
        config.artifacts.schema_path = schema_path;
        config.artifacts.labels_path = labels_path;
        config.artifacts.model_path = model_path;
        Self { dir, config }
    }

    pub fn context(&self) -> ClassifierContext {
        ClassifierContext::load(&self.config).unwrap()
    }
}

pub fn sample_record() -> RawRecord {
    [
        ("Timestamp", "15/03/2023 14:22:05"),
        ("Source IP Address", "103.216.15.12"),
        ("Destination IP Address", "84.9.164.252"),
        ("Source Port", "31225"),
        ("Destination Port", "17616"),
        ("Protocol", "UDP"),
        ("Packet Length", "503"),
        ("Packet Type", "Data"),
        ("Traffic Type", "HTTP"),
        ("Payload Data", "Qui natus odio asperiores nam."),
        ("Malware Indicators", "IoC Detected"),
        ("Anomaly Scores", "28.67"),
        ("Alerts/Warnings", "Alert Triggered"),
        ("Attack Signature", "Known Pattern B"),
        ("Action Taken", "Logged"),
        ("Severity Level", "Low"),
        ("User Information", "Reyansh Dugal"),
        (
            "Device Information",
            "Mozilla/5.0 (compatible; MSIE 8.0; Windows NT 6.2; Trident/5.0)",
        ),
        ("Network Segment", "Segment A"),
        ("Geo-location Data", "Los Angeles, CA"),
        ("Proxy Information", "No Proxy"),
        ("Firewall Logs", "Log Data"),
        ("IDS/IPS Alerts", "Alert Data"),
        ("Log Source", "Server"),
    ]
    .into_iter()
    .collect()
}

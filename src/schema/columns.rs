//! Raw field names and derived column names shared by every stage.

pub const TIMESTAMP: &str = "Timestamp";
pub const SOURCE_IP: &str = "Source IP Address";
pub const DESTINATION_IP: &str = "Destination IP Address";
pub const SOURCE_PORT: &str = "Source Port";
pub const DESTINATION_PORT: &str = "Destination Port";
pub const PROTOCOL: &str = "Protocol";
pub const PACKET_LENGTH: &str = "Packet Length";
pub const PACKET_TYPE: &str = "Packet Type";
pub const TRAFFIC_TYPE: &str = "Traffic Type";
pub const PAYLOAD_DATA: &str = "Payload Data";
pub const MALWARE_INDICATORS: &str = "Malware Indicators";
pub const ANOMALY_SCORES: &str = "Anomaly Scores";
pub const ALERTS_WARNINGS: &str = "Alerts/Warnings";
pub const ATTACK_TYPE: &str = "Attack Type";
pub const ATTACK_SIGNATURE: &str = "Attack Signature";
pub const ACTION_TAKEN: &str = "Action Taken";
pub const SEVERITY_LEVEL: &str = "Severity Level";
pub const USER_INFORMATION: &str = "User Information";
pub const DEVICE_INFORMATION: &str = "Device Information";
pub const NETWORK_SEGMENT: &str = "Network Segment";
pub const GEO_LOCATION: &str = "Geo-location Data";
pub const PROXY_INFORMATION: &str = "Proxy Information";
pub const FIREWALL_LOGS: &str = "Firewall Logs";
pub const IDS_IPS_ALERTS: &str = "IDS/IPS Alerts";
pub const LOG_SOURCE: &str = "Log Source";

// Derived by the extractor
pub const MONTH: &str = "Month";
pub const DAY: &str = "Day";
pub const YEAR: &str = "Year";
pub const OS_FAMILY: &str = "OS Family";
pub const OS_VERSION: &str = "OS Version";
pub const DEVICE_FAMILY: &str = "Device Family";
pub const DEVICE_BRAND: &str = "Device Brand";
pub const DEVICE_MODEL: &str = "Device Model";
pub const BROWSER_FAMILY: &str = "Browser Family";
pub const STATE: &str = "State";

/// Nominal columns one-hot encoded as `<column>_<value>`.
pub const CATEGORICAL: &[&str] = &[
    PROTOCOL,
    PACKET_TYPE,
    TRAFFIC_TYPE,
    MALWARE_INDICATORS,
    ALERTS_WARNINGS,
    ATTACK_SIGNATURE,
    ACTION_TAKEN,
    SEVERITY_LEVEL,
    NETWORK_SEGMENT,
    FIREWALL_LOGS,
    IDS_IPS_ALERTS,
    LOG_SOURCE,
    PROXY_INFORMATION,
    MONTH,
    DAY,
    OS_FAMILY,
    OS_VERSION,
    DEVICE_FAMILY,
    DEVICE_BRAND,
    DEVICE_MODEL,
    BROWSER_FAMILY,
    STATE,
];

/// Columns copied through as numbers.
pub const NUMERIC: &[&str] = &[PACKET_LENGTH, ANOMALY_SCORES, YEAR];

/// Removed after decomposition: composite sources and fields without classification signal.
pub const DROPPED: &[&str] = &[
    TIMESTAMP,
    DEVICE_INFORMATION,
    GEO_LOCATION,
    SOURCE_IP,
    DESTINATION_IP,
    SOURCE_PORT,
    DESTINATION_PORT,
    PAYLOAD_DATA,
    USER_INFORMATION,
    ATTACK_TYPE,
];

/// Indicator column name for a categorical value.
pub fn indicator(column: &str, value: &str) -> String {
    format!("{column}_{value}")
}

/// Split an indicator name into its categorical column and value. Longest column prefix wins.
pub fn split_indicator(name: &str) -> Option<(&'static str, &str)> {
    CATEGORICAL
        .iter()
        .filter_map(|col| {
            name.strip_prefix(col)
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|v| (*col, v))
        })
        .max_by_key(|(col, _)| col.len())
}

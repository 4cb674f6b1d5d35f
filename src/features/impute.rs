//! Column-specific literal defaults for optional categorical fields.
//!
//! Must run before encoding: the default literals are themselves training-time categories.

use super::RawRecord;
use crate::schema::columns;

pub const DEFAULTS: &[(&str, &str)] = &[
    (columns::FIREWALL_LOGS, "No Log"),
    (columns::PROXY_INFORMATION, "No Proxy"),
    (columns::MALWARE_INDICATORS, "No IoC Detected"),
    (columns::ALERTS_WARNINGS, "No Alert Triggered"),
    (columns::IDS_IPS_ALERTS, "No Alert Data"),
];

/// Fill absent or blank optional fields. Populated fields are left untouched.
pub fn impute(record: &mut RawRecord) {
    for (field, default) in DEFAULTS {
        if !record.contains(field) {
            record.insert(*field, *default);
        }
    }
}

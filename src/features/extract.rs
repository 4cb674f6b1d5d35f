//! Field extractor: composite raw fields → atomic derived fields.

use super::user_agent::UserAgentInfo;
use super::RawRecord;
use crate::error::FieldParseError;
use crate::schema::columns;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    pub month: u32,
    pub day: u32,
    pub year: i32,
}

/// Parse a date-time with the first matching format. Temporal fields are required signal, so no fallback.
pub fn parse_timestamp(raw: &str, formats: &[String]) -> Result<DateParts, FieldParseError> {
    let raw = raw.trim();
    let date = formats.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(raw, fmt)
            .map(|dt| dt.date())
            .or_else(|_| NaiveDate::parse_from_str(raw, fmt))
            .ok()
    });
    match date {
        Some(d) => Ok(DateParts {
            month: d.month(),
            day: d.day(),
            year: d.year(),
        }),
        None => Err(FieldParseError::Invalid {
            field: columns::TIMESTAMP.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Second comma-delimited segment, trimmed. Fewer than two segments yields an empty state.
pub fn parse_state(geo: &str) -> String {
    geo.split(',')
        .nth(1)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Decompose composite fields in place and drop fields with no classification signal.
pub fn extract(mut record: RawRecord, timestamp_formats: &[String]) -> Result<RawRecord, FieldParseError> {
    let raw_ts = record
        .get(columns::TIMESTAMP)
        .ok_or(FieldParseError::Missing(columns::TIMESTAMP))?;
    let date = parse_timestamp(raw_ts, timestamp_formats)?;

    let ua = UserAgentInfo::parse(record.get(columns::DEVICE_INFORMATION).unwrap_or(""));
    let state = parse_state(record.get(columns::GEO_LOCATION).unwrap_or(""));

    for field in columns::DROPPED {
        record.remove(field);
    }

    record.insert(columns::MONTH, date.month.to_string());
    record.insert(columns::DAY, date.day.to_string());
    record.insert(columns::YEAR, date.year.to_string());
    record.insert(columns::OS_FAMILY, ua.os_family);
    record.insert(columns::OS_VERSION, ua.os_version);
    record.insert(columns::DEVICE_FAMILY, ua.device_family);
    record.insert(columns::DEVICE_BRAND, ua.device_brand);
    record.insert(columns::DEVICE_MODEL, ua.device_model);
    record.insert(columns::BROWSER_FAMILY, ua.browser_family);
    record.insert(columns::STATE, state);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeaturesConfig;

    fn formats() -> Vec<String> {
        FeaturesConfig::default().timestamp_formats
    }

    #[test]
    fn day_first_timestamp() {
        let d = parse_timestamp("15/03/2023 14:22:05", &formats()).unwrap();
        assert_eq!(d, DateParts { month: 3, day: 15, year: 2023 });
    }

    #[test]
    fn iso_timestamp() {
        let d = parse_timestamp("2023-05-30 06:33:58", &formats()).unwrap();
        assert_eq!(d, DateParts { month: 5, day: 30, year: 2023 });
    }

    #[test]
    fn bad_timestamp_is_error() {
        let err = parse_timestamp("yesterday at noon", &formats()).unwrap_err();
        assert!(matches!(err, FieldParseError::Invalid { ref field, .. } if field == "Timestamp"));
    }

    #[test]
    fn geo_state() {
        assert_eq!(parse_state("Los Angeles, CA"), "CA");
        assert_eq!(parse_state("Unknown"), "");
        assert_eq!(parse_state("Pune,  Maharashtra , India"), "Maharashtra");
    }

    #[test]
    fn extract_drops_raw_fields() {
        let record: RawRecord = [
            ("Timestamp", "15/03/2023 14:22:05"),
            ("Source IP Address", "10.0.0.1"),
            ("Source Port", "443"),
            ("Payload Data", "lorem ipsum"),
            ("Device Information", "Mozilla/5.0 (Windows NT 6.1; WOW64) Firefox/40.0"),
            ("Geo-location Data", "Austin, TX"),
            ("Protocol", "TCP"),
            ("Attack Type", "DDoS"),
        ]
        .into_iter()
        .collect();
        let out = extract(record, &formats()).unwrap();
        for gone in columns::DROPPED {
            assert!(!out.contains(gone), "{gone} should be dropped");
        }
        assert_eq!(out.get("Protocol"), Some("TCP"));
        assert_eq!(out.get("Month"), Some("3"));
        assert_eq!(out.get("Day"), Some("15"));
        assert_eq!(out.get("Year"), Some("2023"));
        assert_eq!(out.get("OS Version"), Some("7"));
        assert_eq!(out.get("Browser Family"), Some("Firefox"));
        assert_eq!(out.get("State"), Some("TX"));
    }

    #[test]
    fn missing_timestamp_is_error() {
        let record: RawRecord = [("Protocol", "UDP")].into_iter().collect();
        assert_eq!(
            extract(record, &formats()).unwrap_err(),
            FieldParseError::Missing("Timestamp")
        );
    }
}

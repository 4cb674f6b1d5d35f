//! CSV batch mode: ordering, per-row failure isolation, output shape.

mod common;

use attack_classifier::batch::BatchProcessor;
use attack_classifier::config::BatchConfig;
use attack_classifier::error::BatchError;
use common::{sample_record, Fixture};
use std::sync::Arc;

const PROTOCOLS: [(&str, &str); 3] = [("UDP", "DDoS"), ("TCP", "Intrusion"), ("ICMP", "Malware")];

/// CSV with an `id` column, sample fields, and protocol cycling by row.
fn build_csv(rows: usize, bad_timestamps: &[usize]) -> (Vec<String>, String) {
    let sample = sample_record();
    let mut fields: Vec<String> = sample.iter().map(|(k, _)| k.to_string()).collect();
    fields.sort();
    let mut headers = vec!["id".to_string()];
    headers.extend(fields.iter().cloned());

    let mut w = csv::Writer::from_writer(Vec::new());
    w.write_record(&headers).unwrap();
    for i in 1..=rows {
        let mut rec = vec![i.to_string()];
        for f in &fields {
            let value = match f.as_str() {
                "Protocol" => PROTOCOLS[i % 3].0.to_string(),
                "Timestamp" if bad_timestamps.contains(&i) => "32/13/2023 25:61:61".to_string(),
                other => sample.get(other).unwrap_or("").to_string(),
            };
            rec.push(value);
        }
        w.write_record(&rec).unwrap();
    }
    (headers, String::from_utf8(w.into_inner().unwrap()).unwrap())
}

fn processor(fixture: &Fixture, config: BatchConfig) -> BatchProcessor {
    BatchProcessor::new(Arc::new(fixture.context()), config).unwrap()
}

fn small_chunks() -> BatchConfig {
    BatchConfig {
        workers: 4,
        chunk_rows: 64,
        ..BatchConfig::default()
    }
}

#[test]
fn thousand_rows_three_bad_timestamps() {
    let fixture = Fixture::new();
    let bad = [7, 500, 1000];
    let (headers, input) = build_csv(1000, &bad);

    let mut out = Vec::new();
    let summary = processor(&fixture, small_chunks())
        .process(input.as_bytes(), &mut out)
        .unwrap();

    assert_eq!(summary.rows, 1000);
    assert_eq!(summary.predicted, 997);
    assert_eq!(summary.failed, 3);
    let failed_rows: Vec<usize> = summary.failures.iter().map(|f| f.row).collect();
    assert_eq!(failed_rows, bad.to_vec());
    assert!(summary.failures[0].error.contains("Timestamp"));

    let mut reader = csv::Reader::from_reader(out.as_slice());
    let out_headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(&out_headers[..headers.len()], headers.as_slice());
    assert_eq!(out_headers.last().unwrap(), "Predicted Attack Type");

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 997);
    let expected_ids: Vec<usize> = (1..=1000).filter(|i| !bad.contains(i)).collect();
    let ids: Vec<usize> = rows.iter().map(|r| r[0].parse().unwrap()).collect();
    assert_eq!(ids, expected_ids);
    for r in &rows {
        let id: usize = r[0].parse().unwrap();
        assert_eq!(&r[r.len() - 1], PROTOCOLS[id % 3].1);
        assert_eq!(r.len(), headers.len() + 1);
    }
}

#[test]
fn ragged_row_is_reported_not_fatal() {
    let fixture = Fixture::new();
    let (_, mut input) = build_csv(3, &[]);
    input.push_str("4,only-two-fields\n");

    let mut out = Vec::new();
    let summary = processor(&fixture, BatchConfig::default())
        .process(input.as_bytes(), &mut out)
        .unwrap();
    assert_eq!(summary.predicted, 3);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].row, 4);
}

#[test]
fn existing_prediction_column_is_rejected() {
    let fixture = Fixture::new();
    let input = "Timestamp,Predicted Attack Type\n15/03/2023 14:22:05,DDoS\n";
    let err = processor(&fixture, BatchConfig::default())
        .process(input.as_bytes(), Vec::<u8>::new())
        .unwrap_err();
    assert!(matches!(err, BatchError::ColumnClash(_)));
}

#[test]
fn row_limit_truncates() {
    let fixture = Fixture::new();
    let (_, input) = build_csv(10, &[]);
    let config = BatchConfig {
        max_rows: Some(4),
        ..BatchConfig::default()
    };
    let mut out = Vec::new();
    let summary = processor(&fixture, config).process(input.as_bytes(), &mut out).unwrap();
    assert_eq!(summary.rows, 4);
    assert_eq!(summary.predicted, 4);
    assert!(summary.truncated);
}

#[test]
fn empty_input_has_no_header() {
    let fixture = Fixture::new();
    let err = processor(&fixture, BatchConfig::default())
        .process("".as_bytes(), Vec::<u8>::new())
        .unwrap_err();
    assert!(matches!(err, BatchError::NoHeader));
}

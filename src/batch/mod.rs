//! CSV batch mode: stream rows in chunks, classify each chunk on a worker pool, and write the
//! input back out with one appended prediction column.
//!
//! Rows keep their input order. A row that cannot be classified is left out of the output and
//! reported in [`BatchSummary::failures`]; it never aborts the file.

use crate::config::BatchConfig;
use crate::error::BatchError;
use crate::features::RawRecord;
use crate::predict::ClassifierContext;
use csv::{ReaderBuilder, StringRecord, Writer};
use serde::Serialize;
use std::io::{Read, Write};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    /// 1-based data row (header excluded)
    pub row: usize,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub run_id: Uuid,
    /// Data rows read
    pub rows: usize,
    pub predicted: usize,
    pub failed: usize,
    /// Input had more rows than `max_rows`
    pub truncated: bool,
    pub failures: Vec<RowFailure>,
}

pub struct BatchProcessor {
    ctx: Arc<ClassifierContext>,
    config: BatchConfig,
    pool: rayon::ThreadPool,
}

impl BatchProcessor {
    pub fn new(ctx: Arc<ClassifierContext>, config: BatchConfig) -> Result<Self, BatchError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("batch-worker-{i}"))
            .build()?;
        Ok(Self { ctx, config, pool })
    }

    pub fn process<R: Read, W: Write>(&self, input: R, output: W) -> Result<BatchSummary, BatchError> {
        let run_id = Uuid::new_v4();
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(input);
        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(BatchError::NoHeader);
        }
        let column = self.config.prediction_column.as_str();
        if headers.iter().any(|h| h == column) {
            return Err(BatchError::ColumnClash(column.to_string()));
        }

        let mut writer = Writer::from_writer(output);
        let mut out_headers = headers.clone();
        out_headers.push_field(column);
        writer.write_record(&out_headers)?;

        let mut summary = BatchSummary {
            run_id,
            rows: 0,
            predicted: 0,
            failed: 0,
            truncated: false,
            failures: Vec::new(),
        };
        let chunk_rows = self.config.chunk_rows.max(1);
        let mut chunk: Vec<(usize, StringRecord)> = Vec::with_capacity(chunk_rows);

        for result in reader.records() {
            if self.config.max_rows.is_some_and(|max| summary.rows >= max) {
                summary.truncated = true;
                break;
            }
            summary.rows += 1;
            let row = summary.rows;
            match result {
                Ok(rec) if rec.len() == headers.len() => chunk.push((row, rec)),
                Ok(rec) => summary.failures.push(RowFailure {
                    row,
                    error: format!("expected {} fields, found {}", headers.len(), rec.len()),
                }),
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => summary.failures.push(RowFailure {
                    row,
                    error: e.to_string(),
                }),
            }
            if chunk.len() >= chunk_rows {
                self.flush_chunk(&headers, &mut chunk, &mut writer, &mut summary)?;
            }
        }
        self.flush_chunk(&headers, &mut chunk, &mut writer, &mut summary)?;
        writer.flush()?;

        summary.failures.sort_by_key(|f| f.row);
        summary.failed = summary.failures.len();
        for f in &summary.failures {
            warn!(run_id = %run_id, row = f.row, error = %f.error, "row skipped");
        }
        if summary.truncated {
            warn!(run_id = %run_id, max_rows = ?self.config.max_rows, "input truncated at row limit");
        }
        info!(
            run_id = %run_id,
            rows = summary.rows,
            predicted = summary.predicted,
            failed = summary.failed,
            "batch complete"
        );
        Ok(summary)
    }

    fn flush_chunk<W: Write>(
        &self,
        headers: &StringRecord,
        chunk: &mut Vec<(usize, StringRecord)>,
        writer: &mut Writer<W>,
        summary: &mut BatchSummary,
    ) -> Result<(), BatchError> {
        if chunk.is_empty() {
            return Ok(());
        }
        let records: Vec<RawRecord> = chunk
            .iter()
            .map(|(_, rec)| headers.iter().zip(rec.iter()).collect())
            .collect();
        let results = self.pool.install(|| self.ctx.classify_records(&records));

        for ((row, mut rec), result) in chunk.drain(..).zip(results) {
            match result {
                Ok(prediction) => {
                    rec.push_field(&prediction.attack_type);
                    writer.write_record(&rec)?;
                    summary.predicted += 1;
                }
                Err(e) => summary.failures.push(RowFailure {
                    row,
                    error: e.to_string(),
                }),
            }
        }
        Ok(())
    }
}

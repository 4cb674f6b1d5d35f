//! Attack classifier entrypoint: classify one JSON record, or a CSV file in batch mode.
//! Artifacts load once at startup; a load failure exits before anything is classified.

use attack_classifier::{
    batch::BatchProcessor,
    config::ServiceConfig,
    features::RawRecord,
    logging::StructuredLogger,
    predict::ClassifierContext,
};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "attack-classifier", version, about)]
struct Cli {
    /// Config file (JSON); falls back to $ATTACK_CLASSIFIER_CONFIG, then config.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify one record given as a JSON object of field → value
    Predict {
        #[arg(long)]
        record: PathBuf,
    },
    /// Classify every row of a CSV file and append the predicted attack type
    Batch {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Write skipped rows here as JSON lines
        #[arg(long)]
        failures: Option<PathBuf>,
    },
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// JSON scalars become text; null means the field is absent.
fn read_record(path: &Path) -> Result<RawRecord, BoxError> {
    let data = std::fs::read_to_string(path)?;
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&data)?;
    Ok(map
        .into_iter()
        .filter_map(|(k, v)| match v {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some((k, s)),
            other => Some((k, other.to_string())),
        })
        .collect())
}

fn run_predict(ctx: &ClassifierContext, record: &Path) -> Result<ExitCode, BoxError> {
    let record = read_record(record)?;
    match ctx.classify_record(&record) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!(error = %e, "record not classified");
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_batch(
    ctx: Arc<ClassifierContext>,
    config: &ServiceConfig,
    input: &Path,
    output: &Path,
    failures: Option<&Path>,
) -> Result<ExitCode, BoxError> {
    let processor = BatchProcessor::new(ctx, config.batch.clone())?;
    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);
    let summary = processor.process(reader, writer)?;

    if let Some(path) = failures {
        let mut w = BufWriter::new(File::create(path)?);
        for f in &summary.failures {
            StructuredLogger::emit_json(f, &mut w)?;
        }
        w.flush()?;
    }
    println!(
        "{} rows: {} predicted, {} skipped",
        summary.rows, summary.predicted, summary.failed
    );
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode, BoxError> {
    let cli = Cli::parse();
    let config_path = ServiceConfig::resolve_path(cli.config);
    let config = ServiceConfig::load(&config_path)?;

    StructuredLogger::init(config.log.json, &config.log.level);
    info!(config = %config_path.display(), "attack classifier starting");

    let ctx = match ClassifierContext::load(&config) {
        Ok(ctx) => Arc::new(ctx),
        Err(e) => {
            error!(error = %e, "startup artifacts unusable");
            return Err(e.into());
        }
    };

    match &cli.command {
        Command::Predict { record } => run_predict(&ctx, record),
        Command::Batch {
            input,
            output,
            failures,
        } => run_batch(ctx, &config, input, output, failures.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_json_scalars_become_text() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"Protocol": "UDP", "Packet Length": 503, "Anomaly Scores": 28.67, "Proxy Information": null}}"#
        )
        .unwrap();
        let record = read_record(f.path()).unwrap();
        assert_eq!(record.get("Protocol"), Some("UDP"));
        assert_eq!(record.get("Packet Length"), Some("503"));
        assert_eq!(record.get("Anomaly Scores"), Some("28.67"));
        assert!(!record.contains("Proxy Information"));
    }

    #[test]
    fn record_must_be_an_object() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"["UDP", 503]"#).unwrap();
        assert!(read_record(f.path()).is_err());
    }
}

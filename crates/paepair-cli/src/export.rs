use crate::error::{CliError, Result};
use paepair::core::models::pair::{PairKind, PairRecord};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// One output row, serialized with the column names of the results table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResultRow<'a> {
    prediction_id: &'a str,
    alignment_confidence: f64,
    interface_confidence: f64,
    signal: f64,
    spread: f64,
    interacting: &'static str,
    #[serde(rename = "chainLabel1")]
    chain_label_1: &'a str,
    #[serde(rename = "chainLabel2")]
    chain_label_2: &'a str,
    pair_kind: PairKind,
}

impl<'a> From<&'a PairRecord> for ResultRow<'a> {
    fn from(record: &'a PairRecord) -> Self {
        Self {
            prediction_id: &record.prediction_id,
            alignment_confidence: record.alignment_confidence,
            interface_confidence: record.interface_confidence,
            signal: record.signal(),
            spread: record.spread(),
            interacting: record.interaction_call(),
            chain_label_1: &record.first_label,
            chain_label_2: &record.second_label,
            pair_kind: record.kind,
        }
    }
}

/// Writes the header row followed by one row per record.
pub fn write_records<W: Write>(writer: W, records: &[PairRecord]) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(ResultRow::from(record))?;
    }
    if records.is_empty() {
        csv_writer.write_record(HEADER)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_records_to_path(path: &Path, records: &[PairRecord]) -> Result<()> {
    let file = File::create(path)?;
    write_records(file, records).map_err(|source| CliError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    info!(rows = records.len(), path = %path.display(), "Results written.");
    Ok(())
}

const HEADER: [&str; 9] = [
    "predictionId",
    "alignmentConfidence",
    "interfaceConfidence",
    "signal",
    "spread",
    "interacting",
    "chainLabel1",
    "chainLabel2",
    "pairKind",
];

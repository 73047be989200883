use super::analyze::{PredictionInput, SkippedPair, analyze_files};
use crate::core::models::pair::PairRecord;
use crate::engine::config::AnalysisConfig;
use crate::engine::error::FailureKind;
use crate::engine::progress::{Progress, ProgressReporter};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const PROGRESS_LOG_INTERVAL: u64 = 10;

/// A metadata file whose family did not have the expected number of structure files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionWarning {
    pub scores_file: PathBuf,
    pub family: String,
    pub found: Vec<String>,
    pub expected: usize,
}

/// Everything the batch driver needs, as produced by file matching.
#[derive(Debug, Clone, Default)]
pub struct BatchInput {
    pub predictions: Vec<PredictionInput>,
    pub unmatched_structures: BTreeSet<String>,
    pub companion_warnings: Vec<CompanionWarning>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionFailure {
    pub id: String,
    pub scores_file: PathBuf,
    pub kind: FailureKind,
    pub message: String,
}

/// A degenerate chain pair together with the prediction it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSkippedPair {
    pub prediction_id: String,
    pub pair: SkippedPair,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub records: Vec<PairRecord>,
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<PredictionFailure>,
    pub skipped_pairs: Vec<BatchSkippedPair>,
    pub companion_warnings: Vec<CompanionWarning>,
    pub unmatched_structures: BTreeSet<String>,
}

impl BatchReport {
    pub fn failure_counts(&self) -> BTreeMap<FailureKind, usize> {
        let mut counts = BTreeMap::new();
        for failure in &self.failures {
            *counts.entry(failure.kind).or_insert(0) += 1;
        }
        counts
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
            && self.skipped_pairs.is_empty()
            && self.companion_warnings.is_empty()
            && self.unmatched_structures.is_empty()
    }
}

/// Analyzes every prediction of the batch.
///
/// A failing prediction never stops the batch: its error is recorded as a
/// [`PredictionFailure`] and the remaining predictions are processed. Rows are returned
/// grouped by prediction in input order, whether or not the `parallel` feature is on.
#[instrument(skip_all, name = "batch_workflow", fields(predictions = input.predictions.len()))]
pub fn run(input: BatchInput, config: &AnalysisConfig, reporter: &ProgressReporter) -> BatchReport {
    let total = input.predictions.len();
    info!(total, "Starting batch analysis.");
    reporter.report(Progress::BatchStart {
        total: total as u64,
    });
    if !input.companion_warnings.is_empty() {
        reporter.report(Progress::Message(format!(
            "{} metadata file(s) have an unexpected number of structure files",
            input.companion_warnings.len()
        )));
    }

    #[cfg(not(feature = "parallel"))]
    let iterator = input.predictions.iter();

    #[cfg(feature = "parallel")]
    let iterator = input.predictions.par_iter();

    let outcomes: Vec<_> = iterator
        .map(|prediction| {
            let outcome = analyze_files(prediction, config);
            let count = reporter.prediction_finished(&prediction.id, outcome.is_ok());
            if count % PROGRESS_LOG_INTERVAL == 0 {
                info!(count, total, "Predictions processed.");
            }
            outcome
        })
        .collect();

    reporter.report(Progress::BatchFinish);

    let mut report = BatchReport {
        attempted: total,
        companion_warnings: input.companion_warnings,
        unmatched_structures: input.unmatched_structures,
        ..BatchReport::default()
    };

    for (prediction, outcome) in input.predictions.iter().zip(outcomes) {
        match outcome {
            Ok(analysis) => {
                report.succeeded += 1;
                report.records.extend(analysis.records);
                report
                    .skipped_pairs
                    .extend(analysis.skipped_pairs.into_iter().map(|pair| BatchSkippedPair {
                        prediction_id: analysis.id.clone(),
                        pair,
                    }));
            }
            Err(e) => {
                warn!(prediction = %prediction.id, kind = %e.kind(), "Prediction failed: {}", e);
                report.failures.push(PredictionFailure {
                    id: prediction.id.clone(),
                    scores_file: prediction.scores_path.clone(),
                    kind: e.kind(),
                    message: e.to_string(),
                });
            }
        }
    }

    info!(
        succeeded = report.succeeded,
        failed = report.failures.len(),
        rows = report.records.len(),
        "Batch analysis finished."
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;

    fn write_prediction(dir: &std::path::Path, id: &str, values: &str) -> PredictionInput {
        let scores_path = dir.join(format!("{id}.json"));
        let structure_path = dir.join(format!("{id}.pdb"));
        fs::write(
            &scores_path,
            format!(r#"{{"pae": {values}, "ptm": 0.5, "iptm": 0.4}}"#),
        )
        .unwrap();
        let mut pdb = String::new();
        for (serial, chain) in ['A', 'B'].into_iter().enumerate() {
            pdb.push_str(&format!(
                "ATOM  {:>5} CA   GLY {}   1       0.000   0.000   0.000  1.00 80.00\n",
                serial + 1,
                chain
            ));
        }
        fs::write(&structure_path, pdb).unwrap();
        PredictionInput {
            id: id.to_string(),
            name: id.to_string(),
            scores_path,
            structure_path: Some(structure_path),
        }
    }

    #[test]
    fn failures_are_recorded_and_batch_continues() {
        let dir = tempdir().unwrap();
        let good = write_prediction(dir.path(), "good", "[[1.0, 2.0], [3.0, 4.0]]");
        let bad_shape = write_prediction(dir.path(), "bad", "[[1.0, 2.0, 3.0]]");
        let missing = PredictionInput {
            structure_path: None,
            ..write_prediction(dir.path(), "lonely", "[[1.0, 2.0], [3.0, 4.0]]")
        };
        let input = BatchInput {
            predictions: vec![bad_shape, good, missing],
            ..BatchInput::default()
        };

        let report = run(input, &AnalysisConfig::default(), &ProgressReporter::new());

        assert_eq!(report.attempted, 3);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.records.len(), 3);
        assert!(report.records.iter().all(|r| r.prediction_id == "good"));
        let ids: Vec<_> = report.failures.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["bad", "lonely"]);
        assert_eq!(report.failures[0].kind, FailureKind::Schema);
        assert_eq!(report.failures[1].kind, FailureKind::ShapeMismatch);
        assert_eq!(report.failure_counts().get(&FailureKind::Schema), Some(&1));
        assert!(!report.is_clean());
    }

    #[test]
    fn rows_keep_input_order() {
        let dir = tempdir().unwrap();
        let ids = ["p3", "p1", "p2", "p0"];
        let predictions = ids
            .iter()
            .map(|id| write_prediction(dir.path(), id, "[[1.0, 2.0], [3.0, 4.0]]"))
            .collect();
        let report = run(
            BatchInput {
                predictions,
                ..BatchInput::default()
            },
            &AnalysisConfig::default(),
            &ProgressReporter::new(),
        );
        let order: Vec<_> = report
            .records
            .iter()
            .map(|r| r.prediction_id.as_str())
            .collect::<Vec<_>>()
            .chunks(3)
            .map(|c| c[0])
            .collect();
        assert_eq!(order, ids);
    }

    #[test]
    fn skipped_pairs_are_attributed_to_their_prediction() {
        let dir = tempdir().unwrap();
        let prediction = write_prediction(dir.path(), "zero", "[[0.0, 2.0], [3.0, 4.0]]");
        let report = run(
            BatchInput {
                predictions: vec![prediction],
                ..BatchInput::default()
            },
            &AnalysisConfig::default(),
            &ProgressReporter::new(),
        );
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.skipped_pairs.len(), 1);
        assert_eq!(report.skipped_pairs[0].prediction_id, "zero");
        assert_eq!(report.skipped_pairs[0].pair.reason, "mean is zero");
    }

    #[test]
    fn progress_events_bracket_the_batch() {
        let dir = tempdir().unwrap();
        let prediction = write_prediction(dir.path(), "one", "[[1.0, 2.0], [3.0, 4.0]]");
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));
        run(
            BatchInput {
                predictions: vec![prediction],
                ..BatchInput::default()
            },
            &AnalysisConfig::default(),
            &reporter,
        );
        drop(reporter);

        let events = events.into_inner().unwrap();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], Progress::BatchStart { total: 1 }));
        assert!(matches!(
            &events[1],
            Progress::PredictionFinish { id, succeeded: true } if id == "one"
        ));
        assert!(matches!(events[2], Progress::BatchFinish));
    }

    #[test]
    fn discovery_findings_are_carried_into_report() {
        let warning = CompanionWarning {
            scores_file: PathBuf::from("fam_scores.json"),
            family: "fam".into(),
            found: vec!["fam_u_model_1.pdb".into()],
            expected: 5,
        };
        let input = BatchInput {
            predictions: Vec::new(),
            unmatched_structures: BTreeSet::from(["orphan.pdb".to_string()]),
            companion_warnings: vec![warning.clone()],
        };
        let messages = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::Message(text) = event {
                messages.lock().unwrap().push(text);
            }
        }));
        let report = run(input, &AnalysisConfig::default(), &reporter);
        drop(reporter);

        assert_eq!(
            messages.into_inner().unwrap(),
            vec!["1 metadata file(s) have an unexpected number of structure files"]
        );
        assert_eq!(report.attempted, 0);
        assert_eq!(report.companion_warnings, vec![warning]);
        assert!(report.unmatched_structures.contains("orphan.pdb"));
    }
}

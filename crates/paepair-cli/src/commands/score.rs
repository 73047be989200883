use crate::cli::ScoreArgs;
use crate::config::PartialAppConfig;
use crate::error::{CliError, Result};
use crate::export;
use paepair::workflows::analyze::{PredictionInput, analyze_files};
use std::io;
use tracing::{info, warn};

pub fn run(args: ScoreArgs) -> Result<()> {
    let config = PartialAppConfig::load(args.analysis.config.as_deref())?
        .merge_with_cli(&args.analysis, None)?;

    let stem = args
        .scores
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            CliError::Argument(format!(
                "Scores path has no usable file name: {}",
                args.scores.display()
            ))
        })?;
    let keys = config.discovery.derive_keys(stem);
    let id = args
        .id
        .clone()
        .or_else(|| keys.as_ref().map(|k| k.id.clone()))
        .unwrap_or_else(|| stem.to_string());
    let name = keys.map(|k| k.family).unwrap_or_else(|| id.clone());

    let input = PredictionInput {
        id,
        name,
        scores_path: args.scores.clone(),
        structure_path: Some(args.structure.clone()),
    };

    info!("Scoring prediction '{}'...", input.id);
    let analysis = analyze_files(&input, &config.analysis)?;
    for skipped in &analysis.skipped_pairs {
        warn!(
            first = skipped.first,
            second = skipped.second,
            "Chain pair skipped: {}",
            skipped.reason
        );
    }

    match &args.output {
        Some(path) => {
            export::write_records_to_path(path, &analysis.records)?;
            eprintln!(
                "{} row(s) for {} chain(s) saved in: {}",
                analysis.records.len(),
                analysis.chain_ids.len(),
                path.display()
            );
        }
        None => export::write_records(io::stdout().lock(), &analysis.records)
            .map_err(|e| CliError::Other(e.into()))?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use paepair::engine::error::AnalysisError;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_inputs(dir: &Path, pae: &str) -> (String, String) {
        let scores = dir.join("KinA_Adapt_scores_rank_001_alphafold2_multimer_v3_model_2_seed_000.json");
        let structure = dir.join("model.pdb");
        fs::write(&scores, format!(r#"{{"pae": {pae}, "ptm": 0.61, "iptm": 0.55}}"#)).unwrap();
        let mut pdb = String::new();
        for (serial, chain) in ['A', 'B'].into_iter().enumerate() {
            pdb.push_str(&format!(
                "ATOM  {:>5}  CB  ALA {}   1       0.000   0.000   0.000  1.00 80.00\n",
                serial + 1,
                chain
            ));
        }
        fs::write(&structure, pdb).unwrap();
        (
            scores.to_str().unwrap().to_string(),
            structure.to_str().unwrap().to_string(),
        )
    }

    fn score_args(args: &[&str]) -> ScoreArgs {
        let mut full = vec!["paepair", "score"];
        full.extend_from_slice(args);
        match Cli::parse_from(full).command {
            Commands::Score(args) => args,
            _ => panic!("Expected 'score' subcommand"),
        }
    }

    #[test]
    fn name_fragments_use_family_of_scores_file() {
        let dir = tempdir().unwrap();
        let (scores, structure) = write_inputs(dir.path(), "[[2.0, 3.0], [4.0, 5.0]]");
        let output = dir.path().join("out.csv");
        let args = score_args(&[
            "--scores",
            &scores,
            "--structure",
            &structure,
            "-o",
            output.to_str().unwrap(),
            "--labeling",
            "name-fragments",
        ]);
        run(args).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with(
            "KinA_Adapt_scores_rank_001_alphafold2_multimer_v3_model_2,0.61,0.55,28.0,"
        ));
        assert!(lines[2].ends_with(",KinA,Adapt,intermolecular"));
    }

    #[test]
    fn explicit_id_replaces_derived_id() {
        let dir = tempdir().unwrap();
        let (scores, structure) = write_inputs(dir.path(), "[[2.0, 3.0], [4.0, 5.0]]");
        let output = dir.path().join("out.csv");
        let args = score_args(&[
            "--scores",
            &scores,
            "--structure",
            &structure,
            "--id",
            "custom",
            "-o",
            output.to_str().unwrap(),
        ]);
        run(args).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.lines().skip(1).all(|line| line.starts_with("custom,")));
    }

    #[test]
    fn shape_mismatch_is_reported_as_analysis_error() {
        let dir = tempdir().unwrap();
        let (scores, structure) = write_inputs(dir.path(), "[[1.0]]");
        let args = score_args(&["--scores", &scores, "--structure", &structure]);
        assert!(matches!(
            run(args),
            Err(CliError::Analysis(AnalysisError::BoundaryMismatch { .. }))
        ));
    }
}

use paepair::workflows::batch::BatchReport;
use std::fmt::Write;
use std::path::Path;

/// Formats the end-of-run summary printed after a batch.
pub fn render(report: &BatchReport, output: &Path) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "files found:  {}", report.attempted);
    let _ = writeln!(
        out,
        "predictions scored: {} of {}",
        report.succeeded, report.attempted
    );
    let _ = writeln!(
        out,
        "{} row(s) saved in: {}",
        report.records.len(),
        output.display()
    );

    if !report.failures.is_empty() {
        let _ = writeln!(out, "\n{} prediction(s) failed:", report.failures.len());
        for (kind, count) in report.failure_counts() {
            let _ = writeln!(out, "  {kind}: {count}");
        }
        for failure in &report.failures {
            let _ = writeln!(out, "  [{}] {}: {}", failure.kind, failure.id, failure.message);
        }
    }

    if !report.skipped_pairs.is_empty() {
        let _ = writeln!(
            out,
            "\n{} chain pair(s) skipped:",
            report.skipped_pairs.len()
        );
        for skipped in &report.skipped_pairs {
            let _ = writeln!(
                out,
                "  {} chain {} with chain {}: {}",
                skipped.prediction_id, skipped.pair.first, skipped.pair.second, skipped.pair.reason
            );
        }
    }

    if !report.companion_warnings.is_empty() {
        let _ = writeln!(
            out,
            "\n{} metadata file(s) with an unexpected number of structure files:",
            report.companion_warnings.len()
        );
        for warning in &report.companion_warnings {
            let _ = writeln!(
                out,
                "  {} (family '{}'): found {}, expected {} {:?}",
                warning.scores_file.display(),
                warning.family,
                warning.found.len(),
                warning.expected,
                warning.found
            );
        }
    }

    let _ = writeln!(
        out,
        "\n{} structure file(s) are missing a metadata file",
        report.unmatched_structures.len()
    );
    for name in &report.unmatched_structures {
        let _ = writeln!(out, "  {name}");
    }

    if report.is_clean() {
        let _ = writeln!(out, "\nno problems found");
    }

    out
}

//! Check command: per-artist conflict report.
//!
//! Each artist is compared against the inventory resolved for their
//! stage, in production-file order.

use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;

use rider_core::{ComparisonReport, Severity, compare};

use crate::commands::production::Production;

/// One artist's comparison outcome, paired with enough context to
/// render it.
#[derive(Debug, Serialize)]
pub struct ArtistCheck {
    pub artist: String,
    pub stage: u32,
    #[serde(flatten)]
    pub report: ComparisonReport,
}

/// Runs the comparator for every artist against their stage inventory.
#[must_use]
pub fn check_production(production: &Production) -> Vec<ArtistCheck> {
    production
        .artists
        .iter()
        .map(|artist| ArtistCheck {
            artist: artist.artist.clone(),
            stage: artist.stage,
            report: compare(artist, &production.inventory_for_stage(artist.stage)),
        })
        .collect()
}

fn severity_badge(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error  ",
        Severity::Warning => "warning",
    }
}

/// Formats the human-readable check output.
#[must_use]
pub fn format_checks(checks: &[ArtistCheck]) -> String {
    let mut output = String::new();

    writeln!(output, "EQUIPMENT CHECK").unwrap();
    writeln!(output, "───────────────").unwrap();

    if checks.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No artists in the production file.").unwrap();
        return output;
    }

    for check in checks {
        writeln!(output).unwrap();
        writeln!(output, "{} (stage {})", check.artist, check.stage).unwrap();
        if check.report.mismatches.is_empty() {
            writeln!(output, "  ok").unwrap();
            continue;
        }
        for mismatch in &check.report.mismatches {
            writeln!(
                output,
                "  {}  {}: {}",
                severity_badge(mismatch.severity),
                mismatch.category.label(),
                mismatch.message
            )
            .unwrap();
            if let Some(details) = &mismatch.details {
                writeln!(output, "           {details}").unwrap();
            }
        }
    }

    let conflicted = checks.iter().filter(|c| c.report.has_conflicts).count();
    let errors: usize = checks.iter().map(|c| c.report.errors().count()).sum();
    let warnings: usize = checks
        .iter()
        .flat_map(|c| c.report.mismatches.iter())
        .filter(|m| m.severity == Severity::Warning)
        .count();

    writeln!(output).unwrap();
    writeln!(
        output,
        "{} artists checked, {conflicted} with conflicts, {errors} errors, {warnings} warnings",
        checks.len()
    )
    .unwrap();
    output
}

/// Runs the check command.
pub fn run(production: &Production, json: bool) -> Result<()> {
    let checks = check_production(production);

    if json {
        println!("{}", serde_json::to_string_pretty(&checks)?);
    } else {
        print!("{}", format_checks(&checks));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rider_core::{EquipmentCategory, Mismatch};

    fn check(artist: &str, mismatches: Vec<Mismatch>) -> ArtistCheck {
        let has_conflicts = !mismatches.is_empty();
        ArtistCheck {
            artist: artist.to_string(),
            stage: 1,
            report: ComparisonReport {
                mismatches,
                has_conflicts,
            },
        }
    }

    fn mismatch(severity: Severity, message: &str, details: Option<&str>) -> Mismatch {
        Mismatch {
            category: EquipmentCategory::ConsoleFoh,
            severity,
            message: message.to_string(),
            details: details.map(String::from),
            artist: "A".to_string(),
        }
    }

    #[test]
    fn clean_artists_render_ok() {
        let output = format_checks(&[check("The Sine Waves", vec![])]);
        assert!(output.contains("The Sine Waves (stage 1)"));
        assert!(output.contains("  ok"));
        assert!(output.contains("1 artists checked, 0 with conflicts"));
    }

    #[test]
    fn mismatches_render_with_badges_and_details() {
        let output = format_checks(&[check(
            "A",
            vec![mismatch(
                Severity::Error,
                "DiGiCo SD5 not available",
                Some("Available: DiGiCo SD7"),
            )],
        )]);
        assert!(output.contains("error"));
        assert!(output.contains("FOH console: DiGiCo SD5 not available"));
        assert!(output.contains("Available: DiGiCo SD7"));
        assert!(output.contains("1 with conflicts, 1 errors, 0 warnings"));
    }

    #[test]
    fn warning_only_artist_still_counts_as_conflicted() {
        let warning = mismatch(Severity::Warning, "Band is bringing their own consoles", None);
        let output = format_checks(&[check("B", vec![warning])]);
        assert!(output.contains("1 with conflicts, 0 errors, 1 warnings"));
    }

    #[test]
    fn empty_production_says_so() {
        let output = format_checks(&[]);
        assert!(output.contains("No artists in the production file."));
    }
}

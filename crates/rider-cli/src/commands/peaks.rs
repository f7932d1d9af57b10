//! Peaks command: peak simultaneous demand per equipment model.
//!
//! Artists are grouped by festival day and each day is aggregated
//! independently; the output is one row per (date, category, model).

use std::collections::BTreeSet;
use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use rider_core::{PeakRequirement, aggregate_all};

use crate::commands::production::Production;

/// Output format for the peaks table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
    Csv,
}

/// One peak requirement pinned to its festival day.
#[derive(Debug, Serialize)]
pub struct PeakRow {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub requirement: PeakRequirement,
}

/// Aggregates every festival day of the production.
#[must_use]
pub fn collect_peaks(production: &Production) -> Vec<PeakRow> {
    production
        .artists_by_date()
        .into_iter()
        .flat_map(|(date, artists)| {
            aggregate_all(&artists)
                .into_iter()
                .map(move |requirement| PeakRow { date, requirement })
        })
        .collect()
}

fn artists_of(requirement: &PeakRequirement) -> Vec<String> {
    let names: BTreeSet<String> = requirement
        .stage_breakdown
        .iter()
        .flat_map(|breakdown| breakdown.artists.iter().cloned())
        .collect();
    names.into_iter().collect()
}

/// Formats the human-readable peaks table.
#[must_use]
pub fn format_peaks(rows: &[PeakRow]) -> String {
    let mut output = String::new();

    writeln!(output, "PEAK DEMAND").unwrap();
    writeln!(output, "───────────").unwrap();

    if rows.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No scheduled equipment demand.").unwrap();
        return output;
    }

    let mut current_date = None;
    for row in rows {
        if current_date != Some(row.date) {
            current_date = Some(row.date);
            writeln!(output).unwrap();
            writeln!(output, "{}", row.date.format("%Y-%m-%d")).unwrap();
        }
        let req = &row.requirement;
        writeln!(
            output,
            "  {:<18} {:<24} peak {:>3}  (exclusive {}, shared {})",
            req.category.label(),
            req.model,
            req.peak_quantity,
            req.exclusive_quantity,
            req.shared_quantity
        )
        .unwrap();
        for breakdown in &req.stage_breakdown {
            writeln!(
                output,
                "      stage {}: {}{}  [{}]",
                breakdown.stage,
                breakdown.quantity,
                if breakdown.is_exclusive {
                    " (exclusive)"
                } else {
                    ""
                },
                breakdown.artists.join(", ")
            )
            .unwrap();
        }
    }

    output
}

/// Quotes a CSV field when it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Formats the CSV peaks output.
#[must_use]
pub fn format_peaks_csv(rows: &[PeakRow]) -> String {
    let mut output = String::new();
    writeln!(
        output,
        "date,category,model,peak,exclusive,shared,stages,artists"
    )
    .unwrap();

    for row in rows {
        let req = &row.requirement;
        let stages = req
            .stage_breakdown
            .iter()
            .map(|b| b.stage.to_string())
            .collect::<Vec<_>>()
            .join(";");
        let artists = artists_of(req).join(";");
        writeln!(
            output,
            "{},{},{},{},{},{},{},{}",
            row.date.format("%Y-%m-%d"),
            csv_field(req.category.label()),
            csv_field(&req.model),
            req.peak_quantity,
            req.exclusive_quantity,
            req.shared_quantity,
            csv_field(&stages),
            csv_field(&artists)
        )
        .unwrap();
    }

    output
}

/// Runs the peaks command.
pub fn run(production: &Production, format: OutputFormat) -> Result<()> {
    let rows = collect_peaks(production);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Csv => print!("{}", format_peaks_csv(&rows)),
        OutputFormat::Human => print!("{}", format_peaks(&rows)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use rider_core::{EquipmentCategory, StageBreakdown};

    fn row(date: (i32, u32, u32), model: &str, peak: u32) -> PeakRow {
        PeakRow {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            requirement: PeakRequirement {
                model: model.to_string(),
                category: EquipmentCategory::WiredMic,
                peak_quantity: peak,
                exclusive_quantity: 0,
                shared_quantity: peak,
                stage_breakdown: vec![StageBreakdown {
                    stage: 1,
                    quantity: peak,
                    is_exclusive: false,
                    artists: vec!["The Sine Waves".to_string(), "Square Pulse".to_string()],
                }],
            },
        }
    }

    #[test]
    fn human_output_groups_by_date() {
        let rows = vec![
            row((2025, 7, 18), "Shure SM58", 6),
            row((2025, 7, 19), "Shure SM58", 4),
        ];
        let output = format_peaks(&rows);
        assert!(output.contains("2025-07-18"));
        assert!(output.contains("2025-07-19"));
        assert!(output.contains("Shure SM58"));
        assert!(output.contains("peak   6"));
        assert!(output.contains("stage 1: 6  [The Sine Waves, Square Pulse]"));
    }

    #[test]
    fn empty_rows_render_placeholder() {
        let output = format_peaks(&[]);
        assert!(output.contains("No scheduled equipment demand."));
    }

    #[test]
    fn csv_output_is_stable() {
        let rows = vec![row((2025, 7, 18), "Shure SM58", 6)];
        assert_snapshot!(format_peaks_csv(&rows), @r"
        date,category,model,peak,exclusive,shared,stages,artists
        2025-07-18,wired microphone,Shure SM58,6,0,6,1,Square Pulse;The Sine Waves
        ");
    }

    #[test]
    fn csv_quotes_fields_with_delimiters() {
        let mut r = row((2025, 7, 18), "Sennheiser MD 421, vintage", 2);
        r.requirement.stage_breakdown[0].artists = vec!["Band \"X\"".to_string()];
        let output = format_peaks_csv(&[r]);
        assert!(output.contains("\"Sennheiser MD 421, vintage\""));
        assert!(output.contains("\"Band \"\"X\"\"\""));
    }

    #[test]
    fn artists_column_unions_breakdowns_sorted() {
        let mut r = row((2025, 7, 18), "Shure SM58", 6);
        r.requirement.stage_breakdown.push(StageBreakdown {
            stage: 2,
            quantity: 2,
            is_exclusive: false,
            artists: vec!["Square Pulse".to_string(), "Ambient Trio".to_string()],
        });
        let output = format_peaks_csv(&[r]);
        assert!(output.contains("1;2"));
        assert!(output.contains("Ambient Trio;Square Pulse;The Sine Waves"));
    }
}

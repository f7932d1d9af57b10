//! Needs command: additional equipment to buy or rent.
//!
//! Per-day peaks are compared against the festival-wide inventory and
//! the worst day wins per model, so the report answers "what stock
//! level covers every day of the festival".

use std::collections::BTreeMap;
use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;

use rider_core::{
    EquipmentCategory, EquipmentNeedsEntry, ExtrasShortfall, aggregate_all, summarize,
    summarize_extras,
};

use crate::commands::production::Production;

/// The complete procurement report.
#[derive(Debug, Serialize)]
pub struct NeedsReport {
    pub needs: Vec<EquipmentNeedsEntry>,
    pub extras: Vec<ExtrasShortfall>,
}

/// Computes the report: per-model worst-day shortfalls plus missing
/// stage extras.
#[must_use]
pub fn collect_needs(production: &Production) -> NeedsReport {
    let inventory = production.festival_inventory();

    let mut merged: BTreeMap<(EquipmentCategory, String), EquipmentNeedsEntry> = BTreeMap::new();
    for artists in production.artists_by_date().into_values() {
        let peaks = aggregate_all(&artists);
        for entry in summarize(&peaks, &inventory) {
            let key = (entry.category, entry.model.to_lowercase());
            match merged.entry(key) {
                std::collections::btree_map::Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
                std::collections::btree_map::Entry::Occupied(mut slot) => {
                    let existing = slot.get_mut();
                    existing.additional_quantity =
                        existing.additional_quantity.max(entry.additional_quantity);
                    for artist in entry.required_by {
                        if !existing.required_by.contains(&artist) {
                            existing.required_by.push(artist);
                        }
                    }
                    existing.required_by.sort();
                }
            }
        }
    }

    NeedsReport {
        needs: merged.into_values().collect(),
        extras: summarize_extras(&production.artists, &inventory),
    }
}

/// Formats the human-readable needs output.
#[must_use]
pub fn format_needs(report: &NeedsReport) -> String {
    let mut output = String::new();

    writeln!(output, "ADDITIONAL EQUIPMENT").unwrap();
    writeln!(output, "────────────────────").unwrap();

    if report.needs.is_empty() && report.extras.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "Current inventory covers every request.").unwrap();
        return output;
    }

    for entry in &report.needs {
        writeln!(output).unwrap();
        writeln!(
            output,
            "{} ({}): {} more",
            entry.model,
            entry.category.label(),
            entry.additional_quantity
        )
        .unwrap();
        writeln!(output, "  required by: {}", entry.required_by.join(", ")).unwrap();
    }

    if !report.extras.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "Missing stage extras:").unwrap();
        for shortfall in &report.extras {
            writeln!(
                output,
                "  {} requested by {} stage(s)",
                shortfall.category.label(),
                shortfall.stages_requiring
            )
            .unwrap();
        }
    }

    output
}

/// Runs the needs command.
pub fn run(production: &Production, json: bool) -> Result<()> {
    let report = collect_needs(production);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_needs(&report));
    }

    Ok(())
}

//! Equipment needs summarizer.
//!
//! Combines peak demand output with the inventory snapshot to answer
//! "how much more do we need to buy or rent".

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::category::EquipmentCategory;
use crate::inventory::InventorySnapshot;
use crate::peak::PeakRequirement;
use crate::requirement::ArtistRequirement;

/// Additional stock needed for one model. Only produced when the
/// shortfall is positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentNeedsEntry {
    pub model: String,
    pub category: EquipmentCategory,
    pub additional_quantity: u32,
    pub required_by: Vec<String>,
}

/// A requested stage fixture the inventory lacks, with the number of
/// distinct stages asking for it. Extras are booleans, not quantities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtrasShortfall {
    pub category: EquipmentCategory,
    pub stages_requiring: u32,
}

/// Compares each peak requirement against available stock; entries are
/// emitted only for positive shortfalls (never with a zero quantity).
#[must_use]
pub fn summarize(
    peaks: &[PeakRequirement],
    inventory: &InventorySnapshot,
) -> Vec<EquipmentNeedsEntry> {
    peaks
        .iter()
        .filter_map(|peak| {
            let available = inventory.available_quantity(peak.category, &peak.model);
            let additional_quantity = peak.peak_quantity.saturating_sub(available);
            if additional_quantity == 0 {
                return None;
            }
            let required_by: BTreeSet<String> = peak
                .stage_breakdown
                .iter()
                .flat_map(|breakdown| breakdown.artists.iter().cloned())
                .collect();
            Some(EquipmentNeedsEntry {
                model: peak.model.clone(),
                category: peak.category,
                additional_quantity,
                required_by: required_by.into_iter().collect(),
            })
        })
        .collect()
}

/// Counts, per missing extra, the distinct stages requesting it.
#[must_use]
pub fn summarize_extras(
    artists: &[ArtistRequirement],
    inventory: &InventorySnapshot,
) -> Vec<ExtrasShortfall> {
    let wanted = [
        EquipmentCategory::ExtraSidefill,
        EquipmentCategory::ExtraDrumfill,
        EquipmentCategory::ExtraDjbooth,
    ];
    wanted
        .into_iter()
        .filter(|category| inventory.extra_available(*category) != Some(true))
        .filter_map(|category| {
            let stages: BTreeSet<u32> = artists
                .iter()
                .filter(|artist| match category {
                    EquipmentCategory::ExtraSidefill => artist.extras.side_fill,
                    EquipmentCategory::ExtraDrumfill => artist.extras.drum_fill,
                    _ => artist.extras.dj_booth,
                })
                .map(|artist| artist.stage)
                .collect();
            let stages_requiring = u32::try_from(stages.len()).unwrap_or(u32::MAX);
            (stages_requiring > 0).then_some(ExtrasShortfall {
                category,
                stages_requiring,
            })
        })
        .collect()
}

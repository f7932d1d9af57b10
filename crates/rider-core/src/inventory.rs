//! Immutable inventory snapshot for one stage/day.
//!
//! The snapshot is resolved by external logic (stage-specific override
//! preferred over the global default, see `rider-ingest`); the engine
//! only reads it. Model lookups use ASCII case-insensitive *exact*
//! string matching — no fuzzy or partial matching, a known, documented
//! limitation of the system.

use serde::{Deserialize, Serialize};

use crate::category::EquipmentCategory;

/// One stocked equipment model with its available quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockedModel {
    pub model: String,
    #[serde(default)]
    pub quantity: u32,
}

/// Everything available for a given stage/day. Immutable for the
/// duration of a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    #[serde(default)]
    pub foh_consoles: Vec<StockedModel>,
    #[serde(default)]
    pub mon_consoles: Vec<StockedModel>,
    #[serde(default)]
    pub wireless: Vec<StockedModel>,
    #[serde(default)]
    pub iem: Vec<StockedModel>,
    #[serde(default)]
    pub wired_mics: Vec<StockedModel>,
    #[serde(default)]
    pub monitors: u32,
    #[serde(default)]
    pub cat6_runs: u32,
    #[serde(default)]
    pub hma_runs: u32,
    #[serde(default)]
    pub coax_runs: u32,
    #[serde(default)]
    pub opticalcon_duo_runs: u32,
    #[serde(default)]
    pub analog_lines: u32,
    #[serde(default)]
    pub side_fill: bool,
    #[serde(default)]
    pub drum_fill: bool,
    #[serde(default)]
    pub dj_booth: bool,
}

impl InventorySnapshot {
    /// The all-empty fallback snapshot.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Stock list for a model-list category, `None` otherwise.
    #[must_use]
    pub fn stock_for(&self, category: EquipmentCategory) -> Option<&[StockedModel]> {
        match category {
            EquipmentCategory::ConsoleFoh => Some(&self.foh_consoles),
            EquipmentCategory::ConsoleMon => Some(&self.mon_consoles),
            EquipmentCategory::Wireless => Some(&self.wireless),
            EquipmentCategory::Iem => Some(&self.iem),
            EquipmentCategory::WiredMic => Some(&self.wired_mics),
            _ => None,
        }
    }

    /// Case-insensitive exact lookup of a model within a category.
    #[must_use]
    pub fn find_model(&self, category: EquipmentCategory, model: &str) -> Option<&StockedModel> {
        self.stock_for(category)?
            .iter()
            .find(|stocked| stocked.model.eq_ignore_ascii_case(model))
    }

    /// All stocked model names for a category, for mismatch details.
    #[must_use]
    pub fn model_names(&self, category: EquipmentCategory) -> Vec<&str> {
        self.stock_for(category)
            .map(|stock| stock.iter().map(|s| s.model.as_str()).collect())
            .unwrap_or_default()
    }

    /// Quantity ceiling for the count-only categories, `None` for
    /// model-list and extras categories.
    #[must_use]
    pub const fn quantity_ceiling(&self, category: EquipmentCategory) -> Option<u32> {
        match category {
            EquipmentCategory::Monitor => Some(self.monitors),
            EquipmentCategory::InfraCat6 => Some(self.cat6_runs),
            EquipmentCategory::InfraHma => Some(self.hma_runs),
            EquipmentCategory::InfraCoax => Some(self.coax_runs),
            EquipmentCategory::InfraOpticalconDuo => Some(self.opticalcon_duo_runs),
            EquipmentCategory::InfraAnalog => Some(self.analog_lines),
            _ => None,
        }
    }

    /// Whether a boolean stage fixture is present.
    #[must_use]
    pub const fn extra_available(&self, category: EquipmentCategory) -> Option<bool> {
        match category {
            EquipmentCategory::ExtraSidefill => Some(self.side_fill),
            EquipmentCategory::ExtraDrumfill => Some(self.drum_fill),
            EquipmentCategory::ExtraDjbooth => Some(self.dj_booth),
            _ => None,
        }
    }

    /// Available quantity for a model/category pair, 0 when the model
    /// is entirely absent. Count-only categories ignore `model` and
    /// return their ceiling.
    #[must_use]
    pub fn available_quantity(&self, category: EquipmentCategory, model: &str) -> u32 {
        if category.has_models() {
            self.find_model(category, model)
                .map_or(0, |stocked| stocked.quantity)
        } else {
            self.quantity_ceiling(category).unwrap_or(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> InventorySnapshot {
        InventorySnapshot {
            wired_mics: vec![
                StockedModel {
                    model: "Shure SM58".to_string(),
                    quantity: 12,
                },
                StockedModel {
                    model: "Sennheiser e906".to_string(),
                    quantity: 4,
                },
            ],
            monitors: 8,
            analog_lines: 24,
            side_fill: true,
            ..Default::default()
        }
    }

    #[test]
    fn find_model_is_case_insensitive() {
        let inv = snapshot();
        let hit = inv.find_model(EquipmentCategory::WiredMic, "shure sm58");
        assert_eq!(hit.map(|s| s.quantity), Some(12));
    }

    #[test]
    fn find_model_requires_exact_match() {
        let inv = snapshot();
        // No partial matching: "SM58" alone does not match "Shure SM58".
        assert!(inv.find_model(EquipmentCategory::WiredMic, "SM58").is_none());
    }

    #[test]
    fn available_quantity_absent_model_is_zero() {
        let inv = snapshot();
        assert_eq!(
            inv.available_quantity(EquipmentCategory::WiredMic, "Neumann KM184"),
            0
        );
        assert_eq!(
            inv.available_quantity(EquipmentCategory::WiredMic, "sennheiser E906"),
            4
        );
    }

    #[test]
    fn count_categories_use_ceilings() {
        let inv = snapshot();
        assert_eq!(inv.quantity_ceiling(EquipmentCategory::Monitor), Some(8));
        assert_eq!(
            inv.quantity_ceiling(EquipmentCategory::InfraAnalog),
            Some(24)
        );
        assert_eq!(inv.quantity_ceiling(EquipmentCategory::WiredMic), None);
        assert_eq!(
            inv.available_quantity(EquipmentCategory::Monitor, "ignored"),
            8
        );
    }

    #[test]
    fn extras_are_booleans() {
        let inv = snapshot();
        assert_eq!(
            inv.extra_available(EquipmentCategory::ExtraSidefill),
            Some(true)
        );
        assert_eq!(
            inv.extra_available(EquipmentCategory::ExtraDjbooth),
            Some(false)
        );
        assert_eq!(inv.extra_available(EquipmentCategory::Monitor), None);
    }

    #[test]
    fn empty_snapshot_has_nothing() {
        let inv = InventorySnapshot::empty();
        assert!(inv.model_names(EquipmentCategory::ConsoleFoh).is_empty());
        assert_eq!(inv.available_quantity(EquipmentCategory::Monitor, ""), 0);
    }
}

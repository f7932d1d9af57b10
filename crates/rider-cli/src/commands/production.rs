//! Production file loading shared by the subcommands.
//!
//! A production file is one JSON document:
//! `{ "artists": [rows...], "inventory": { "global": {...},
//! "stages": { "<n>": {...} } } }`. Artist rows and inventory rows are
//! loosely typed and go through the boundary parsers.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::Value;

use rider_core::{ArtistRequirement, InventorySnapshot, SchedulePolicy};

/// Everything a subcommand needs: parsed artists plus the inventory
/// snapshots to resolve against.
pub struct Production {
    pub artists: Vec<ArtistRequirement>,
    global: Option<InventorySnapshot>,
    stages: BTreeMap<u32, InventorySnapshot>,
}

impl Production {
    /// Reads and parses a production file.
    pub fn load(path: &Path, policy: &SchedulePolicy) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let doc: Value = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not valid JSON", path.display()))?;

        let rows = doc
            .get("artists")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let artists =
            rider_ingest::artists_from_rows(&rows, policy).context("failed to parse artist rows")?;

        let inventory = doc.get("inventory");
        let global = inventory
            .and_then(|inv| inv.get("global"))
            .filter(|row| !row.is_null())
            .map(rider_ingest::inventory_from_row)
            .transpose()
            .context("failed to parse global inventory")?;

        let mut stages = BTreeMap::new();
        if let Some(map) = inventory
            .and_then(|inv| inv.get("stages"))
            .and_then(Value::as_object)
        {
            for (key, row) in map {
                let stage: u32 = key
                    .parse()
                    .with_context(|| format!("invalid stage number {key:?}"))?;
                let snapshot = rider_ingest::inventory_from_row(row)
                    .with_context(|| format!("failed to parse inventory for stage {stage}"))?;
                stages.insert(stage, snapshot);
            }
        }

        tracing::debug!(
            artists = artists.len(),
            stages = stages.len(),
            "loaded production file"
        );
        Ok(Self {
            artists,
            global,
            stages,
        })
    }

    /// Snapshot in effect for one stage: the stage override wins over
    /// the global default, with an empty fallback.
    #[must_use]
    pub fn inventory_for_stage(&self, stage: u32) -> InventorySnapshot {
        rider_ingest::resolve_inventory(self.stages.get(&stage).cloned(), self.global.clone())
    }

    /// Festival-wide snapshot, used by procurement reports.
    #[must_use]
    pub fn festival_inventory(&self) -> InventorySnapshot {
        rider_ingest::resolve_inventory(None, self.global.clone())
    }

    /// Groups artists by festival day, preserving row order within a
    /// day. Each day is reconciled independently.
    #[must_use]
    pub fn artists_by_date(&self) -> BTreeMap<NaiveDate, Vec<ArtistRequirement>> {
        let mut groups: BTreeMap<NaiveDate, Vec<ArtistRequirement>> = BTreeMap::new();
        for artist in &self.artists {
            groups
                .entry(artist.window.date)
                .or_default()
                .push(artist.clone());
        }
        groups
    }
}

//! Peak demand aggregator.
//!
//! Computes, per equipment model, the true maximum concurrent quantity
//! needed across all artists sharing a stage/day, split into exclusive
//! and shared portions.
//!
//! # Algorithm
//!
//! For every usage record, anchor on its window and scan all other
//! records for adjacency (overlap or back-to-back within the
//! consecutive-show gap). Within that concurrent set, exclusive
//! reservations sum; non-exclusive records share physical units and
//! contribute only the largest single need — and contribute nothing at
//! all when any exclusive reservation is present. This anchor-and-scan
//! pass is the documented, sufficient algorithm for per-record windows;
//! it is deliberately not a general interval-graph max-clique solver.
//!
//! The result is a pure function of the unordered usage-record set:
//! models are keyed case-insensitively and output is sorted, so the
//! outcome never depends on input order.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::category::{EquipmentCategory, ProviderMode};
use crate::requirement::ArtistRequirement;
use crate::schedule::ScheduleWindow;

/// One artist's demand for one equipment model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub artist: String,
    pub stage: u32,
    pub window: ScheduleWindow,
    pub quantity: u32,
    pub exclusive: bool,
}

/// Per-stage slice of a peak requirement, for traceability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageBreakdown {
    pub stage: u32,
    pub quantity: u32,
    pub is_exclusive: bool,
    pub artists: Vec<String>,
}

/// Peak simultaneous demand for one equipment model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakRequirement {
    pub model: String,
    pub category: EquipmentCategory,
    pub peak_quantity: u32,
    pub exclusive_quantity: u32,
    pub shared_quantity: u32,
    pub stage_breakdown: Vec<StageBreakdown>,
}

/// Computes peak requirements for one category.
///
/// The caller scopes `artists` to one (stage, date) group beforehand;
/// the aggregator itself is stage/date-agnostic and must receive the
/// complete list (partial calls would understate peaks). Extras are
/// boolean fixtures and never aggregate.
#[must_use]
pub fn aggregate(
    artists: &[ArtistRequirement],
    category: EquipmentCategory,
) -> Vec<PeakRequirement> {
    if category.is_extra() {
        return Vec::new();
    }
    let groups = collect_usage(artists, category);
    let peaks: Vec<PeakRequirement> = groups
        .into_values()
        .map(|(model, records)| peak_for_model(model, category, &records))
        .collect();
    tracing::debug!(%category, models = peaks.len(), "peak aggregation complete");
    peaks
}

/// Convenience pass over every aggregatable category, in canonical
/// category order.
#[must_use]
pub fn aggregate_all(artists: &[ArtistRequirement]) -> Vec<PeakRequirement> {
    EquipmentCategory::ALL
        .iter()
        .filter(|category| !category.is_extra())
        .flat_map(|category| aggregate(artists, *category))
        .collect()
}

/// Groups usage records by case-insensitive model key. The displayed
/// spelling is the lexicographically smallest one encountered, keeping
/// the result independent of input order.
fn collect_usage(
    artists: &[ArtistRequirement],
    category: EquipmentCategory,
) -> BTreeMap<String, (String, Vec<UsageRecord>)> {
    let mut groups: BTreeMap<String, (String, Vec<UsageRecord>)> = BTreeMap::new();
    let mut add = |model: &str, artist: &ArtistRequirement, quantity: u32, exclusive: bool| {
        if model.trim().is_empty() || quantity == 0 {
            return;
        }
        let key = model.to_ascii_lowercase();
        let entry = groups
            .entry(key)
            .or_insert_with(|| (model.to_string(), Vec::new()));
        if model < entry.0.as_str() {
            entry.0 = model.to_string();
        }
        entry.1.push(UsageRecord {
            artist: artist.artist.clone(),
            stage: artist.stage,
            window: artist.window,
            quantity,
            exclusive,
        });
    };

    for artist in artists {
        match category {
            EquipmentCategory::ConsoleFoh => {
                if let Some(model) = requested_console(&artist.foh_console) {
                    add(model, artist, 1, false);
                }
            }
            EquipmentCategory::ConsoleMon => {
                if let Some(model) = requested_console(&artist.mon_console) {
                    add(model, artist, 1, false);
                }
            }
            EquipmentCategory::Wireless => {
                for request in &artist.wireless {
                    if request.provider != ProviderMode::Band {
                        let channels = request.handheld_qty + request.bodypack_qty;
                        add(&request.model, artist, channels, false);
                    }
                }
            }
            EquipmentCategory::Iem => {
                for request in &artist.iem {
                    if request.provider != ProviderMode::Band {
                        add(&request.model, artist, request.channel_qty, false);
                    }
                }
            }
            EquipmentCategory::WiredMic => {
                for request in &artist.wired_mics {
                    if request.provider != ProviderMode::Band {
                        add(&request.model, artist, request.quantity, request.exclusive_use);
                    }
                }
            }
            EquipmentCategory::Monitor => {
                if artist.monitors.enabled {
                    add(category.label(), artist, artist.monitors.quantity, false);
                }
            }
            EquipmentCategory::InfraCat6
            | EquipmentCategory::InfraHma
            | EquipmentCategory::InfraCoax
            | EquipmentCategory::InfraOpticalconDuo
            | EquipmentCategory::InfraAnalog => {
                if artist.infra.provider != ProviderMode::Band {
                    let quantity = match category {
                        EquipmentCategory::InfraCat6 => enabled_qty(artist.infra.cat6),
                        EquipmentCategory::InfraHma => enabled_qty(artist.infra.hma),
                        EquipmentCategory::InfraCoax => enabled_qty(artist.infra.coax),
                        EquipmentCategory::InfraOpticalconDuo => {
                            enabled_qty(artist.infra.opticalcon_duo)
                        }
                        _ => artist.infra.analog_lines,
                    };
                    add(category.label(), artist, quantity, false);
                }
            }
            EquipmentCategory::ExtraSidefill
            | EquipmentCategory::ExtraDrumfill
            | EquipmentCategory::ExtraDjbooth => {}
        }
    }
    groups
}

/// Band-provided gear never consumes festival stock.
fn requested_console(request: &crate::requirement::ConsoleRequest) -> Option<&str> {
    if request.provider == ProviderMode::Band {
        return None;
    }
    request.model.as_deref().filter(|m| !m.trim().is_empty())
}

const fn enabled_qty(run: crate::requirement::CableRequest) -> u32 {
    if run.enabled { run.quantity } else { 0 }
}

fn peak_for_model(
    model: String,
    category: EquipmentCategory,
    records: &[UsageRecord],
) -> PeakRequirement {
    let mut peak_quantity = 0;
    let mut exclusive_quantity = 0;
    let mut shared_quantity = 0;
    let mut window_peaks = Vec::with_capacity(records.len());

    for (i, anchor) in records.iter().enumerate() {
        let mut exclusive_sum = 0u32;
        let mut shared_max = 0u32;
        let mut any_exclusive = false;
        for (j, other) in records.iter().enumerate() {
            // The anchor always belongs to its own concurrent set, even
            // when its window is invalid and pairs with nothing.
            if i != j && !anchor.window.shares_equipment(&other.window) {
                continue;
            }
            if other.exclusive {
                exclusive_sum += other.quantity;
                any_exclusive = true;
            } else {
                shared_max = shared_max.max(other.quantity);
            }
        }
        // Exclusive blocks cannot be time-shared with general-use
        // stock; otherwise non-exclusive gear is handed off between
        // adjacent shows, so the largest single need suffices.
        let shared_contribution = if any_exclusive { 0 } else { shared_max };
        let window_peak = exclusive_sum + shared_contribution;
        window_peaks.push(window_peak);

        peak_quantity = peak_quantity.max(window_peak);
        exclusive_quantity = exclusive_quantity.max(exclusive_sum);
        shared_quantity = shared_quantity.max(shared_contribution);
    }

    let mut stages: BTreeMap<u32, (u32, bool, BTreeSet<String>)> = BTreeMap::new();
    for (record, window_peak) in records.iter().zip(&window_peaks) {
        let entry = stages.entry(record.stage).or_default();
        entry.0 = entry.0.max(*window_peak);
        entry.1 |= record.exclusive;
        entry.2.insert(record.artist.clone());
    }
    let stage_breakdown = stages
        .into_iter()
        .map(|(stage, (quantity, is_exclusive, artists))| StageBreakdown {
            stage,
            quantity,
            is_exclusive,
            artists: artists.into_iter().collect(),
        })
        .collect();

    PeakRequirement {
        model,
        category,
        peak_quantity,
        exclusive_quantity,
        shared_quantity,
        stage_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirement::{MonitorRequest, WiredMicRequest};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 18).unwrap()
    }

    fn performer(
        name: &str,
        stage: u32,
        start_min: i32,
        end_min: i32,
        mics: Vec<WiredMicRequest>,
    ) -> ArtistRequirement {
        ArtistRequirement {
            artist: name.to_string(),
            stage,
            window: ScheduleWindow::from_minutes(date(), start_min, end_min),
            wired_mics: mics,
            ..Default::default()
        }
    }

    fn mic(model: &str, quantity: u32, exclusive: bool) -> WiredMicRequest {
        WiredMicRequest {
            model: model.to_string(),
            quantity,
            exclusive_use: exclusive,
            provider: ProviderMode::Festival,
        }
    }

    fn sm58_peak(artists: &[ArtistRequirement]) -> PeakRequirement {
        let peaks = aggregate(artists, EquipmentCategory::WiredMic);
        assert_eq!(peaks.len(), 1);
        peaks.into_iter().next().unwrap()
    }

    #[test]
    fn far_apart_windows_are_independent() {
        // Gap of 60 minutes: windows do not contend, each keeps its own
        // peak; the model peak is the larger of the two, not the sum.
        let artists = vec![
            performer("Early", 1, 1200, 1260, vec![mic("Shure SM58", 2, false)]),
            performer("Late", 1, 1320, 1380, vec![mic("Shure SM58", 3, false)]),
        ];
        let peak = sm58_peak(&artists);
        assert_eq!(peak.peak_quantity, 3);
        assert_eq!(peak.shared_quantity, 3);
        assert_eq!(peak.exclusive_quantity, 0);
    }

    #[test]
    fn overlapping_shared_takes_max_not_sum() {
        let artists = vec![
            performer("A", 1, 1200, 1260, vec![mic("Shure SM58", 2, false)]),
            performer("B", 1, 1230, 1290, vec![mic("Shure SM58", 3, false)]),
        ];
        let peak = sm58_peak(&artists);
        assert_eq!(peak.peak_quantity, 3);
        assert_eq!(peak.shared_quantity, 3);
        assert_eq!(peak.exclusive_quantity, 0);
    }

    #[test]
    fn consecutive_shows_contend_like_overlaps() {
        // 20-minute gap: gear cannot be reallocated in time, so both
        // exclusive reservations stack.
        let artists = vec![
            performer("A", 1, 1200, 1260, vec![mic("Shure SM58", 2, true)]),
            performer("B", 1, 1280, 1340, vec![mic("Shure SM58", 3, true)]),
        ];
        assert_eq!(sm58_peak(&artists).peak_quantity, 5);

        // 31-minute gap: independent again.
        let artists = vec![
            performer("A", 1, 1200, 1260, vec![mic("Shure SM58", 2, true)]),
            performer("B", 1, 1291, 1350, vec![mic("Shure SM58", 3, true)]),
        ];
        assert_eq!(sm58_peak(&artists).peak_quantity, 3);
        assert_eq!(sm58_peak(&artists).exclusive_quantity, 3);
    }

    #[test]
    fn exclusive_blocks_shared_entirely() {
        let artists = vec![
            performer("Reserved", 1, 1200, 1260, vec![mic("Shure SM58", 2, true)]),
            performer("Walk-on", 1, 1230, 1290, vec![mic("Shure SM58", 3, false)]),
        ];
        let peak = sm58_peak(&artists);
        assert_eq!(peak.exclusive_quantity, 2);
        assert_eq!(peak.shared_quantity, 0);
        assert_eq!(peak.peak_quantity, 2);
    }

    #[test]
    fn overlapping_exclusives_sum() {
        let artists = vec![
            performer("A", 1, 1200, 1260, vec![mic("Shure SM58", 2, true)]),
            performer("B", 1, 1230, 1290, vec![mic("Shure SM58", 3, true)]),
        ];
        let peak = sm58_peak(&artists);
        assert_eq!(peak.peak_quantity, 5);
        assert_eq!(peak.exclusive_quantity, 5);
        assert_eq!(peak.shared_quantity, 0);
    }

    #[test]
    fn result_is_independent_of_input_order() {
        let a = performer("A", 1, 1200, 1260, vec![mic("Shure SM58", 2, true)]);
        let b = performer("B", 2, 1230, 1290, vec![mic("shure sm58", 3, false)]);
        let c = performer("C", 1, 1400, 1460, vec![mic("SHURE SM58", 4, false)]);

        let forward = aggregate(
            &[a.clone(), b.clone(), c.clone()],
            EquipmentCategory::WiredMic,
        );
        let reverse = aggregate(&[c, b, a], EquipmentCategory::WiredMic);
        assert_eq!(forward, reverse);
    }

    #[test]
    fn model_keying_is_case_insensitive() {
        let artists = vec![
            performer("A", 1, 1200, 1260, vec![mic("shure sm58", 2, false)]),
            performer("B", 1, 1230, 1290, vec![mic("Shure SM58", 3, false)]),
        ];
        let peaks = aggregate(&artists, EquipmentCategory::WiredMic);
        assert_eq!(peaks.len(), 1);
        // Lexicographically smallest spelling wins the display slot.
        assert_eq!(peaks[0].model, "Shure SM58");
    }

    #[test]
    fn adding_shared_usage_never_decreases_peaks() {
        let mut artists = vec![
            performer("A", 1, 1200, 1260, vec![mic("Shure SM58", 2, false)]),
            performer("B", 1, 1230, 1290, vec![mic("Shure SM58", 3, false)]),
        ];
        let before = sm58_peak(&artists);
        artists.push(performer(
            "C",
            2,
            1250,
            1310,
            vec![mic("Shure SM58", 1, false)],
        ));
        let after = sm58_peak(&artists);
        assert!(after.peak_quantity >= before.peak_quantity);
        assert!(after.exclusive_quantity >= before.exclusive_quantity);
        assert!(after.shared_quantity >= before.shared_quantity);
    }

    #[test]
    fn adding_exclusive_usage_never_decreases_exclusive_peak() {
        let mut artists = vec![performer(
            "A",
            1,
            1200,
            1260,
            vec![mic("Shure SM58", 2, true)],
        )];
        let before = sm58_peak(&artists);
        artists.push(performer(
            "B",
            1,
            1230,
            1290,
            vec![mic("Shure SM58", 3, true)],
        ));
        let after = sm58_peak(&artists);
        assert!(after.peak_quantity >= before.peak_quantity);
        assert!(after.exclusive_quantity >= before.exclusive_quantity);
    }

    #[test]
    fn band_provided_lines_are_excluded() {
        let artists = vec![
            performer("A", 1, 1200, 1260, vec![mic("Shure SM58", 2, false)]),
            performer(
                "B",
                1,
                1230,
                1290,
                vec![WiredMicRequest {
                    provider: ProviderMode::Band,
                    ..mic("Shure SM58", 30, false)
                }],
            ),
        ];
        let peak = sm58_peak(&artists);
        assert_eq!(peak.peak_quantity, 2);
        assert_eq!(peak.stage_breakdown[0].artists, vec!["A".to_string()]);
    }

    #[test]
    fn invalid_window_still_counts_its_own_demand() {
        let mut orphan = performer("Unscheduled", 1, 0, 0, vec![mic("Shure SM58", 4, false)]);
        orphan.window = ScheduleWindow::unscheduled();
        let artists = vec![
            orphan,
            performer("A", 1, 1200, 1260, vec![mic("Shure SM58", 2, false)]),
        ];
        let peak = sm58_peak(&artists);
        // The invalid window pairs with nothing but still anchors its
        // own singleton set.
        assert_eq!(peak.peak_quantity, 4);
    }

    #[test]
    fn stage_breakdown_traces_contributors() {
        let artists = vec![
            performer("A", 1, 1200, 1260, vec![mic("Shure SM58", 2, true)]),
            performer("B", 2, 1230, 1290, vec![mic("Shure SM58", 3, false)]),
        ];
        let peak = sm58_peak(&artists);
        assert_eq!(peak.stage_breakdown.len(), 2);
        let stage1 = &peak.stage_breakdown[0];
        assert_eq!(stage1.stage, 1);
        assert!(stage1.is_exclusive);
        assert_eq!(stage1.artists, vec!["A".to_string()]);
        let stage2 = &peak.stage_breakdown[1];
        assert!(!stage2.is_exclusive);
        assert_eq!(stage2.artists, vec!["B".to_string()]);
    }

    #[test]
    fn extras_never_aggregate() {
        let artists = vec![performer("A", 1, 1200, 1260, vec![])];
        assert!(aggregate(&artists, EquipmentCategory::ExtraDjbooth).is_empty());
    }

    #[test]
    fn monitors_aggregate_under_category_label() {
        let mut a = performer("A", 1, 1200, 1260, vec![]);
        a.monitors = MonitorRequest {
            enabled: true,
            quantity: 6,
        };
        let mut b = performer("B", 1, 1230, 1290, vec![]);
        b.monitors = MonitorRequest {
            enabled: true,
            quantity: 4,
        };
        let peaks = aggregate(&[a, b], EquipmentCategory::Monitor);
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].model, "monitor wedge");
        assert_eq!(peaks[0].peak_quantity, 6);
    }

    #[test]
    fn aggregate_all_covers_every_aggregatable_category() {
        let mut a = performer("A", 1, 1200, 1260, vec![mic("Shure SM58", 2, false)]);
        a.monitors = MonitorRequest {
            enabled: true,
            quantity: 4,
        };
        a.infra.analog_lines = 12;
        let peaks = aggregate_all(&[a]);
        let categories: Vec<_> = peaks.iter().map(|p| p.category).collect();
        assert_eq!(
            categories,
            vec![
                EquipmentCategory::WiredMic,
                EquipmentCategory::Monitor,
                EquipmentCategory::InfraAnalog
            ]
        );
    }
}

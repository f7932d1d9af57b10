//! Requirement comparator.
//!
//! Checks one artist's requested equipment against an inventory
//! snapshot and produces severity-tagged mismatches. The comparator
//! never fails: business findings are data, not errors, and callers
//! decide how to react (block on `Error`, merely display `Warning`).
//!
//! Categories are checked in a fixed order (consoles, wireless, IEM,
//! wired mics, monitors, extras, infrastructure) so output ordering is
//! deterministic for identical inputs.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::category::{EquipmentCategory, ProviderMode};
use crate::inventory::InventorySnapshot;
use crate::requirement::{ArtistRequirement, CableRequest, ConsoleRequest};

/// Mismatch severity. Errors block a booking; warnings are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One finding from the comparison. Pure output value, never mutated
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub category: EquipmentCategory,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub artist: String,
}

/// Result of comparing one artist against the snapshot.
///
/// `has_conflicts` counts warnings as well as errors; callers filter
/// by severity as needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub mismatches: Vec<Mismatch>,
    pub has_conflicts: bool,
}

impl ComparisonReport {
    /// Mismatches of `Error` severity only.
    pub fn errors(&self) -> impl Iterator<Item = &Mismatch> {
        self.mismatches
            .iter()
            .filter(|m| m.severity == Severity::Error)
    }
}

/// Compares one artist's requirements against the inventory snapshot.
///
/// Absent model strings skip their category entirely; absent numeric
/// fields were already defaulted to zero at the boundary.
#[must_use]
pub fn compare(artist: &ArtistRequirement, inventory: &InventorySnapshot) -> ComparisonReport {
    let mut ctx = Checker {
        artist: &artist.artist,
        inventory,
        out: Vec::new(),
    };

    ctx.check_console(EquipmentCategory::ConsoleFoh, &artist.foh_console);
    ctx.check_console(EquipmentCategory::ConsoleMon, &artist.mon_console);
    ctx.check_wireless(artist);
    ctx.check_iem(artist);
    ctx.check_wired_mics(artist);
    ctx.check_monitors(artist);
    ctx.check_extras(artist);
    ctx.check_infrastructure(artist);

    let has_conflicts = !ctx.out.is_empty();
    tracing::debug!(
        artist = %artist.artist,
        mismatches = ctx.out.len(),
        "requirement comparison complete"
    );
    ComparisonReport {
        mismatches: ctx.out,
        has_conflicts,
    }
}

/// Runs the comparator once per artist in parallel. Each comparison is
/// independent and side-effect-free; output order matches input order.
#[must_use]
pub fn compare_all(
    artists: &[ArtistRequirement],
    inventory: &InventorySnapshot,
) -> Vec<ComparisonReport> {
    artists
        .par_iter()
        .map(|artist| compare(artist, inventory))
        .collect()
}

struct Checker<'a> {
    artist: &'a str,
    inventory: &'a InventorySnapshot,
    out: Vec<Mismatch>,
}

impl Checker<'_> {
    fn push(
        &mut self,
        category: EquipmentCategory,
        severity: Severity,
        message: String,
        details: Option<String>,
    ) {
        self.out.push(Mismatch {
            category,
            severity,
            message,
            details,
            artist: self.artist.to_string(),
        });
    }

    fn band_warning(&mut self, category: EquipmentCategory, what: &str) {
        self.push(
            category,
            Severity::Warning,
            format!("Band is bringing their own {what}"),
            None,
        );
    }

    fn mixed_warning(&mut self, category: EquipmentCategory, what: &str) {
        self.push(
            category,
            Severity::Warning,
            format!("Mixed festival/band supply for {what}"),
            None,
        );
    }

    /// Details string listing everything stocked for a category.
    fn availability(&self, category: EquipmentCategory) -> String {
        let names = self.inventory.model_names(category);
        if names.is_empty() {
            "Available: None".to_string()
        } else {
            format!("Available: {}", names.join(", "))
        }
    }

    fn model_unavailable(&mut self, category: EquipmentCategory, model: &str) {
        let details = self.availability(category);
        self.push(
            category,
            Severity::Error,
            format!("{model} not available"),
            Some(details),
        );
    }

    fn short_stock(
        &mut self,
        category: EquipmentCategory,
        subject: &str,
        requested: u32,
        available: u32,
    ) {
        self.push(
            category,
            Severity::Error,
            format!("{subject}: {requested} requested, {available} available"),
            None,
        );
    }

    fn check_console(&mut self, category: EquipmentCategory, request: &ConsoleRequest) {
        let Some(model) = request.model.as_deref().filter(|m| !m.trim().is_empty()) else {
            return;
        };
        if request.provider == ProviderMode::Band {
            self.band_warning(category, category.label());
            return;
        }
        match self.inventory.find_model(category, model) {
            None => self.model_unavailable(category, model),
            Some(stocked) if stocked.quantity < 1 => {
                self.short_stock(category, model, 1, stocked.quantity);
            }
            Some(_) => {}
        }
        if request.provider == ProviderMode::Mixed {
            self.mixed_warning(category, category.label());
        }
    }

    fn check_wireless(&mut self, artist: &ArtistRequirement) {
        let category = EquipmentCategory::Wireless;
        let mut band_noted = false;
        let mut mixed = false;
        for request in &artist.wireless {
            if request.model.trim().is_empty() {
                continue;
            }
            if request.provider == ProviderMode::Band {
                if !band_noted {
                    self.band_warning(category, "wireless systems");
                    band_noted = true;
                }
                continue;
            }
            match self.inventory.find_model(category, &request.model) {
                None => self.model_unavailable(category, &request.model),
                Some(stocked) => {
                    // Two independent sub-checks, each can produce its
                    // own error.
                    let available = stocked.quantity;
                    if request.handheld_qty > available {
                        let subject = format!("{} handhelds", request.model);
                        self.short_stock(category, &subject, request.handheld_qty, available);
                    }
                    if request.bodypack_qty > available {
                        let subject = format!("{} bodypacks", request.model);
                        self.short_stock(category, &subject, request.bodypack_qty, available);
                    }
                }
            }
            mixed |= request.provider == ProviderMode::Mixed;
        }
        if mixed {
            self.mixed_warning(category, "wireless systems");
        }
    }

    fn check_iem(&mut self, artist: &ArtistRequirement) {
        let category = EquipmentCategory::Iem;
        let mut band_noted = false;
        let mut mixed = false;
        for request in &artist.iem {
            if request.model.trim().is_empty() {
                continue;
            }
            if request.provider == ProviderMode::Band {
                if !band_noted {
                    self.band_warning(category, "IEM systems");
                    band_noted = true;
                }
                continue;
            }
            match self.inventory.find_model(category, &request.model) {
                None => self.model_unavailable(category, &request.model),
                Some(stocked) => {
                    let available = stocked.quantity;
                    if request.channel_qty > available {
                        let subject = format!("{} channels", request.model);
                        self.short_stock(category, &subject, request.channel_qty, available);
                    }
                    if request.bodypack_qty > available {
                        let subject = format!("{} bodypacks", request.model);
                        self.short_stock(category, &subject, request.bodypack_qty, available);
                    }
                }
            }
            mixed |= request.provider == ProviderMode::Mixed;
        }
        if mixed {
            self.mixed_warning(category, "IEM systems");
        }
    }

    fn check_wired_mics(&mut self, artist: &ArtistRequirement) {
        let category = EquipmentCategory::WiredMic;
        let mut band_noted = false;
        let mut mixed = false;
        for request in &artist.wired_mics {
            if request.model.trim().is_empty() {
                continue;
            }
            if request.provider == ProviderMode::Band {
                if !band_noted {
                    self.band_warning(category, "wired microphones");
                    band_noted = true;
                }
                continue;
            }
            match self.inventory.find_model(category, &request.model) {
                None => self.model_unavailable(category, &request.model),
                Some(stocked) if request.quantity > stocked.quantity => {
                    let available = stocked.quantity;
                    let model = request.model.clone();
                    self.short_stock(category, &model, request.quantity, available);
                }
                Some(_) => {}
            }
            mixed |= request.provider == ProviderMode::Mixed;
        }
        if mixed {
            self.mixed_warning(category, "wired microphones");
        }
    }

    fn check_monitors(&mut self, artist: &ArtistRequirement) {
        let request = artist.monitors;
        if !request.enabled {
            return;
        }
        let available = self.inventory.monitors;
        if request.quantity > available {
            self.short_stock(
                EquipmentCategory::Monitor,
                "Monitor wedges",
                request.quantity,
                available,
            );
        }
    }

    fn check_extras(&mut self, artist: &ArtistRequirement) {
        // Extras are physical stage fixtures, not bookable counts, so a
        // missing one is advisory only.
        let wanted = [
            (EquipmentCategory::ExtraSidefill, artist.extras.side_fill),
            (EquipmentCategory::ExtraDrumfill, artist.extras.drum_fill),
            (EquipmentCategory::ExtraDjbooth, artist.extras.dj_booth),
        ];
        for (category, requested) in wanted {
            if requested && self.inventory.extra_available(category) != Some(true) {
                self.push(
                    category,
                    Severity::Warning,
                    format!("{} requested but not available at this stage", category.label()),
                    None,
                );
            }
        }
    }

    fn check_infrastructure(&mut self, artist: &ArtistRequirement) {
        let infra = &artist.infra;
        let runs = [
            (EquipmentCategory::InfraCat6, infra.cat6),
            (EquipmentCategory::InfraHma, infra.hma),
            (EquipmentCategory::InfraCoax, infra.coax),
            (EquipmentCategory::InfraOpticalconDuo, infra.opticalcon_duo),
            (
                EquipmentCategory::InfraAnalog,
                CableRequest {
                    enabled: infra.analog_lines > 0,
                    quantity: infra.analog_lines,
                },
            ),
        ];
        let Some(tag) = runs
            .iter()
            .find(|(_, run)| run.enabled)
            .map(|(category, _)| *category)
        else {
            return;
        };
        if infra.provider == ProviderMode::Band {
            self.band_warning(tag, "stage infrastructure");
            return;
        }
        for (category, run) in runs {
            if !run.enabled {
                continue;
            }
            let available = self.inventory.quantity_ceiling(category).unwrap_or(0);
            if run.quantity > available {
                let subject = format!("{}s", category.label());
                self.short_stock(category, &subject, run.quantity, available);
            }
        }
        if infra.provider == ProviderMode::Mixed {
            self.mixed_warning(tag, "stage infrastructure");
        }
    }
}

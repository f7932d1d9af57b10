//! Strongly typed artist requirement model.
//!
//! These types are constructed at the system boundary (see
//! `rider-ingest`) from loosely-typed rows; the engine never sees raw
//! data. Every numeric field defaults to zero and every flag to false,
//! so a sparse row degrades instead of failing.

use serde::{Deserialize, Serialize};

use crate::category::ProviderMode;
use crate::schedule::ScheduleWindow;

/// A requested mixing console (FOH or monitor position).
///
/// `model: None` means the console was not requested at all; no
/// mismatch is emitted for "not requested".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleRequest {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub provider: ProviderMode,
}

/// One wireless microphone system line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirelessRequest {
    pub model: String,
    #[serde(default)]
    pub handheld_qty: u32,
    #[serde(default)]
    pub bodypack_qty: u32,
    #[serde(default)]
    pub provider: ProviderMode,
}

/// One in-ear monitoring system line. IEM counts transmit channels
/// where wireless counts handhelds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IemRequest {
    pub model: String,
    #[serde(default)]
    pub channel_qty: u32,
    #[serde(default)]
    pub bodypack_qty: u32,
    #[serde(default)]
    pub provider: ProviderMode,
}

/// One wired microphone line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiredMicRequest {
    pub model: String,
    #[serde(default)]
    pub quantity: u32,
    /// Reserved solely for this artist's window; cannot be counted
    /// toward another artist's concurrent shared need.
    #[serde(default)]
    pub exclusive_use: bool,
    #[serde(default)]
    pub provider: ProviderMode,
}

/// Monitor wedge request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorRequest {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub quantity: u32,
}

/// One infrastructure cabling run type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CableRequest {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub quantity: u32,
}

/// Infrastructure cabling requests plus a bare analog-line count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfrastructureRequest {
    #[serde(default)]
    pub cat6: CableRequest,
    #[serde(default)]
    pub hma: CableRequest,
    #[serde(default)]
    pub coax: CableRequest,
    #[serde(default)]
    pub opticalcon_duo: CableRequest,
    #[serde(default)]
    pub analog_lines: u32,
    #[serde(default)]
    pub provider: ProviderMode,
}

/// Stage extras; physical fixtures checked against inventory booleans,
/// never quantities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageExtras {
    #[serde(default)]
    pub side_fill: bool,
    #[serde(default)]
    pub drum_fill: bool,
    #[serde(default)]
    pub dj_booth: bool,
}

/// One artist's complete technical requirements for a performance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistRequirement {
    pub artist: String,
    #[serde(default)]
    pub stage: u32,
    #[serde(default = "ScheduleWindow::unscheduled")]
    pub window: ScheduleWindow,
    #[serde(default)]
    pub foh_console: ConsoleRequest,
    #[serde(default)]
    pub mon_console: ConsoleRequest,
    #[serde(default)]
    pub wireless: Vec<WirelessRequest>,
    #[serde(default)]
    pub iem: Vec<IemRequest>,
    #[serde(default)]
    pub wired_mics: Vec<WiredMicRequest>,
    #[serde(default)]
    pub monitors: MonitorRequest,
    #[serde(default)]
    pub infra: InfrastructureRequest,
    #[serde(default)]
    pub extras: StageExtras,
}

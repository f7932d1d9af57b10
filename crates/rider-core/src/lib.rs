//! Equipment reconciliation and peak-demand engine.
//!
//! Given artist performances sharing a stage and day, each with a
//! time-boxed schedule and per-category equipment requests, this crate
//! answers two questions:
//! - is each artist's requested gear satisfiable against an inventory
//!   snapshot (severity-tagged mismatches), and
//! - what is the true peak simultaneous demand per equipment model,
//!   accounting for window overlap, consecutive shows and
//!   exclusive-use reservations.
//!
//! Everything here is synchronous, pure computation over in-memory
//! values: results are recomputed per invocation and never persisted,
//! and identical inputs always yield identical, order-stable outputs.

pub mod category;
pub mod compare;
pub mod inventory;
pub mod needs;
pub mod peak;
pub mod requirement;
pub mod schedule;

pub use category::{EquipmentCategory, ProviderMode, UnknownCategory};
pub use compare::{ComparisonReport, Mismatch, Severity, compare, compare_all};
pub use inventory::{InventorySnapshot, StockedModel};
pub use needs::{EquipmentNeedsEntry, ExtrasShortfall, summarize, summarize_extras};
pub use peak::{PeakRequirement, StageBreakdown, UsageRecord, aggregate, aggregate_all};
pub use requirement::{
    ArtistRequirement, CableRequest, ConsoleRequest, IemRequest, InfrastructureRequest,
    MonitorRequest, StageExtras, WiredMicRequest, WirelessRequest,
};
pub use schedule::{CONSECUTIVE_GAP_MIN, SchedulePolicy, ScheduleWindow};

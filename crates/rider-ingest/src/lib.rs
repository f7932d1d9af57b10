//! System boundary for the reconciliation engine.
//!
//! The surrounding system hands us loosely-typed rows: nullable
//! columns, numbers that are sometimes strings, and nested arrays
//! (wireless systems, wired mics) stored as JSON-encoded text blobs.
//! Everything is parsed and defaulted *here*, before it enters the
//! engine — the core never sees raw shapes.
//!
//! Degradation rules: missing or malformed numerics become 0, booleans
//! become false, absent model strings mean "not requested", and a
//! garbled nested blob becomes an empty list. The only hard failures
//! are structural: a row that is not an object, or a schedule date
//! that is present but unparseable.

use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;
use thiserror::Error;

use rider_core::{
    ArtistRequirement, CableRequest, ConsoleRequest, IemRequest, InfrastructureRequest,
    InventorySnapshot, MonitorRequest, ProviderMode, SchedulePolicy, ScheduleWindow, StageExtras,
    StockedModel, WiredMicRequest, WirelessRequest,
};

/// Boundary parsing errors. Business-level findings are never errors;
/// these cover caller contract violations only.
#[derive(Debug, Error)]
pub enum RowError {
    /// A row was not a JSON object.
    #[error("row for {context} is not a JSON object")]
    NotAnObject { context: String },
    /// A schedule date was present but unparseable.
    #[error("invalid schedule date for {artist}: {date}")]
    DateParse {
        artist: String,
        date: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Parses one artist requirement row.
pub fn artist_from_row(
    row: &Value,
    policy: &SchedulePolicy,
) -> Result<ArtistRequirement, RowError> {
    let Some(obj) = row.as_object() else {
        return Err(RowError::NotAnObject {
            context: "artist requirement".to_string(),
        });
    };
    let artist = str_field(row, "artist_name")
        .or_else(|| str_field(row, "artist"))
        .unwrap_or_default()
        .to_string();

    let window = parse_window(row, &artist, policy)?;
    tracing::trace!(artist = %artist, fields = obj.len(), "parsed artist row");

    Ok(ArtistRequirement {
        artist,
        stage: u32_field(row, "stage"),
        window,
        foh_console: console_field(row, "foh_console_model", "foh_console_provider"),
        mon_console: console_field(row, "mon_console_model", "mon_console_provider"),
        wireless: json_blob(row, "wireless_systems")
            .iter()
            .filter_map(wireless_from_value)
            .collect(),
        iem: json_blob(row, "iem_systems")
            .iter()
            .filter_map(iem_from_value)
            .collect(),
        wired_mics: json_blob(row, "wired_mics")
            .iter()
            .filter_map(wired_mic_from_value)
            .collect(),
        monitors: MonitorRequest {
            enabled: bool_field(row, "monitors_enabled"),
            quantity: u32_field(row, "monitors_qty"),
        },
        infra: InfrastructureRequest {
            cat6: cable_field(row, "cat6_enabled", "cat6_qty"),
            hma: cable_field(row, "hma_enabled", "hma_qty"),
            coax: cable_field(row, "coax_enabled", "coax_qty"),
            opticalcon_duo: cable_field(row, "opticalcon_duo_enabled", "opticalcon_duo_qty"),
            analog_lines: u32_field(row, "analog_lines"),
            provider: provider_field(row, "infra_provider"),
        },
        extras: StageExtras {
            side_fill: bool_field(row, "side_fill"),
            drum_fill: bool_field(row, "drum_fill"),
            dj_booth: bool_field(row, "dj_booth"),
        },
    })
}

/// Parses a batch of artist rows, preserving order.
pub fn artists_from_rows(
    rows: &[Value],
    policy: &SchedulePolicy,
) -> Result<Vec<ArtistRequirement>, RowError> {
    rows.iter()
        .map(|row| artist_from_row(row, policy))
        .collect()
}

/// Parses one loosely-typed inventory row.
pub fn inventory_from_row(row: &Value) -> Result<InventorySnapshot, RowError> {
    if !row.is_object() {
        return Err(RowError::NotAnObject {
            context: "inventory".to_string(),
        });
    }
    Ok(InventorySnapshot {
        foh_consoles: stock_list(row, "foh_consoles"),
        mon_consoles: stock_list(row, "mon_consoles"),
        wireless: stock_list(row, "wireless"),
        iem: stock_list(row, "iem"),
        wired_mics: stock_list(row, "wired_mics"),
        monitors: u32_field(row, "monitors"),
        cat6_runs: u32_field(row, "cat6_runs"),
        hma_runs: u32_field(row, "hma_runs"),
        coax_runs: u32_field(row, "coax_runs"),
        opticalcon_duo_runs: u32_field(row, "opticalcon_duo_runs"),
        analog_lines: u32_field(row, "analog_lines"),
        side_fill: bool_field(row, "side_fill"),
        drum_fill: bool_field(row, "drum_fill"),
        dj_booth: bool_field(row, "dj_booth"),
    })
}

/// Resolves the snapshot for a stage/day: the stage-specific override
/// wins over the global default; with neither, everything is empty.
#[must_use]
pub fn resolve_inventory(
    stage_override: Option<InventorySnapshot>,
    global: Option<InventorySnapshot>,
) -> InventorySnapshot {
    stage_override
        .or(global)
        .unwrap_or_else(InventorySnapshot::empty)
}

fn parse_window(
    row: &Value,
    artist: &str,
    policy: &SchedulePolicy,
) -> Result<ScheduleWindow, RowError> {
    let Some(date_str) = str_field(row, "date") else {
        // No date at all: the row is unscheduled, not broken.
        return Ok(ScheduleWindow::unscheduled());
    };
    let date =
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|source| RowError::DateParse {
            artist: artist.to_string(),
            date: date_str.to_string(),
            source,
        })?;
    let start = time_field(row, "start_time");
    let end = time_field(row, "end_time");
    Ok(ScheduleWindow::new(date, start, end, policy))
}

/// Times degrade to midnight, which yields an invalid window that is
/// excluded from peak comparisons rather than raising.
fn time_field(row: &Value, key: &str) -> NaiveTime {
    str_field(row, key)
        .and_then(|s| {
            NaiveTime::parse_from_str(s, "%H:%M")
                .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
                .ok()
        })
        .unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default())
}

fn str_field<'a>(row: &'a Value, key: &str) -> Option<&'a str> {
    row.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Numbers arrive as JSON numbers or as strings; both are accepted,
/// anything else is zero.
fn u32_field(row: &Value, key: &str) -> u32 {
    match row.get(key) {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()).unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn bool_field(row: &Value, key: &str) -> bool {
    match row.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_i64().is_some_and(|v| v != 0),
        _ => false,
    }
}

fn provider_field(row: &Value, key: &str) -> ProviderMode {
    str_field(row, key)
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

fn console_field(row: &Value, model_key: &str, provider_key: &str) -> ConsoleRequest {
    ConsoleRequest {
        model: str_field(row, model_key).map(String::from),
        provider: provider_field(row, provider_key),
    }
}

fn cable_field(row: &Value, enabled_key: &str, qty_key: &str) -> CableRequest {
    CableRequest {
        enabled: bool_field(row, enabled_key),
        quantity: u32_field(row, qty_key),
    }
}

/// Nested arrays are stored either inline or as JSON-encoded text; a
/// blob that fails to parse degrades to no entries.
fn json_blob(row: &Value, key: &str) -> Vec<Value> {
    match row.get(key) {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::String(blob)) => serde_json::from_str::<Value>(blob)
            .ok()
            .and_then(|parsed| parsed.as_array().cloned())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn wireless_from_value(value: &Value) -> Option<WirelessRequest> {
    let model = str_field(value, "model")?.to_string();
    Some(WirelessRequest {
        model,
        handheld_qty: u32_field(value, "handheld_qty"),
        bodypack_qty: u32_field(value, "bodypack_qty"),
        provider: provider_field(value, "provider"),
    })
}

fn iem_from_value(value: &Value) -> Option<IemRequest> {
    let model = str_field(value, "model")?.to_string();
    Some(IemRequest {
        model,
        channel_qty: u32_field(value, "channel_qty"),
        bodypack_qty: u32_field(value, "bodypack_qty"),
        provider: provider_field(value, "provider"),
    })
}

fn wired_mic_from_value(value: &Value) -> Option<WiredMicRequest> {
    let model = str_field(value, "model")?.to_string();
    Some(WiredMicRequest {
        model,
        quantity: u32_field(value, "quantity"),
        exclusive_use: bool_field(value, "exclusive_use"),
        provider: provider_field(value, "provider"),
    })
}

fn stock_list(row: &Value, key: &str) -> Vec<StockedModel> {
    json_blob(row, key)
        .iter()
        .filter_map(|value| {
            let model = str_field(value, "model")?.to_string();
            Some(StockedModel {
                model,
                quantity: u32_field(value, "quantity"),
            })
        })
        .collect()
}

//! Schedule window model.
//!
//! Performance times are normalized onto a minute-of-festival-day scale
//! before any comparison: times in the early-morning rollover band
//! (00:00 up to the policy cutoff) are shifted +1440 minutes so they
//! sort after the prior evening's shows. Normalization happens exactly
//! once, at [`ScheduleWindow`] construction.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Minutes in one calendar day.
const DAY_MIN: i32 = 1440;

/// Maximum gap between two shows where gear cannot realistically be
/// reallocated between them. Fixed policy constant, not configurable
/// per call.
pub const CONSECUTIVE_GAP_MIN: i32 = 30;

/// Normalization policy for the festival-day convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePolicy {
    /// Minute-of-day below which times belong to the prior festival day
    /// and are shifted +1440. Default: 420 (00:00-06:59 roll over).
    pub day_rollover_min: i32,
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        Self {
            day_rollover_min: 7 * 60,
        }
    }
}

impl SchedulePolicy {
    /// Maps a wall-clock time onto the festival-day minute scale.
    #[must_use]
    pub fn normalize(&self, time: NaiveTime) -> i32 {
        let minute = i32::try_from(time.hour() * 60 + time.minute()).unwrap_or(0);
        if minute < self.day_rollover_min {
            minute + DAY_MIN
        } else {
            minute
        }
    }
}

/// A performance's time boundaries on one festival day.
///
/// `start_min` and `end_min` are already-normalized festival-day
/// minutes (0..2880). A window with `start_min >= end_min` is invalid:
/// it is excluded from peak comparisons rather than treated as an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWindow {
    pub date: NaiveDate,
    pub start_min: i32,
    pub end_min: i32,
}

impl ScheduleWindow {
    /// Builds a window from wall-clock times, applying the festival-day
    /// normalization.
    #[must_use]
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime, policy: &SchedulePolicy) -> Self {
        Self {
            date,
            start_min: policy.normalize(start),
            end_min: policy.normalize(end),
        }
    }

    /// Builds a window from already-normalized festival-day minutes.
    #[must_use]
    pub const fn from_minutes(date: NaiveDate, start_min: i32, end_min: i32) -> Self {
        Self {
            date,
            start_min,
            end_min,
        }
    }

    /// Placeholder for rows with no usable schedule. Zero-length, so
    /// it is invalid and excluded from peak comparisons.
    #[must_use]
    pub fn unscheduled() -> Self {
        Self {
            date: NaiveDate::default(),
            start_min: 0,
            end_min: 0,
        }
    }

    /// A window must start before it ends once normalized.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.start_min < self.end_min
    }

    /// Half-open interval intersection on the normalized scale.
    ///
    /// Windows on different festival days never overlap; each stage/day
    /// is reconciled independently.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.is_valid()
            && other.is_valid()
            && self.date == other.date
            && self.start_min < other.end_min
            && other.start_min < self.end_min
    }

    /// True when the signed gap between one window's end and the
    /// other's start is > 0 and <= [`CONSECUTIVE_GAP_MIN`], in either
    /// direction.
    #[must_use]
    pub fn is_consecutive(&self, other: &Self) -> bool {
        if !self.is_valid() || !other.is_valid() || self.date != other.date {
            return false;
        }
        let forward = other.start_min - self.end_min;
        let backward = self.start_min - other.end_min;
        (forward > 0 && forward <= CONSECUTIVE_GAP_MIN)
            || (backward > 0 && backward <= CONSECUTIVE_GAP_MIN)
    }

    /// The adjacency unit used by the peak aggregator: two performances
    /// contend for the same physical equipment when they overlap or
    /// run back-to-back.
    #[must_use]
    pub fn shares_equipment(&self, other: &Self) -> bool {
        self.overlaps(other) || self.is_consecutive(other)
    }
}

impl Default for ScheduleWindow {
    fn default() -> Self {
        Self::unscheduled()
    }
}

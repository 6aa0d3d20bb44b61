//! Collapse query results into the `-1` convention used by C callers.
//!
//! These are the only functions that discard the error cause.

use crate::error::{DisplayError, DisplayResult};
use crate::geometry::Resolution;
use crate::subsystem::DisplaySubsystem;
use tracing::debug;

/// Failure value for counts and indices.
pub const SENTINEL: i32 = -1;

/// Failure value for resolutions.
pub const SENTINEL_RESOLUTION: (i32, i32) = (SENTINEL, SENTINEL);

/// `get_display_count`: a count `>= 0`, or `-1`.
pub fn display_count(subsystem: &dyn DisplaySubsystem) -> i32 {
    match subsystem.count() {
        Ok(count) => clamp(count),
        Err(err) => {
            debug!(backend = subsystem.backend(), %err, "Display count unavailable");
            SENTINEL
        }
    }
}

/// `get_display_resolution`: `(width, height)`, or `(-1, -1)`.
///
/// Negative indices are rejected without touching the subsystem.
pub fn display_resolution(subsystem: &dyn DisplaySubsystem, index: i32) -> (i32, i32) {
    let result = match usize::try_from(index) {
        Ok(index) => subsystem.resolution(index),
        Err(_) => Err(DisplayError::IndexOutOfRange {
            index: i64::from(index),
            count: None,
        }),
    };
    resolution_or_sentinel(subsystem.backend(), result)
}

/// `get_terminal_display`: a display index, or `-1`.
pub fn terminal_display(subsystem: &dyn DisplaySubsystem) -> i32 {
    match subsystem.terminal_display() {
        Ok(index) => clamp(index),
        Err(err) => {
            debug!(backend = subsystem.backend(), %err, "Terminal display unavailable");
            SENTINEL
        }
    }
}

fn resolution_or_sentinel(backend: &str, result: DisplayResult<Resolution>) -> (i32, i32) {
    match result {
        Ok(res) if res.width == 0 || res.height == 0 => {
            debug!(backend, ?res, "Display reported an empty resolution");
            SENTINEL_RESOLUTION
        }
        Ok(res) => (clamp(res.width as usize), clamp(res.height as usize)),
        Err(err) => {
            debug!(backend, %err, "Display resolution unavailable");
            SENTINEL_RESOLUTION
        }
    }
}

fn clamp(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

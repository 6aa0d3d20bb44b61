//! C exports of the display query contract.
//!
//! A host process loads this library and binds three symbols by name.
//! Every failure is reported as `-1` (or `-1, -1`); no panic crosses the
//! boundary.

use display_core::sentinel::{self, SENTINEL, SENTINEL_RESOLUTION};
use display_platform::native;
use std::panic::{catch_unwind, UnwindSafe};
use tracing::warn;

/// Number of active displays, or `-1` if the display server is unreachable.
#[no_mangle]
pub extern "C" fn get_display_count() -> i32 {
    guarded("get_display_count", SENTINEL, || {
        sentinel::display_count(native())
    })
}

/// Writes the size of display `display_index` to `width` and `height`.
///
/// Both are set to `-1` when the index is out of range or the display
/// server is unreachable. Null pointers are skipped.
///
/// # Safety
///
/// `width` and `height` must each be null or valid for writing one `i32`.
#[no_mangle]
pub unsafe extern "C" fn get_display_resolution(
    display_index: i32,
    width: *mut i32,
    height: *mut i32,
) {
    let (w, h) = guarded("get_display_resolution", SENTINEL_RESOLUTION, || {
        sentinel::display_resolution(native(), display_index)
    });
    if !width.is_null() {
        width.write(w);
    }
    if !height.is_null() {
        height.write(h);
    }
}

/// Index of the display under the pointer, or `-1`.
#[no_mangle]
pub extern "C" fn get_terminal_display() -> i32 {
    guarded("get_terminal_display", SENTINEL, || {
        sentinel::terminal_display(native())
    })
}

fn guarded<T>(symbol: &str, failure: T, query: impl FnOnce() -> T + UnwindSafe) -> T {
    catch_unwind(query).unwrap_or_else(|_| {
        warn!(symbol, "Panic in display query");
        failure
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guarded_passes_value_through() {
        assert_eq!(guarded("test", -1, || 3), 3);
    }

    #[test]
    fn test_guarded_catches_panic() {
        assert_eq!(guarded("test", -1, || panic!("boom")), -1);
        assert_eq!(
            guarded("test", SENTINEL_RESOLUTION, || -> (i32, i32) {
                panic!("boom")
            }),
            (-1, -1)
        );
    }
}

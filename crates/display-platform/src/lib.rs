//! display-platform: native backends for the display query contract.
//!
//! Exactly one backend is selected at build time:
//!
//! - Linux (with the `x11` feature): Xlib (`linux.rs`)
//! - macOS: CoreGraphics (`macos.rs`)
//! - Windows: Win32 display devices and monitors (`windows.rs`)
//! - Anything else: `fallback.rs`, which answers "unsupported"
//!
//! The fallback is compiled everywhere so callers can name it explicitly.

mod fallback;

#[cfg(all(target_os = "linux", feature = "x11"))]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(windows)]
mod windows;

use display_core::DisplaySubsystem;

pub use display_core;
pub use fallback::FallbackSubsystem;

#[cfg(all(target_os = "linux", feature = "x11"))]
pub use linux::X11Subsystem;

#[cfg(target_os = "macos")]
pub use macos::CoreGraphicsSubsystem;

#[cfg(windows)]
pub use windows::Win32Subsystem;

/// The backend linked into this build.
#[cfg(all(target_os = "linux", feature = "x11"))]
pub type NativeSubsystem = X11Subsystem;

/// The backend linked into this build.
#[cfg(target_os = "macos")]
pub type NativeSubsystem = CoreGraphicsSubsystem;

/// The backend linked into this build.
#[cfg(windows)]
pub type NativeSubsystem = Win32Subsystem;

/// The backend linked into this build.
#[cfg(not(any(all(target_os = "linux", feature = "x11"), target_os = "macos", windows)))]
pub type NativeSubsystem = FallbackSubsystem;

/// The display subsystem for the current platform.
pub fn native() -> &'static dyn DisplaySubsystem {
    static NATIVE: NativeSubsystem = NativeSubsystem {};
    &NATIVE
}

#[cfg(test)]
mod tests {
    use super::*;
    use display_core::sentinel;

    // The host may or may not have a display server; only the contract's
    // ranges are checked.

    #[test]
    fn test_count_range() {
        assert!(sentinel::display_count(native()) >= -1);
    }

    #[test]
    fn test_count_idempotent() {
        let first = sentinel::display_count(native());
        let second = sentinel::display_count(native());
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolution_ranges() {
        let subsystem = native();
        let count = sentinel::display_count(subsystem);
        assert_eq!(sentinel::display_resolution(subsystem, -1), (-1, -1));
        if count < 0 {
            assert_eq!(sentinel::display_resolution(subsystem, 0), (-1, -1));
            return;
        }
        assert_eq!(sentinel::display_resolution(subsystem, count), (-1, -1));
        for index in 0..count {
            let (width, height) = sentinel::display_resolution(subsystem, index);
            assert!(width > 0 && height > 0, "display {index}: {width}x{height}");
        }
    }

    #[test]
    fn test_terminal_display_range() {
        let count = sentinel::display_count(native());
        let terminal = sentinel::terminal_display(native());
        assert!(terminal == -1 || (0..count).contains(&terminal));
    }

    #[test]
    fn test_backend_name() {
        let expected = if cfg!(all(target_os = "linux", feature = "x11")) {
            "x11"
        } else if cfg!(target_os = "macos") {
            "coregraphics"
        } else if cfg!(windows) {
            "win32"
        } else {
            "fallback"
        };
        assert_eq!(native().backend(), expected);
    }
}

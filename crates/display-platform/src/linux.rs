//! X11 backend using Xlib.
//!
//! Each X screen is one display with its own root window. Screens report
//! no origin, so every screen rectangle is anchored at (0, 0) and the
//! pointer is only compared against the screen whose root it is on.

use display_core::{
    check_index, DisplayError, DisplayRect, DisplayResult, DisplaySubsystem,
    PointerPosition, Resolution,
};
use std::os::raw::{c_int, c_uint};
use std::ptr::{self, NonNull};
use tracing::{debug, trace};
use x11::xlib;

const BACKEND: &str = "x11";

/// Queries the X server named by `DISPLAY`.
#[derive(Debug, Clone, Copy, Default)]
pub struct X11Subsystem;

impl DisplaySubsystem for X11Subsystem {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    fn count(&self) -> DisplayResult<usize> {
        let conn = XConnection::open()?;
        Ok(conn.screen_count())
    }

    fn resolution(&self, index: usize) -> DisplayResult<Resolution> {
        let conn = XConnection::open()?;
        check_index(index, conn.screen_count())?;
        conn.screen_rect(index)
            .map(|rect| rect.resolution())
            .ok_or_else(|| DisplayError::IndexOutOfRange {
                index: index as i64,
                count: Some(conn.screen_count()),
            })
    }

    fn terminal_display(&self) -> DisplayResult<usize> {
        let conn = XConnection::open()?;
        let (root, pointer) = conn.pointer();
        let screens = conn.screens();
        trace!(root, ?pointer, screens = screens.len(), "Locating pointer");
        locate_on_root(&screens, root, pointer).ok_or(DisplayError::NoDisplayAtPointer)
    }
}

/// Index of the first screen owning `root` whose bounds contain `pointer`.
///
/// Root coordinates from one screen mean nothing on another, so screens
/// with a different root never match.
fn locate_on_root(
    screens: &[(xlib::Window, DisplayRect)],
    root: xlib::Window,
    pointer: PointerPosition,
) -> Option<usize> {
    screens
        .iter()
        .position(|(screen_root, rect)| *screen_root == root && rect.contains(pointer))
}

/// An open Xlib connection, closed on drop.
struct XConnection {
    display: NonNull<xlib::Display>,
}

impl XConnection {
    fn open() -> DisplayResult<Self> {
        // SAFETY: a null name makes Xlib read DISPLAY; the result is checked below.
        let display = unsafe { xlib::XOpenDisplay(ptr::null()) };
        match NonNull::new(display) {
            Some(display) => Ok(Self { display }),
            None => {
                let name = std::env::var("DISPLAY").unwrap_or_default();
                debug!(display = %name, "XOpenDisplay failed");
                Err(DisplayError::unreachable(
                    BACKEND,
                    format!("XOpenDisplay failed; DISPLAY={name:?}"),
                ))
            }
        }
    }

    fn screen_count(&self) -> usize {
        // SAFETY: `display` is a live connection.
        let count = unsafe { xlib::XScreenCount(self.display.as_ptr()) };
        usize::try_from(count).unwrap_or(0)
    }

    fn screen_rect(&self, index: usize) -> Option<DisplayRect> {
        let number = c_int::try_from(index).ok()?;
        // SAFETY: callers only pass indices below `screen_count`.
        let screen = unsafe { xlib::XScreenOfDisplay(self.display.as_ptr(), number) };
        if screen.is_null() {
            return None;
        }
        // SAFETY: non-null screens stay valid until the connection closes.
        let (width, height) = unsafe { ((*screen).width, (*screen).height) };
        Some(DisplayRect::at_origin(Resolution::new(
            u32::try_from(width).unwrap_or(0),
            u32::try_from(height).unwrap_or(0),
        )))
    }

    /// Root window and bounds of every screen, in screen-number order.
    fn screens(&self) -> Vec<(xlib::Window, DisplayRect)> {
        (0..self.screen_count())
            .filter_map(|index| {
                let rect = self.screen_rect(index)?;
                let number = c_int::try_from(index).ok()?;
                // SAFETY: `number` is below `screen_count`.
                let root = unsafe { xlib::XRootWindow(self.display.as_ptr(), number) };
                Some((root, rect))
            })
            .collect()
    }

    /// Root window the pointer is on and its position relative to that root.
    fn pointer(&self) -> (xlib::Window, PointerPosition) {
        let display = self.display.as_ptr();
        let mut root_return: xlib::Window = 0;
        let mut child_return: xlib::Window = 0;
        let mut root_x: c_int = 0;
        let mut root_y: c_int = 0;
        let mut win_x: c_int = 0;
        let mut win_y: c_int = 0;
        let mut mask: c_uint = 0;

        // SAFETY: all out-pointers reference locals; `display` is live.
        // A False return means the pointer is on another screen; the root
        // coordinates are then relative to `root_return`, not `root`.
        unsafe {
            let root = xlib::XDefaultRootWindow(display);
            xlib::XQueryPointer(
                display,
                root,
                &mut root_return,
                &mut child_return,
                &mut root_x,
                &mut root_y,
                &mut win_x,
                &mut win_y,
                &mut mask,
            );
        }

        (root_return, PointerPosition::from((root_x, root_y)))
    }
}

impl Drop for XConnection {
    fn drop(&mut self) {
        // SAFETY: the connection was opened by `XConnection::open` and is closed once.
        unsafe {
            xlib::XCloseDisplay(self.display.as_ptr());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT_0: xlib::Window = 0x100;
    const ROOT_1: xlib::Window = 0x200;

    fn two_screens() -> Vec<(xlib::Window, DisplayRect)> {
        vec![
            (ROOT_0, DisplayRect::new(0, 0, 1920, 1080)),
            (ROOT_1, DisplayRect::new(0, 0, 800, 600)),
        ]
    }

    #[test]
    fn test_pointer_on_second_screen_ignores_larger_first() {
        assert_eq!(
            locate_on_root(&two_screens(), ROOT_1, (100, 100).into()),
            Some(1)
        );
    }

    #[test]
    fn test_pointer_on_first_screen() {
        assert_eq!(
            locate_on_root(&two_screens(), ROOT_0, (1000, 900).into()),
            Some(0)
        );
    }

    #[test]
    fn test_pointer_outside_its_screen() {
        // Inside screen 0's size, but the pointer is on screen 1.
        assert_eq!(locate_on_root(&two_screens(), ROOT_1, (1000, 700).into()), None);
    }

    #[test]
    fn test_unknown_root() {
        assert_eq!(locate_on_root(&two_screens(), 0x300, (10, 10).into()), None);
    }

    // The tests below run against whatever X server the test host has,
    // including none.

    #[test]
    fn test_count_or_unreachable() {
        match X11Subsystem.count() {
            Ok(_) => {}
            Err(err) => assert!(err.is_unreachable(), "unexpected error: {err}"),
        }
    }

    #[test]
    fn test_resolution_past_count_is_rejected() {
        let Ok(count) = X11Subsystem.count() else {
            return;
        };
        assert!(matches!(
            X11Subsystem.resolution(count),
            Err(DisplayError::IndexOutOfRange { .. })
        ));
        for index in 0..count {
            let res = X11Subsystem.resolution(index).unwrap();
            assert!(res.width > 0 && res.height > 0);
        }
    }

    #[test]
    fn test_repeated_connections_are_closed() {
        for _ in 0..2_000 {
            let _ = X11Subsystem.count();
        }
    }
}

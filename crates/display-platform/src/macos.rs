//! macOS backend using CoreGraphics.
//!
//! Geometry is in points, not pixels. `CGDisplayBounds` already places
//! each display in the global coordinate space, so the pointer from a
//! fresh `CGEvent` can be matched directly.

use core_graphics::display::{CGDirectDisplayID, CGDisplay};
use core_graphics::event::CGEvent;
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use core_graphics::geometry::CGRect;
use display_core::{
    check_index, locate_pointer, DisplayError, DisplayRect, DisplayResult, DisplaySubsystem,
    PointerPosition, Resolution,
};
use tracing::{debug, trace};

const BACKEND: &str = "coregraphics";

/// Queries the active display list of the window server.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreGraphicsSubsystem;

impl DisplaySubsystem for CoreGraphicsSubsystem {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    fn count(&self) -> DisplayResult<usize> {
        Ok(active_displays()?.len())
    }

    fn resolution(&self, index: usize) -> DisplayResult<Resolution> {
        let displays = active_displays()?;
        check_index(index, displays.len())?;
        Ok(display_rect(displays[index]).resolution())
    }

    fn terminal_display(&self) -> DisplayResult<usize> {
        let pointer = pointer_location()?;
        let rects: Vec<DisplayRect> = active_displays()?.into_iter().map(display_rect).collect();
        trace!(?pointer, displays = rects.len(), "Locating pointer");
        locate_pointer(&rects, pointer).ok_or(DisplayError::NoDisplayAtPointer)
    }
}

fn active_displays() -> DisplayResult<Vec<CGDirectDisplayID>> {
    CGDisplay::active_displays().map_err(|code| {
        debug!(code, "CGGetActiveDisplayList failed");
        DisplayError::unreachable(BACKEND, format!("CGGetActiveDisplayList error {code}"))
    })
}

fn display_rect(id: CGDirectDisplayID) -> DisplayRect {
    let rect = to_display_rect(CGDisplay::new(id).bounds());
    trace!(id, ?rect, "Display bounds");
    rect
}

/// Truncates to whole points, matching how the contract reports sizes.
fn to_display_rect(bounds: CGRect) -> DisplayRect {
    DisplayRect::new(
        bounds.origin.x as i32,
        bounds.origin.y as i32,
        bounds.size.width as u32,
        bounds.size.height as u32,
    )
}

/// Current pointer location in global display coordinates.
///
/// The event is released when it goes out of scope.
fn pointer_location() -> DisplayResult<PointerPosition> {
    let source = CGEventSource::new(CGEventSourceStateID::CombinedSessionState)
        .map_err(|_| DisplayError::unreachable(BACKEND, "CGEventSourceCreate failed"))?;
    let event = CGEvent::new(source).map_err(|_| DisplayError::PointerUnavailable)?;
    let location = event.location();
    Ok(PointerPosition::new(location.x, location.y))
}

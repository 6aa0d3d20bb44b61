//! The display query contract and an in-memory implementation of it.

use crate::error::{check_index, DisplayError, DisplayResult};
use crate::geometry::{locate_pointer, DisplayRect, PointerPosition, Resolution};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::trace;

/// One platform's answer to the three display questions.
///
/// Implementations connect, query and release on every call. They keep no
/// connection or cache between calls, so two calls may observe different
/// display sets.
pub trait DisplaySubsystem: Send + Sync {
    /// Short backend name used in logs and snapshots.
    fn backend(&self) -> &'static str;

    /// Number of active displays. `Ok(0)` means the subsystem answered and
    /// reported nothing.
    fn count(&self) -> DisplayResult<usize>;

    /// Size of the display at `index` in the current enumeration.
    fn resolution(&self, index: usize) -> DisplayResult<Resolution>;

    /// Index of the display currently containing the pointer.
    fn terminal_display(&self) -> DisplayResult<usize>;
}

/// A fixed display layout, for simulated environments and tests.
///
/// Each query opens a session that is released when the query returns, so
/// [`StaticSubsystem::live_sessions`] mirrors the native handle discipline.
#[derive(Debug, Default)]
pub struct StaticSubsystem {
    displays: Option<Vec<DisplayRect>>,
    pointer: Option<PointerPosition>,
    opened: AtomicUsize,
    live: AtomicUsize,
}

impl StaticSubsystem {
    /// A reachable subsystem with the given displays in enumeration order.
    pub fn new(displays: Vec<DisplayRect>) -> Self {
        Self {
            displays: Some(displays),
            ..Self::default()
        }
    }

    /// A subsystem that refuses every connection.
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn with_pointer(mut self, pointer: impl Into<PointerPosition>) -> Self {
        self.pointer = Some(pointer.into());
        self
    }

    /// Total sessions opened so far.
    pub fn sessions_opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Sessions opened but not yet released.
    pub fn live_sessions(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    fn connect(&self) -> DisplayResult<Session<'_>> {
        let displays = self
            .displays
            .as_deref()
            .ok_or_else(|| DisplayError::unreachable("static", "no display server"))?;
        self.opened.fetch_add(1, Ordering::SeqCst);
        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(Session {
            owner: self,
            displays,
        })
    }
}

struct Session<'a> {
    owner: &'a StaticSubsystem,
    displays: &'a [DisplayRect],
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        self.owner.live.fetch_sub(1, Ordering::SeqCst);
    }
}

impl DisplaySubsystem for StaticSubsystem {
    fn backend(&self) -> &'static str {
        "static"
    }

    fn count(&self) -> DisplayResult<usize> {
        let session = self.connect()?;
        Ok(session.displays.len())
    }

    fn resolution(&self, index: usize) -> DisplayResult<Resolution> {
        let session = self.connect()?;
        check_index(index, session.displays.len())?;
        Ok(session.displays[index].resolution())
    }

    fn terminal_display(&self) -> DisplayResult<usize> {
        let session = self.connect()?;
        let pointer = self.pointer.ok_or(DisplayError::PointerUnavailable)?;
        trace!(?pointer, displays = session.displays.len(), "Locating pointer");
        locate_pointer(session.displays, pointer).ok_or(DisplayError::NoDisplayAtPointer)
    }
}

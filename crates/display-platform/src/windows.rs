//! Windows backend using the Win32 display device and monitor APIs.
//!
//! The display count comes from `GetSystemMetrics(SM_CMONITORS)`.
//! Indices refer to the active entries of `EnumDisplayDevicesW`, in
//! enumeration order, and sizes come from their current display
//! settings. The pointer lookup differs from the other backends: the
//! nearest monitor to the cursor supplies the bounds, and that monitor is
//! mapped back to an index through its device name. No handle returned
//! by these calls needs releasing.

use display_core::{
    check_index, DisplayError, DisplayRect, DisplayResult, DisplaySubsystem, PointerPosition,
    Resolution,
};
use std::mem;
use std::ptr;
use tracing::{debug, trace};
use windows_sys::Win32::Foundation::{POINT, RECT};
use windows_sys::Win32::Graphics::Gdi::{
    EnumDisplayDevicesW, EnumDisplaySettingsW, GetMonitorInfoW, MonitorFromPoint,
    DEVMODEW, DISPLAY_DEVICEW, DISPLAY_DEVICE_ACTIVE, ENUM_CURRENT_SETTINGS, MONITORINFO,
    MONITORINFOEXW, MONITOR_DEFAULTTONEAREST,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{GetCursorPos, GetSystemMetrics, SM_CMONITORS};

const BACKEND: &str = "win32";

/// Queries the Windows display subsystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Subsystem;

impl DisplaySubsystem for Win32Subsystem {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    fn count(&self) -> DisplayResult<usize> {
        monitor_count()
    }

    fn resolution(&self, index: usize) -> DisplayResult<Resolution> {
        check_index(index, monitor_count()?)?;
        let devices = active_devices();
        devices
            .get(index)
            .map(|device| device.resolution)
            .ok_or(DisplayError::IndexOutOfRange {
                index: index as i64,
                count: Some(devices.len()),
            })
    }

    fn terminal_display(&self) -> DisplayResult<usize> {
        let count = monitor_count()?;
        let point = cursor_pos()?;
        let monitor = nearest_monitor(point)?;
        let devices = active_devices();
        trace!(rect = ?monitor.rect, devices = devices.len(), "Locating pointer");
        match_monitor(
            &devices,
            count,
            &monitor,
            PointerPosition::from((point.x, point.y)),
        )
    }
}

/// An active display device and its current mode.
#[derive(Debug, Clone)]
struct ActiveDevice {
    name: Vec<u16>,
    resolution: Resolution,
}

/// The monitor `MonitorFromPoint` picked, with its device name.
#[derive(Debug, Clone)]
struct NearestMonitor {
    name: Vec<u16>,
    rect: DisplayRect,
}

fn monitor_count() -> DisplayResult<usize> {
    // SAFETY: plain metrics query.
    let count = unsafe { GetSystemMetrics(SM_CMONITORS) };
    if count <= 0 {
        debug!(count, "GetSystemMetrics(SM_CMONITORS) failed");
        return Err(DisplayError::unreachable(
            BACKEND,
            "GetSystemMetrics(SM_CMONITORS) returned 0",
        ));
    }
    Ok(count as usize)
}

/// Active devices with readable current settings, in enumeration order.
fn active_devices() -> Vec<ActiveDevice> {
    let mut devices = Vec::new();
    let mut number = 0u32;

    loop {
        // SAFETY: DISPLAY_DEVICEW is plain data; `cb` is set before the call.
        let mut device: DISPLAY_DEVICEW = unsafe { mem::zeroed() };
        device.cb = mem::size_of::<DISPLAY_DEVICEW>() as u32;
        if unsafe { EnumDisplayDevicesW(ptr::null(), number, &mut device, 0) } == 0 {
            break;
        }
        number += 1;

        if device.StateFlags & DISPLAY_DEVICE_ACTIVE == 0 {
            continue;
        }

        // SAFETY: DEVMODEW is plain data; `dmSize` is set before the call.
        let mut mode: DEVMODEW = unsafe { mem::zeroed() };
        mode.dmSize = mem::size_of::<DEVMODEW>() as u16;
        let ok = unsafe {
            EnumDisplaySettingsW(device.DeviceName.as_ptr(), ENUM_CURRENT_SETTINGS, &mut mode)
        };
        if ok == 0 {
            continue;
        }

        let name = wide_name(&device.DeviceName);
        trace!(
            device = %String::from_utf16_lossy(&name),
            width = mode.dmPelsWidth,
            height = mode.dmPelsHeight,
            "Active display device"
        );
        devices.push(ActiveDevice {
            name,
            resolution: Resolution::new(mode.dmPelsWidth, mode.dmPelsHeight),
        });
    }

    devices
}

fn cursor_pos() -> DisplayResult<POINT> {
    let mut point = POINT { x: 0, y: 0 };
    // SAFETY: `point` is a valid out-pointer.
    if unsafe { GetCursorPos(&mut point) } == 0 {
        debug!("GetCursorPos failed");
        return Err(DisplayError::PointerUnavailable);
    }
    Ok(point)
}

fn nearest_monitor(point: POINT) -> DisplayResult<NearestMonitor> {
    // SAFETY: MONITORINFOEXW is plain data; `cbSize` selects the extended layout.
    unsafe {
        let monitor = MonitorFromPoint(point, MONITOR_DEFAULTTONEAREST);
        let mut info: MONITORINFOEXW = mem::zeroed();
        info.monitorInfo.cbSize = mem::size_of::<MONITORINFOEXW>() as u32;
        if GetMonitorInfoW(monitor, &mut info as *mut MONITORINFOEXW as *mut MONITORINFO) == 0 {
            return Err(DisplayError::unreachable(BACKEND, "GetMonitorInfoW failed"));
        }
        Ok(NearestMonitor {
            name: wide_name(&info.szDevice),
            rect: rect_from_win32(info.monitorInfo.rcMonitor),
        })
    }
}

/// Index of the active device backing `monitor`, if the pointer is on it.
///
/// The nearest monitor is returned even for a pointer outside every
/// monitor, so containment is still checked against its rectangle.
/// Indices at or past `count` are rejected: mirrored or detached devices
/// can still be flagged active.
fn match_monitor(
    devices: &[ActiveDevice],
    count: usize,
    monitor: &NearestMonitor,
    pointer: PointerPosition,
) -> DisplayResult<usize> {
    if !monitor.rect.contains(pointer) {
        return Err(DisplayError::NoDisplayAtPointer);
    }
    devices
        .iter()
        .position(|device| device.name == monitor.name)
        .filter(|&index| index < count)
        .ok_or(DisplayError::NoDisplayAtPointer)
}

fn rect_from_win32(rect: RECT) -> DisplayRect {
    DisplayRect::new(
        rect.left,
        rect.top,
        (rect.right - rect.left).max(0) as u32,
        (rect.bottom - rect.top).max(0) as u32,
    )
}

/// Device name up to the first NUL.
fn wide_name(buf: &[u16]) -> Vec<u16> {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    buf[..len].to_vec()
}

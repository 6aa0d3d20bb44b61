//! Exercises the exported symbols in-process against the host's display
//! server (or its absence).

use display_query::{get_display_count, get_display_resolution, get_terminal_display};

fn resolution(index: i32) -> (i32, i32) {
    let mut width = i32::MIN;
    let mut height = i32::MIN;
    unsafe { get_display_resolution(index, &mut width, &mut height) };
    (width, height)
}

#[test]
fn count_is_sentinel_or_non_negative() {
    assert!(get_display_count() >= -1);
}

#[test]
fn outputs_written_on_every_path() {
    let count = get_display_count();
    for index in [-5, -1, 0, count, count + 1, i32::MAX] {
        let (width, height) = resolution(index);
        assert_ne!(width, i32::MIN, "width untouched for index {index}");
        assert_ne!(height, i32::MIN, "height untouched for index {index}");
    }
}

#[test]
fn out_of_range_index_is_rejected() {
    let count = get_display_count();
    assert_eq!(resolution(-1), (-1, -1));
    if count >= 0 {
        assert_eq!(resolution(count), (-1, -1));
    } else {
        assert_eq!(resolution(0), (-1, -1));
    }
}

#[test]
fn in_range_resolutions_are_positive() {
    for index in 0..get_display_count().max(0) {
        let (width, height) = resolution(index);
        assert!(width > 0 && height > 0, "display {index}: {width}x{height}");
    }
}

#[test]
fn terminal_display_in_range() {
    let count = get_display_count();
    let terminal = get_terminal_display();
    assert!(terminal == -1 || (0..count).contains(&terminal));
}

#[test]
fn null_outputs_are_ignored() {
    unsafe {
        get_display_resolution(0, std::ptr::null_mut(), std::ptr::null_mut());
    }
    let mut width = 0;
    unsafe { get_display_resolution(-1, &mut width, std::ptr::null_mut()) };
    assert_eq!(width, -1);
}

#[test]
fn repeated_calls_do_not_exhaust_handles() {
    let first = get_display_count();
    for _ in 0..10_000 {
        assert_eq!(get_display_count(), first);
    }
    for _ in 0..1_000 {
        resolution(0);
        get_terminal_display();
    }
    assert_eq!(get_display_count(), first);
}

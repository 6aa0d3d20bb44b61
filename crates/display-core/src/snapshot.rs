//! Point-in-time summary of everything the contract can answer.

use crate::sentinel;
use crate::subsystem::DisplaySubsystem;
use serde::{Deserialize, Serialize};

/// One enumerated display, in sentinel form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayEntry {
    pub index: i32,
    pub width: i32,
    pub height: i32,
}

/// Answers to all three queries, each taken as a separate call.
///
/// The fields are not captured atomically: a display attached between
/// calls can make `displays` disagree with `count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    pub backend: String,
    pub count: i32,
    pub displays: Vec<DisplayEntry>,
    pub terminal_display: i32,
}

impl DisplaySnapshot {
    pub fn capture(subsystem: &dyn DisplaySubsystem) -> Self {
        let count = sentinel::display_count(subsystem);
        let displays = (0..count.max(0))
            .map(|index| {
                let (width, height) = sentinel::display_resolution(subsystem, index);
                DisplayEntry {
                    index,
                    width,
                    height,
                }
            })
            .collect();

        Self {
            backend: subsystem.backend().to_string(),
            count,
            displays,
            terminal_display: sentinel::terminal_display(subsystem),
        }
    }

    /// Whether the backend answered the count query.
    pub fn is_reachable(&self) -> bool {
        self.count >= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DisplayRect;
    use crate::subsystem::StaticSubsystem;

    #[test]
    fn test_capture_dual_display() {
        let subsystem = StaticSubsystem::new(vec![
            DisplayRect::new(0, 0, 1920, 1080),
            DisplayRect::new(-1280, 0, 1280, 1024),
        ])
        .with_pointer((-200, 300));

        let snapshot = DisplaySnapshot::capture(&subsystem);
        assert!(snapshot.is_reachable());
        assert_eq!(snapshot.backend, "static");
        assert_eq!(snapshot.count, 2);
        assert_eq!(
            snapshot.displays,
            vec![
                DisplayEntry {
                    index: 0,
                    width: 1920,
                    height: 1080
                },
                DisplayEntry {
                    index: 1,
                    width: 1280,
                    height: 1024
                },
            ]
        );
        assert_eq!(snapshot.terminal_display, 1);
        assert_eq!(subsystem.live_sessions(), 0);
    }

    #[test]
    fn test_capture_unreachable() {
        let snapshot = DisplaySnapshot::capture(&StaticSubsystem::unreachable());
        assert!(!snapshot.is_reachable());
        assert!(snapshot.displays.is_empty());
        assert_eq!(snapshot.terminal_display, -1);
    }

    #[test]
    fn test_snapshot_json() {
        let subsystem =
            StaticSubsystem::new(vec![DisplayRect::new(0, 0, 800, 600)]).with_pointer((1, 1));
        let json = serde_json::to_value(DisplaySnapshot::capture(&subsystem)).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["displays"][0]["width"], 800);
        assert_eq!(json["terminal_display"], 0);
    }
}

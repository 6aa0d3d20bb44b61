//! Error types for display queries.

use thiserror::Error;

/// Why a display query could not produce a value.
///
/// Every variant maps to the same `-1` sentinel at the exported boundary
/// (see [`crate::sentinel`]); inside Rust the causes stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayError {
    #[error("{backend} display subsystem unreachable: {reason}")]
    SubsystemUnreachable {
        backend: &'static str,
        reason: String,
    },
    #[error("display index {index} out of range (count: {count:?})")]
    IndexOutOfRange { index: i64, count: Option<usize> },
    #[error("pointer position unavailable")]
    PointerUnavailable,
    #[error("pointer is not on any enumerated display")]
    NoDisplayAtPointer,
    #[error("display queries are not supported on {platform}")]
    Unsupported { platform: &'static str },
}

impl DisplayError {
    pub fn unreachable(backend: &'static str, reason: impl Into<String>) -> Self {
        Self::SubsystemUnreachable {
            backend,
            reason: reason.into(),
        }
    }

    /// Whether the failure happened before any display could be enumerated.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            Self::SubsystemUnreachable { .. } | Self::Unsupported { .. }
        )
    }
}

/// Result type for display queries.
pub type DisplayResult<T> = Result<T, DisplayError>;

/// Check `index` against a freshly enumerated `count`.
pub fn check_index(index: usize, count: usize) -> DisplayResult<()> {
    if index < count {
        Ok(())
    } else {
        Err(DisplayError::IndexOutOfRange {
            index: index as i64,
            count: Some(count),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_index() {
        assert!(check_index(0, 1).is_ok());
        assert!(check_index(2, 3).is_ok());
        assert_eq!(
            check_index(3, 3),
            Err(DisplayError::IndexOutOfRange {
                index: 3,
                count: Some(3)
            })
        );
        assert!(check_index(0, 0).is_err());
    }

    #[test]
    fn test_unreachable_classification() {
        assert!(DisplayError::unreachable("x11", "no DISPLAY").is_unreachable());
        assert!(DisplayError::Unsupported { platform: "haiku" }.is_unreachable());
        assert!(!DisplayError::NoDisplayAtPointer.is_unreachable());
        assert!(!DisplayError::IndexOutOfRange {
            index: -1,
            count: None
        }
        .is_unreachable());
    }

    #[test]
    fn test_error_messages() {
        let err = DisplayError::unreachable("x11", "XOpenDisplay returned null");
        assert_eq!(
            err.to_string(),
            "x11 display subsystem unreachable: XOpenDisplay returned null"
        );
        let err = DisplayError::IndexOutOfRange {
            index: 4,
            count: Some(2),
        };
        assert_eq!(err.to_string(), "display index 4 out of range (count: Some(2))");
    }
}

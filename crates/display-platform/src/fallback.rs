//! Backend for platforms without a recognized display server.

use display_core::{DisplayError, DisplayResult, DisplaySubsystem, Resolution};

/// Answers "unsupported" to every query.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackSubsystem;

impl FallbackSubsystem {
    fn unsupported<T>(&self) -> DisplayResult<T> {
        Err(DisplayError::Unsupported {
            platform: std::env::consts::OS,
        })
    }
}

impl DisplaySubsystem for FallbackSubsystem {
    fn backend(&self) -> &'static str {
        "fallback"
    }

    fn count(&self) -> DisplayResult<usize> {
        self.unsupported()
    }

    fn resolution(&self, _index: usize) -> DisplayResult<Resolution> {
        self.unsupported()
    }

    fn terminal_display(&self) -> DisplayResult<usize> {
        self.unsupported()
    }
}

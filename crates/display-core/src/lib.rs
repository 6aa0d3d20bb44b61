//! display-core: the platform-independent half of the display query library.
//!
//! This crate provides:
//! - The `DisplaySubsystem` contract every platform backend implements
//! - Geometry value types and the pointer-to-display lookup
//! - Sentinel mapping for the exported C functions
//! - `StaticSubsystem`, a fixed layout for simulated environments
//! - `DisplaySnapshot` for diagnostics
//!
//! ## Module Structure
//!
//! - `error` - Error taxonomy
//! - `geometry` - Rectangles, pointer positions, `locate_pointer`
//! - `subsystem` - The contract trait and the static implementation
//! - `sentinel` - `-1` conversion at the exported boundary
//! - `snapshot` - Serializable summary of all three queries

mod error;
mod geometry;
pub mod sentinel;
mod snapshot;
mod subsystem;

pub use error::{check_index, DisplayError, DisplayResult};
pub use geometry::{locate_pointer, DisplayRect, PointerPosition, Resolution};
pub use snapshot::{DisplayEntry, DisplaySnapshot};
pub use subsystem::{DisplaySubsystem, StaticSubsystem};

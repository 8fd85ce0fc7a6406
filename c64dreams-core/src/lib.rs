//! Data model and constant tables for laying out a C64 collection.
//!
//! Nothing in this crate touches the filesystem.

pub mod content;
pub mod error;
pub mod model;
pub mod region;
pub mod target;
pub mod util;

pub use content::{ContentType, RECOGNIZED_EXTENSIONS};
pub use error::{RegionParseError, TargetParseError};
pub use model::{Game, NormalizedGame, NormalizedName, NormalizedVariant, Variant};
pub use region::Region;
pub use target::{TargetDevice, TargetProfile};

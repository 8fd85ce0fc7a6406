//! The collection pipeline: ingest, normalize, resolve collisions, plan a
//! layout and apply it.
//!
//! ```text
//! sheet ─▶ ingest ─▶ normalize ─▶ collision ─▶ layout ─▶ apply ─▶ output tree
//!                                                          ▲
//!                                              resolver ───┘
//! ```

pub mod apply;
pub mod collision;
pub mod error;
pub mod ingest;
pub mod layout;
pub mod normalize;
pub mod progress;
pub mod resolver;
pub mod scanner;
pub mod settings;

pub use apply::{ApplyAction, ApplyOptions, ApplyReport, ApplyResult, apply, apply_with_progress};
pub use collision::{CollisionKey, resolve_collisions, resolve_collisions_for};
pub use error::{ApplyError, IngestError, LayoutError, SettingsError};
pub use ingest::{load_csv, parse_csv};
pub use layout::{LayoutOptions, PlannedFile, alpha_bucket, plan};
pub use normalize::{NormalizeOptions, normalize_game, normalize_games, normalize_name};
pub use progress::ApplyProgress;
pub use scanner::{ScannedFile, scan_input};
pub use settings::{Settings, load_settings, settings_path};

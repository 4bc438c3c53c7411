//! Spawn points module - per-level spawn locations and safe selection.

mod data;
mod error;
mod plugin;
mod selector;

pub use data::{load_spawn_points_file, save_spawn_points_file, spawn_points_file, SpawnPoint};
pub use error::SpawnPointError;
pub use plugin::{alive_positions, current_level_file, save_spawn_points, SpawnPointsPlugin};
pub use selector::SpawnPoints;

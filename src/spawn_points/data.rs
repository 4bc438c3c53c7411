//! Spawn-point JSON files.
//!
//! One file per level holding an array of `{"vector": [x, y, z], "angle": [p, y, r]}`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::error::SpawnPointError;

/// A location players can be placed at, with the view angle they face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "SpawnPointRecord", into = "SpawnPointRecord")]
pub struct SpawnPoint {
    pub position: Vec3,
    /// Pitch, yaw, roll.
    pub angle: Vec3,
}

impl SpawnPoint {
    pub fn new(position: Vec3, angle: Vec3) -> Self {
        Self { position, angle }
    }
}

/// On-disk shape of a spawn point.
#[derive(Serialize, Deserialize)]
struct SpawnPointRecord {
    vector: [f32; 3],
    angle: [f32; 3],
}

impl From<SpawnPointRecord> for SpawnPoint {
    fn from(record: SpawnPointRecord) -> Self {
        Self {
            position: Vec3::from_array(record.vector),
            angle: Vec3::from_array(record.angle),
        }
    }
}

impl From<SpawnPoint> for SpawnPointRecord {
    fn from(point: SpawnPoint) -> Self {
        Self {
            vector: point.position.to_array(),
            angle: point.angle.to_array(),
        }
    }
}

/// Path of the spawn-point file for `map_name` inside `dir`.
pub fn spawn_points_file(dir: &Path, map_name: &str) -> PathBuf {
    dir.join(format!("{}.json", map_name))
}

/// Read a spawn-point file. A missing file is an empty list.
pub fn load_spawn_points_file(path: &Path) -> Result<Vec<SpawnPoint>, SpawnPointError> {
    if !path.exists() {
        debug!("No spawn point file at {:?}", path);
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(path).map_err(|e| SpawnPointError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;

    serde_json::from_str(&contents).map_err(|e| SpawnPointError::ParseError {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

/// Write `points` to `path`, creating parent directories. Nothing is written for an empty list.
pub fn save_spawn_points_file(path: &Path, points: &[SpawnPoint]) -> Result<(), SpawnPointError> {
    if points.is_empty() {
        return Ok(());
    }

    let write_error = |details: String| SpawnPointError::WriteError {
        path: path.display().to_string(),
        details,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
    }
    let json = serde_json::to_string(points).map_err(|e| write_error(e.to_string()))?;
    fs::write(path, json).map_err(|e| write_error(e.to_string()))
}

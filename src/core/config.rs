//! Plugin configuration loaded from `cfg/udm.ron`.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::weapons::WeaponTag;

/// Default location of the configuration file, relative to the server root.
pub const CONFIG_PATH: &str = "cfg/udm.ron";

/// High Explosive grenade equipment behaviour.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrenadePolicy {
    /// Never hand out grenades.
    Off,
    /// Equip one on spawn.
    #[default]
    OnSpawn,
    /// Equip on spawn and give the killer a new one after each HE grenade kill.
    OnSpawnAndKill,
    /// Equip on spawn and after each detonation.
    OnSpawnAndDetonation,
}

impl GrenadePolicy {
    pub fn equips_on_spawn(self) -> bool {
        self != GrenadePolicy::Off
    }
}

/// Errors that can occur when reading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {details}")]
    ReadError { path: String, details: String },

    #[error("Parse error in config '{path}': {details}")]
    ParseError { path: String, details: String },
}

/// Server-side rules for the deathmatch.
#[derive(Resource, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DeathmatchConfig {
    /// Game identifier, used to namespace data files (e.g. "csgo").
    pub game_name: String,
    /// Root of the plugin data directory.
    pub data_dir: PathBuf,
    /// Engine prefix of full weapon names.
    pub weapon_prefix: String,
    /// Namespace prepended to every delay key.
    pub delay_namespace: String,
    /// Seconds between the spawn event and battle preparation.
    pub equip_delay: f32,
    /// Seconds between death and respawn.
    pub respawn_delay: f32,
    /// Seconds of damage protection after spawning.
    pub spawn_protection_delay: f32,
    /// Minimum distance between a spawn point and any alive player.
    pub spawn_point_distance: f32,
    /// Maximum distance for removing the nearest spawn point.
    pub spawn_point_remove_tolerance: f32,
    pub equip_hegrenade: GrenadePolicy,
    /// Allowed switches between playing teams per level; 0 disables the limit.
    pub team_change_limit: u32,
    /// Weapon tags kept when a player is stripped during preparation.
    pub strip_keep: Vec<WeaponTag>,
    /// Extra seconds added to the reload animation before ammo is refilled.
    pub refill_tolerance: f32,
    /// Fixed RNG seed; entropy is used when absent.
    pub rng_seed: Option<u64>,
}

impl Default for DeathmatchConfig {
    fn default() -> Self {
        Self {
            game_name: "csgo".to_string(),
            data_dir: PathBuf::from("data"),
            weapon_prefix: "weapon_".to_string(),
            delay_namespace: "udm".to_string(),
            equip_delay: 0.0,
            respawn_delay: 2.0,
            spawn_protection_delay: 2.0,
            spawn_point_distance: 150.0,
            spawn_point_remove_tolerance: 20.0,
            equip_hegrenade: GrenadePolicy::OnSpawn,
            team_change_limit: 0,
            strip_keep: vec![WeaponTag::Melee, WeaponTag::Grenade],
            refill_tolerance: 1.0,
            rng_seed: None,
        }
    }
}

impl DeathmatchConfig {
    /// Parse a configuration from RON text.
    pub fn from_ron(contents: &str, path: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })
    }

    /// Read the configuration file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: display.clone(),
            details: e.to_string(),
        })?;

        Self::from_ron(&contents, &display)
    }

    /// Directory holding the per-level spawn point files for this game.
    pub fn spawn_points_dir(&self) -> PathBuf {
        self.data_dir.join("udm").join("spawnpoints").join(&self.game_name)
    }

    /// Path of the per-game weapons file.
    pub fn weapons_file(&self) -> PathBuf {
        self.data_dir
            .join("udm")
            .join("weapons")
            .join(format!("{}.ini", self.game_name))
    }
}

/// Load the configuration unless the host already inserted one.
pub fn load_config(mut commands: Commands, existing: Option<Res<DeathmatchConfig>>) {
    if existing.is_some() {
        return;
    }

    let path = Path::new(CONFIG_PATH);
    let config = match DeathmatchConfig::load(path) {
        Ok(config) => {
            info!("Loaded deathmatch config for game '{}'", config.game_name);
            config
        }
        Err(e) => {
            error!("{}; falling back to defaults", e);
            DeathmatchConfig::default()
        }
    };

    commands.insert_resource(config);
}

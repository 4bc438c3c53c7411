//! Spawn points plugin - per-level reload and world-level helpers.

use bevy::prelude::*;
use std::path::PathBuf;

use super::data::{load_spawn_points_file, save_spawn_points_file, spawn_points_file};
use super::error::SpawnPointError;
use super::selector::SpawnPoints;
use crate::core::{CurrentLevel, DeathmatchConfig, LevelEnded, LevelInitialized, PluginUnloading};
use crate::players::{Dead, Player, Team};

/// Spawn points plugin - keeps [`SpawnPoints`] in sync with the running level.
pub struct SpawnPointsPlugin;

impl Plugin for SpawnPointsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnPoints>()
            .add_systems(Update, (reload_on_level_init, clear_on_level_end));
    }
}

/// Replace the list with the new level's file. A bad file leaves the list empty.
fn reload_on_level_init(
    mut inits: EventReader<LevelInitialized>,
    config: Res<DeathmatchConfig>,
    mut points: ResMut<SpawnPoints>,
) {
    let Some(event) = inits.read().last() else {
        return;
    };

    points.clear();
    let path = spawn_points_file(&config.spawn_points_dir(), &event.map_name);
    match load_spawn_points_file(&path) {
        Ok(loaded) => {
            info!("Loaded {} spawn points for '{}'", loaded.len(), event.map_name);
            points.replace(loaded);
        }
        Err(e) => error!("{}", e),
    }
}

fn clear_on_level_end(
    mut ends: EventReader<LevelEnded>,
    mut unloads: EventReader<PluginUnloading>,
    mut points: ResMut<SpawnPoints>,
) {
    if ends.read().count() + unloads.read().count() > 0 {
        points.clear();
    }
}

/// Spawn-point file of the level currently running.
pub fn current_level_file(world: &World) -> Result<PathBuf, SpawnPointError> {
    let map_name = world
        .get_resource::<CurrentLevel>()
        .and_then(|level| level.map_name.clone())
        .ok_or(SpawnPointError::NoLevel)?;
    let dir = world
        .get_resource::<DeathmatchConfig>()
        .map(|config| config.spawn_points_dir())
        .unwrap_or_default();

    Ok(spawn_points_file(&dir, &map_name))
}

/// Write the current list to the level's file. Returns how many points were written.
pub fn save_spawn_points(world: &World) -> Result<usize, SpawnPointError> {
    let path = current_level_file(world)?;
    let Some(points) = world.get_resource::<SpawnPoints>() else {
        return Ok(0);
    };

    save_spawn_points_file(&path, points.as_slice())?;
    info!("Saved {} spawn points to {:?}", points.len(), path);
    Ok(points.len())
}

/// Positions of every living player on a playing team, except `exclude`.
pub fn alive_positions(world: &mut World, exclude: Option<Entity>) -> Vec<Vec3> {
    let mut query = world.query_filtered::<(Entity, &Transform, &Team), (With<Player>, Without<Dead>)>();
    query
        .iter(world)
        .filter(|(entity, _, team)| Some(*entity) != exclude && team.is_playing())
        .map(|(_, transform, _)| transform.translation)
        .collect()
}

//! Core plugin that registers host events, configuration and shared resources.

use bevy::prelude::*;

use super::config::load_config;
use super::events::*;
use super::rng::init_rng;

/// Startup ordering: configuration first, then everything derived from it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoadSet {
    Config,
    Data,
}

/// Name of the level currently running, set on level init.
#[derive(Resource, Debug, Default, Clone)]
pub struct CurrentLevel {
    pub map_name: Option<String>,
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Host events (spawn, death, round and level lifecycle, ...)
/// - The deathmatch configuration and RNG resources
/// - Tracking of the current level name
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<CurrentLevel>()

            // Host -> core
            .add_event::<PlayerSpawned>()
            .add_event::<PlayerDied>()
            .add_event::<RoundStarted>()
            .add_event::<RoundEnded>()
            .add_event::<LevelInitialized>()
            .add_event::<LevelEnded>()
            .add_event::<WeaponReloaded>()
            .add_event::<WeaponDropped>()
            .add_event::<GrenadeDetonated>()
            .add_event::<TeamChangeAttempt>()
            .add_event::<EntityDeleted>()
            .add_event::<ClientDisconnected>()
            .add_event::<PluginUnloading>()

            // Core -> host
            .add_event::<RespawnRequested>()
            .add_event::<TeamChangeRejected>()

            .configure_sets(Startup, (LoadSet::Config, LoadSet::Data).chain())
            .add_systems(Startup, load_config.in_set(LoadSet::Config))
            .add_systems(Startup, init_rng.in_set(LoadSet::Data))

            // Level bookkeeping runs before any handler that reads it
            .add_systems(PreUpdate, track_level);
    }
}

fn track_level(
    mut inits: EventReader<LevelInitialized>,
    mut ends: EventReader<LevelEnded>,
    mut level: ResMut<CurrentLevel>,
) {
    for _ in ends.read() {
        level.map_name = None;
    }
    for event in inits.read() {
        info!("Level initialized: {}", event.map_name);
        level.map_name = Some(event.map_name.clone());
    }
}

//! Host events consumed by the deathmatch core, and the requests it sends back.
//!
//! The host bridge translates engine notifications into these events. Every
//! event identifies players and weapons by their ECS entity; the core resolves
//! everything else (userid, unique id, tag) through its own lookups.

use bevy::prelude::*;

use crate::players::Team;

/// A player entity was (re)spawned by the engine.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerSpawned {
    pub player: Entity,
}

/// A player died.
///
/// `weapon` is the basename of the weapon that scored the kill, if any.
#[derive(Event, Debug, Clone)]
pub struct PlayerDied {
    pub victim: Entity,
    pub attacker: Option<Entity>,
    pub weapon: Option<String>,
}

/// A new round has started. Re-enables delay scheduling.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RoundStarted;

/// The current round is over. All pending delays are canceled.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RoundEnded;

/// The engine loaded a new level.
#[derive(Event, Debug, Clone)]
pub struct LevelInitialized {
    pub map_name: String,
}

/// The current level is being torn down.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct LevelEnded;

/// A player started reloading `weapon`; the animation takes `duration` seconds.
#[derive(Event, Debug, Clone, Copy)]
pub struct WeaponReloaded {
    pub player: Entity,
    pub weapon: Entity,
    pub duration: f32,
}

/// A player dropped `weapon` to the ground.
#[derive(Event, Debug, Clone, Copy)]
pub struct WeaponDropped {
    pub player: Entity,
    pub weapon: Entity,
}

/// A grenade thrown by `player` detonated.
#[derive(Event, Debug, Clone)]
pub struct GrenadeDetonated {
    pub player: Entity,
    pub basename: String,
}

/// A player asked to join `team`.
#[derive(Event, Debug, Clone, Copy)]
pub struct TeamChangeAttempt {
    pub player: Entity,
    pub team: Team,
}

/// An entity was removed from the server by the engine.
#[derive(Event, Debug, Clone, Copy)]
pub struct EntityDeleted {
    pub entity: Entity,
}

/// A client disconnected. The player entity is still present while this is handled.
#[derive(Event, Debug, Clone, Copy)]
pub struct ClientDisconnected {
    pub player: Entity,
}

/// The scripting host is unloading the plugin.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct PluginUnloading;

/// Sent by the core: the host should respawn `player` now.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RespawnRequested {
    pub player: Entity,
}

/// Sent by the core: a team change was refused because of the configured limit.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamChangeRejected {
    pub player: Entity,
    pub team: Team,
    pub changes: u32,
}

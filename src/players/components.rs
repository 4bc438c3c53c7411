//! Player-related components and the team-change ledger.

use bevy::prelude::*;
use std::collections::HashMap;

/// A connected client. Mirrors the engine's identifiers.
#[derive(Component, Debug, Clone)]
pub struct Player {
    /// Transient per-connection id. Used for delay keys.
    pub userid: u32,
    /// Stable identity (e.g. a SteamID). Keys everything that outlives a connection.
    pub unique_id: String,
    pub name: String,
}

impl Player {
    pub fn new(userid: u32, unique_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            userid,
            unique_id: unique_id.into(),
            name: name.into(),
        }
    }
}

/// Team a player belongs to, in engine index order.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Team {
    #[default]
    Unassigned,
    Spectator,
    Terrorist,
    CounterTerrorist,
}

impl Team {
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Only teams above spectator take part in the fight.
    pub fn is_playing(self) -> bool {
        self.index() > 1
    }
}

/// Player is dead and waiting to respawn.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;

/// Player takes no damage. The host bridge maps this to god mode.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Protected;

/// Player is in the admin spawn-point editor.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct EditingSpawnPoints;

/// Pitch, yaw and roll the player is looking at.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewAngle(pub Vec3);

/// Body armor.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Armor {
    pub value: u32,
    pub helmet: bool,
}

impl Armor {
    /// Kevlar and helmet.
    pub const FULL: Armor = Armor {
        value: 100,
        helmet: true,
    };
}

/// How often each player switched between playing teams on this level.
#[derive(Resource, Debug, Default)]
pub struct TeamChanges {
    counts: HashMap<String, u32>,
}

impl TeamChanges {
    pub fn count(&self, unique_id: &str) -> u32 {
        self.counts.get(unique_id).copied().unwrap_or(0)
    }

    /// Count one more change and return the new total.
    pub fn record(&mut self, unique_id: &str) -> u32 {
        let count = self.counts.entry(unique_id.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}

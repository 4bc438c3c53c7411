//! UDM - continuous deathmatch rules for a Source-style game server, in Bevy.
//!
//! Players respawn shortly after dying, pick their weapons once and get them
//! back on every spawn, and are placed on spawn points away from other players.
//!
//! # Architecture
//!
//! The host engine is mirrored into the ECS world by a bridge that sends host
//! events and owns the player and weapon entities. The rules are organized
//! into plugins:
//!
//! - **Core**: Host events, configuration, RNG, current level
//! - **Delays**: Named one-shot timers tied to the round lifecycle
//! - **Weapons**: Per-game weapon catalog, weapon entities, ammo refill
//! - **Inventory**: Recorded loadouts and reconciling held weapons with them
//! - **Spawn points**: Per-level spawn locations and safe selection
//! - **Players**: Spawn protection, battle preparation, respawn, team changes
//!
//! Menus and chat commands talk to the core through [`api::DeathmatchApi`].

pub mod api;
pub mod core;
pub mod delays;
pub mod inventory;
pub mod players;
pub mod spawn_points;
pub mod weapons;

use bevy::prelude::*;

pub use api::DeathmatchApi;

/// Main plugin that adds all sub-plugins.
pub struct DeathmatchPlugin;

impl Plugin for DeathmatchPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Timers
            .add_plugins(delays::DelayPlugin)

            // Weapons and loadouts
            .add_plugins(weapons::WeaponsPlugin)
            .add_plugins(inventory::InventoryPlugin)

            // Level data
            .add_plugins(spawn_points::SpawnPointsPlugin)

            // Player lifecycle
            .add_plugins(players::PlayersPlugin);
    }
}

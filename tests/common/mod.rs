//! Shared helpers for the headless integration tests.

#![allow(dead_code)]

use bevy::prelude::*;
use std::path::PathBuf;

use udm::core::{DeathmatchConfig, DeathmatchRng};
use udm::players::{Player, Team};
use udm::weapons::{OwnedBy, Weapon, WeaponCatalog, WeaponTag};
use udm::DeathmatchPlugin;

pub const WEAPONS_INI: &str = "\
[secondary]
glock = Glock-18, 20, 120
usp = USP, 12, 24, silencer

[primary]
ak47 = AK-47, 30, 90
m4a1 = M4A4, 30, 90
m4a1_silencer = M4A1-S, 20, 40
awp = AWP, 10, 30

[melee]
knife = Knife

[grenade]
hegrenade = HE Grenade
";

pub fn catalog() -> WeaponCatalog {
    WeaponCatalog::from_ini_str("weapon_", WEAPONS_INI).unwrap()
}

/// Fresh per-test data directory under the system temp dir.
pub fn temp_data_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("udm-test-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn test_config(data_dir: PathBuf) -> DeathmatchConfig {
    DeathmatchConfig {
        data_dir,
        rng_seed: Some(42),
        ..Default::default()
    }
}

/// Headless app with every deathmatch plugin and pre-inserted resources,
/// so nothing is read from the working directory.
pub fn create_app_with(config: DeathmatchConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeathmatchRng::seeded(42))
        .insert_resource(catalog())
        .insert_resource(config)
        .add_plugins(DeathmatchPlugin);

    // Runs Startup
    app.update();
    app
}

pub fn create_app(name: &str) -> App {
    create_app_with(test_config(temp_data_dir(name)))
}

pub fn spawn_player(app: &mut App, userid: u32, team: Team, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Player::new(userid, format!("STEAM_1:0:{}", userid), format!("player{}", userid)),
            team,
            Transform::from_translation(position),
        ))
        .id()
}

/// `(basename, tag)` of every weapon the player holds, sorted.
pub fn held(app: &mut App, player: Entity) -> Vec<(String, WeaponTag)> {
    let world = app.world_mut();
    let mut query = world.query::<(&Weapon, &OwnedBy)>();
    let mut held: Vec<(String, WeaponTag)> = query
        .iter(world)
        .filter(|(_, owner)| owner.0 == player)
        .map(|(weapon, _)| (weapon.basename.clone(), weapon.tag))
        .collect();
    held.sort();
    held
}

/// Drain every event of type `E` sent so far.
pub fn drain_events<E: Event + Clone>(app: &mut App) -> Vec<E> {
    app.world_mut()
        .resource_mut::<Events<E>>()
        .drain()
        .collect()
}

//! Battle preparation of a freshly spawned player.

use bevy::prelude::*;

use super::components::{Armor, Dead, EditingSpawnPoints, Player, Team, ViewAngle};
use super::protection::protect;
use crate::core::{with_rng, DeathmatchConfig};
use crate::delays::delay_key;
use crate::inventory::{equip_inventory, strip};
use crate::spawn_points::{alive_positions, SpawnPoints};
use crate::weapons::{WeaponCatalog, WeaponHost, WeaponTag};

/// Basename of the High Explosive grenade.
pub const HEGRENADE: &str = "hegrenade";

pub fn equip_key(userid: u32) -> String {
    delay_key("equip", userid)
}

pub fn respawn_key(userid: u32) -> String {
    delay_key("respawn", userid)
}

/// Connected, alive and on a playing team.
pub fn is_fighting(world: &World, player: Entity) -> bool {
    world.get::<Player>(player).is_some()
        && world.get::<Dead>(player).is_none()
        && world.get::<Team>(player).is_some_and(|team| team.is_playing())
}

/// Give an HE grenade unless the player already holds one.
pub fn give_hegrenade(world: &mut World, player: Entity) {
    let known = world
        .get_resource::<WeaponCatalog>()
        .is_some_and(|catalog| catalog.get(HEGRENADE).is_some());
    if !known {
        return;
    }

    let holding = world
        .held_of_tag(player, WeaponTag::Grenade)
        .iter()
        .any(|weapon| weapon.basename == HEGRENADE);
    if !holding {
        world.give_named_item(player, HEGRENADE);
    }
}

/// Move the player to a safe spawn point. Returns false when none is free
/// and the player stays where the engine put them.
pub fn place_at_spawn_point(world: &mut World, player: Entity, min_distance: f32) -> bool {
    let occupants = alive_positions(world, Some(player));
    let Some(points) = world.get_resource::<SpawnPoints>().cloned() else {
        return false;
    };

    let Some(point) = with_rng(world, |rng| points.get_random(rng, &occupants, min_distance)) else {
        debug!("No safe spawn point for {:?}, keeping engine position", player);
        return false;
    };

    if let Some(mut transform) = world.get_mut::<Transform>(player) {
        transform.translation = point.position;
    }
    world.entity_mut(player).insert(ViewAngle(point.angle));
    true
}

/// Arm, protect, place and equip a player that just spawned.
///
/// Does nothing for players who died or left in the meantime.
pub fn prepare_for_battle(world: &mut World, player: Entity) {
    if !is_fighting(world, player) {
        return;
    }
    let config = world
        .get_resource::<DeathmatchConfig>()
        .cloned()
        .unwrap_or_default();

    world.entity_mut(player).insert(Armor::FULL);
    if config.equip_hegrenade.equips_on_spawn() {
        give_hegrenade(world, player);
    }

    let editing = world.get::<EditingSpawnPoints>(player).is_some();
    protect(world, player, (!editing).then_some(config.spawn_protection_delay));

    place_at_spawn_point(world, player, config.spawn_point_distance);

    strip(world, player, &config.strip_keep);

    match equip_inventory(world, player) {
        Ok(equipped) => debug!("Equipped {} slot(s) for {:?}", equipped.len(), player),
        Err(e) => warn!("Could not equip {:?}: {}", player, e),
    }
}

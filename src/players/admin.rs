//! Admin spawn-point editing.

use bevy::prelude::*;

use super::components::{EditingSpawnPoints, ViewAngle};
use super::preparation::is_fighting;
use super::protection::{protect, protect_key, unprotect};
use super::Player;
use crate::delays::DelayWorldExt;
use crate::inventory::{equip_inventory, strip};
use crate::spawn_points::SpawnPoints;

/// Enter edit mode: protected until leaving, and unarmed.
pub fn enter_edit_mode(world: &mut World, player: Entity) {
    if world.get::<Player>(player).is_none() {
        return;
    }

    world.entity_mut(player).insert(EditingSpawnPoints);
    protect(world, player, None);
    let removed = strip(world, player, &[]);
    debug!("{:?} entered spawn point editing, {} weapon(s) removed", player, removed);
}

/// Leave edit mode: protection ends and the loadout comes back.
pub fn exit_edit_mode(world: &mut World, player: Entity) {
    let Some(userid) = world.get::<Player>(player).map(|p| p.userid) else {
        return;
    };

    world.entity_mut(player).remove::<EditingSpawnPoints>();
    world.cancel_delay(&protect_key(userid));
    unprotect(world, player);

    if is_fighting(world, player) {
        if let Err(e) = equip_inventory(world, player) {
            warn!("Could not re-equip {:?}: {}", player, e);
        }
    }
}

/// Move the player onto the spawn point at `index`.
pub fn teleport_to_spawn_point(world: &mut World, player: Entity, index: usize) -> bool {
    let Some(point) = world
        .get_resource::<SpawnPoints>()
        .and_then(|points| points.get(index).copied())
    else {
        return false;
    };
    let Some(mut transform) = world.get_mut::<Transform>(player) else {
        return false;
    };

    transform.translation = point.position;
    world.entity_mut(player).insert(ViewAngle(point.angle));
    true
}

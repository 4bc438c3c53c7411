//! Entity operations the core needs from the host engine.
//!
//! The inventory logic only talks to [`WeaponHost`]. The `World`
//! implementation keeps weapons as ECS entities that the host bridge mirrors.

use bevy::prelude::*;

use super::catalog::{WeaponCatalog, WeaponTag};
use super::components::{OwnedBy, Weapon};
use crate::delays::{delay_key, DelayWorldExt};
use crate::players::Player;

/// Snapshot of a weapon a player is holding.
#[derive(Debug, Clone, PartialEq)]
pub struct HeldWeapon {
    pub entity: Entity,
    pub basename: String,
    pub tag: WeaponTag,
    pub silencer_on: bool,
}

/// Give, remove and inspect weapons of a player.
pub trait WeaponHost {
    /// Every weapon `player` is holding.
    fn held_weapons(&mut self, player: Entity) -> Vec<HeldWeapon>;

    /// Grant a weapon by basename or full name. `None` when the weapon or the player is unknown.
    fn give_named_item(&mut self, player: Entity, name: &str) -> Option<Entity>;

    fn remove_weapon(&mut self, weapon: Entity);

    fn set_silencer(&mut self, weapon: Entity, on: bool);

    /// Weapons of `tag` that `player` is holding.
    fn held_of_tag(&mut self, player: Entity, tag: WeaponTag) -> Vec<HeldWeapon> {
        self.held_weapons(player)
            .into_iter()
            .filter(|weapon| weapon.tag == tag)
            .collect()
    }
}

/// Delay key of the pending ammo refill for `weapon`.
pub fn refill_key(weapon: Entity) -> String {
    delay_key("refill", weapon.to_bits())
}

impl WeaponHost for World {
    fn held_weapons(&mut self, player: Entity) -> Vec<HeldWeapon> {
        let mut query = self.query::<(Entity, &Weapon, &OwnedBy)>();
        let mut held: Vec<HeldWeapon> = query
            .iter(self)
            .filter(|(_, _, owner)| owner.0 == player)
            .map(|(entity, weapon, _)| HeldWeapon {
                entity,
                basename: weapon.basename.clone(),
                tag: weapon.tag,
                silencer_on: weapon.silencer_on,
            })
            .collect();
        held.sort_by_key(|weapon| weapon.entity);
        held
    }

    fn give_named_item(&mut self, player: Entity, name: &str) -> Option<Entity> {
        if self.get::<Player>(player).is_none() {
            debug!("give_named_item: {:?} is not a connected player", player);
            return None;
        }

        let catalog = self.get_resource::<WeaponCatalog>()?;
        let Some(descriptor) = catalog.lookup(name) else {
            warn!("give_named_item: unknown weapon '{}'", name);
            return None;
        };

        let weapon = Weapon {
            basename: descriptor.basename.clone(),
            tag: descriptor.tag,
            silencer_on: descriptor.silenced,
            clip: descriptor.clip_size,
            ammo: descriptor.max_ammo,
        };

        Some(self.spawn((weapon, OwnedBy(player))).id())
    }

    fn remove_weapon(&mut self, weapon: Entity) {
        self.cancel_delay(&refill_key(weapon));
        self.despawn(weapon);
    }

    fn set_silencer(&mut self, weapon: Entity, on: bool) {
        if let Some(mut state) = self.get_mut::<Weapon>(weapon) {
            state.silencer_on = on;
        }
    }
}

/// Remove every weapon lying idle on the ground.
pub fn remove_idle_weapons(world: &mut World) {
    let mut query = world.query_filtered::<Entity, (With<Weapon>, Without<OwnedBy>)>();
    let idle: Vec<Entity> = query.iter(world).collect();

    if !idle.is_empty() {
        debug!("Removing {} idle weapon(s)", idle.len());
    }
    for weapon in idle {
        world.remove_weapon(weapon);
    }
}

/// Set the reserve ammo of a still-held weapon back to the catalog maximum.
pub fn refill_ammo(world: &mut World, weapon: Entity) {
    if world.get::<OwnedBy>(weapon).is_none() {
        return;
    }
    let Some(catalog) = world.get_resource::<WeaponCatalog>().cloned() else {
        return;
    };
    let Some(mut state) = world.get_mut::<Weapon>(weapon) else {
        return;
    };
    if let Some(descriptor) = catalog.get(&state.basename) {
        state.ammo = descriptor.max_ammo;
    }
}

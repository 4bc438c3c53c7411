//! Reconcile what a player holds with a recorded inventory.
//!
//! Everything here goes through [`WeaponHost`] so it can be driven against
//! the ECS world or a recording host in tests.

use bevy::prelude::*;

use super::components::{Inventory, InventorySlotItem};
use crate::weapons::{WeaponCatalog, WeaponHost, WeaponTag};

/// What [`equip_slot`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipOutcome {
    /// The player already held the right weapon in the right state.
    /// Other weapons of the tag are still removed.
    Unchanged,
    /// Attachment toggled in place on the held weapon.
    Toggled,
    /// A held weapon of the same tag was removed and the target granted.
    Replaced,
    /// Nothing of the tag was held; the target was granted.
    Granted,
    /// The target is not in the catalog or the host refused it.
    Failed,
}

/// Make the player's weapon of `item.tag` match `item`.
///
/// Repeated calls with the same item leave the host untouched.
pub fn equip_slot<H: WeaponHost + ?Sized>(
    host: &mut H,
    catalog: &WeaponCatalog,
    player: Entity,
    item: &InventorySlotItem,
) -> EquipOutcome {
    let target = item.target_basename(catalog);
    let Some(descriptor) = catalog.get(&target) else {
        warn!("Cannot equip unknown weapon '{}'", target);
        return EquipOutcome::Failed;
    };
    let attachment = descriptor.silencer_attachment;

    let held = host.held_of_tag(player, item.tag);

    if let Some(current) = held.iter().find(|weapon| weapon.basename == target) {
        // Keep one weapon per tag even if the host handed out extras
        for extra in held.iter().filter(|weapon| weapon.entity != current.entity) {
            host.remove_weapon(extra.entity);
        }
        if attachment && current.silencer_on != item.silencer {
            host.set_silencer(current.entity, item.silencer);
            return EquipOutcome::Toggled;
        }
        return EquipOutcome::Unchanged;
    }

    for weapon in &held {
        host.remove_weapon(weapon.entity);
    }

    let Some(granted) = host.give_named_item(player, &target) else {
        warn!("Host refused to give '{}' to {:?}", target, player);
        return EquipOutcome::Failed;
    };
    if attachment && item.silencer {
        host.set_silencer(granted, true);
    }

    if held.is_empty() {
        EquipOutcome::Granted
    } else {
        EquipOutcome::Replaced
    }
}

/// Equip every slot of `inventory` in equip order.
pub fn equip_all<H: WeaponHost + ?Sized>(
    host: &mut H,
    catalog: &WeaponCatalog,
    player: Entity,
    inventory: &Inventory,
) -> Vec<(WeaponTag, EquipOutcome)> {
    inventory
        .iter()
        .map(|item| (item.tag, equip_slot(host, catalog, player, item)))
        .collect()
}

/// Remove held weapons of `tag` and forget the recorded slot.
pub fn remove_slot<H: WeaponHost + ?Sized>(
    host: &mut H,
    player: Entity,
    inventory: &mut Inventory,
    tag: WeaponTag,
) -> Option<InventorySlotItem> {
    for weapon in host.held_of_tag(player, tag) {
        host.remove_weapon(weapon.entity);
    }
    inventory.remove(tag)
}

/// Remove every held weapon whose tag is not in `keep`. Returns how many went.
pub fn strip<H: WeaponHost + ?Sized>(host: &mut H, player: Entity, keep: &[WeaponTag]) -> usize {
    let doomed: Vec<Entity> = host
        .held_weapons(player)
        .into_iter()
        .filter(|weapon| !keep.contains(&weapon.tag))
        .map(|weapon| weapon.entity)
        .collect();

    for &weapon in &doomed {
        host.remove_weapon(weapon);
    }
    doomed.len()
}

//! Inventory actions on a player entity in the world.

use bevy::prelude::*;

use super::components::{Inventory, InventorySlotItem};
use super::equip::{equip_all, equip_slot, remove_slot, EquipOutcome};
use super::error::InventoryError;
use super::registry::Inventories;
use crate::core::with_rng;
use crate::players::{is_fighting, Player};
use crate::weapons::{WeaponCatalog, WeaponTag};

fn catalog(world: &World) -> Result<WeaponCatalog, InventoryError> {
    world
        .get_resource::<WeaponCatalog>()
        .cloned()
        .ok_or(InventoryError::NoCatalog)
}

fn unique_id(world: &World, player: Entity) -> Result<String, InventoryError> {
    world
        .get::<Player>(player)
        .map(|p| p.unique_id.clone())
        .ok_or(InventoryError::NotAPlayer(player))
}

fn inventories(world: &mut World) -> Mut<'_, Inventories> {
    world.get_resource_or_insert_with(Inventories::default)
}

/// Record `name` in the player's selected loadout and equip that slot if they are fighting.
///
/// Returns `None` when the choice was only recorded.
pub fn choose_weapon(
    world: &mut World,
    player: Entity,
    name: &str,
) -> Result<Option<EquipOutcome>, InventoryError> {
    let catalog = catalog(world)?;
    let uid = unique_id(world, player)?;
    let descriptor = catalog
        .lookup(name)
        .ok_or_else(|| InventoryError::UnknownWeapon(name.to_string()))?;

    let item = InventorySlotItem::from_descriptor(descriptor);
    inventories(world).selected_mut(&uid).insert(item.clone());
    debug!("{} chose {} for {}", uid, item.basename, item.tag);

    if !is_fighting(world, player) {
        return Ok(None);
    }
    Ok(Some(equip_slot(world, &catalog, player, &item)))
}

/// Change the silencer preference of a recorded slot and re-equip it.
pub fn set_silencer(
    world: &mut World,
    player: Entity,
    tag: WeaponTag,
    on: bool,
) -> Result<Option<EquipOutcome>, InventoryError> {
    let catalog = catalog(world)?;
    let uid = unique_id(world, player)?;

    let item = {
        let mut inventories = inventories(world);
        let slot = inventories
            .selected_mut(&uid)
            .get_mut(tag)
            .ok_or(InventoryError::EmptySlot(tag))?;
        slot.silencer = on;
        slot.clone()
    };

    if !is_fighting(world, player) {
        return Ok(None);
    }
    Ok(Some(equip_slot(world, &catalog, player, &item)))
}

/// Remove the held weapon of `tag` and forget the slot.
pub fn remove_inventory_slot(
    world: &mut World,
    player: Entity,
    tag: WeaponTag,
) -> Result<Option<InventorySlotItem>, InventoryError> {
    let uid = unique_id(world, player)?;
    inventories(world);

    Ok(world.resource_scope(|world, mut inventories: Mut<Inventories>| {
        remove_slot(world, player, inventories.selected_mut(&uid), tag)
    }))
}

/// Forget every recorded slot of the selected loadout.
pub fn clear_inventory(world: &mut World, player: Entity) -> Result<(), InventoryError> {
    let uid = unique_id(world, player)?;
    inventories(world).selected_mut(&uid).clear();
    Ok(())
}

/// Equip the selected loadout, or one random weapon per tag when it is empty.
///
/// The random fallback is not recorded. Returns the slots that were equipped.
pub fn equip_inventory(
    world: &mut World,
    player: Entity,
) -> Result<Vec<(WeaponTag, EquipOutcome)>, InventoryError> {
    let catalog = catalog(world)?;
    let uid = unique_id(world, player)?;

    let recorded = inventories(world).selected(&uid).cloned().unwrap_or_default();
    let inventory = if recorded.is_empty() {
        debug!("{} has no loadout, equipping random weapons", uid);
        with_rng(world, |rng| Inventory::random(&catalog, rng))
    } else {
        recorded
    };

    Ok(equip_all(world, &catalog, player, &inventory))
}

pub fn inventory_selection(world: &World, player: Entity) -> Result<usize, InventoryError> {
    let uid = unique_id(world, player)?;
    Ok(world
        .get_resource::<Inventories>()
        .map_or(0, |inventories| inventories.selection(&uid)))
}

pub fn set_inventory_selection(
    world: &mut World,
    player: Entity,
    index: usize,
) -> Result<(), InventoryError> {
    let uid = unique_id(world, player)?;
    inventories(world).set_selection(&uid, index);
    Ok(())
}

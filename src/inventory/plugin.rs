//! Inventory plugin - registry lifetime and dropped weapons.

use bevy::prelude::*;

use super::registry::Inventories;
use crate::core::{LevelInitialized, PluginUnloading, WeaponDropped};
use crate::players::{Dead, Player, PlayerLifecycle};
use crate::weapons::{family_of, OwnedBy, Weapon};

/// Inventory plugin - owns the per-player loadouts.
pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Inventories>()
            .add_systems(
                Update,
                (
                    forget_on_level_change,
                    handle_weapon_drops.after(PlayerLifecycle),
                ),
            );
    }
}

fn forget_on_level_change(
    mut inits: EventReader<LevelInitialized>,
    mut unloads: EventReader<PluginUnloading>,
    mut inventories: ResMut<Inventories>,
) {
    if inits.read().count() + unloads.read().count() > 0 && !inventories.is_empty() {
        info!("Clearing {} player inventories", inventories.len());
        inventories.clear();
    }
}

/// A living player who drops a recorded weapon loses that slot. Deaths in
/// the same frame are already marked, so a victim's drop keeps it.
fn handle_weapon_drops(
    mut commands: Commands,
    mut drops: EventReader<WeaponDropped>,
    weapons: Query<&Weapon>,
    players: Query<&Player, Without<Dead>>,
    mut inventories: ResMut<Inventories>,
) {
    for event in drops.read() {
        if let Some(mut weapon) = commands.get_entity(event.weapon) {
            weapon.remove::<OwnedBy>();
        }

        let (Ok(weapon), Ok(player)) = (weapons.get(event.weapon), players.get(event.player)) else {
            continue;
        };

        let inventory = inventories.selected_mut(&player.unique_id);
        let recorded = inventory
            .get(weapon.tag)
            .is_some_and(|item| family_of(&item.basename) == family_of(&weapon.basename));
        if recorded {
            inventory.remove(weapon.tag);
            debug!("{} dropped {}, slot cleared", player.name, weapon.basename);
        }
    }
}

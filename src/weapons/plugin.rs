//! Weapons plugin - catalog loading and ammo upkeep.

use bevy::prelude::*;

use super::catalog::{WeaponCatalog, WeaponTag};
use super::components::Weapon;
use super::data::load_weapons_file;
use super::host::{refill_ammo, refill_key};
use crate::core::{DeathmatchConfig, EntityDeleted, LoadSet, WeaponReloaded};
use crate::delays::{CancelPolicy, DelayCommandsExt};

/// Weapons plugin - loads the per-game catalog and refills ammo on reload.
pub struct WeaponsPlugin;

impl Plugin for WeaponsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_weapon_catalog.in_set(LoadSet::Data))
            .add_systems(Update, (schedule_refill_on_reload, cancel_refill_on_delete));
    }
}

/// Load the weapons file for the configured game.
///
/// A malformed file is a deployment error and aborts the server.
pub fn load_weapon_catalog(
    mut commands: Commands,
    config: Res<DeathmatchConfig>,
    existing: Option<Res<WeaponCatalog>>,
) {
    if existing.is_some() {
        return;
    }

    let path = config.weapons_file();
    let catalog = load_weapons_file(&path)
        .and_then(|entries| WeaponCatalog::from_entries(&config.weapon_prefix, entries));

    match catalog {
        Ok(catalog) => {
            info!("Loaded {} weapons from {:?}", catalog.len(), path);
            commands.insert_resource(catalog);
        }
        Err(e) => {
            error!("Weapon catalog could not be built: {}", e);
            panic!("invalid weapons file {:?}: {}", path, e);
        }
    }
}

/// Refill the weapon's reserve ammo once the reload animation has finished.
fn schedule_refill_on_reload(
    mut commands: Commands,
    mut reloads: EventReader<WeaponReloaded>,
    weapons: Query<&Weapon>,
    config: Res<DeathmatchConfig>,
) {
    for event in reloads.read() {
        let Ok(weapon) = weapons.get(event.weapon) else {
            continue;
        };
        if weapon.tag == WeaponTag::Melee {
            continue;
        }

        let entity = event.weapon;
        commands.schedule_delay(
            refill_key(entity),
            event.duration.max(0.0) + config.refill_tolerance,
            CancelPolicy::Drop,
            move |world: &mut World| refill_ammo(world, entity),
        );
    }
}

fn cancel_refill_on_delete(mut commands: Commands, mut deleted: EventReader<EntityDeleted>) {
    for event in deleted.read() {
        commands.cancel_delay(refill_key(event.entity));
    }
}

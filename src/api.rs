//! Operations exposed to the presentation layer (menus, chat commands).

use bevy::prelude::*;

use crate::core::DeathmatchConfig;
use crate::delays::{CancelPolicy, DelayWorldExt};
use crate::inventory::{self, EquipOutcome, InventoryError};
use crate::players;
use crate::spawn_points::{self, SpawnPoint, SpawnPointError, SpawnPoints};
use crate::weapons::WeaponTag;

/// Everything a menu or command handler can ask of the deathmatch core.
pub trait DeathmatchApi {
    /// Record a weapon choice and equip it when the player is fighting.
    fn choose_weapon(
        &mut self,
        player: Entity,
        name: &str,
    ) -> Result<Option<EquipOutcome>, InventoryError>;

    /// Equip the selected loadout, or random weapons when it is empty.
    fn equip_inventory(
        &mut self,
        player: Entity,
    ) -> Result<Vec<(WeaponTag, EquipOutcome)>, InventoryError>;

    fn inventory_selection(&self, player: Entity) -> Result<usize, InventoryError>;

    fn set_inventory_selection(&mut self, player: Entity, index: usize) -> Result<(), InventoryError>;

    fn clear_inventory(&mut self, player: Entity) -> Result<(), InventoryError>;

    fn set_silencer_preference(
        &mut self,
        player: Entity,
        tag: WeaponTag,
        on: bool,
    ) -> Result<Option<EquipOutcome>, InventoryError>;

    fn spawn_points(&self) -> Vec<SpawnPoint>;

    /// Add a spawn point unless it is too close to an existing one.
    fn add_spawn_point_at(&mut self, position: Vec3, angle: Vec3) -> bool;

    fn remove_nearest_spawn_point(&mut self, position: Vec3, tolerance: f32) -> Option<SpawnPoint>;

    /// Remove the point an admin is standing on, within the configured tolerance.
    fn remove_spawn_point_near(&mut self, position: Vec3) -> Option<SpawnPoint>;

    fn save_spawn_points(&self) -> Result<usize, SpawnPointError>;

    fn teleport_to_spawn_point(&mut self, player: Entity, index: usize) -> bool;

    fn enter_edit_mode(&mut self, player: Entity);

    fn exit_edit_mode(&mut self, player: Entity);

    /// Schedule a one-shot callback under `key`, replacing any pending one.
    fn schedule_callback(
        &mut self,
        key: &str,
        seconds: f32,
        invoke_on_cancel: bool,
        callback: impl FnOnce(&mut World) + Send + Sync + 'static,
    );

    fn cancel_callback(&mut self, key: &str);
}

impl DeathmatchApi for World {
    fn choose_weapon(
        &mut self,
        player: Entity,
        name: &str,
    ) -> Result<Option<EquipOutcome>, InventoryError> {
        inventory::choose_weapon(self, player, name)
    }

    fn equip_inventory(
        &mut self,
        player: Entity,
    ) -> Result<Vec<(WeaponTag, EquipOutcome)>, InventoryError> {
        inventory::equip_inventory(self, player)
    }

    fn inventory_selection(&self, player: Entity) -> Result<usize, InventoryError> {
        inventory::inventory_selection(self, player)
    }

    fn set_inventory_selection(&mut self, player: Entity, index: usize) -> Result<(), InventoryError> {
        inventory::set_inventory_selection(self, player, index)
    }

    fn clear_inventory(&mut self, player: Entity) -> Result<(), InventoryError> {
        inventory::clear_inventory(self, player)
    }

    fn set_silencer_preference(
        &mut self,
        player: Entity,
        tag: WeaponTag,
        on: bool,
    ) -> Result<Option<EquipOutcome>, InventoryError> {
        inventory::set_silencer(self, player, tag, on)
    }

    fn spawn_points(&self) -> Vec<SpawnPoint> {
        self.get_resource::<SpawnPoints>()
            .map(|points| points.as_slice().to_vec())
            .unwrap_or_default()
    }

    fn add_spawn_point_at(&mut self, position: Vec3, angle: Vec3) -> bool {
        let min_distance = self
            .get_resource::<DeathmatchConfig>()
            .map_or(DeathmatchConfig::default().spawn_point_distance, |c| c.spawn_point_distance);

        let added = self
            .get_resource_or_insert_with(SpawnPoints::default)
            .add_separated(SpawnPoint::new(position, angle), min_distance);
        if !added {
            debug!("Spawn point at {} is too close to an existing one", position);
        }
        added
    }

    fn remove_nearest_spawn_point(&mut self, position: Vec3, tolerance: f32) -> Option<SpawnPoint> {
        self.get_resource_mut::<SpawnPoints>()?
            .remove_nearest(position, tolerance)
    }

    fn remove_spawn_point_near(&mut self, position: Vec3) -> Option<SpawnPoint> {
        let tolerance = self
            .get_resource::<DeathmatchConfig>()
            .map_or(DeathmatchConfig::default().spawn_point_remove_tolerance, |c| {
                c.spawn_point_remove_tolerance
            });
        self.remove_nearest_spawn_point(position, tolerance)
    }

    fn save_spawn_points(&self) -> Result<usize, SpawnPointError> {
        spawn_points::save_spawn_points(self)
    }

    fn teleport_to_spawn_point(&mut self, player: Entity, index: usize) -> bool {
        players::teleport_to_spawn_point(self, player, index)
    }

    fn enter_edit_mode(&mut self, player: Entity) {
        players::enter_edit_mode(self, player);
    }

    fn exit_edit_mode(&mut self, player: Entity) {
        players::exit_edit_mode(self, player);
    }

    fn schedule_callback(
        &mut self,
        key: &str,
        seconds: f32,
        invoke_on_cancel: bool,
        callback: impl FnOnce(&mut World) + Send + Sync + 'static,
    ) {
        let policy = if invoke_on_cancel {
            CancelPolicy::Invoke
        } else {
            CancelPolicy::Drop
        };
        self.schedule_delay(key, seconds, policy, callback);
    }

    fn cancel_callback(&mut self, key: &str) {
        self.cancel_delay(key);
    }
}

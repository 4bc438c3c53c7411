//! Per-player inventory registry keyed by the stable unique id.

use bevy::prelude::*;
use std::collections::{BTreeMap, HashMap};

use super::components::Inventory;

/// Saved loadouts of one player and the one currently selected.
#[derive(Debug, Default, Clone)]
pub struct PlayerLoadouts {
    loadouts: BTreeMap<usize, Inventory>,
    selection: usize,
}

/// Inventory registry resource. Survives respawns; cleared on level change.
#[derive(Resource, Debug, Default)]
pub struct Inventories {
    players: HashMap<String, PlayerLoadouts>,
}

impl Inventories {
    /// Selected loadout index, 0 if the player never chose one.
    pub fn selection(&self, unique_id: &str) -> usize {
        self.players
            .get(unique_id)
            .map_or(0, |loadouts| loadouts.selection)
    }

    pub fn set_selection(&mut self, unique_id: &str, index: usize) {
        self.players.entry(unique_id.to_string()).or_default().selection = index;
    }

    pub fn loadout(&self, unique_id: &str, index: usize) -> Option<&Inventory> {
        self.players.get(unique_id)?.loadouts.get(&index)
    }

    pub fn loadout_mut(&mut self, unique_id: &str, index: usize) -> &mut Inventory {
        self.players
            .entry(unique_id.to_string())
            .or_default()
            .loadouts
            .entry(index)
            .or_default()
    }

    /// The currently selected loadout, if it was ever created.
    pub fn selected(&self, unique_id: &str) -> Option<&Inventory> {
        self.loadout(unique_id, self.selection(unique_id))
    }

    pub fn selected_mut(&mut self, unique_id: &str) -> &mut Inventory {
        let index = self.selection(unique_id);
        self.loadout_mut(unique_id, index)
    }

    pub fn forget(&mut self, unique_id: &str) {
        self.players.remove(unique_id);
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

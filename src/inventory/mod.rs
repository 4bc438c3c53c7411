//! Inventory module - recorded loadouts and reconciling them with held weapons.

mod actions;
mod components;
mod equip;
mod error;
mod plugin;
mod registry;

pub use actions::{
    choose_weapon, clear_inventory, equip_inventory, inventory_selection, remove_inventory_slot,
    set_inventory_selection, set_silencer,
};
pub use components::{Inventory, InventorySlotItem};
pub use equip::{equip_all, equip_slot, remove_slot, strip, EquipOutcome};
pub use error::InventoryError;
pub use plugin::InventoryPlugin;
pub use registry::{Inventories, PlayerLoadouts};

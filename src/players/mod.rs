//! Players module - player state, spawn protection and battle preparation.

mod admin;
mod components;
mod plugin;
mod preparation;
mod protection;

pub use admin::{enter_edit_mode, exit_edit_mode, teleport_to_spawn_point};
pub use components::{Armor, Dead, EditingSpawnPoints, Player, Protected, Team, TeamChanges, ViewAngle};
pub use plugin::{PlayerLifecycle, PlayersPlugin, REMOVE_IDLE_KEY};
pub use preparation::{
    equip_key, give_hegrenade, is_fighting, place_at_spawn_point, prepare_for_battle, respawn_key,
    HEGRENADE,
};
pub use protection::{protect, protect_key, unprotect};

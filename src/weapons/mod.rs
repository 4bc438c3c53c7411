//! Weapons module - catalog, weapon entities and the host seam.

mod catalog;
mod components;
pub mod data;
mod error;
mod host;
mod plugin;

pub use catalog::{family_of, WeaponCatalog, WeaponDescriptor, WeaponTag, SILENCER_SUFFIX};
pub use components::{OwnedBy, Weapon};
pub use error::CatalogError;
pub use host::{refill_ammo, refill_key, remove_idle_weapons, HeldWeapon, WeaponHost};
pub use plugin::{load_weapon_catalog, WeaponsPlugin};

//! Weapon entity components.

use bevy::prelude::*;

use super::catalog::WeaponTag;

/// A weapon entity in the world.
#[derive(Component, Debug, Clone)]
pub struct Weapon {
    pub basename: String,
    pub tag: WeaponTag,
    /// Silencer attachment state (always set for `_silencer` variants).
    pub silencer_on: bool,
    /// Rounds in the clip
    pub clip: u32,
    /// Reserve ammo
    pub ammo: u32,
}

/// The player currently holding this weapon. Weapons without it lie idle on the ground.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnedBy(pub Entity);

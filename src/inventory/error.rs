//! Error types for inventory actions.

use bevy::prelude::*;
use thiserror::Error;

use crate::weapons::WeaponTag;

#[derive(Debug, Error, PartialEq)]
pub enum InventoryError {
    #[error("Unknown weapon '{0}'")]
    UnknownWeapon(String),

    #[error("{0:?} is not a connected player")]
    NotAPlayer(Entity),

    #[error("No weapon catalog is loaded")]
    NoCatalog,

    /// Nothing is recorded for the tag.
    #[error("No {0} weapon chosen")]
    EmptySlot(WeaponTag),
}

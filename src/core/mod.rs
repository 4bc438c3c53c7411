//! Core module - host events, configuration and shared resources.
//!
//! This module provides the foundation that all other deathmatch systems build upon.

mod config;
mod events;
mod plugin;
mod rng;

pub use config::{ConfigError, DeathmatchConfig, GrenadePolicy, CONFIG_PATH};
pub use events::*;
pub use plugin::{CorePlugin, CurrentLevel, LoadSet};
pub use rng::{with_rng, DeathmatchRng};

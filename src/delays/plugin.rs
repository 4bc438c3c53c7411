//! Delay plugin - ticks the registry and ties it to the round lifecycle.

use bevy::prelude::*;

use super::registry::DelayRegistry;
use super::world::{DelayCommandsExt, DelayWorldExt};
use crate::core::{
    DeathmatchConfig, LevelEnded, LoadSet, PluginUnloading, RoundEnded, RoundStarted,
};

/// Delay plugin - owns the delay registry and polls it once per tick.
pub struct DelayPlugin;

impl Plugin for DelayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, init_registry.in_set(LoadSet::Data))
            .add_systems(PreUpdate, handle_round_lifecycle)
            .add_systems(Update, tick_delays);
    }
}

fn init_registry(
    mut commands: Commands,
    config: Res<DeathmatchConfig>,
    existing: Option<Res<DelayRegistry>>,
) {
    if existing.is_none() {
        commands.insert_resource(DelayRegistry::new(config.delay_namespace.clone()));
    }
}

/// Fire every delay that became due during this tick.
pub fn tick_delays(world: &mut World) {
    let delta = world.resource::<Time>().delta_secs();
    world.advance_delays(delta);
}

fn handle_round_lifecycle(
    mut commands: Commands,
    mut round_starts: EventReader<RoundStarted>,
    mut round_ends: EventReader<RoundEnded>,
    mut level_ends: EventReader<LevelEnded>,
    mut unloads: EventReader<PluginUnloading>,
) {
    let ended = round_ends.read().count() + level_ends.read().count() + unloads.read().count();
    if ended > 0 {
        debug!("Round or level over, canceling all pending delays");
        commands.clear_delays();
    }

    if round_starts.read().count() > 0 {
        commands.enable_delays();
    }
}

//! UDM - Headless entry point
//!
//! Runs the deathmatch rules on a fixed tick. The engine bridge adds its own
//! plugin on top of this app to feed host events and mirror entities.
//!
//! Files read at startup:
//! - `cfg/udm.ron`: rules (optional)
//! - `data/udm/weapons/<game>.ini`: weapon catalog (required)

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use std::time::Duration;

/// Source servers tick at 64 Hz by default.
const TICK_RATE: f64 = 64.0;

fn main() {
    App::new()
        // Headless runtime
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / TICK_RATE,
            ))),
        )
        .add_plugins(LogPlugin::default())

        // Our deathmatch plugin
        .add_plugins(udm::DeathmatchPlugin)

        .run();
}

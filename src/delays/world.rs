//! World and Commands helpers that run registry callbacks against the world.

use bevy::prelude::*;

use super::registry::{CancelPolicy, DelayCallback, DelayRegistry};

/// Build a conventional `{purpose}_{id}` delay key.
pub fn delay_key(purpose: &str, id: impl std::fmt::Display) -> String {
    format!("{}_{}", purpose, id)
}

/// Delay operations on the world that owns the [`DelayRegistry`].
pub trait DelayWorldExt {
    fn schedule_delay(
        &mut self,
        key: &str,
        seconds: f32,
        policy: CancelPolicy,
        callback: impl FnOnce(&mut World) + Send + Sync + 'static,
    );

    fn cancel_delay(&mut self, key: &str);

    fn clear_delays(&mut self);

    /// Advance the delay clock and run everything that became due.
    fn advance_delays(&mut self, seconds: f32);
}

fn run_callbacks(world: &mut World, callbacks: Vec<DelayCallback>) {
    for callback in callbacks {
        callback(world);
    }
}

impl DelayWorldExt for World {
    fn schedule_delay(
        &mut self,
        key: &str,
        seconds: f32,
        policy: CancelPolicy,
        callback: impl FnOnce(&mut World) + Send + Sync + 'static,
    ) {
        let Some(mut registry) = self.get_resource_mut::<DelayRegistry>() else {
            warn!("No delay registry, dropping '{}'", key);
            return;
        };
        let replaced = registry.schedule(key, seconds, policy, Box::new(callback));

        if let Some(callback) = replaced {
            callback(self);
        }
    }

    fn cancel_delay(&mut self, key: &str) {
        let Some(mut registry) = self.get_resource_mut::<DelayRegistry>() else {
            return;
        };
        if let Some(callback) = registry.cancel(key) {
            callback(self);
        }
    }

    fn clear_delays(&mut self) {
        let Some(mut registry) = self.get_resource_mut::<DelayRegistry>() else {
            return;
        };
        let canceled = registry.clear();
        run_callbacks(self, canceled);
    }

    fn advance_delays(&mut self, seconds: f32) {
        let Some(mut registry) = self.get_resource_mut::<DelayRegistry>() else {
            return;
        };
        let due = registry.advance(seconds);
        run_callbacks(self, due);
    }
}

/// Queue delay operations from regular systems.
pub trait DelayCommandsExt {
    fn schedule_delay(
        &mut self,
        key: String,
        seconds: f32,
        policy: CancelPolicy,
        callback: impl FnOnce(&mut World) + Send + Sync + 'static,
    );

    fn cancel_delay(&mut self, key: String);

    fn clear_delays(&mut self);

    fn enable_delays(&mut self);
}

impl DelayCommandsExt for Commands<'_, '_> {
    fn schedule_delay(
        &mut self,
        key: String,
        seconds: f32,
        policy: CancelPolicy,
        callback: impl FnOnce(&mut World) + Send + Sync + 'static,
    ) {
        self.queue(move |world: &mut World| {
            world.schedule_delay(&key, seconds, policy, callback);
        });
    }

    fn cancel_delay(&mut self, key: String) {
        self.queue(move |world: &mut World| world.cancel_delay(&key));
    }

    fn clear_delays(&mut self) {
        self.queue(|world: &mut World| world.clear_delays());
    }

    fn enable_delays(&mut self) {
        self.queue(|world: &mut World| {
            if let Some(mut registry) = world.get_resource_mut::<DelayRegistry>() {
                registry.enable();
            }
        });
    }
}

//! Spawn protection.

use bevy::prelude::*;

use super::components::{Player, Protected};
use crate::delays::{delay_key, CancelPolicy, DelayWorldExt};

pub fn protect_key(userid: u32) -> String {
    delay_key("protect", userid)
}

/// Make the player immune to damage, for `duration` seconds or until
/// [`unprotect`] when `None`.
///
/// Canceling the pending protection delay ends protection immediately.
pub fn protect(world: &mut World, player: Entity, duration: Option<f32>) {
    let Some(userid) = world.get::<Player>(player).map(|p| p.userid) else {
        return;
    };
    let key = protect_key(userid);

    world.cancel_delay(&key);
    world.entity_mut(player).insert(Protected);

    if let Some(seconds) = duration {
        world.schedule_delay(&key, seconds, CancelPolicy::Invoke, move |world: &mut World| {
            unprotect(world, player);
        });
    }
}

/// Restore normal damage, if the player is still connected.
pub fn unprotect(world: &mut World, player: Entity) {
    if world.get::<Player>(player).is_some() {
        world.entity_mut(player).remove::<Protected>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delays::DelayRegistry;

    fn setup() -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(DelayRegistry::new("udm"));
        let player = world.spawn(Player::new(7, "STEAM_1:0:7", "seven")).id();
        (world, player)
    }

    #[test]
    fn protection_expires() {
        let (mut world, player) = setup();
        protect(&mut world, player, Some(2.0));

        world.advance_delays(1.0);
        assert!(world.get::<Protected>(player).is_some());

        world.advance_delays(1.0);
        assert!(world.get::<Protected>(player).is_none());
    }

    #[test]
    fn cancel_unprotects_immediately() {
        let (mut world, player) = setup();
        protect(&mut world, player, Some(5.0));

        world.cancel_delay("protect_7");

        assert!(world.get::<Protected>(player).is_none());
    }

    #[test]
    fn indefinite_protection_replaces_a_timed_one() {
        let (mut world, player) = setup();
        protect(&mut world, player, Some(2.0));
        protect(&mut world, player, None);

        world.advance_delays(10.0);

        assert!(world.get::<Protected>(player).is_some());
        assert!(!world.resource::<DelayRegistry>().is_pending("protect_7"));
    }
}

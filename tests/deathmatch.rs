//! Deathmatch integration tests
//!
//! Drive a headless app through host events and check what the players end
//! up with: weapons, protection, placement, respawn requests.

mod common;

use bevy::prelude::*;
use common::*;
use udm::core::{
    ClientDisconnected, DeathmatchConfig, GrenadeDetonated, GrenadePolicy, LevelInitialized,
    PlayerDied, PlayerSpawned, PluginUnloading, RespawnRequested, RoundEnded, RoundStarted,
    TeamChangeAttempt, TeamChangeRejected, WeaponDropped, WeaponReloaded,
};
use udm::delays::{DelayRegistry, DelayWorldExt};
use udm::inventory::{EquipOutcome, Inventories};
use udm::players::{Armor, Dead, Protected, Team, ViewAngle};
use udm::spawn_points::{SpawnPoint, SpawnPoints};
use udm::weapons::{refill_key, OwnedBy, Weapon, WeaponTag};
use udm::DeathmatchApi;

#[derive(Resource, Default)]
struct Fired(Vec<&'static str>);

fn weapon_entity(app: &mut App, player: Entity, basename: &str) -> Entity {
    let world = app.world_mut();
    let mut query = world.query::<(Entity, &Weapon, &OwnedBy)>();
    query
        .iter(world)
        .find(|(_, weapon, owner)| owner.0 == player && weapon.basename == basename)
        .map(|(entity, _, _)| entity)
        .unwrap()
}

/// Send the spawn event and let the (zero) equip delay run.
fn spawn_and_prepare(app: &mut App, player: Entity) {
    app.world_mut().send_event(PlayerSpawned { player });
    app.update();
    app.update();
}

#[test]
fn empty_inventory_gets_one_random_weapon_per_tag() {
    let mut app = create_app("random-loadout");
    let player = spawn_player(&mut app, 1, Team::Terrorist, Vec3::ZERO);

    spawn_and_prepare(&mut app, player);

    let held = held(&mut app, player);
    let catalog = catalog();
    assert_eq!(held.len(), catalog.tags().len());
    for tag in catalog.tags() {
        let of_tag: Vec<&(String, WeaponTag)> = held.iter().filter(|(_, t)| t == tag).collect();
        assert_eq!(of_tag.len(), 1, "expected exactly one {} weapon", tag);
        assert!(catalog.by_tag(*tag).any(|w| w.basename == of_tag[0].0));
    }

    // Random loadouts are not recorded
    let inventories = app.world().resource::<Inventories>();
    assert!(inventories.selected("STEAM_1:0:1").map_or(true, |i| i.is_empty()));
}

#[test]
fn choosing_a_second_primary_replaces_the_first() {
    let mut app = create_app("replace-primary");
    let player = spawn_player(&mut app, 2, Team::CounterTerrorist, Vec3::ZERO);
    let world = app.world_mut();

    assert_eq!(world.choose_weapon(player, "ak47"), Ok(Some(EquipOutcome::Granted)));
    assert_eq!(world.choose_weapon(player, "weapon_m4a1"), Ok(Some(EquipOutcome::Replaced)));

    let inventory = world.resource::<Inventories>().selected("STEAM_1:0:2").unwrap().clone();
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory.get(WeaponTag::Primary).unwrap().basename, "m4a1");
    assert_eq!(held(&mut app, player), vec![("m4a1".to_string(), WeaponTag::Primary)]);
}

#[test]
fn choice_is_only_recorded_while_dead() {
    let mut app = create_app("record-dead");
    let player = spawn_player(&mut app, 3, Team::Terrorist, Vec3::ZERO);
    app.world_mut().entity_mut(player).insert(Dead);

    assert_eq!(app.world_mut().choose_weapon(player, "awp"), Ok(None));
    assert!(held(&mut app, player).is_empty());

    app.world_mut().entity_mut(player).remove::<Dead>();
    spawn_and_prepare(&mut app, player);

    let held = held(&mut app, player);
    assert!(held.contains(&("awp".to_string(), WeaponTag::Primary)));
    // Only the recorded slot plus what preparation keeps
    assert!(!held.iter().any(|(_, tag)| *tag == WeaponTag::Secondary));
}

#[test]
fn unknown_weapon_is_rejected() {
    let mut app = create_app("unknown-weapon");
    let player = spawn_player(&mut app, 4, Team::Terrorist, Vec3::ZERO);

    let result = app.world_mut().choose_weapon(player, "railgun");

    assert!(result.is_err());
    assert!(held(&mut app, player).is_empty());
}

#[test]
fn invoke_on_cancel_runs_at_cancel_time() {
    let mut app = create_app("invoke-on-cancel");
    let world = app.world_mut();
    world.init_resource::<Fired>();

    world.schedule_callback("protect_7", 5.0, true, |world: &mut World| {
        world.resource_mut::<Fired>().0.push("unprotect");
    });
    assert!(world.resource::<Fired>().0.is_empty());

    world.cancel_callback("protect_7");
    assert_eq!(world.resource::<Fired>().0, vec!["unprotect"]);

    world.advance_delays(10.0);
    assert_eq!(world.resource::<Fired>().0.len(), 1);
}

#[test]
fn only_the_newest_callback_for_a_key_fires() {
    let mut app = create_app("newest-wins");
    let world = app.world_mut();
    world.init_resource::<Fired>();

    world.schedule_callback("k", 1.0, false, |world: &mut World| {
        world.resource_mut::<Fired>().0.push("first");
    });
    world.schedule_callback("k", 1.0, false, |world: &mut World| {
        world.resource_mut::<Fired>().0.push("second");
    });
    world.advance_delays(5.0);

    assert_eq!(world.resource::<Fired>().0, vec!["second"]);
}

#[test]
fn spawned_players_are_armored_and_protected_for_a_while() {
    let mut app = create_app("protection");
    let player = spawn_player(&mut app, 5, Team::Terrorist, Vec3::ZERO);

    spawn_and_prepare(&mut app, player);

    assert_eq!(app.world().get::<Armor>(player), Some(&Armor::FULL));
    assert!(app.world().get::<Protected>(player).is_some());

    app.world_mut().advance_delays(2.0);
    assert!(app.world().get::<Protected>(player).is_none());
}

#[test]
fn spectators_are_not_prepared() {
    let mut app = create_app("spectator");
    let player = spawn_player(&mut app, 6, Team::Spectator, Vec3::ZERO);

    spawn_and_prepare(&mut app, player);

    assert!(held(&mut app, player).is_empty());
    assert!(app.world().get::<Armor>(player).is_none());
}

#[test]
fn players_are_placed_away_from_others() {
    let mut app = create_app("placement");
    let safe = SpawnPoint::new(Vec3::new(1000.0, 0.0, 0.0), Vec3::new(0.0, 90.0, 0.0));
    app.world_mut().insert_resource(SpawnPoints::from_points(vec![
        SpawnPoint::new(Vec3::ZERO, Vec3::ZERO),
        safe,
    ]));
    spawn_player(&mut app, 7, Team::CounterTerrorist, Vec3::new(10.0, 0.0, 0.0));
    let player = spawn_player(&mut app, 8, Team::Terrorist, Vec3::new(500.0, 500.0, 0.0));

    spawn_and_prepare(&mut app, player);

    let transform = app.world().get::<Transform>(player).unwrap();
    assert_eq!(transform.translation, safe.position);
    assert_eq!(app.world().get::<ViewAngle>(player), Some(&ViewAngle(safe.angle)));
}

#[test]
fn the_spawning_player_does_not_block_a_nearby_point() {
    let mut app = create_app("placement-self");
    let point = SpawnPoint::new(Vec3::new(100.0, 0.0, 0.0), Vec3::new(0.0, 45.0, 0.0));
    app.world_mut().insert_resource(SpawnPoints::from_points(vec![point]));
    // Closer to the point than spawn_point_distance, and nobody else alive
    let player = spawn_player(&mut app, 30, Team::Terrorist, Vec3::ZERO);

    spawn_and_prepare(&mut app, player);

    assert_eq!(app.world().get::<Transform>(player).unwrap().translation, point.position);
    assert_eq!(app.world().get::<ViewAngle>(player), Some(&ViewAngle(point.angle)));
}

#[test]
fn no_safe_point_keeps_the_engine_position() {
    let mut app = create_app("no-safe-point");
    app.world_mut()
        .insert_resource(SpawnPoints::from_points(vec![SpawnPoint::new(Vec3::ZERO, Vec3::ZERO)]));
    spawn_player(&mut app, 9, Team::CounterTerrorist, Vec3::new(10.0, 0.0, 0.0));
    let start = Vec3::new(-300.0, 40.0, 0.0);
    let player = spawn_player(&mut app, 10, Team::Terrorist, start);

    spawn_and_prepare(&mut app, player);

    assert_eq!(app.world().get::<Transform>(player).unwrap().translation, start);
}

#[test]
fn dead_players_are_respawned_after_the_delay() {
    let mut app = create_app("respawn");
    let player = spawn_player(&mut app, 11, Team::Terrorist, Vec3::ZERO);
    let idle = app
        .world_mut()
        .spawn(Weapon {
            basename: "awp".to_string(),
            tag: WeaponTag::Primary,
            silencer_on: false,
            clip: 10,
            ammo: 30,
        })
        .id();

    app.world_mut().send_event(PlayerDied {
        victim: player,
        attacker: None,
        weapon: None,
    });
    app.update();
    assert!(app.world().get::<Dead>(player).is_some());
    drain_events::<RespawnRequested>(&mut app);

    app.world_mut().advance_delays(1.0);
    assert!(app.world().get::<Weapon>(idle).is_none(), "idle weapons go at half the delay");
    assert!(drain_events::<RespawnRequested>(&mut app).is_empty());

    app.world_mut().advance_delays(1.0);
    assert_eq!(
        drain_events::<RespawnRequested>(&mut app),
        vec![RespawnRequested { player }]
    );
}

#[test]
fn disconnect_cancels_the_respawn() {
    let mut app = create_app("disconnect");
    let player = spawn_player(&mut app, 12, Team::Terrorist, Vec3::ZERO);

    app.world_mut().send_event(PlayerDied {
        victim: player,
        attacker: None,
        weapon: None,
    });
    app.update();
    app.world_mut().send_event(ClientDisconnected { player });
    app.update();

    app.world_mut().advance_delays(10.0);

    assert!(drain_events::<RespawnRequested>(&mut app).is_empty());
    assert!(!app.world().resource::<DelayRegistry>().is_pending("respawn_12"));
}

#[test]
fn round_end_cancels_everything_until_the_next_round() {
    let mut app = create_app("round-end");
    app.world_mut().init_resource::<Fired>();
    app.world_mut().schedule_callback("pending", 1.0, false, |world: &mut World| {
        world.resource_mut::<Fired>().0.push("pending");
    });

    app.world_mut().send_event(RoundEnded);
    app.update();

    let world = app.world_mut();
    world.schedule_callback("late", 1.0, false, |world: &mut World| {
        world.resource_mut::<Fired>().0.push("late");
    });
    world.advance_delays(5.0);
    assert!(world.resource::<Fired>().0.is_empty());
    assert!(!world.resource::<DelayRegistry>().is_enabled());

    app.world_mut().send_event(RoundStarted);
    app.update();

    let world = app.world_mut();
    world.schedule_callback("next", 1.0, false, |world: &mut World| {
        world.resource_mut::<Fired>().0.push("next");
    });
    world.advance_delays(5.0);
    assert_eq!(world.resource::<Fired>().0, vec!["next"]);
}

#[test]
fn team_switches_are_limited_per_level() {
    let config = DeathmatchConfig {
        team_change_limit: 1,
        ..test_config(temp_data_dir("team-limit"))
    };
    let mut app = create_app_with(config);
    let player = spawn_player(&mut app, 13, Team::Terrorist, Vec3::ZERO);

    app.world_mut().send_event(TeamChangeAttempt {
        player,
        team: Team::CounterTerrorist,
    });
    app.update();
    assert_eq!(app.world().get::<Team>(player), Some(&Team::CounterTerrorist));

    app.world_mut().send_event(TeamChangeAttempt {
        player,
        team: Team::Terrorist,
    });
    app.update();
    assert_eq!(app.world().get::<Team>(player), Some(&Team::CounterTerrorist));
    assert_eq!(
        drain_events::<TeamChangeRejected>(&mut app),
        vec![TeamChangeRejected {
            player,
            team: Team::Terrorist,
            changes: 1,
        }]
    );

    // Leaving the fight is never limited
    app.world_mut().send_event(TeamChangeAttempt {
        player,
        team: Team::Spectator,
    });
    app.update();
    assert_eq!(app.world().get::<Team>(player), Some(&Team::Spectator));

    // A new level resets the count
    app.world_mut().entity_mut(player).insert(Team::Terrorist);
    app.world_mut().send_event(LevelInitialized {
        map_name: "de_inferno".to_string(),
    });
    app.update();
    app.world_mut().send_event(TeamChangeAttempt {
        player,
        team: Team::CounterTerrorist,
    });
    app.update();
    assert_eq!(app.world().get::<Team>(player), Some(&Team::CounterTerrorist));
}

#[test]
fn silencer_preference_switches_variant_or_toggles() {
    let mut app = create_app("silencer");
    let player = spawn_player(&mut app, 14, Team::CounterTerrorist, Vec3::ZERO);
    let world = app.world_mut();

    world.choose_weapon(player, "m4a1").unwrap();
    assert_eq!(
        world.set_silencer_preference(player, WeaponTag::Primary, true),
        Ok(Some(EquipOutcome::Replaced))
    );

    world.choose_weapon(player, "usp").unwrap();
    assert_eq!(
        world.set_silencer_preference(player, WeaponTag::Secondary, true),
        Ok(Some(EquipOutcome::Toggled))
    );
    assert_eq!(
        world.set_silencer_preference(player, WeaponTag::Secondary, true),
        Ok(Some(EquipOutcome::Unchanged))
    );

    let usp = weapon_entity(&mut app, player, "usp");
    assert!(app.world().get::<Weapon>(usp).unwrap().silencer_on);
    assert_eq!(
        held(&mut app, player),
        vec![
            ("m4a1_silencer".to_string(), WeaponTag::Primary),
            ("usp".to_string(), WeaponTag::Secondary),
        ]
    );
}

#[test]
fn dropping_a_recorded_weapon_clears_its_slot() {
    let mut app = create_app("drop");
    let player = spawn_player(&mut app, 15, Team::Terrorist, Vec3::ZERO);
    app.world_mut().choose_weapon(player, "ak47").unwrap();
    app.world_mut().choose_weapon(player, "glock").unwrap();
    let ak = weapon_entity(&mut app, player, "ak47");

    app.world_mut().send_event(WeaponDropped { player, weapon: ak });
    app.update();

    assert!(app.world().get::<OwnedBy>(ak).is_none());
    let inventory = app.world().resource::<Inventories>().selected("STEAM_1:0:15").unwrap();
    assert!(inventory.get(WeaponTag::Primary).is_none());
    assert!(inventory.get(WeaponTag::Secondary).is_some());
}

#[test]
fn weapons_dropped_on_death_stay_recorded() {
    let mut app = create_app("death-drop");
    let player = spawn_player(&mut app, 31, Team::Terrorist, Vec3::ZERO);
    app.world_mut().choose_weapon(player, "ak47").unwrap();
    let ak = weapon_entity(&mut app, player, "ak47");

    // The engine drops the victim's gun in the same tick it reports the death
    app.world_mut().send_event(PlayerDied {
        victim: player,
        attacker: None,
        weapon: None,
    });
    app.world_mut().send_event(WeaponDropped { player, weapon: ak });
    app.update();

    assert!(app.world().get::<Dead>(player).is_some());
    assert!(app.world().get::<OwnedBy>(ak).is_none());
    let inventory = app.world().resource::<Inventories>().selected("STEAM_1:0:31").unwrap();
    assert_eq!(inventory.get(WeaponTag::Primary).unwrap().basename, "ak47");
}

#[test]
fn reserve_ammo_is_refilled_after_reloading() {
    let mut app = create_app("refill");
    let player = spawn_player(&mut app, 16, Team::Terrorist, Vec3::ZERO);
    app.world_mut().choose_weapon(player, "ak47").unwrap();
    app.world_mut().choose_weapon(player, "knife").unwrap();
    let ak = weapon_entity(&mut app, player, "ak47");
    let knife = weapon_entity(&mut app, player, "knife");
    app.world_mut().get_mut::<Weapon>(ak).unwrap().ammo = 0;

    app.world_mut().send_event(WeaponReloaded {
        player,
        weapon: ak,
        duration: 2.5,
    });
    app.world_mut().send_event(WeaponReloaded {
        player,
        weapon: knife,
        duration: 1.0,
    });
    app.update();

    assert!(!app.world().resource::<DelayRegistry>().is_pending(&refill_key(knife)));
    app.world_mut().advance_delays(2.0);
    assert_eq!(app.world().get::<Weapon>(ak).unwrap().ammo, 0);

    app.world_mut().advance_delays(2.0);
    assert_eq!(app.world().get::<Weapon>(ak).unwrap().ammo, 90);
}

#[test]
fn edit_mode_protects_and_strips_until_left() {
    let mut app = create_app("edit-mode");
    let player = spawn_player(&mut app, 17, Team::Terrorist, Vec3::ZERO);
    app.world_mut().choose_weapon(player, "ak47").unwrap();

    app.world_mut().enter_edit_mode(player);
    app.world_mut().advance_delays(30.0);
    assert!(app.world().get::<Protected>(player).is_some());
    assert!(held(&mut app, player).is_empty());

    app.world_mut().exit_edit_mode(player);
    assert!(app.world().get::<Protected>(player).is_none());
    assert_eq!(held(&mut app, player), vec![("ak47".to_string(), WeaponTag::Primary)]);
}

#[test]
fn he_kills_give_the_killer_a_new_grenade() {
    let config = DeathmatchConfig {
        equip_hegrenade: GrenadePolicy::OnSpawnAndKill,
        ..test_config(temp_data_dir("he-kill"))
    };
    let mut app = create_app_with(config);
    let killer = spawn_player(&mut app, 18, Team::Terrorist, Vec3::ZERO);
    let victim = spawn_player(&mut app, 19, Team::CounterTerrorist, Vec3::X * 500.0);

    app.world_mut().send_event(PlayerDied {
        victim,
        attacker: Some(killer),
        weapon: Some("hegrenade".to_string()),
    });
    app.update();

    assert_eq!(held(&mut app, killer), vec![("hegrenade".to_string(), WeaponTag::Grenade)]);
}

#[test]
fn detonations_give_a_new_grenade_when_configured() {
    let config = DeathmatchConfig {
        equip_hegrenade: GrenadePolicy::OnSpawnAndDetonation,
        ..test_config(temp_data_dir("detonation"))
    };
    let mut app = create_app_with(config);
    let player = spawn_player(&mut app, 20, Team::Terrorist, Vec3::ZERO);

    app.world_mut().send_event(GrenadeDetonated {
        player,
        basename: "hegrenade".to_string(),
    });
    app.update();

    assert_eq!(held(&mut app, player), vec![("hegrenade".to_string(), WeaponTag::Grenade)]);
}

#[test]
fn spawn_points_round_trip_through_the_level_file() {
    let data_dir = temp_data_dir("spawn-file");
    let mut app = create_app_with(test_config(data_dir.clone()));
    let level_dir = data_dir.join("udm").join("spawnpoints").join("csgo");
    std::fs::create_dir_all(&level_dir).unwrap();
    std::fs::write(
        level_dir.join("de_test.json"),
        r#"[{"vector": [0.0, 0.0, 0.0], "angle": [0.0, 0.0, 0.0]},
            {"vector": [400.0, 0.0, 0.0], "angle": [0.0, 180.0, 0.0]}]"#,
    )
    .unwrap();

    app.world_mut().send_event(LevelInitialized {
        map_name: "de_test".to_string(),
    });
    app.update();
    assert_eq!(app.world().spawn_points().len(), 2);

    let world = app.world_mut();
    assert!(!world.add_spawn_point_at(Vec3::new(100.0, 0.0, 0.0), Vec3::ZERO));
    assert!(world.add_spawn_point_at(Vec3::new(0.0, 800.0, 64.0), Vec3::new(0.0, 45.0, 0.0)));
    assert_eq!(
        world.remove_nearest_spawn_point(Vec3::new(405.0, 5.0, 0.0), 20.0),
        Some(SpawnPoint::new(Vec3::new(400.0, 0.0, 0.0), Vec3::new(0.0, 180.0, 0.0)))
    );
    let expected = world.spawn_points();
    assert_eq!(world.save_spawn_points().unwrap(), 2);

    app.world_mut().send_event(LevelInitialized {
        map_name: "de_test".to_string(),
    });
    app.update();
    assert_eq!(app.world().spawn_points(), expected);

    let player = spawn_player(&mut app, 21, Team::Terrorist, Vec3::ZERO);
    assert!(app.world_mut().teleport_to_spawn_point(player, 1));
    assert_eq!(
        app.world().get::<Transform>(player).unwrap().translation,
        Vec3::new(0.0, 800.0, 64.0)
    );
    assert!(!app.world_mut().teleport_to_spawn_point(player, 9));

    // Default removal tolerance is 20 units
    let world = app.world_mut();
    assert_eq!(world.remove_spawn_point_near(Vec3::new(0.0, 830.0, 64.0)), None);
    assert_eq!(
        world.remove_spawn_point_near(Vec3::new(0.0, 810.0, 64.0)).map(|p| p.position),
        Some(Vec3::new(0.0, 800.0, 64.0))
    );
}

#[test]
fn unloading_forgets_inventories_and_delays() {
    let mut app = create_app("unload");
    let player = spawn_player(&mut app, 22, Team::Terrorist, Vec3::ZERO);
    app.world_mut().choose_weapon(player, "ak47").unwrap();
    app.world_mut().schedule_callback("pending", 5.0, false, |_: &mut World| {});

    app.world_mut().send_event(PluginUnloading);
    app.update();

    assert!(app.world().resource::<Inventories>().is_empty());
    assert!(app.world().resource::<DelayRegistry>().is_empty());
}

#[test]
fn inventory_selection_switches_loadouts() {
    let mut app = create_app("selection");
    let player = spawn_player(&mut app, 23, Team::Terrorist, Vec3::ZERO);
    let world = app.world_mut();
    world.entity_mut(player).insert(Dead);

    world.choose_weapon(player, "ak47").unwrap();
    world.set_inventory_selection(player, 1).unwrap();
    assert_eq!(world.inventory_selection(player), Ok(1));
    world.choose_weapon(player, "awp").unwrap();

    world.entity_mut(player).remove::<Dead>();
    world.equip_inventory(player).unwrap();
    assert_eq!(held(&mut app, player), vec![("awp".to_string(), WeaponTag::Primary)]);
}

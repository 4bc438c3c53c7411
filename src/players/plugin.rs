//! Player plugin - spawn, death, team and connection handling.

use bevy::prelude::*;

use super::components::{Dead, Player, Team, TeamChanges};
use super::preparation::{
    equip_key, give_hegrenade, is_fighting, prepare_for_battle, respawn_key, HEGRENADE,
};
use super::protection::protect_key;
use crate::core::{
    ClientDisconnected, DeathmatchConfig, GrenadeDetonated, GrenadePolicy, LevelInitialized,
    PlayerDied, PlayerSpawned, RespawnRequested, TeamChangeAttempt, TeamChangeRejected,
};
use crate::delays::{CancelPolicy, DelayCommandsExt};
use crate::weapons::remove_idle_weapons;

/// Key of the shared idle-weapon cleanup delay.
pub const REMOVE_IDLE_KEY: &str = "remove_idle";

/// Systems that react to spawns and deaths. Anything reading [`Dead`] in
/// `Update` runs after this set so the markers are already applied.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerLifecycle;

/// Player plugin - drives the spawn/death cycle.
pub struct PlayersPlugin;

impl Plugin for PlayersPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TeamChanges>().add_systems(
            Update,
            (
                (handle_spawns, handle_deaths).in_set(PlayerLifecycle),
                handle_detonations,
                handle_team_changes,
                handle_disconnects,
                reset_team_changes,
            ),
        );
    }
}

/// Schedule battle preparation for players who spawned on a playing team.
fn handle_spawns(
    mut commands: Commands,
    mut spawns: EventReader<PlayerSpawned>,
    players: Query<(&Player, &Team)>,
    config: Res<DeathmatchConfig>,
) {
    for event in spawns.read() {
        let Ok((player, team)) = players.get(event.player) else {
            continue;
        };
        commands.entity(event.player).remove::<Dead>();

        if !team.is_playing() {
            continue;
        }

        let entity = event.player;
        commands.schedule_delay(
            equip_key(player.userid),
            config.equip_delay.abs(),
            CancelPolicy::Drop,
            move |world: &mut World| prepare_for_battle(world, entity),
        );
    }
}

fn handle_deaths(
    mut commands: Commands,
    mut deaths: EventReader<PlayerDied>,
    players: Query<&Player>,
    config: Res<DeathmatchConfig>,
) {
    for event in deaths.read() {
        let Ok(player) = players.get(event.victim) else {
            continue;
        };
        let victim = event.victim;

        commands.entity(victim).insert(Dead);
        commands.cancel_delay(protect_key(player.userid));
        commands.cancel_delay(equip_key(player.userid));

        let delay = config.respawn_delay.abs();
        commands.schedule_delay(
            REMOVE_IDLE_KEY.to_string(),
            delay / 2.0,
            CancelPolicy::Drop,
            remove_idle_weapons,
        );
        commands.schedule_delay(
            respawn_key(player.userid),
            delay,
            CancelPolicy::Drop,
            move |world: &mut World| request_respawn(world, victim),
        );

        let he_kill = event.weapon.as_deref() == Some(HEGRENADE);
        if config.equip_hegrenade == GrenadePolicy::OnSpawnAndKill && he_kill {
            if let Some(attacker) = event.attacker.filter(|&attacker| attacker != victim) {
                commands.queue(move |world: &mut World| {
                    if is_fighting(world, attacker) {
                        give_hegrenade(world, attacker);
                    }
                });
            }
        }
    }
}

fn request_respawn(world: &mut World, player: Entity) {
    if world.get::<Player>(player).is_some() {
        world.send_event(RespawnRequested { player });
    }
}

fn handle_detonations(
    mut commands: Commands,
    mut detonations: EventReader<GrenadeDetonated>,
    config: Res<DeathmatchConfig>,
) {
    if config.equip_hegrenade != GrenadePolicy::OnSpawnAndDetonation {
        detonations.clear();
        return;
    }

    for event in detonations.read() {
        if event.basename != HEGRENADE {
            continue;
        }
        let player = event.player;
        commands.queue(move |world: &mut World| {
            if is_fighting(world, player) {
                give_hegrenade(world, player);
            }
        });
    }
}

/// Apply team changes, refusing switches between playing teams past the limit.
fn handle_team_changes(
    mut attempts: EventReader<TeamChangeAttempt>,
    mut players: Query<(&Player, &mut Team)>,
    mut changes: ResMut<TeamChanges>,
    mut rejected: EventWriter<TeamChangeRejected>,
    config: Res<DeathmatchConfig>,
) {
    for event in attempts.read() {
        let Ok((player, mut team)) = players.get_mut(event.player) else {
            continue;
        };
        if *team == event.team {
            continue;
        }

        if team.is_playing() && event.team.is_playing() {
            let count = changes.count(&player.unique_id);
            if config.team_change_limit > 0 && count >= config.team_change_limit {
                info!("{} reached the team change limit ({})", player.name, count);
                rejected.send(TeamChangeRejected {
                    player: event.player,
                    team: event.team,
                    changes: count,
                });
                continue;
            }
            changes.record(&player.unique_id);
        }

        *team = event.team;
    }
}

/// Drop the player's pending delays. The host despawns the entity afterwards.
fn handle_disconnects(
    mut commands: Commands,
    mut disconnects: EventReader<ClientDisconnected>,
    players: Query<&Player>,
) {
    for event in disconnects.read() {
        let Ok(player) = players.get(event.player) else {
            continue;
        };
        debug!("{} disconnected", player.name);

        commands.cancel_delay(respawn_key(player.userid));
        commands.cancel_delay(protect_key(player.userid));
        commands.cancel_delay(equip_key(player.userid));
    }
}

fn reset_team_changes(mut inits: EventReader<LevelInitialized>, mut changes: ResMut<TeamChanges>) {
    if inits.read().count() > 0 {
        changes.clear();
    }
}

//! Combat systems - fire control, projectile flight and hit resolution.
//!
//! ## Phases
//!
//! 1. **Fire control** runs once per roster. Each unit accumulates its
//!    cooldown and, when ready, shoots at the nearest live opponent in range.
//!    Shots are queued through `Commands` and become real entities at the
//!    next sync point, so units never hold on to their projectiles.
//! 2. **Projectile flight** integrates straight-line motion and burns TTL.
//! 3. **Collision resolution** runs last in the frame. Every projectile that
//!    is still alive checks the opposing roster and then the static map.
//!
//! A projectile does not stop scanning after its first hit. If several
//! opponents overlap its hit circle in the same pass, all of them take
//! damage. Units killed earlier in the pass are skipped as targets.

use crate::components::*;
use crate::rng::SimRng;
use crate::spatial::ArenaMap;
use crate::systems::ai::{nearest, roster_positions};
use crate::systems::effects::{Burst, MAP_IMPACT_COLOR};
use crate::systems::movement::DeltaTime;
use bevy_ecs::prelude::*;
use tracing::{debug, info};

/// Extra slack added to a unit's radius for projectile hits.
pub const HIT_MARGIN: f32 = 2.0;

/// System that lets one roster (`Own`) fire at another (`Foe`).
pub fn fire_control_system<Own: Component, Foe: Component>(
    dt: Res<DeltaTime>,
    mut sequence: ResMut<SpawnSequence>,
    mut commands: Commands,
    mut shooters: Query<(&UnitId, &Position, &Faction, &Health, &mut Weapon), (With<Own>, Without<Foe>)>,
    foes: Query<(&UnitId, &Position, &Health), (With<Foe>, Without<Own>)>,
) {
    let delta = dt.0;
    let targets = roster_positions(foes.iter());

    let mut ordered: Vec<_> = shooters
        .iter_mut()
        .filter(|(_, _, _, health, _)| health.is_alive())
        .collect();
    ordered.sort_by_key(|(id, ..)| **id);

    for (id, pos, faction, _, mut weapon) in ordered {
        weapon.cooldown += delta;
        if !weapon.is_ready() {
            continue;
        }
        let Some((index, dist)) = nearest(pos, targets.iter()) else {
            continue;
        };
        if dist > weapon.range {
            continue;
        }

        let target = targets[index];
        let angle = (target.y - pos.y).atan2(target.x - pos.x);
        commands.spawn(ProjectileBundle::new(
            sequence.next_seq(),
            pos.x,
            pos.y,
            angle,
            weapon.projectile_speed,
            *faction,
            weapon.damage(),
        ));
        weapon.cooldown = 0.0;

        debug!(shooter_id = id.0, faction = faction.as_str(), dist, "fired");
    }
}

/// System that moves projectiles and expires them when their TTL runs out.
pub fn projectile_system(dt: Res<DeltaTime>, mut query: Query<(&mut Position, &mut Projectile)>) {
    let delta = dt.0;
    for (mut pos, mut shot) in query.iter_mut() {
        if !shot.alive {
            continue;
        }
        let velocity = Velocity::from_angle(shot.angle, shot.speed);
        pos.x += velocity.vx * delta;
        pos.y += velocity.vy * delta;
        shot.ttl -= delta;
        if shot.ttl <= 0.0 {
            shot.alive = false;
        }
    }
}

/// System that resolves projectile hits against units and the static map.
///
/// Hostiles killed by friendly fire drop exactly one loot item where they
/// stood; the alive-to-dead transition can only happen once per unit.
pub fn collision_system(
    map: Res<ArenaMap>,
    mut rng: ResMut<SimRng>,
    mut sequence: ResMut<SpawnSequence>,
    mut commands: Commands,
    mut shots: Query<(&SpawnSeq, &Position, &mut Projectile)>,
    mut units: Query<(Entity, &UnitId, &Archetype, &Faction, &Position, &Body, &mut Health)>,
) {
    let mut roster: Vec<(UnitId, Entity)> = units.iter().map(|(e, id, ..)| (*id, e)).collect();
    roster.sort_by_key(|(id, _)| *id);

    let mut ordered: Vec<_> = shots.iter_mut().filter(|(_, _, shot)| shot.alive).collect();
    ordered.sort_by_key(|(seq, ..)| **seq);

    for (_, shot_pos, mut shot) in ordered {
        for &(_, entity) in &roster {
            let Ok((_, id, archetype, faction, pos, body, mut health)) = units.get_mut(entity) else {
                continue;
            };
            if *faction == shot.faction || !health.is_alive() {
                continue;
            }
            if shot_pos.distance_to(pos) >= body.radius + HIT_MARGIN {
                continue;
            }

            health.damage(shot.damage);
            shot.alive = false;
            let stats = archetype.stats();
            commands.spawn_batch(Burst::impact(stats.color).scatter(
                shot_pos.x,
                shot_pos.y,
                &mut rng,
                &mut sequence,
            ));

            if health.is_alive() {
                continue;
            }
            info!(
                unit_id = id.0,
                archetype = archetype.as_str(),
                faction = faction.as_str(),
                "unit destroyed"
            );
            if shot.faction == Faction::Friendly && *faction == Faction::Hostile {
                commands.spawn(LootBundle::new(sequence.next_seq(), pos.x, pos.y, stats.loot_value));
            }
        }

        if map.occupied(shot_pos.x, shot_pos.y, 0.0) {
            shot.alive = false;
            commands.spawn_batch(Burst::impact(MAP_IMPACT_COLOR).scatter(
                shot_pos.x,
                shot_pos.y,
                &mut rng,
                &mut sequence,
            ));
        }
    }
}

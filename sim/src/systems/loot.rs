//! Loot system - data fragments drift toward nearby squad members and feed
//! the squad's experience pool on contact.

use crate::components::*;
use crate::progression::{LevelUp, Progression};
use crate::rng::SimRng;
use crate::spatial::ArenaMap;
use crate::systems::effects::Burst;
use crate::systems::movement::DeltaTime;
use bevy_ecs::prelude::*;
use tracing::info;

/// Squad members closer than this pull loot toward them.
pub const ATTRACTION_RADIUS: f32 = 50.0;
/// Loot closer than this to an attracting member is collected.
pub const PICKUP_RADIUS: f32 = 15.0;
/// Drift speed toward an attracting member (units per second).
pub const ATTRACTION_SPEED: f32 = 200.0;
/// Below this distance the direction is undefined; collect immediately.
const COINCIDENT_EPSILON: f32 = 1e-4;

/// System that pulls loot toward the squad and collects it.
///
/// Each loot item is tested against every live squad member in roster
/// order, so an item near several members may be nudged more than once
/// before one of them is close enough to pick it up.
#[allow(clippy::too_many_arguments)]
pub fn loot_system(
    dt: Res<DeltaTime>,
    map: Res<ArenaMap>,
    mut progression: ResMut<Progression>,
    mut rng: ResMut<SimRng>,
    mut sequence: ResMut<SpawnSequence>,
    mut commands: Commands,
    mut loot: Query<(&SpawnSeq, &mut Position, &mut Loot), Without<Squad>>,
    mut squad: Query<(&UnitId, &Position, &mut Health, &mut Weapon), (With<Squad>, Without<Loot>)>,
) {
    let delta = dt.0;
    let collectors = crate::systems::ai::roster_positions(
        squad.iter().map(|(id, pos, health, _)| (id, pos, health)),
    );

    let mut ordered: Vec<_> = loot.iter_mut().filter(|(_, _, item)| item.alive).collect();
    ordered.sort_by_key(|(seq, ..)| **seq);

    for (_, mut pos, mut item) in ordered {
        for collector in &collectors {
            let dx = collector.x - pos.x;
            let dy = collector.y - pos.y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist >= ATTRACTION_RADIUS {
                continue;
            }
            if dist > COINCIDENT_EPSILON {
                pos.x += dx / dist * ATTRACTION_SPEED * delta;
                pos.y += dy / dist * ATTRACTION_SPEED * delta;
            }
            if dist < PICKUP_RADIUS {
                item.alive = false;
                if let Some(level_up) = progression.add_experience(item.value) {
                    level_up_squad(&level_up, &progression, &mut squad);
                    commands.spawn_batch(Burst::level_up().scatter(
                        map.width / 2.0,
                        map.height / 2.0,
                        &mut rng,
                        &mut sequence,
                    ));
                }
                break;
            }
        }
    }
}

fn level_up_squad(
    level_up: &LevelUp,
    progression: &Progression,
    squad: &mut Query<(&UnitId, &Position, &mut Health, &mut Weapon), (With<Squad>, Without<Loot>)>,
) {
    let mut buffed = 0;
    for (_, _, mut health, mut weapon) in squad.iter_mut() {
        if !health.is_alive() {
            continue;
        }
        level_up.apply(&mut health, &mut weapon);
        buffed += 1;
    }
    info!(
        level = level_up.level,
        next = progression.experience_to_next,
        buffed,
        "squad levelled up"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loot_world() -> World {
        let mut world = World::new();
        world.insert_resource(DeltaTime(0.1));
        world.insert_resource(ArenaMap::new(1000.0, 800.0, vec![]));
        world.insert_resource(Progression::default());
        world.insert_resource(SimRng::new(1));
        world.insert_resource(SpawnSequence::default());
        world
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(loot_system);
        schedule.run(world);
    }

    #[test]
    fn test_attracts_within_radius() {
        let mut world = loot_world();
        world.spawn((UnitBundle::new(UnitId(0), Archetype::Assault, 140.0, 100.0), Squad));
        let item = world.spawn(LootBundle::new(SpawnSeq(0), 100.0, 100.0, 20)).id();

        run(&mut world);

        let pos = world.get::<Position>(item).unwrap();
        assert!((pos.x - 120.0).abs() < 1e-4);
        assert!(world.get::<Loot>(item).unwrap().alive);
    }

    #[test]
    fn test_ignores_far_units() {
        let mut world = loot_world();
        world.spawn((UnitBundle::new(UnitId(0), Archetype::Assault, 300.0, 100.0), Squad));
        let item = world.spawn(LootBundle::new(SpawnSeq(0), 100.0, 100.0, 20)).id();

        run(&mut world);

        assert_eq!(*world.get::<Position>(item).unwrap(), Position::new(100.0, 100.0));
    }

    #[test]
    fn test_pickup_grants_experience() {
        let mut world = loot_world();
        world.spawn((UnitBundle::new(UnitId(0), Archetype::Assault, 110.0, 100.0), Squad));
        let item = world.spawn(LootBundle::new(SpawnSeq(0), 100.0, 100.0, 20)).id();

        run(&mut world);

        assert!(!world.get::<Loot>(item).unwrap().alive);
        assert_eq!(world.resource::<Progression>().experience, 20);
    }

    #[test]
    fn test_coincident_collector_picks_up() {
        let mut world = loot_world();
        world.spawn((UnitBundle::new(UnitId(0), Archetype::Scout, 100.0, 100.0), Squad));
        let item = world.spawn(LootBundle::new(SpawnSeq(0), 100.0, 100.0, 5)).id();

        run(&mut world);

        let pos = world.get::<Position>(item).unwrap();
        assert!(pos.x.is_finite() && pos.y.is_finite());
        assert!(!world.get::<Loot>(item).unwrap().alive);
    }

    #[test]
    fn test_pickup_level_up_buffs_live_squad() {
        let mut world = loot_world();
        let alive = world
            .spawn((UnitBundle::new(UnitId(0), Archetype::Assault, 105.0, 100.0), Squad))
            .id();
        let mut fallen = UnitBundle::new(UnitId(1), Archetype::Heavy, 900.0, 700.0);
        fallen.health.current = 0.0;
        let dead = world.spawn((fallen, Squad)).id();
        world.spawn(LootBundle::new(SpawnSeq(0), 100.0, 100.0, 100));

        run(&mut world);

        let progression = *world.resource::<Progression>();
        assert_eq!(progression.level, 2);
        assert_eq!(progression.experience_to_next, 150);
        let health = world.get::<Health>(alive).unwrap();
        assert_eq!((health.current, health.max), (120.0, 120.0));
        assert_eq!(world.get::<Health>(dead).unwrap().max, 150.0);
        let mut particles = world.query::<&Particle>();
        assert_eq!(
            particles.iter(&world).count(),
            crate::systems::effects::LEVEL_UP_BURST
        );
    }
}

//! Movement system - steers units toward their destination with wall-slide.

use crate::components::*;
use crate::spatial::ArenaMap;
use bevy_ecs::prelude::*;

/// Resource containing the delta time for the current frame.
#[derive(Resource, Default)]
pub struct DeltaTime(pub f32);

/// Units closer than this to their destination stop, so they don't jitter
/// around the arrival point. Also guards the normalization below.
pub const ARRIVAL_DEAD_ZONE: f32 = 5.0;

/// Per-frame displacement toward `target`, or `None` inside the dead zone.
pub fn steer(pos: &Position, target: &Waypoint, speed: f32, dt: f32) -> Option<(f32, f32)> {
    let dx = target.x - pos.x;
    let dy = target.y - pos.y;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist <= ARRIVAL_DEAD_ZONE {
        return None;
    }
    Some((dx / dist * speed * dt, dy / dist * speed * dt))
}

/// System that moves the units of one roster (`M`) toward their targets.
/// Stationary units and units without a target stay put.
pub fn locomotion_system<M: Component>(
    dt: Res<DeltaTime>,
    map: Res<ArenaMap>,
    mut query: Query<(&mut Position, &Body, &Mobility, &Health), With<M>>,
) {
    let delta = dt.0;
    for (mut pos, body, mobility, health) in query.iter_mut() {
        if !health.is_alive() || mobility.stationary {
            continue;
        }
        let Some(target) = mobility.target else {
            continue;
        };
        if let Some((dx, dy)) = steer(&pos, &target, mobility.speed, delta) {
            let (x, y) = map.slide(pos.x, pos.y, body.radius, dx, dy);
            pos.x = x;
            pos.y = y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::Obstacle;

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(locomotion_system::<Squad>);
        schedule.run(world);
    }

    fn spawn_scout(world: &mut World, x: f32, y: f32, target: (f32, f32)) -> Entity {
        let mut bundle = UnitBundle::new(UnitId(0), Archetype::Scout, x, y);
        bundle.mobility.set_target(target.0, target.1);
        world.spawn((bundle, Squad)).id()
    }

    #[test]
    fn test_moves_toward_target() {
        let mut world = World::new();
        world.insert_resource(DeltaTime(0.5));
        world.insert_resource(ArenaMap::new(1024.0, 768.0, vec![]));
        let entity = spawn_scout(&mut world, 0.0, 0.0, (300.0, 0.0));

        run(&mut world);

        let pos = world.get::<Position>(entity).unwrap();
        // Scout speed 180 * 0.5s
        assert!((pos.x - 90.0).abs() < 0.001);
        assert!(pos.y.abs() < 0.001);
    }

    #[test]
    fn test_dead_zone_prevents_jitter() {
        let mut world = World::new();
        world.insert_resource(DeltaTime(0.1));
        world.insert_resource(ArenaMap::new(1024.0, 768.0, vec![]));
        let entity = spawn_scout(&mut world, 100.0, 100.0, (103.0, 104.0));

        run(&mut world);

        assert_eq!(*world.get::<Position>(entity).unwrap(), Position::new(100.0, 100.0));
    }

    #[test]
    fn test_no_target_no_motion() {
        let mut world = World::new();
        world.insert_resource(DeltaTime(0.1));
        world.insert_resource(ArenaMap::new(1024.0, 768.0, vec![]));
        let entity = world
            .spawn((UnitBundle::new(UnitId(0), Archetype::Assault, 10.0, 10.0), Squad))
            .id();

        run(&mut world);

        assert_eq!(*world.get::<Position>(entity).unwrap(), Position::new(10.0, 10.0));
    }

    #[test]
    fn test_wall_slide_moves_horizontally_only() {
        let mut world = World::new();
        world.insert_resource(DeltaTime(0.1));
        // Floor-like wall just below the unit.
        world.insert_resource(ArenaMap::new(
            1024.0,
            768.0,
            vec![Obstacle::new(0.0, 113.0, 1000.0, 20.0)],
        ));
        let entity = spawn_scout(&mut world, 100.0, 100.0, (400.0, 400.0));

        run(&mut world);

        let pos = *world.get::<Position>(entity).unwrap();
        assert!(pos.x > 100.0);
        assert_eq!(pos.y, 100.0);
        let map = world.resource::<ArenaMap>();
        assert!(!map.occupied(pos.x, pos.y, 12.0));
    }

    #[test]
    fn test_stationary_never_moves() {
        let mut world = World::new();
        world.insert_resource(DeltaTime(1.0));
        world.insert_resource(ArenaMap::new(1024.0, 768.0, vec![]));
        let mut bundle = UnitBundle::new(UnitId(0), Archetype::Turret, 50.0, 50.0);
        bundle.mobility.set_target(500.0, 500.0);
        let entity = world.spawn((bundle, Squad)).id();

        run(&mut world);

        assert_eq!(*world.get::<Position>(entity).unwrap(), Position::new(50.0, 50.0));
    }
}

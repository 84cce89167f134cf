//! Spawn system - feeds hostiles into the arena on a timer.

use crate::components::*;
use crate::config::SimConfig;
use crate::rng::SimRng;
use crate::spatial::ArenaMap;
use crate::systems::movement::DeltaTime;
use bevy_ecs::prelude::*;
use tracing::debug;

/// Enemies enter this far beyond the right edge.
const ENTRY_MARGIN: f32 = 20.0;
/// Enemies enter at least this far from the top and bottom edges.
const ENTRY_PADDING: f32 = 50.0;
/// Turrets are placed at least this far from the arena edges.
const TURRET_PADDING: f32 = 60.0;
/// Turrets only appear right of this fraction of the arena width.
const TURRET_MIN_X_FRACTION: f32 = 0.45;

/// Seconds accumulated toward the next spawn attempt.
#[derive(Resource, Debug, Default)]
pub struct SpawnTimer(pub f32);

/// System that spawns one hostile whenever the timer elapses and the
/// live-hostile count is below the cap.
///
/// A turret candidate that lands inside an obstacle is thrown away; the
/// attempt still consumes the cycle.
#[allow(clippy::too_many_arguments)]
pub fn spawn_system(
    dt: Res<DeltaTime>,
    config: Res<SimConfig>,
    map: Res<ArenaMap>,
    mut timer: ResMut<SpawnTimer>,
    mut rng: ResMut<SimRng>,
    mut sequence: ResMut<SpawnSequence>,
    mut commands: Commands,
    hostiles: Query<&Health, With<Hostile>>,
) {
    timer.0 += dt.0;
    if timer.0 <= config.spawn_interval {
        return;
    }
    let alive = hostiles.iter().filter(|h| h.is_alive()).count();
    if alive >= config.hostile_cap {
        return;
    }
    timer.0 = 0.0;

    if rng.chance(config.turret_chance) {
        let x = rng.range(map.width * TURRET_MIN_X_FRACTION, map.width - TURRET_PADDING);
        let y = rng.range(TURRET_PADDING, map.height - TURRET_PADDING);
        if map.occupied(x, y, Archetype::Turret.stats().radius) {
            debug!(x, y, "turret spawn rejected: inside obstacle");
            return;
        }
        let id = sequence.next_unit();
        commands.spawn((UnitBundle::new(id, Archetype::Turret, x, y), Hostile));
        debug!(unit_id = id.0, x, y, "turret spawned");
    } else {
        let x = map.width + ENTRY_MARGIN;
        let y = rng.range(ENTRY_PADDING, map.height - ENTRY_PADDING);
        let id = sequence.next_unit();
        commands.spawn((UnitBundle::new(id, Archetype::Enemy, x, y), Hostile));
        debug!(unit_id = id.0, x, y, "enemy spawned");
    }
}

//! Prune systems - drop finished entities right before their update step.
//!
//! Entities that die during a frame stay in the world (and in the snapshot)
//! until the next frame's prune, so a dead unit is visible for one frame at
//! most.

use crate::components::*;
use bevy_ecs::prelude::*;

/// Despawn every unit of roster `M` whose health reached zero.
pub fn despawn_dead_units<M: Component>(
    mut commands: Commands,
    query: Query<(Entity, &Health), With<M>>,
) {
    for (entity, health) in query.iter() {
        if !health.is_alive() {
            commands.entity(entity).despawn();
        }
    }
}

/// Despawn projectiles that hit something or ran out of time.
pub fn despawn_spent_projectiles(mut commands: Commands, query: Query<(Entity, &Projectile)>) {
    for (entity, shot) in query.iter() {
        if !shot.alive {
            commands.entity(entity).despawn();
        }
    }
}

pub fn despawn_faded_particles(mut commands: Commands, query: Query<(Entity, &Particle)>) {
    for (entity, particle) in query.iter() {
        if particle.life <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

pub fn despawn_collected_loot(mut commands: Commands, query: Query<(Entity, &Loot)>) {
    for (entity, item) in query.iter() {
        if !item.alive {
            commands.entity(entity).despawn();
        }
    }
}

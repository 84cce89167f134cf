//! ECS Systems for the squad tactics simulation.
//!
//! Systems contain the game logic that operates on components.
//!
//! ## Frame Order
//!
//! One frame is a single chained pass; every phase sees the effects of the
//! ones before it:
//!
//! 1. `spawn_system` - hostile spawn timer
//! 2. Squad: prune dead, `fire_control_system`, `locomotion_system`
//! 3. Hostiles: prune dead, `pursuit_system`, `fire_control_system`,
//!    `locomotion_system`
//! 4. Projectiles: prune spent, `projectile_system`
//! 5. Particles: prune faded, `particle_system`
//! 6. Loot: prune collected, `loot_system`
//! 7. `collision_system`
//!
//! Spawns are queued through `Commands` and applied at the sync points the
//! chain inserts, so an entity created in one phase is visible to the next.

pub mod ai;
pub mod cleanup;
pub mod combat;
pub mod effects;
pub mod loot;
pub mod movement;
pub mod serialization;
pub mod spawning;

pub use ai::*;
pub use cleanup::*;
pub use combat::*;
pub use effects::*;
pub use loot::*;
pub use movement::*;
pub use serialization::*;
pub use spawning::*;

use crate::components::{Hostile, Squad};
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;

/// Build the per-frame schedule in its fixed phase order.
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(
        (
            spawn_system,
            despawn_dead_units::<Squad>,
            fire_control_system::<Squad, Hostile>,
            locomotion_system::<Squad>,
            despawn_dead_units::<Hostile>,
            pursuit_system,
            fire_control_system::<Hostile, Squad>,
            locomotion_system::<Hostile>,
            despawn_spent_projectiles,
            projectile_system,
            despawn_faded_particles,
            particle_system,
            despawn_collected_loot,
            loot_system,
            collision_system,
        )
            .chain(),
    );
    schedule
}

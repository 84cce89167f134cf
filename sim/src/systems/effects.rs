//! Particle effects - impact and level-up bursts.
//!
//! Particles never interact with anything; they exist so the renderer can
//! draw the explosion feedback the simulation decides on.

use crate::components::*;
use crate::rng::SimRng;
use crate::systems::movement::DeltaTime;
use bevy_ecs::prelude::*;

/// Particles per projectile impact.
pub const IMPACT_BURST: usize = 6;
/// Particles per level-up celebration.
pub const LEVEL_UP_BURST: usize = 40;
/// Life lost per second (a particle lasts 0.5s).
const PARTICLE_FADE_RATE: f32 = 2.0;

pub const MAP_IMPACT_COLOR: &str = "#ffffff";
pub const LEVEL_UP_COLOR: &str = "#ffd700";

/// Shape of a particle burst.
#[derive(Debug, Clone, Copy)]
pub struct Burst {
    pub count: usize,
    pub color: &'static str,
    pub min_speed: f32,
    pub max_speed: f32,
    pub size: f32,
}

impl Burst {
    pub fn impact(color: &'static str) -> Self {
        Self {
            count: IMPACT_BURST,
            color,
            min_speed: 40.0,
            max_speed: 140.0,
            size: 2.0,
        }
    }

    pub fn level_up() -> Self {
        Self {
            count: LEVEL_UP_BURST,
            color: LEVEL_UP_COLOR,
            min_speed: 80.0,
            max_speed: 260.0,
            size: 3.0,
        }
    }

    /// Scatter `count` particles from (`x`, `y`) in random directions.
    pub fn scatter(
        &self,
        x: f32,
        y: f32,
        rng: &mut SimRng,
        seq: &mut SpawnSequence,
    ) -> Vec<ParticleBundle> {
        (0..self.count)
            .map(|_| {
                let angle = rng.range(0.0, std::f32::consts::TAU);
                let speed = rng.range(self.min_speed, self.max_speed);
                let velocity = Velocity::from_angle(angle, speed);
                ParticleBundle {
                    seq: seq.next_seq(),
                    position: Position::new(x, y),
                    particle: Particle {
                        vx: velocity.vx,
                        vy: velocity.vy,
                        color: self.color,
                        life: 1.0,
                        size: self.size,
                    },
                }
            })
            .collect()
    }
}

/// System that drifts particles and fades them out.
pub fn particle_system(dt: Res<DeltaTime>, mut query: Query<(&mut Position, &mut Particle)>) {
    let delta = dt.0;
    for (mut pos, mut particle) in query.iter_mut() {
        pos.x += particle.vx * delta;
        pos.y += particle.vy * delta;
        particle.life -= PARTICLE_FADE_RATE * delta;
    }
}

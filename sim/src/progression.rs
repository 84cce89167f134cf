//! Squad-wide experience and level state.

use crate::components::{Health, Weapon};
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

const STARTING_THRESHOLD: u32 = 100;
const THRESHOLD_GROWTH: f32 = 1.5;

/// Max health granted to every live squad member per level.
pub const LEVEL_UP_HEALTH_BONUS: f32 = 20.0;
/// Damage multiplier factor granted per level.
pub const LEVEL_UP_DAMAGE_FACTOR: f32 = 1.1;

/// Experience pool shared by the whole squad.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub experience: u32,
    pub level: u32,
    pub experience_to_next: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            experience: 0,
            level: 1,
            experience_to_next: STARTING_THRESHOLD,
        }
    }
}

/// Outcome of a single level-up step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
}

impl LevelUp {
    /// Permanent buff applied to one live squad member.
    pub fn apply(&self, health: &mut Health, weapon: &mut Weapon) {
        health.raise_max(LEVEL_UP_HEALTH_BONUS);
        weapon.damage_multiplier *= LEVEL_UP_DAMAGE_FACTOR;
    }
}

impl Progression {
    /// Accumulate experience. Performs at most one level-up per call even
    /// if the overflow would cover several thresholds.
    pub fn add_experience(&mut self, amount: u32) -> Option<LevelUp> {
        self.experience = self.experience.saturating_add(amount);
        if self.experience < self.experience_to_next {
            return None;
        }
        self.experience -= self.experience_to_next;
        self.level += 1;
        self.experience_to_next = (self.experience_to_next as f32 * THRESHOLD_GROWTH).floor() as u32;
        Some(LevelUp { level: self.level })
    }
}

//! Simulation configuration.

use crate::error::ConfigError;
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Tunables for a simulation run. Every field has a default, so a JSON
/// config only needs the values it overrides.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for spawn decisions and particle scatter.
    pub seed: u64,
    /// Seconds between hostile spawn attempts.
    pub spawn_interval: f32,
    /// No spawns while this many hostiles are alive.
    pub hostile_cap: usize,
    /// Chance (0..=1) that a spawn attempt produces a turret.
    pub turret_chance: f32,
    /// Where the squad starts.
    pub squad_origin: (f32, f32),
    /// Distance of each formation slot from the squad destination.
    pub formation_spread: f32,
    /// Spawn the four squad members at startup.
    pub spawn_initial_squad: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            spawn_interval: 3.0,
            hostile_cap: 8,
            turret_chance: 0.25,
            squad_origin: (100.0, 384.0),
            formation_spread: 30.0,
            spawn_initial_squad: true,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(data).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.spawn_interval > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "spawn_interval",
                value: self.spawn_interval,
            });
        }
        if !(0.0..=1.0).contains(&self.turret_chance) {
            return Err(ConfigError::OutOfRange {
                field: "turret_chance",
                value: self.turret_chance,
                min: 0.0,
                max: 1.0,
            });
        }
        if self.formation_spread < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "formation_spread",
                value: self.formation_spread,
            });
        }
        Ok(())
    }
}

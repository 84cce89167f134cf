//! Squad Tactics - Simulation Core
//!
//! A deterministic, variable-timestep ECS simulation of a small squad
//! fighting waves of hostiles in a 2D arena.
//! Uses `bevy_ecs` for the entity-component-system architecture.

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod logging;
pub mod platformer;
pub mod progression;
pub mod rng;
pub mod spatial;
pub mod systems;
pub mod world;

pub use api::SimWorld;
pub use components::*;
pub use config::SimConfig;
pub use error::{ConfigError, LevelError, SimError};
pub use platformer::{Platformer, PlatformerInput, TileGrid, TileKind};
pub use progression::{LevelUp, Progression};
pub use rng::SimRng;
pub use spatial::{ArenaMap, Axis, Obstacle};
pub use systems::*;
pub use world::{HudCounters, Snapshot};

//! Snapshot types.
//!
//! The `Snapshot` struct provides a serializable, read-only view of the
//! simulation state that a renderer can draw from. It is taken between
//! frames, so it is always frame-consistent.

use crate::components::*;
use crate::progression::Progression;
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Snapshot of a single unit's state for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    pub id: u32,
    pub faction: String,
    pub archetype: String,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub health: f32,
    pub health_max: f32,
    /// `health / health_max`, for the health bar.
    pub health_fraction: f32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub faction: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    pub x: f32,
    pub y: f32,
    pub color: String,
    /// Doubles as the draw alpha.
    pub life: f32,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootSnapshot {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub value: u32,
}

/// Raw HUD numbers. Formatting is left to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudCounters {
    pub squad_alive: usize,
    pub hostiles_alive: usize,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next: u32,
}

impl HudCounters {
    pub fn from_world(world: &mut World) -> Self {
        let progression = world.get_resource::<Progression>().copied().unwrap_or_default();
        let mut squad = world.query_filtered::<&Health, With<Squad>>();
        let squad_alive = squad.iter(world).filter(|h| h.is_alive()).count();
        let mut hostiles = world.query_filtered::<&Health, With<Hostile>>();
        let hostiles_alive = hostiles.iter(world).filter(|h| h.is_alive()).count();

        Self {
            squad_alive,
            hostiles_alive,
            level: progression.level,
            experience: progression.experience,
            experience_to_next: progression.experience_to_next,
        }
    }
}

/// Complete simulation state snapshot for a renderer.
///
/// Every list is in creation order, so two identical runs serialize to
/// identical JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Frames stepped so far.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub time: f32,
    pub units: Vec<UnitSnapshot>,
    pub projectiles: Vec<ProjectileSnapshot>,
    pub particles: Vec<ParticleSnapshot>,
    pub loot: Vec<LootSnapshot>,
    pub hud: HudCounters,
}

impl Snapshot {
    /// Create a snapshot from the ECS world.
    pub fn from_world(world: &mut World, tick: u64, time: f32) -> Self {
        let mut query = world.query::<(&UnitId, &Archetype, &Faction, &Position, &Body, &Health)>();
        let mut units: Vec<(UnitId, UnitSnapshot)> = query
            .iter(world)
            .map(|(id, archetype, faction, pos, body, health)| {
                (
                    *id,
                    UnitSnapshot {
                        id: id.0,
                        faction: faction.as_str().to_string(),
                        archetype: archetype.as_str().to_string(),
                        x: pos.x,
                        y: pos.y,
                        radius: body.radius,
                        health: health.current,
                        health_max: health.max,
                        health_fraction: health.fraction(),
                        color: archetype.stats().color.to_string(),
                    },
                )
            })
            .collect();
        units.sort_by_key(|(id, _)| *id);

        let mut query = world.query::<(&SpawnSeq, &Position, &Projectile)>();
        let mut projectiles: Vec<(SpawnSeq, ProjectileSnapshot)> = query
            .iter(world)
            .filter(|(_, _, shot)| shot.alive)
            .map(|(seq, pos, shot)| {
                (
                    *seq,
                    ProjectileSnapshot {
                        x: pos.x,
                        y: pos.y,
                        angle: shot.angle,
                        faction: shot.faction.as_str().to_string(),
                    },
                )
            })
            .collect();
        projectiles.sort_by_key(|(seq, _)| *seq);

        let mut query = world.query::<(&SpawnSeq, &Position, &Particle)>();
        let mut particles: Vec<(SpawnSeq, ParticleSnapshot)> = query
            .iter(world)
            .filter(|(_, _, p)| p.life > 0.0)
            .map(|(seq, pos, p)| {
                (
                    *seq,
                    ParticleSnapshot {
                        x: pos.x,
                        y: pos.y,
                        color: p.color.to_string(),
                        life: p.life,
                        size: p.size,
                    },
                )
            })
            .collect();
        particles.sort_by_key(|(seq, _)| *seq);

        let mut query = world.query::<(&SpawnSeq, &Position, &Loot)>();
        let mut loot: Vec<(SpawnSeq, LootSnapshot)> = query
            .iter(world)
            .filter(|(_, _, item)| item.alive)
            .map(|(seq, pos, item)| {
                (
                    *seq,
                    LootSnapshot {
                        x: pos.x,
                        y: pos.y,
                        radius: item.radius,
                        value: item.value,
                    },
                )
            })
            .collect();
        loot.sort_by_key(|(seq, _)| *seq);

        Self {
            tick,
            time,
            units: units.into_iter().map(|(_, u)| u).collect(),
            projectiles: projectiles.into_iter().map(|(_, p)| p).collect(),
            particles: particles.into_iter().map(|(_, p)| p).collect(),
            loot: loot.into_iter().map(|(_, l)| l).collect(),
            hud: HudCounters::from_world(world),
        }
    }

    /// Serialize snapshot to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize snapshot to pretty JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

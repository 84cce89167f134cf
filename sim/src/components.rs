//! ECS Components for the squad tactics simulation.
//!
//! Components are pure data containers attached to entities.
//! All game logic lives in systems that query these components.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// SPATIAL COMPONENTS
// ============================================================================

/// 2D position in arena space (x grows right, y grows down).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// 2D velocity vector.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub vx: f32,
    pub vy: f32,
}

impl Velocity {
    pub fn new(vx: f32, vy: f32) -> Self {
        Self { vx, vy }
    }

    /// Velocity of `speed` along `angle` (radians).
    pub fn from_angle(angle: f32, speed: f32) -> Self {
        Self {
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
        }
    }
}

/// Collision circle of a unit.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub radius: f32,
}

// ============================================================================
// IDENTITY COMPONENTS
// ============================================================================

/// Creation-order identifier of a unit. Rosters are scanned in ascending
/// `UnitId` order so "first minimum wins" is stable across runs.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// Creation-order stamp for projectiles, particles and loot.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpawnSeq(pub u64);

/// Monotonic counter handing out `UnitId`s and `SpawnSeq`s.
#[derive(Resource, Debug, Default)]
pub struct SpawnSequence {
    next_unit: u32,
    next_seq: u64,
}

impl SpawnSequence {
    pub fn next_unit(&mut self) -> UnitId {
        let id = UnitId(self.next_unit);
        self.next_unit = self.next_unit.wrapping_add(1);
        id
    }

    pub fn next_seq(&mut self) -> SpawnSeq {
        let seq = SpawnSeq(self.next_seq);
        self.next_seq = self.next_seq.wrapping_add(1);
        seq
    }
}

/// Faction/side identifier.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Friendly,
    Hostile,
}

impl Faction {
    pub fn opponent(self) -> Self {
        match self {
            Faction::Friendly => Faction::Hostile,
            Faction::Hostile => Faction::Friendly,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Faction::Friendly => "Friendly",
            Faction::Hostile => "Hostile",
        }
    }
}

/// Roster marker for the player's squad.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Squad;

/// Roster marker for enemies and turrets.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Hostile;

// ============================================================================
// ARCHETYPES
// ============================================================================

/// Fixed stat/behaviour profile of a unit.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Assault,
    Heavy,
    Sniper,
    Scout,
    Enemy,
    Turret,
}

/// Stat tuple fixed by an archetype at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeStats {
    pub radius: f32,
    pub health: f32,
    pub speed: f32,
    pub range: f32,
    pub fire_interval: f32,
    pub damage: f32,
    pub projectile_speed: f32,
    /// Units that never relocate.
    pub stationary: bool,
    /// Units that re-aim their destination at the nearest opponent every frame.
    pub pursues: bool,
    /// Experience dropped on death (hostiles only).
    pub loot_value: u32,
    pub color: &'static str,
}

/// Baseline the squad archetypes deviate from.
const BASELINE: ArchetypeStats = ArchetypeStats {
    radius: 12.0,
    health: 100.0,
    speed: 120.0,
    range: 220.0,
    fire_interval: 0.4,
    damage: 12.0,
    projectile_speed: 450.0,
    stationary: false,
    pursues: false,
    loot_value: 0,
    color: "#00f2ff",
};

impl Archetype {
    pub const SQUAD: [Archetype; 4] = [
        Archetype::Assault,
        Archetype::Heavy,
        Archetype::Sniper,
        Archetype::Scout,
    ];

    pub fn stats(self) -> ArchetypeStats {
        match self {
            Archetype::Assault => BASELINE,
            Archetype::Heavy => ArchetypeStats {
                radius: 16.0,
                health: BASELINE.health * 1.5,
                speed: 80.0,
                fire_interval: 1.2,
                damage: 30.0,
                projectile_speed: 400.0,
                color: "#2f7bff",
                ..BASELINE
            },
            Archetype::Sniper => ArchetypeStats {
                range: 420.0,
                fire_interval: 1.6,
                damage: 45.0,
                projectile_speed: 800.0,
                color: "#9d4dff",
                ..BASELINE
            },
            Archetype::Scout => ArchetypeStats {
                speed: 180.0,
                range: 140.0,
                fire_interval: 0.25,
                damage: 6.0,
                color: "#3dff9a",
                ..BASELINE
            },
            Archetype::Enemy => ArchetypeStats {
                health: 40.0,
                speed: 70.0,
                range: 180.0,
                fire_interval: 1.0,
                damage: 8.0,
                projectile_speed: 300.0,
                pursues: true,
                loot_value: 20,
                color: "#ff3366",
                ..BASELINE
            },
            Archetype::Turret => ArchetypeStats {
                radius: 15.0,
                health: 120.0,
                speed: 0.0,
                range: 260.0,
                fire_interval: 1.5,
                damage: 14.0,
                projectile_speed: 350.0,
                stationary: true,
                loot_value: 50,
                color: "#ff8c00",
                ..BASELINE
            },
        }
    }

    pub fn faction(self) -> Faction {
        match self {
            Archetype::Assault | Archetype::Heavy | Archetype::Sniper | Archetype::Scout => {
                Faction::Friendly
            }
            Archetype::Enemy | Archetype::Turret => Faction::Hostile,
        }
    }

    /// Offset from the squad destination for this archetype's formation slot.
    pub fn formation_offset(self, spread: f32) -> (f32, f32) {
        match self {
            Archetype::Assault => (spread, 0.0),
            Archetype::Heavy => (-spread, 0.0),
            Archetype::Sniper => (0.0, -spread),
            Archetype::Scout => (0.0, spread),
            Archetype::Enemy | Archetype::Turret => (0.0, 0.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Archetype::Assault => "Assault",
            Archetype::Heavy => "Heavy",
            Archetype::Sniper => "Sniper",
            Archetype::Scout => "Scout",
            Archetype::Enemy => "Enemy",
            Archetype::Turret => "Turret",
        }
    }
}

// ============================================================================
// COMBAT COMPONENTS
// ============================================================================

/// Health of a unit. Never leaves `0..=max`.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn damage(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }

    /// Raise the ceiling and refill.
    pub fn raise_max(&mut self, amount: f32) {
        self.max += amount;
        self.current = self.max;
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// Fire control state: range check, cooldown gate and projectile recipe.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Weapon {
    pub range: f32,
    pub fire_interval: f32,
    /// Seconds accumulated since the last shot.
    pub cooldown: f32,
    pub base_damage: f32,
    pub damage_multiplier: f32,
    pub projectile_speed: f32,
}

impl Weapon {
    pub fn from_stats(stats: &ArchetypeStats) -> Self {
        Self {
            range: stats.range,
            fire_interval: stats.fire_interval,
            cooldown: 0.0,
            base_damage: stats.damage,
            damage_multiplier: 1.0,
            projectile_speed: stats.projectile_speed,
        }
    }

    pub fn damage(&self) -> f32 {
        self.base_damage * self.damage_multiplier
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown >= self.fire_interval
    }
}

// ============================================================================
// MOVEMENT COMPONENTS
// ============================================================================

/// Destination point of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f32,
    pub y: f32,
}

/// Locomotion state of a unit.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Mobility {
    pub speed: f32,
    pub target: Option<Waypoint>,
    pub stationary: bool,
}

impl Mobility {
    pub fn from_stats(stats: &ArchetypeStats) -> Self {
        Self {
            speed: stats.speed,
            target: None,
            stationary: stats.stationary,
        }
    }

    /// Overwrites any previous destination.
    pub fn set_target(&mut self, x: f32, y: f32) {
        self.target = Some(Waypoint { x, y });
    }
}

// ============================================================================
// TRANSIENT ENTITIES
// ============================================================================

/// Straight-line, time-limited hazard.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub angle: f32,
    pub speed: f32,
    pub faction: Faction,
    pub damage: f32,
    /// Seconds left before the shot fizzles.
    pub ttl: f32,
    pub alive: bool,
}

/// Seconds a projectile lives without hitting anything.
pub const PROJECTILE_TTL: f32 = 2.0;

/// Cosmetic debris. `life` runs from 1 down to 0.
#[derive(Component, Debug, Clone, Copy)]
pub struct Particle {
    pub vx: f32,
    pub vy: f32,
    pub color: &'static str,
    pub life: f32,
    pub size: f32,
}

/// Data fragment dropped by a destroyed hostile.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Loot {
    pub radius: f32,
    pub value: u32,
    pub alive: bool,
}

pub const LOOT_RADIUS: f32 = 5.0;

// ============================================================================
// BUNDLE HELPERS
// ============================================================================

/// Bundle for spawning a complete unit entity.
#[derive(Bundle)]
pub struct UnitBundle {
    pub id: UnitId,
    pub archetype: Archetype,
    pub faction: Faction,
    pub position: Position,
    pub body: Body,
    pub health: Health,
    pub mobility: Mobility,
    pub weapon: Weapon,
}

impl UnitBundle {
    pub fn new(id: UnitId, archetype: Archetype, x: f32, y: f32) -> Self {
        let stats = archetype.stats();
        Self {
            id,
            archetype,
            faction: archetype.faction(),
            position: Position::new(x, y),
            body: Body { radius: stats.radius },
            health: Health::new(stats.health),
            mobility: Mobility::from_stats(&stats),
            weapon: Weapon::from_stats(&stats),
        }
    }
}

/// Bundle for spawning a projectile.
#[derive(Bundle)]
pub struct ProjectileBundle {
    pub seq: SpawnSeq,
    pub position: Position,
    pub projectile: Projectile,
}

impl ProjectileBundle {
    pub fn new(seq: SpawnSeq, x: f32, y: f32, angle: f32, speed: f32, faction: Faction, damage: f32) -> Self {
        Self {
            seq,
            position: Position::new(x, y),
            projectile: Projectile {
                angle,
                speed,
                faction,
                damage,
                ttl: PROJECTILE_TTL,
                alive: true,
            },
        }
    }
}

/// Bundle for spawning a particle.
#[derive(Bundle)]
pub struct ParticleBundle {
    pub seq: SpawnSeq,
    pub position: Position,
    pub particle: Particle,
}

/// Bundle for spawning a loot pickup.
#[derive(Bundle)]
pub struct LootBundle {
    pub seq: SpawnSeq,
    pub position: Position,
    pub loot: Loot,
}

impl LootBundle {
    pub fn new(seq: SpawnSeq, x: f32, y: f32, value: u32) -> Self {
        Self {
            seq,
            position: Position::new(x, y),
            loot: Loot {
                radius: LOOT_RADIUS,
                value,
                alive: true,
            },
        }
    }
}

//! Public API for the simulation.
//!
//! This module provides the main interface for a host (renderer, test
//! harness, headless runner) to interact with the simulation.
//!
//! ## Variable Timestep
//!
//! Each call to `step(dt)` runs exactly one frame with the given `dt`; there
//! is no accumulator. Hosts that only know wall-clock timestamps call
//! `frame(timestamp_ms)` instead, which derives `dt` from the previous call.
//! Given the same seed and the same dt sequence, two worlds evolve
//! identically.

use crate::components::*;
use crate::config::SimConfig;
use crate::error::SimError;
use crate::progression::{LevelUp, Progression};
use crate::rng::SimRng;
use crate::spatial::ArenaMap;
use crate::systems::*;
use crate::world::{HudCounters, Snapshot};
use bevy_ecs::prelude::*;
use tracing::info;

/// The main simulation world container.
///
/// Holds the ECS world and schedule, providing a clean API for:
/// - Initializing the simulation
/// - Stepping the simulation forward
/// - Extracting state snapshots
/// - Issuing squad orders
pub struct SimWorld {
    world: World,
    schedule: Schedule,
    tick: u64,
    time: f32,
    /// Host timestamp of the previous `frame` call, in milliseconds.
    last_frame_ms: f64,
}

impl SimWorld {
    /// Default configuration on the stock arena.
    pub fn new() -> Self {
        let mut world = World::new();
        Self::install(&mut world, SimConfig::default(), ArenaMap::default_level());
        Self::from_parts(world)
    }

    /// Create a simulation world with custom configuration and level.
    pub fn with_config(config: SimConfig, map: ArenaMap) -> Result<Self, SimError> {
        config.validate()?;
        map.validate()?;
        let mut world = World::new();
        Self::install(&mut world, config, map);
        Ok(Self::from_parts(world))
    }

    fn install(world: &mut World, config: SimConfig, map: ArenaMap) {
        info!(
            seed = config.seed,
            obstacles = map.obstacles().len(),
            width = map.width,
            height = map.height,
            "simulation initialised"
        );
        world.insert_resource(DeltaTime(0.0));
        world.insert_resource(SimRng::new(config.seed));
        world.insert_resource(SpawnTimer::default());
        world.insert_resource(SpawnSequence::default());
        world.insert_resource(Progression::default());
        world.insert_resource(map);

        if config.spawn_initial_squad {
            let (ox, oy) = config.squad_origin;
            for archetype in Archetype::SQUAD {
                let (dx, dy) = archetype.formation_offset(config.formation_spread);
                let id = world.resource_mut::<SpawnSequence>().next_unit();
                world.spawn((UnitBundle::new(id, archetype, ox + dx, oy + dy), Squad));
            }
        }
        world.insert_resource(config);
    }

    fn from_parts(world: World) -> Self {
        Self {
            world,
            schedule: build_schedule(),
            tick: 0,
            time: 0.0,
            last_frame_ms: 0.0,
        }
    }

    /// Step the simulation forward by `dt` seconds (one frame).
    pub fn step(&mut self, dt: f32) {
        self.world.resource_mut::<DeltaTime>().0 = dt;
        self.schedule.run(&mut self.world);
        self.tick += 1;
        self.time += dt;
    }

    /// Step using a host timestamp in milliseconds. The first call measures
    /// from zero. A timestamp earlier than the previous one yields `dt = 0`.
    pub fn frame(&mut self, timestamp_ms: f64) {
        let dt = ((timestamp_ms - self.last_frame_ms) / 1000.0).max(0.0) as f32;
        self.last_frame_ms = timestamp_ms;
        self.step(dt);
    }

    /// Point the squad at (`x`, `y`). Each live member takes its formation
    /// slot around the point.
    pub fn set_squad_target(&mut self, x: f32, y: f32) {
        let spread = self.world.resource::<SimConfig>().formation_spread;
        let mut query = self
            .world
            .query_filtered::<(&Archetype, &Health, &mut Mobility), With<Squad>>();
        for (archetype, health, mut mobility) in query.iter_mut(&mut self.world) {
            if !health.is_alive() {
                continue;
            }
            let (dx, dy) = archetype.formation_offset(spread);
            mobility.set_target(x + dx, y + dy);
        }
    }

    /// Grant experience to the squad outside of loot pickup. A resulting
    /// level-up buffs the live squad and fires the celebration burst.
    pub fn add_experience(&mut self, amount: u32) -> Option<LevelUp> {
        let level_up = self.world.resource_mut::<Progression>().add_experience(amount)?;

        let mut query = self
            .world
            .query_filtered::<(&mut Health, &mut Weapon), With<Squad>>();
        for (mut health, mut weapon) in query.iter_mut(&mut self.world) {
            if health.is_alive() {
                level_up.apply(&mut health, &mut weapon);
            }
        }

        let (cx, cy) = {
            let map = self.world.resource::<ArenaMap>();
            (map.width / 2.0, map.height / 2.0)
        };
        let particles = self.world.resource_scope(|world, mut rng: Mut<SimRng>| {
            let mut sequence = world.resource_mut::<SpawnSequence>();
            Burst::level_up().scatter(cx, cy, &mut rng, &mut sequence)
        });
        self.world.spawn_batch(particles);

        info!(level = level_up.level, "squad levelled up");
        Some(level_up)
    }

    /// Spawn a unit of any archetype. Squad archetypes join the squad
    /// roster, the rest join the hostiles.
    pub fn spawn_unit(&mut self, archetype: Archetype, x: f32, y: f32) -> UnitId {
        let id = self.world.resource_mut::<SpawnSequence>().next_unit();
        let bundle = UnitBundle::new(id, archetype, x, y);
        match archetype.faction() {
            Faction::Friendly => self.world.spawn((bundle, Squad)),
            Faction::Hostile => self.world.spawn((bundle, Hostile)),
        };
        id
    }

    /// Spawn a loose projectile.
    pub fn spawn_projectile(
        &mut self,
        x: f32,
        y: f32,
        angle: f32,
        speed: f32,
        faction: Faction,
        damage: f32,
    ) {
        let seq = self.world.resource_mut::<SpawnSequence>().next_seq();
        self.world
            .spawn(ProjectileBundle::new(seq, x, y, angle, speed, faction, damage));
    }

    /// Drop a loot item worth `value` experience.
    pub fn spawn_loot(&mut self, x: f32, y: f32, value: u32) {
        let seq = self.world.resource_mut::<SpawnSequence>().next_seq();
        self.world.spawn(LootBundle::new(seq, x, y, value));
    }

    /// Get a snapshot of the current simulation state.
    pub fn snapshot(&mut self) -> Snapshot {
        Snapshot::from_world(&mut self.world, self.tick, self.time)
    }

    /// Get the snapshot as a JSON string.
    pub fn snapshot_json(&mut self) -> String {
        self.snapshot().to_json().unwrap_or_else(|_| "{}".to_string())
    }

    pub fn hud(&mut self) -> HudCounters {
        HudCounters::from_world(&mut self.world)
    }

    pub fn progression(&self) -> Progression {
        self.world.get_resource::<Progression>().copied().unwrap_or_default()
    }

    pub fn map(&self) -> &ArenaMap {
        self.world.resource::<ArenaMap>()
    }

    /// Get the current tick number.
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Get the elapsed simulation time.
    pub fn current_time(&self) -> f32 {
        self.time
    }

    /// Get direct access to the ECS world (for advanced usage).
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get mutable access to the ECS world (for advanced usage).
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}

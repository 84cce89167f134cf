//! End-to-end combat scenarios driven through the public `SimWorld` API.

use std::collections::HashSet;

use squad_sim::{Archetype, ArenaMap, Faction, SimConfig, SimWorld, Snapshot};

fn quiet_arena() -> SimWorld {
    let config = SimConfig {
        spawn_interval: 1.0e6,
        spawn_initial_squad: false,
        ..Default::default()
    };
    SimWorld::with_config(config, ArenaMap::new(1024.0, 768.0, vec![])).unwrap()
}

fn battle() -> SimWorld {
    let config = SimConfig {
        seed: 7,
        spawn_interval: 0.5,
        ..Default::default()
    };
    let mut sim = SimWorld::with_config(config, ArenaMap::default_level()).unwrap();
    sim.set_squad_target(450.0, 384.0);
    sim
}

fn dead_ids(snapshot: &Snapshot) -> Vec<u32> {
    snapshot
        .units
        .iter()
        .filter(|u| u.health <= 0.0)
        .map(|u| u.id)
        .collect()
}

#[test]
fn test_lethal_shot_round_trip() {
    let mut sim = quiet_arena();
    let enemy = sim.spawn_unit(Archetype::Enemy, 600.0, 300.0);
    sim.spawn_projectile(595.0, 300.0, 0.0, 300.0, Faction::Friendly, 60.0);

    sim.step(0.01);
    let after_hit = sim.snapshot();
    let hostile = after_hit
        .units
        .iter()
        .find(|u| u.id == enemy.0)
        .expect("dead hostile is still listed until the next prune");
    assert_eq!(hostile.health, 0.0);
    assert_eq!(hostile.health_fraction, 0.0);
    assert!(after_hit.projectiles.is_empty());
    assert_eq!(after_hit.loot.len(), 1);
    assert_eq!((after_hit.loot[0].x, after_hit.loot[0].y), (600.0, 300.0));
    assert_eq!(after_hit.loot[0].value, 20);

    sim.step(0.01);
    let next = sim.snapshot();
    assert!(next.units.is_empty());
    assert_eq!(next.loot.len(), 1);
    assert_eq!(next.hud.hostiles_alive, 0);
}

#[test]
fn test_squad_collects_drop_and_levels() {
    let mut sim = quiet_arena();
    sim.spawn_unit(Archetype::Scout, 100.0, 100.0);
    sim.spawn_loot(110.0, 100.0, 60);
    sim.spawn_loot(90.0, 100.0, 60);

    sim.step(0.01);
    let hud = sim.hud();
    assert_eq!(hud.level, 2);
    assert_eq!(hud.experience, 20);
    assert_eq!(hud.experience_to_next, 150);

    let snapshot = sim.snapshot();
    let scout = &snapshot.units[0];
    assert_eq!((scout.health, scout.health_max), (120.0, 120.0));
    // Collected loot lingers flagged until the next prune; the snapshot
    // only lists live items.
    assert!(snapshot.loot.is_empty());
}

#[test]
fn test_turret_holds_position_and_fires() {
    let mut sim = quiet_arena();
    sim.spawn_unit(Archetype::Assault, 500.0, 300.0);
    let turret = sim.spawn_unit(Archetype::Turret, 700.0, 300.0);

    let mut saw_hostile_shot = false;
    for _ in 0..120 {
        sim.step(1.0 / 60.0);
        let snapshot = sim.snapshot();
        saw_hostile_shot |= snapshot.projectiles.iter().any(|p| p.faction == "Hostile");
        if let Some(t) = snapshot.units.iter().find(|u| u.id == turret.0) {
            assert_eq!((t.x, t.y), (700.0, 300.0));
        }
    }
    assert!(saw_hostile_shot);
}

#[test]
fn test_enemy_closes_distance() {
    let mut sim = quiet_arena();
    sim.spawn_unit(Archetype::Heavy, 100.0, 400.0);
    let enemy = sim.spawn_unit(Archetype::Enemy, 900.0, 400.0);

    sim.step(1.0);
    let snapshot = sim.snapshot();
    let e = snapshot.units.iter().find(|u| u.id == enemy.0).unwrap();
    assert!((e.x - 830.0).abs() < 1e-3);
    assert!((e.y - 400.0).abs() < 1e-3);
}

#[test]
fn test_battle_invariants() {
    let mut sim = battle();
    let mut previous_dead: Vec<u32> = Vec::new();
    let mut last_level = 1;
    let mut last_threshold = 100;

    for frame in 0..3000 {
        if frame == 1500 {
            sim.set_squad_target(800.0, 200.0);
        }
        sim.step(1.0 / 60.0);
        let snapshot = sim.snapshot();

        // Health stays within bounds.
        for unit in &snapshot.units {
            assert!(unit.health >= 0.0 && unit.health <= unit.health_max, "{unit:?}");
        }

        // Units never stand inside an obstacle.
        let map = sim.map();
        for unit in snapshot.units.iter().filter(|u| u.health > 0.0) {
            assert!(!map.occupied(unit.x, unit.y, unit.radius), "{unit:?} in a wall");
        }

        // Whatever was dead last frame is gone now.
        let present: HashSet<u32> = snapshot.units.iter().map(|u| u.id).collect();
        for id in &previous_dead {
            assert!(!present.contains(id), "unit {id} outlived its prune");
        }
        previous_dead = dead_ids(&snapshot);

        // Progression only moves forward.
        assert!(snapshot.hud.level >= last_level);
        assert!(snapshot.hud.experience_to_next >= last_threshold);
        assert!(snapshot.hud.experience < snapshot.hud.experience_to_next);
        last_level = snapshot.hud.level;
        last_threshold = snapshot.hud.experience_to_next;

        assert!(snapshot.hud.hostiles_alive <= 8);
    }
}

#[test]
fn test_new_order_replaces_old_one() {
    let config = SimConfig {
        spawn_interval: 1.0e6,
        ..Default::default()
    };
    let mut sim = SimWorld::with_config(config, ArenaMap::new(1024.0, 768.0, vec![])).unwrap();
    sim.set_squad_target(900.0, 700.0);
    for _ in 0..30 {
        sim.step(1.0 / 60.0);
    }
    sim.set_squad_target(100.0, 100.0);
    for _ in 0..900 {
        sim.step(1.0 / 60.0);
    }

    let snapshot = sim.snapshot();
    assert_eq!(snapshot.units.len(), 4);
    for unit in &snapshot.units {
        let (dx, dy) = match unit.archetype.as_str() {
            "Assault" => (30.0, 0.0),
            "Heavy" => (-30.0, 0.0),
            "Sniper" => (0.0, -30.0),
            _ => (0.0, 30.0),
        };
        let gap = ((unit.x - (100.0 + dx)).powi(2) + (unit.y - (100.0 + dy)).powi(2)).sqrt();
        assert!(gap <= 5.0, "{unit:?} missed its slot by {gap}");
    }
}

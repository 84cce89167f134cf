//! Basic demonstration of the squad tactics simulation.
//!
//! Run with: cargo run --example basic_demo
//! Set `RUST_LOG=debug` to see spawns and shots, `LOG_FORMAT=json` for
//! machine-readable output.

use squad_sim::{logging, Platformer, PlatformerInput, SimWorld};

fn main() {
    logging::init(false);

    println!("=== Squad Tactics - Simulation Demo ===\n");

    let mut sim = SimWorld::new();

    println!("Initial state:");
    print_snapshot(&mut sim);

    println!("\n--- Ordering the squad to (450, 384) ---\n");
    sim.set_squad_target(450.0, 384.0);

    // 20 seconds at 60 frames/sec, driven by host timestamps
    println!("Running simulation for 1200 frames...\n");
    let mut now_ms = 0.0;
    for frame in 0..1200 {
        now_ms += 1000.0 / 60.0;
        sim.frame(now_ms);

        if (frame + 1) % 240 == 0 {
            println!("--- Frame {} (t={:.1}s) ---", sim.current_tick(), sim.current_time());
            print_snapshot(&mut sim);
        }
    }

    println!("\n=== Final State (JSON) ===\n");
    match sim.snapshot().to_json_pretty() {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("failed to serialize snapshot: {err}"),
    }

    println!("\n=== Legacy platformer: running right for 5 seconds ===\n");
    let mut game = Platformer::default();
    let input = PlatformerInput {
        right: true,
        ..Default::default()
    };
    for _ in 0..300 {
        game.step(input);
    }
    let p = game.player();
    println!("  DEATHS: {}  POS: {},{}", game.deaths(), (p.x / 40.0).floor(), (p.y / 40.0).floor());
}

fn print_snapshot(sim: &mut SimWorld) {
    let snapshot = sim.snapshot();
    let hud = snapshot.hud;
    println!(
        "  Squad {} | Hostiles {} | Level {} ({}/{})",
        hud.squad_alive, hud.hostiles_alive, hud.level, hud.experience, hud.experience_to_next
    );

    for unit in &snapshot.units {
        println!(
            "    {:>3} {:<8} {:<7} pos=({:.1}, {:.1}) hp={:.0}/{:.0}",
            unit.id, unit.faction, unit.archetype, unit.x, unit.y, unit.health, unit.health_max
        );
    }
    println!(
        "    projectiles={} particles={} loot={}",
        snapshot.projectiles.len(),
        snapshot.particles.len(),
        snapshot.loot.len()
    );
}

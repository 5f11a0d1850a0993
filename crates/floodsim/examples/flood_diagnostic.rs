//! Headless flood diagnostic: runs a full day cycle against flat terrain
//! and prints per-phase health so tuning changes are easy to eyeball.
//!
//! Usage: cargo run --example flood_diagnostic [path/to/height.raw]

use std::path::Path;

use floodsim::{FloodSimulation, HeightField, Vec3};

const INCOMING_TICKS: u32 = 70;
const FLOOD_TICKS: u32 = 230;
const DAMAGE_TICKS: u32 = 150;

fn main() {
    env_logger::init();

    let terrain = match std::env::args().nth(1) {
        Some(path) => HeightField::load_raw(Path::new(&path)).expect("failed to load heightmap"),
        None => HeightField::flat(0.3),
    };

    let mut sim = FloodSimulation::new(terrain);
    sim.spawn_homes(
        vec![
            ("maison_nord", Vec3::new(40.0, 14.0, -52.0)),
            ("maison_est", Vec3::new(62.0, 12.0, 8.0)),
            ("maison_sud", Vec3::new(-18.0, 15.0, 60.0)),
        ],
        "maison",
    );

    println!(
        "{} particles, {} homes, starting energy {}",
        sim.particle_count(),
        sim.homes.len(),
        sim.homes.starting_energy()
    );

    // Totem placement phase: drop totems on the first valid spots along
    // the shoreline.
    for x in [-60.0, 0.0, 60.0] {
        let candidate = Vec3::new(x, 10.0, 70.0);
        if sim.is_placement_valid(candidate) && sim.totems.place(candidate) {
            println!("totem placed at {candidate}");
        }
    }

    // Incoming tide.
    for _ in 0..INCOMING_TICKS {
        sim.apply_wave(0.005);
        sim.update();
    }
    println!("tide in: health {:5.1}%", sim.health());

    // The wave hits; homes take damage while the flood is high.
    for tick in 0..FLOOD_TICKS {
        sim.take_damage = tick < DAMAGE_TICKS;
        sim.update();

        if tick % 50 == 0 {
            let field = sim.rebuild_density_field();
            let wet_cells = field.values.iter().filter(|&&v| v >= field.iso_level).count();
            println!(
                "tick {tick:3}: health {:5.1}%, energy {:7.2}, {} wet cells",
                sim.health(),
                sim.homes.total_energy(),
                wet_cells
            );
        }
    }
    sim.take_damage = false;

    println!(
        "day over: health {:.1}% ({} survivors of {})",
        sim.health(),
        sim.homes.iter().filter(|h| h.energy > 0.0).count(),
        sim.homes.len()
    );

    sim.begin_day();
    println!("reset: health {:.1}%", sim.health());
}

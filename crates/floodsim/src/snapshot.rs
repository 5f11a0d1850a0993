//! Snapshot system for saving and restoring dynamic simulation state.
//!
//! A snapshot carries the particle kinematics, home energies, totem
//! placement, and the damage flag. Static configuration (arena, mapping,
//! terrain, density grid) is not persisted; a snapshot only restores into
//! a simulation built with matching configuration.

use std::error::Error;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::particle::Particle;
use crate::village::Totem;
use crate::FloodSimulation;

/// A point-in-time capture of the dynamic simulation state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u64,
    pub take_damage: bool,
    pub particles: Vec<Particle>,
    pub home_energy: Vec<f32>,
    pub totems: Vec<Totem>,
}

impl Snapshot {
    /// Capture the simulation's dynamic state.
    pub fn capture(sim: &FloodSimulation) -> Self {
        Self {
            frame: sim.frame,
            take_damage: sim.take_damage,
            particles: sim.particles.list.clone(),
            home_energy: sim.homes.iter().map(|h| h.energy).collect(),
            totems: sim.totems.active().to_vec(),
        }
    }

    /// Restore into a simulation with matching particle and home counts.
    pub fn restore(&self, sim: &mut FloodSimulation) -> Result<(), Box<dyn Error>> {
        if self.particles.len() != sim.particles.len() {
            return Err(format!(
                "snapshot holds {} particles, simulation has {}",
                self.particles.len(),
                sim.particles.len()
            )
            .into());
        }
        if self.home_energy.len() != sim.homes.len() {
            return Err(format!(
                "snapshot holds {} homes, simulation has {}",
                self.home_energy.len(),
                sim.homes.len()
            )
            .into());
        }

        sim.frame = self.frame;
        sim.take_damage = self.take_damage;
        sim.particles.list.clone_from(&self.particles);
        for (home, &energy) in sim.homes.iter_mut().zip(&self.home_energy) {
            home.energy = energy;
        }

        sim.totems.clear();
        for totem in &self.totems {
            sim.totems.place(totem.position);
        }
        Ok(())
    }

    /// Save snapshot to a JSON file.
    pub fn save_json(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load snapshot from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self, Box<dyn Error>> {
        let json = std::fs::read_to_string(path)?;
        let snapshot = serde_json::from_str(&json)?;
        Ok(snapshot)
    }
}

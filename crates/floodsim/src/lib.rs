//! Particle-based flood simulation over heightfield terrain.
//!
//! A fixed-count particle field floods a bounded arena. Each tick runs a
//! 1D sort-and-sweep neighbor search, accumulates cohesion/repulsion and
//! external-body forces, integrates with arena-boundary and terrain
//! collision, and (on demand) splats the particles into a scalar density
//! field for iso-surface extraction by the rendering side.
//!
//! # Example
//!
//! ```
//! use floodsim::{FloodSimulation, HeightField, Vec3};
//!
//! let mut sim = FloodSimulation::new(HeightField::flat(0.2));
//! sim.spawn_homes(vec![("maison_nord", Vec3::new(40.0, 12.0, -30.0))], "maison");
//! sim.totems.place(Vec3::new(10.0, 8.0, 25.0));
//!
//! // Run a few ticks with an incoming tide.
//! for _ in 0..10 {
//!     sim.apply_wave(0.005);
//!     sim.update();
//! }
//!
//! // Hand the density field to the surface extractor.
//! let field = sim.rebuild_density_field();
//! assert!(field.values.iter().all(|&v| v >= 0.0));
//! ```

pub mod arena;
pub mod constants;
pub mod density;
pub mod forces;
pub mod integrate;
pub mod particle;
pub mod serde_utils;
pub mod snapshot;
pub mod sweep;
pub mod terrain;
pub mod village;

pub use arena::{Arena, FieldMapping};
pub use density::{DensityField, FieldDesc};
pub use glam::Vec3;
pub use particle::{Particle, Particles};
pub use snapshot::Snapshot;
pub use terrain::HeightField;
pub use village::{Home, Homes, Totem, Totems};

use constants::PLACEMENT_COHERENCY;

/// The whole simulation state, owned by the caller and advanced one tick
/// at a time. No globals; every stage reads and writes through this
/// context.
pub struct FloodSimulation {
    /// Simulation volume. Immutable after construction.
    pub arena: Arena,
    /// Render-space to field-space conversion for totems and homes.
    pub mapping: FieldMapping,
    /// Terrain sampler.
    pub terrain: HeightField,
    /// The particle store.
    pub particles: Particles,
    /// Placed totems (mutated by placement logic).
    pub totems: Totems,
    /// Homes under protection.
    pub homes: Homes,
    /// Density field handed to the surface extractor.
    pub density: DensityField,
    /// Gates the home-damage pass; set per tick by game logic.
    pub take_damage: bool,
    /// Completed tick count.
    pub frame: u64,
}

impl FloodSimulation {
    /// Create a simulation with the default arena, mapping, and density
    /// grid.
    pub fn new(terrain: HeightField) -> Self {
        Self::with_config(Arena::default(), FieldMapping::default(), terrain)
    }

    /// Create a simulation with explicit arena and mapping. Panics if the
    /// arena yields no particles (fatal configuration error).
    pub fn with_config(arena: Arena, mapping: FieldMapping, terrain: HeightField) -> Self {
        let particles = Particles::seed(&arena);
        Self {
            arena,
            mapping,
            terrain,
            particles,
            totems: Totems::new(),
            homes: Homes::default(),
            density: DensityField::default(),
            take_damage: false,
            frame: 0,
        }
    }

    /// Spawn homes from (node name, world translation) scene markers
    /// whose name starts with `prefix`. Fixed afterward.
    pub fn spawn_homes<'a, I>(&mut self, markers: I, prefix: &str)
    where
        I: IntoIterator<Item = (&'a str, Vec3)>,
    {
        self.homes = Homes::spawn_from_markers(markers, prefix);
    }

    /// Advance the simulation one tick: neighbor sweep, force
    /// accumulation, integration with boundary and terrain collision.
    /// The density field is rebuilt separately (`rebuild_density_field`).
    pub fn update(&mut self) {
        forces::apply_cohesion(&mut self.particles);

        for totem in self.totems.active() {
            let field_pos = self.mapping.world_to_field(totem.position);
            forces::apply_totem_repulsion(&mut self.particles, field_pos);
        }

        if self.take_damage {
            let mapping = self.mapping;
            let particles = &self.particles;
            for home in self.homes.iter_mut() {
                let field_pos = mapping.world_to_field(home.position);
                forces::apply_home_damage(particles, field_pos, &mut home.energy);
            }
        }

        forces::apply_gravity(&mut self.particles);
        integrate::step(&mut self.particles, &self.arena, &self.terrain);

        self.frame += 1;
    }

    /// Re-splat the density field from the current particle positions and
    /// return the extraction inputs.
    pub fn rebuild_density_field(&mut self) -> FieldDesc<'_> {
        self.density.rebuild(&self.particles, &self.arena);
        self.density.desc()
    }

    /// Tidal push along Z, strongest far from the arena's +Z edge.
    pub fn apply_wave(&mut self, strength: f32) {
        forces::apply_wave(&mut self.particles, &self.arena, strength);
    }

    /// Start a new day: totems wash away, home energy refills.
    pub fn begin_day(&mut self) {
        self.totems.clear();
        self.homes.reset_energy();
    }

    /// Remaining home energy as a percentage of the spawn-time total.
    pub fn health(&self) -> f32 {
        self.homes.health()
    }

    /// Whether the terrain around a candidate totem position is even
    /// enough to build on: samples the ground normal at three offsets
    /// around the position and requires every pairwise dot product to
    /// stay above the coherency threshold.
    pub fn is_placement_valid(&self, world_pos: Vec3) -> bool {
        let offsets = [
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
        ];

        let normals = offsets.map(|offset| {
            let field_pos = self.mapping.world_to_field(world_pos + offset);
            self.terrain.sample(&self.arena, field_pos).0
        });

        normals[0].dot(normals[1]) >= PLACEMENT_COHERENCY
            && normals[1].dot(normals[2]) >= PLACEMENT_COHERENCY
            && normals[0].dot(normals[2]) >= PLACEMENT_COHERENCY
    }

    /// Total particle count (constant across the simulation's lifetime).
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrain::HEIGHTMAP_SIZE;

    #[test]
    fn test_simulation_creation() {
        let sim = FloodSimulation::new(HeightField::flat(0.0));
        assert_eq!(sim.particle_count(), 4096);
        assert_eq!(sim.frame, 0);
        assert!(!sim.take_damage);
    }

    #[test]
    fn test_update_advances_frame_and_keeps_count() {
        let mut sim = FloodSimulation::new(HeightField::flat(0.0));
        for _ in 0..3 {
            sim.update();
        }
        assert_eq!(sim.frame, 3);
        assert_eq!(sim.particle_count(), 4096);
    }

    #[test]
    fn test_accelerations_reset_after_tick() {
        let mut sim = FloodSimulation::new(HeightField::flat(0.0));
        sim.update();
        for p in &sim.particles.list {
            assert_eq!(p.acceleration, Vec3::ZERO);
        }
    }

    #[test]
    fn test_damage_only_when_flagged() {
        let mut sim = FloodSimulation::new(HeightField::flat(0.0));
        // A home in the middle of the arena, guaranteed in-range particles.
        sim.spawn_homes(vec![("maison", Vec3::new(0.0, 6.0, 0.0))], "maison");

        sim.take_damage = false;
        sim.update();
        let untouched = sim.homes.total_energy();
        assert_eq!(untouched, sim.homes.starting_energy());
    }

    #[test]
    fn test_placement_valid_on_flat_terrain() {
        let sim = FloodSimulation::new(HeightField::flat(0.3));
        assert!(sim.is_placement_valid(Vec3::new(20.0, 10.0, -15.0)));
    }

    #[test]
    fn test_placement_rejected_on_uneven_terrain() {
        // Sawtooth heights along U: neighboring samples see wildly
        // different tangents, so normals diverge around any position.
        let mut heights = vec![0.0; HEIGHTMAP_SIZE * HEIGHTMAP_SIZE];
        for v in 0..HEIGHTMAP_SIZE {
            for u in 0..HEIGHTMAP_SIZE {
                heights[u + v * HEIGHTMAP_SIZE] = (u % 3) as f32 * 0.3;
            }
        }
        let sim = FloodSimulation::new(HeightField::from_heights(heights));
        assert!(!sim.is_placement_valid(Vec3::new(0.0, 10.0, 0.0)));
    }

    #[test]
    fn test_wave_pushes_particles() {
        let mut sim = FloodSimulation::new(HeightField::flat(0.0));
        let before: f32 = sim.particles.list.iter().map(|p| p.velocity.z).sum();
        sim.apply_wave(0.01);
        let after: f32 = sim.particles.list.iter().map(|p| p.velocity.z).sum();
        assert!(after > before);
    }

    #[test]
    fn test_begin_day_resets_state() {
        let mut sim = FloodSimulation::new(HeightField::flat(0.0));
        sim.spawn_homes(vec![("maison", Vec3::new(50.0, 10.0, 50.0))], "maison");
        sim.totems.place(Vec3::ZERO);
        for home in sim.homes.iter_mut() {
            home.energy = -2.0;
        }

        sim.begin_day();

        assert_eq!(sim.totems.active_count(), 0);
        assert_eq!(sim.homes.total_energy(), sim.homes.starting_energy());
    }
}

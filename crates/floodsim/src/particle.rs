//! Particle representation and the fixed-count particle store.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::serde_utils::vec3_serde;

/// A single flood particle.
///
/// The neighbor sweep reorders the store in place every tick, so the index
/// of a particle is meaningless across ticks. The `id` is assigned at
/// seeding and survives reordering; use it for debugging or event
/// attribution.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    #[serde(with = "vec3_serde")]
    pub position: Vec3,
    #[serde(with = "vec3_serde")]
    pub velocity: Vec3,
    /// Per-tick force accumulator. Reset to zero after integration.
    #[serde(skip)]
    pub acceleration: Vec3,
}

impl Particle {
    /// Create a stationary particle at the given position.
    pub fn new(id: u32, position: Vec3) -> Self {
        Self {
            id,
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
        }
    }

    /// Current speed (velocity magnitude).
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// The particle store. Created once at startup; the count never changes.
#[derive(Clone, Debug)]
pub struct Particles {
    pub list: Vec<Particle>,
}

impl Particles {
    /// Seed one stationary particle per resolution step of the arena.
    pub fn seed(arena: &Arena) -> Self {
        let (nx, ny, nz) = arena.cell_counts();
        let mut list = Vec::with_capacity(nx * ny * nz);

        let mut id = 0u32;
        for ix in 0..nx {
            for iy in 0..ny {
                for iz in 0..nz {
                    let offset = Vec3::new(ix as f32, iy as f32, iz as f32) * arena.res;
                    list.push(Particle::new(id, arena.min + offset));
                    id += 1;
                }
            }
        }

        debug_assert_eq!(list.len(), arena.particle_count());
        log::info!("{} particle(s) seeded", list.len());

        Self { list }
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_count_matches_arena() {
        let particles = Particles::seed(&Arena::default());
        assert_eq!(particles.len(), 4096);
    }

    #[test]
    fn test_seed_positions_inside_bounds() {
        let arena = Arena::default();
        let particles = Particles::seed(&arena);
        for p in &particles.list {
            assert!(p.position.x >= arena.min.x && p.position.x < arena.max.x);
            assert!(p.position.y >= arena.min.y && p.position.y < arena.max.y);
            assert!(p.position.z >= arena.min.z && p.position.z < arena.max.z);
        }
    }

    #[test]
    fn test_seed_ids_unique_and_dense() {
        let particles = Particles::seed(&Arena::default());
        let mut ids: Vec<u32> = particles.list.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        for (expected, id) in ids.iter().enumerate() {
            assert_eq!(*id, expected as u32);
        }
    }

    #[test]
    fn test_seeded_particles_at_rest() {
        let particles = Particles::seed(&Arena::default());
        for p in &particles.list {
            assert_eq!(p.velocity, Vec3::ZERO);
            assert_eq!(p.acceleration, Vec3::ZERO);
        }
    }
}

//! Integration and collision resolution.
//!
//! Per particle, per tick: clamp against the arena's horizontal bounds,
//! semi-implicit Euler step, terrain collision response, then velocity
//! damping. Boundary reflection and terrain response are independent; the
//! terrain check runs on the already-reflected position.

use crate::arena::Arena;
use crate::constants::{
    BOUNDARY_RESTITUTION, FIELD_HEIGHT_RATIO, GROUND_RESPONSE_GAIN, VELOCITY_DAMPING,
};
use crate::particle::{Particle, Particles};
use crate::terrain::HeightField;

/// Clamp a particle to the arena's X/Z bounds, reflecting the matching
/// velocity component. The vertical axis is unconstrained here; the
/// terrain response owns it.
pub fn apply_bounds(p: &mut Particle, arena: &Arena) {
    if p.position.x > arena.max.x {
        p.position.x = arena.max.x;
        p.velocity.x *= -BOUNDARY_RESTITUTION;
    }
    if p.position.z > arena.max.z {
        p.position.z = arena.max.z;
        p.velocity.z *= -BOUNDARY_RESTITUTION;
    }
    if p.position.x < arena.min.x {
        p.position.x = arena.min.x;
        p.velocity.x *= -BOUNDARY_RESTITUTION;
    }
    if p.position.z < arena.min.z {
        p.position.z = arena.min.z;
        p.velocity.z *= -BOUNDARY_RESTITUTION;
    }
}

/// Semi-implicit Euler step. Consumes and resets the acceleration
/// accumulator.
pub fn integrate_particle(p: &mut Particle) {
    p.velocity += p.acceleration;
    p.position += p.velocity;
    p.acceleration = glam::Vec3::ZERO;
}

/// Terrain collision response at the particle's current position.
///
/// The sampled elevation is in render units and is divided by
/// `FIELD_HEIGHT_RATIO` to land in field units. A particle below ground
/// has its fall cancelled and receives a velocity nudge along the surface
/// normal scaled by penetration depth - a soft correction, not a position
/// snap.
pub fn resolve_ground(p: &mut Particle, arena: &Arena, terrain: &HeightField) {
    let (normal, elevation) = terrain.sample(arena, p.position);
    let ground = elevation / FIELD_HEIGHT_RATIO;

    if p.position.y < ground {
        let penetration = ground - p.position.y;
        p.velocity.y = 0.0;
        p.velocity += normal * penetration * GROUND_RESPONSE_GAIN;
    }
}

/// Run the full integration stage over the store.
pub fn step(particles: &mut Particles, arena: &Arena, terrain: &HeightField) {
    for p in &mut particles.list {
        apply_bounds(p, arena);
        integrate_particle(p);
        resolve_ground(p, arena, terrain);
        p.velocity *= VELOCITY_DAMPING;
    }
}

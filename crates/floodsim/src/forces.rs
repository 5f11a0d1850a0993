//! Force accumulation: pair cohesion/repulsion, totem repulsion, home
//! damage, gravity, and the wave perturbation hook.
//!
//! All sources add into `Particle::acceleration` and compose linearly.
//! Totem and home positions must already be converted into field space
//! (`FieldMapping::world_to_field`).

use glam::Vec3;

use crate::arena::Arena;
use crate::constants::{
    ATTRACTION_GAIN, COHESION_RADIUS, GRAVITY, HOME_DAMAGE_RADIUS, HOME_DAMAGE_RATE,
    REPULSION_CROSSOVER, REPULSION_GAIN, TOTEM_REPULSION_RADIUS,
};
use crate::particle::Particles;
use crate::sweep;

/// Impulse of the pair kernel for the displacement `a_to_b`, or `None`
/// outside the kernel's support (coincident or beyond the cohesion
/// radius).
///
/// The gain is squared before use, which discards its sign: the weak
/// long-range "attraction" branch produces an impulse pointing the same
/// way as the repulsion branch. This is the tuned behavior and is kept
/// as-is.
#[inline]
pub fn pair_impulse(a_to_b: Vec3) -> Option<Vec3> {
    let dist = a_to_b.length();
    if dist == 0.0 || dist > COHESION_RADIUS {
        return None;
    }

    let k = if dist > REPULSION_CROSSOVER {
        (COHESION_RADIUS - dist) * ATTRACTION_GAIN
    } else {
        (REPULSION_CROSSOVER - dist) * REPULSION_GAIN
    };

    Some(a_to_b * (k * k))
}

/// Sort the store along the sweep axis and apply the pair kernel to every
/// candidate pair. Each in-window pair is visited from both endpoints, so
/// its impulse lands twice per tick (see `sweep::visit_axis_neighbors`).
pub fn apply_cohesion(particles: &mut Particles) {
    sweep::sort_by_axis(particles);
    sweep::visit_axis_neighbors(particles, COHESION_RADIUS, |list, i, j| {
        let a_to_b = list[j].position - list[i].position;
        if let Some(impulse) = pair_impulse(a_to_b) {
            list[i].acceleration -= impulse;
            list[j].acceleration += impulse;
        }
    });
}

/// Push every particle inside a totem's cylindrical exclusion zone away
/// from it. The vertical component of the offset is ignored and the totem
/// itself is immovable, so there is no reciprocal force.
pub fn apply_totem_repulsion(particles: &mut Particles, totem_field_pos: Vec3) {
    for p in &mut particles.list {
        let mut offset = p.position - totem_field_pos;
        offset.y = 0.0;

        let dist = offset.length();
        if dist <= f32::EPSILON || dist > TOTEM_REPULSION_RADIUS {
            continue;
        }

        let k = TOTEM_REPULSION_RADIUS - dist;
        p.acceleration += offset * (k / dist);
    }
}

/// Drain a home's energy for every particle within the damage radius,
/// proportionally to the particle's speed. Full 3D distance, unlike the
/// totem check. No floor: energy may go negative, and a particle that
/// lingers in range keeps contributing every tick.
pub fn apply_home_damage(particles: &Particles, home_field_pos: Vec3, energy: &mut f32) {
    for p in &particles.list {
        let dist = p.position.distance(home_field_pos);
        if dist > HOME_DAMAGE_RADIUS {
            continue;
        }
        *energy -= p.speed() * HOME_DAMAGE_RATE;
    }
}

/// Constant downward acceleration, every particle, every tick.
pub fn apply_gravity(particles: &mut Particles) {
    for p in &mut particles.list {
        p.acceleration.y -= GRAVITY;
    }
}

/// Tidal push: add a position-dependent velocity bias along Z. Particles
/// far from the arena's +Z edge are pushed hardest. `strength` is supplied
/// by the caller per frame.
pub fn apply_wave(particles: &mut Particles, arena: &Arena, strength: f32) {
    for p in &mut particles.list {
        p.velocity.z += (arena.max.z - p.position.z) * strength;
    }
}

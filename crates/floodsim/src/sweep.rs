//! Neighbor sweep: 1D sort-and-sweep candidate pair enumeration.
//!
//! Particles are sorted in place along the X axis every tick, then each
//! particle scans a window of its sorted neighbors whose X distance is
//! within the cohesion radius. The window is exact along the sort axis
//! only; it is a conservative superset of the true 3D neighborhood, and
//! the force kernel re-checks the full distance.
//!
//! Cost is O(n log n) for the sort plus O(n·k) for the scan, where k is
//! the local particle density inside the window. Under heavy clustering k
//! approaches n and the scan degrades toward O(n²).

use crate::particle::{Particle, Particles};

/// Sort the store ascending by position.x. This reorders the underlying
/// storage; indices are not stable across ticks (particle identity lives
/// in `Particle::id`).
pub fn sort_by_axis(particles: &mut Particles) {
    particles
        .list
        .sort_unstable_by(|a, b| a.position.x.total_cmp(&b.position.x));
}

/// Visit every candidate pair (i, j) whose X distance is within `radius`.
///
/// Requires the store to be sorted by `sort_by_axis` first. Each unordered
/// pair inside the window is visited twice per sweep, once from each
/// endpoint's perspective; callers that apply forces per visit therefore
/// apply them twice per tick. That double application is part of the tuned
/// behavior, not an accident.
pub fn visit_axis_neighbors<F>(particles: &mut Particles, radius: f32, mut visit: F)
where
    F: FnMut(&mut [Particle], usize, usize),
{
    let list = particles.list.as_mut_slice();
    let count = list.len();

    for i in 0..count {
        let axis = list[i].position.x;

        // Walk back to the first particle that could still be in range.
        let mut j = i;
        while j > 0 {
            if list[j].position.x < axis - radius {
                break;
            }
            j -= 1;
        }

        // Scan forward through the window.
        while j < count {
            if j == i {
                j += 1;
                continue;
            }
            if list[j].position.x > axis + radius {
                break;
            }
            visit(list, i, j);
            j += 1;
        }
    }
}

//! Tuning constants for the flood simulation.
//!
//! ## Unit Conventions
//!
//! The simulation runs in TWO coordinate spaces:
//!
//! 1. **Field space** - the arena the particles live in (32×4×32 units by
//!    default). All forces and integration happen here.
//! 2. **Render space** - the world the terrain mesh and density grid live
//!    in (212×64×212 units by default). Totem and home positions arrive in
//!    render space and are converted with `FieldMapping::world_to_field`.
//!
//! The two spaces use different vertical scales; `FIELD_HEIGHT_RATIO`
//! converts terrain elevations from render units into field units.

/// Pairwise interaction cutoff (field units). No cohesion or repulsion is
/// computed for pairs further apart than this.
pub const COHESION_RADIUS: f32 = 2.0;

/// Separation below which the pair kernel switches from weak attraction to
/// strong repulsion (field units).
pub const REPULSION_CROSSOVER: f32 = 1.0;

/// Gain of the long-range attraction branch of the pair kernel.
pub const ATTRACTION_GAIN: f32 = -0.001;

/// Gain of the short-range repulsion branch of the pair kernel.
pub const REPULSION_GAIN: f32 = 0.475;

/// Per-tick downward acceleration applied to every particle (field units).
pub const GRAVITY: f32 = 0.025;

/// Velocity-reversal coefficient applied when a particle is clamped back
/// inside the arena's horizontal bounds.
pub const BOUNDARY_RESTITUTION: f32 = 0.5;

/// Gain of the velocity-based ground penetration response.
pub const GROUND_RESPONSE_GAIN: f32 = 0.1;

/// Unconditional per-tick velocity damping factor.
pub const VELOCITY_DAMPING: f32 = 0.98;

/// Render-space height divided by field-space height. The arena is 4 units
/// tall while the render volume spans 16 field-equivalent units, so terrain
/// elevations are divided by this before comparing against particle height.
pub const FIELD_HEIGHT_RATIO: f32 = 4.0;

// =============================================================================
// TOTEMS AND HOMES
// =============================================================================

/// Maximum number of totems that can be placed at once.
pub const MAX_TOTEMS: usize = 3;

/// Radius of the cylindrical exclusion zone around an active totem
/// (field units, horizontal distance only).
pub const TOTEM_REPULSION_RADIUS: f32 = 2.0;

/// Full-3D radius within which a particle damages a home (field units).
pub const HOME_DAMAGE_RADIUS: f32 = 1.0;

/// Energy drained from a home per in-range particle, per unit of particle
/// speed, per tick.
pub const HOME_DAMAGE_RATE: f32 = 0.6;

/// Energy every home is reset to at the start of a day.
pub const HOME_STARTING_ENERGY: f32 = 10.0;

/// Minimum pairwise dot product between sampled ground normals for a totem
/// placement to be accepted (rejects uneven terrain).
pub const PLACEMENT_COHERENCY: f32 = 0.9;

// =============================================================================
// DENSITY FIELD
// =============================================================================

/// Splat radius in density-grid cells along each axis.
pub const SPLAT_RADIUS: i32 = 4;

/// Scale applied to each cell's falloff weight before accumulation.
pub const SPLAT_GAIN: f32 = 2.0;

/// Iso-level the external surface extractor thresholds the field against.
pub const DENSITY_ISO_LEVEL: f32 = 1.0;

/// Default density grid dimensions (cells). X → Z → Y memory layout.
pub const DENSITY_GRID_WIDTH: usize = 106;
pub const DENSITY_GRID_HEIGHT: usize = 32;
pub const DENSITY_GRID_DEPTH: usize = 106;

/// Default density grid cell edge length (render units).
pub const DENSITY_CELL_SIZE: f32 = 2.0;

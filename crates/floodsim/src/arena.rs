//! Arena bounds and the render-world to field-space mapping.

use glam::Vec3;

use crate::constants::{DENSITY_GRID_HEIGHT, DENSITY_GRID_WIDTH};

/// The fixed simulation volume. Immutable after startup.
#[derive(Clone, Copy, Debug)]
pub struct Arena {
    /// Minimum corner (field units).
    pub min: Vec3,
    /// Maximum corner (field units).
    pub max: Vec3,
    /// Per-axis particle seeding step.
    pub res: Vec3,
}

impl Arena {
    /// Create an arena. The bounds and resolution must yield a strictly
    /// positive particle count on every axis; anything else is a
    /// configuration error and fatal at startup.
    pub fn new(min: Vec3, max: Vec3, res: Vec3) -> Self {
        let arena = Self { min, max, res };
        let (nx, ny, nz) = arena.cell_counts();
        assert!(
            nx > 0 && ny > 0 && nz > 0,
            "arena bounds {min}..{max} at resolution {res} yield no particles"
        );
        arena
    }

    /// Arena extent, max - min.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Number of seeding steps along each axis.
    pub fn cell_counts(&self) -> (usize, usize, usize) {
        let steps = self.size() / self.res;
        (steps.x as usize, steps.y as usize, steps.z as usize)
    }

    /// Total particle count seeded from these bounds.
    pub fn particle_count(&self) -> usize {
        let (nx, ny, nz) = self.cell_counts();
        nx * ny * nz
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(
            Vec3::new(-16.0, 0.0, -16.0),
            Vec3::new(16.0, 4.0, 16.0),
            Vec3::ONE,
        )
    }
}

/// Linear map between the render-space world box and the arena box.
///
/// Totems and homes are placed in render space (the terrain mesh's
/// coordinate system); forces operate in field space. The map is a plain
/// per-axis rescale between the two boxes.
#[derive(Clone, Copy, Debug)]
pub struct FieldMapping {
    pub render_min: Vec3,
    pub render_max: Vec3,
    pub field_min: Vec3,
    pub field_max: Vec3,
}

impl FieldMapping {
    pub fn new(render_min: Vec3, render_max: Vec3, arena: &Arena) -> Self {
        Self {
            render_min,
            render_max,
            field_min: arena.min,
            field_max: arena.max,
        }
    }

    /// Convert a render-space position into field space.
    pub fn world_to_field(&self, w: Vec3) -> Vec3 {
        (w - self.render_min) * (self.field_max - self.field_min)
            / (self.render_max - self.render_min)
            + self.field_min
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        let w = DENSITY_GRID_WIDTH as f32;
        let h = DENSITY_GRID_HEIGHT as f32;
        Self::new(
            Vec3::new(-w, 0.0, -w),
            Vec3::new(w, h, w),
            &Arena::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_particle_count() {
        // (-16,0,-16)..(16,4,16) at resolution (1,1,1) -> 32*4*32
        let arena = Arena::default();
        assert_eq!(arena.particle_count(), 4096);
    }

    #[test]
    fn test_cell_counts() {
        let arena = Arena::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 2.0, 8.0),
            Vec3::new(1.0, 1.0, 2.0),
        );
        assert_eq!(arena.cell_counts(), (4, 2, 4));
    }

    #[test]
    #[should_panic]
    fn test_degenerate_bounds_rejected() {
        Arena::new(Vec3::ZERO, Vec3::new(0.5, 0.5, 0.5), Vec3::ONE);
    }

    #[test]
    fn test_world_to_field_corners() {
        let mapping = FieldMapping::default();
        let min = mapping.world_to_field(mapping.render_min);
        let max = mapping.world_to_field(mapping.render_max);
        assert!(min.abs_diff_eq(Vec3::new(-16.0, 0.0, -16.0), 1e-4));
        assert!(max.abs_diff_eq(Vec3::new(16.0, 4.0, 16.0), 1e-4));
    }

    #[test]
    fn test_world_to_field_center() {
        let mapping = FieldMapping::default();
        let mid = (mapping.render_min + mapping.render_max) * 0.5;
        let field_mid = mapping.world_to_field(mid);
        assert!(field_mid.abs_diff_eq(Vec3::new(0.0, 2.0, 0.0), 1e-4));
    }
}

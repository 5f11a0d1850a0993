//! Density field builder: splats particle influence into a flat 3D scalar
//! grid for downstream iso-surface extraction.
//!
//! Memory layout is X → Z → Y: `index = x + z * width + y * width * depth`.
//! The grid is fully rebuilt on every invocation; values accumulate
//! additively, so dense clusters raise the local value well above a single
//! particle's contribution - that is the density signal the extractor
//! thresholds against.

use glam::Vec3;

use crate::arena::Arena;
use crate::constants::{
    DENSITY_CELL_SIZE, DENSITY_GRID_DEPTH, DENSITY_GRID_HEIGHT, DENSITY_GRID_WIDTH,
    DENSITY_ISO_LEVEL, FIELD_HEIGHT_RATIO, SPLAT_GAIN, SPLAT_RADIUS,
};
use crate::particle::Particles;

/// Everything the external surface-extraction collaborator needs: grid
/// dimensions, iso threshold, the scalar buffer, and world placement.
#[derive(Clone, Copy, Debug)]
pub struct FieldDesc<'a> {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub iso_level: f32,
    pub values: &'a [f32],
    /// Render-space position of cell (0, 0, 0).
    pub origin: Vec3,
    /// Render-space cell edge lengths.
    pub cell_size: Vec3,
}

/// The scalar density grid. Owned by the builder; rebuilt per invocation.
#[derive(Clone, Debug)]
pub struct DensityField {
    width: usize,
    height: usize,
    depth: usize,
    values: Vec<f32>,
    /// Render-space position of the grid origin.
    pub origin: Vec3,
    /// Render-space cell size handed to the extractor.
    pub cell_size: Vec3,
    /// Run the separable box blur after splatting. Smooths the extracted
    /// surface without changing simulation physics.
    pub blur_enabled: bool,
}

impl DensityField {
    pub fn new(width: usize, height: usize, depth: usize, origin: Vec3, cell_size: Vec3) -> Self {
        Self {
            width,
            height,
            depth,
            values: vec![0.0; width * height * depth],
            origin,
            cell_size,
            blur_enabled: false,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Flat index for cell (x, y, z).
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + z * self.width + y * self.width * self.depth
    }

    /// Change the grid dimensions. The only place the buffer is ever
    /// reallocated.
    pub fn resize_grid(&mut self, width: usize, height: usize, depth: usize) {
        self.width = width;
        self.height = height;
        self.depth = depth;
        self.values = vec![0.0; width * height * depth];
    }

    /// Clear and re-splat the grid from the current particle set.
    pub fn rebuild(&mut self, particles: &Particles, arena: &Arena) {
        self.values.fill(0.0);

        // Field space -> fractional cell coordinates. The vertical
        // denominator spans the render volume's full height, which is
        // FIELD_HEIGHT_RATIO times the arena ceiling.
        let extent = Vec3::new(
            arena.max.x,
            arena.max.y * FIELD_HEIGHT_RATIO,
            arena.max.z,
        ) - arena.min;
        let cell_scale =
            Vec3::new(self.width as f32, self.height as f32, self.depth as f32) / extent;

        let radius = SPLAT_RADIUS as f32;

        for p in &particles.list {
            let cell_p = (p.position - arena.min) * cell_scale;
            let cx = cell_p.x as i32;
            let cy = cell_p.y as i32;
            let cz = cell_p.z as i32;

            for x in (cx - SPLAT_RADIUS)..=(cx + SPLAT_RADIUS) {
                for z in (cz - SPLAT_RADIUS)..=(cz + SPLAT_RADIUS) {
                    for y in (cy - SPLAT_RADIUS)..=(cy + SPLAT_RADIUS) {
                        if x < 0
                            || y < 0
                            || z < 0
                            || x >= self.width as i32
                            || y >= self.height as i32
                            || z >= self.depth as i32
                        {
                            continue;
                        }

                        let dist = Vec3::new(x as f32, y as f32, z as f32).distance(cell_p);
                        let w = (radius - dist).max(0.0) / radius;

                        let idx = self.index(x as usize, y as usize, z as usize);
                        self.values[idx] += w * w * w * SPLAT_GAIN;
                    }
                }
            }
        }

        if self.blur_enabled {
            self.blur();
        }
    }

    /// Description handed to the surface-extraction collaborator.
    pub fn desc(&self) -> FieldDesc<'_> {
        FieldDesc {
            width: self.width,
            height: self.height,
            depth: self.depth,
            iso_level: DENSITY_ISO_LEVEL,
            values: &self.values,
            origin: self.origin,
            cell_size: self.cell_size,
        }
    }

    /// In-place separable [1, 2, 1]/4 box blur, one pass per axis
    /// (X, then Y, then Z). Border cells along the blurred axis are left
    /// untouched.
    fn blur(&mut self) {
        let (w, h, d) = (self.width, self.height, self.depth);
        if w < 3 || h < 3 || d < 3 {
            return;
        }

        // X pass
        for y in 0..h {
            for z in 0..d {
                let row = self.index(0, y, z);
                for x in 1..w - 1 {
                    self.values[row + x] = (self.values[row + x - 1]
                        + self.values[row + x] * 2.0
                        + self.values[row + x + 1])
                        / 4.0;
                }
            }
        }

        // Y pass
        let y_stride = w * d;
        for z in 0..d {
            for x in 0..w {
                let column = self.index(x, 0, z);
                for y in 1..h - 1 {
                    let idx = column + y * y_stride;
                    self.values[idx] = (self.values[idx - y_stride]
                        + self.values[idx] * 2.0
                        + self.values[idx + y_stride])
                        / 4.0;
                }
            }
        }

        // Z pass
        for y in 0..h {
            for x in 0..w {
                let pillar = self.index(x, y, 0);
                for z in 1..d - 1 {
                    let idx = pillar + z * w;
                    self.values[idx] = (self.values[idx - w]
                        + self.values[idx] * 2.0
                        + self.values[idx + w])
                        / 4.0;
                }
            }
        }
    }
}

impl Default for DensityField {
    fn default() -> Self {
        let origin = Vec3::new(
            -(DENSITY_GRID_WIDTH as f32),
            0.0,
            -(DENSITY_GRID_DEPTH as f32),
        );
        Self::new(
            DENSITY_GRID_WIDTH,
            DENSITY_GRID_HEIGHT,
            DENSITY_GRID_DEPTH,
            origin,
            Vec3::splat(DENSITY_CELL_SIZE),
        )
    }
}

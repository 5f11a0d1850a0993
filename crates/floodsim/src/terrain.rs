//! Terrain height field: read-only sampler over a precomputed heightmap.

use std::error::Error;
use std::path::Path;

use glam::Vec3;

use crate::arena::Arena;

/// Heightmap edge length in texels.
pub const HEIGHTMAP_SIZE: usize = 1024;

/// Texel stride between the center tap and the two neighbor taps used to
/// build the tangent vectors.
const NEIGHBOR_STRIDE: usize = 10;

/// Largest texel coordinate that still leaves room for the neighbor taps.
const TEXEL_MAX: i32 = (HEIGHTMAP_SIZE - 1 - NEIGHBOR_STRIDE) as i32;

/// Linear mapping from raw heightmap values into render-space altitude.
pub const ALTITUDE_MIN: f32 = 5.66898;
pub const ALTITUDE_MAX: f32 = 47.22528;

/// Read-only terrain sampler. The heightmap buffer is loaded once at
/// startup and never mutated.
#[derive(Clone, Debug)]
pub struct HeightField {
    heights: Vec<f32>,
}

impl HeightField {
    /// Wrap an existing height buffer. The buffer must hold exactly
    /// `HEIGHTMAP_SIZE`² samples; anything else is fatal at startup.
    pub fn from_heights(heights: Vec<f32>) -> Self {
        assert_eq!(
            heights.len(),
            HEIGHTMAP_SIZE * HEIGHTMAP_SIZE,
            "heightmap buffer must be {0}x{0}",
            HEIGHTMAP_SIZE
        );
        Self { heights }
    }

    /// Flat terrain at the given raw height. Test and demo helper.
    pub fn flat(raw_height: f32) -> Self {
        Self::from_heights(vec![raw_height; HEIGHTMAP_SIZE * HEIGHTMAP_SIZE])
    }

    /// Parse a raw little-endian f32 heightmap dump.
    pub fn from_raw(bytes: &[u8]) -> Result<Self, Box<dyn Error>> {
        let expected = HEIGHTMAP_SIZE * HEIGHTMAP_SIZE * 4;
        if bytes.len() != expected {
            return Err(format!(
                "heightmap is {} bytes, expected {} ({size}x{size} f32)",
                bytes.len(),
                expected,
                size = HEIGHTMAP_SIZE
            )
            .into());
        }

        let heights = bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        Ok(Self { heights })
    }

    /// Load a raw heightmap file from disk.
    pub fn load_raw(path: &Path) -> Result<Self, Box<dyn Error>> {
        let bytes = std::fs::read(path)?;
        let field = Self::from_raw(&bytes)?;
        log::info!("loaded heightmap {}", path.display());
        Ok(field)
    }

    /// Sample the ground under a field-space position.
    ///
    /// Returns the surface normal and the elevation in render units.
    /// Texel coordinates are clamped, so any input position yields a
    /// bounded result.
    pub fn sample(&self, arena: &Arena, pos: Vec3) -> (Vec3, f32) {
        let p = (pos - arena.min) / arena.size();

        // The heightmap is authored north-up; field Z runs south.
        let u = (p.x * HEIGHTMAP_SIZE as f32) as i32;
        let v = ((1.0 - p.z) * HEIGHTMAP_SIZE as f32) as i32;

        let u = u.clamp(0, TEXEL_MAX) as usize;
        let v = v.clamp(0, TEXEL_MAX) as usize;

        let hc = self.heights[u + v * HEIGHTMAP_SIZE];
        let hr = self.heights[(u + NEIGHBOR_STRIDE) + v * HEIGHTMAP_SIZE];
        let hb = self.heights[u + (v + NEIGHBOR_STRIDE) * HEIGHTMAP_SIZE];

        let du = Vec3::new(0.1, hr - hc, 0.0);
        let dv = Vec3::new(0.0, hb - hc, -0.1);
        let normal = du.normalize().cross(dv.normalize());

        let elevation = hc * ALTITUDE_MAX + ALTITUDE_MIN;
        (normal, elevation)
    }
}

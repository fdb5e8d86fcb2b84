//! Deterministic 2D noise used by terrain and tree placement.

use noise::{NoiseFn, Perlin};

/// A deterministic 2D scalar field in `[-1, 1]`.
///
/// Terrain generation only ever asks for samples, so any field with this
/// contract can drive it. Identical inputs must yield identical outputs.
pub trait NoiseOracle {
    fn noise2d(&self, x: f32, z: f32) -> f32;
}

/// Perlin noise from the `noise` crate.
#[derive(Clone, Copy)]
pub struct PerlinOracle {
    perlin: Perlin,
}

impl PerlinOracle {
    pub fn new(seed: u32) -> Self {
        PerlinOracle {
            perlin: Perlin::new(seed),
        }
    }

    /// An oracle seeded with the sum of the character codes of `text`.
    pub fn from_text(text: &str) -> Self {
        let seed = text.chars().fold(0u32, |acc, c| acc.wrapping_add(c as u32));
        Self::new(seed)
    }
}

impl NoiseOracle for PerlinOracle {
    fn noise2d(&self, x: f32, z: f32) -> f32 {
        (self.perlin.get([x as f64, z as f64]) as f32).clamp(-1.0, 1.0)
    }
}

//! Procedural star catalog: deterministic placement on a sphere around the
//! camera, for running without a catalog file.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::StarCatalog;

/// Radius of the sphere generated stars sit on.
pub const SKY_RADIUS: f32 = 100.0;
/// Magnitude of the brightest generated star.
pub const BRIGHTEST_MAGNITUDE: f32 = -1.5;
/// Magnitude of the faintest generated star, about the naked-eye limit.
pub const FAINTEST_MAGNITUDE: f32 = 7.0;

/// Generates a deterministic star catalog from a seed.
pub struct CatalogGenerator {
    seed: u64,
    star_count: u32,
}

impl CatalogGenerator {
    /// Create a new generator with the given seed and star count.
    pub fn new(seed: u64, star_count: u32) -> Self {
        Self { seed, star_count }
    }

    /// Generate the catalog. Deterministic for a given seed.
    pub fn generate(&self) -> StarCatalog {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let count = self.star_count as usize;
        let mut positions = Vec::with_capacity(count);
        let mut magnitudes = Vec::with_capacity(count);

        for _ in 0..count {
            let theta = rng.random::<f32>() * std::f32::consts::TAU;
            let phi = (1.0 - 2.0 * rng.random::<f32>()).acos();
            positions.push([
                SKY_RADIUS * phi.sin() * theta.cos(),
                SKY_RADIUS * phi.cos(),
                SKY_RADIUS * phi.sin() * theta.sin(),
            ]);

            // Power-law: many faint stars, few bright ones.
            let brightness = rng.random::<f32>().powf(4.0);
            magnitudes.push(
                FAINTEST_MAGNITUDE - brightness * (FAINTEST_MAGNITUDE - BRIGHTEST_MAGNITUDE),
            );
        }

        log::debug!("Generated {count} stars from seed {}", self.seed);
        StarCatalog::from_aligned(positions, magnitudes)
    }
}

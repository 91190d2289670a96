//! Star catalog: parallel position and magnitude sequences, validated once at
//! load time.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::SkyError;

/// A single star, borrowed out of a [`StarCatalog`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    /// Position of the star in scene space.
    pub position: Vec3,
    /// Apparent magnitude. Lower is brighter.
    pub magnitude: f32,
}

/// On-disk catalog layout: a flat coordinate list and one magnitude per star.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogFile {
    /// Flattened `x, y, z` triples.
    pub coordinates: Vec<f32>,
    /// One magnitude per star, same order as `coordinates`.
    pub magnitudes: Vec<f32>,
}

/// Immutable star catalog.
///
/// `positions[i]` and `magnitudes[i]` always describe the same star; the
/// constructors refuse input where the two lengths disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct StarCatalog {
    positions: Vec<[f32; 3]>,
    magnitudes: Vec<f32>,
}

impl StarCatalog {
    /// Build a catalog from position triples and magnitudes.
    ///
    /// # Errors
    ///
    /// Returns [`SkyError::MisalignedCatalog`] if the sequences differ in length.
    pub fn new(positions: Vec<[f32; 3]>, magnitudes: Vec<f32>) -> Result<Self, SkyError> {
        if positions.len() != magnitudes.len() {
            return Err(SkyError::MisalignedCatalog {
                positions: positions.len(),
                magnitudes: magnitudes.len(),
            });
        }
        Ok(Self {
            positions,
            magnitudes,
        })
    }

    /// Build a catalog from sequences the caller already knows are aligned.
    pub(crate) fn from_aligned(positions: Vec<[f32; 3]>, magnitudes: Vec<f32>) -> Self {
        debug_assert_eq!(positions.len(), magnitudes.len());
        Self {
            positions,
            magnitudes,
        }
    }

    /// Build a catalog from a flattened coordinate list (`x0, y0, z0, x1, ...`).
    ///
    /// # Errors
    ///
    /// Returns [`SkyError::MisalignedCatalog`] if the coordinate count is not a
    /// multiple of three or the star counts disagree.
    pub fn from_flat(coordinates: &[f32], magnitudes: &[f32]) -> Result<Self, SkyError> {
        if coordinates.len() % 3 != 0 {
            return Err(SkyError::MisalignedCatalog {
                positions: coordinates.len() / 3,
                magnitudes: magnitudes.len(),
            });
        }
        let positions = coordinates
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Self::new(positions, magnitudes.to_vec())
    }

    /// Load a catalog from a RON file in [`CatalogFile`] layout.
    pub fn load(path: &Path) -> Result<Self, SkyError> {
        let contents = std::fs::read_to_string(path).map_err(SkyError::CatalogRead)?;
        let file: CatalogFile = ron::from_str(&contents).map_err(SkyError::CatalogParse)?;
        let catalog = Self::from_flat(&file.coordinates, &file.magnitudes)?;
        log::info!("Loaded {} stars from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Number of stars.
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    /// Whether the catalog holds no stars.
    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Star positions, index-aligned with [`magnitudes`](Self::magnitudes).
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Star magnitudes, index-aligned with [`positions`](Self::positions).
    pub fn magnitudes(&self) -> &[f32] {
        &self.magnitudes
    }

    /// Star at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<Star> {
        let position = self.positions.get(index)?;
        Some(Star {
            position: Vec3::from_array(*position),
            magnitude: self.magnitudes[index],
        })
    }

    /// Iterate stars in catalog order.
    pub fn stars(&self) -> impl Iterator<Item = Star> + '_ {
        self.positions
            .iter()
            .zip(&self.magnitudes)
            .map(|(p, &magnitude)| Star {
                position: Vec3::from_array(*p),
                magnitude,
            })
    }

    /// Positions as raw bytes for a vertex buffer.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }
}

//! Error types for catalog loading and palette selection.

/// Errors raised while assembling a starfield.
///
/// These are configuration or data defects detected once at startup. Nothing
/// in the per-frame path can fail.
#[derive(Debug, thiserror::Error)]
pub enum SkyError {
    /// The requested color scheme is not in the palette table.
    #[error("unknown color scheme: {0:?}")]
    UnknownScheme(String),

    /// Positions and magnitudes do not describe the same number of stars.
    ///
    /// `positions` counts whole coordinate triples; a flattened coordinate list
    /// whose length is not a multiple of three also lands here.
    #[error("misaligned catalog: {positions} positions, {magnitudes} magnitudes")]
    MisalignedCatalog {
        /// Number of position entries (triples, rounded down).
        positions: usize,
        /// Number of magnitude entries.
        magnitudes: usize,
    },

    /// Failed to read a catalog file from disk.
    #[error("failed to read catalog: {0}")]
    CatalogRead(#[source] std::io::Error),

    /// Failed to parse a RON catalog file.
    #[error("failed to parse catalog: {0}")]
    CatalogParse(#[source] ron::error::SpannedError),
}

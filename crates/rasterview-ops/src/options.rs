//! Rasterization settings.

/// Controls how [`crate::parallel`] splits a fill.
///
/// # Example
///
/// ```rust
/// use rasterview_ops::RasterOptions;
///
/// let opts = RasterOptions::default().with_tile_rows(8).with_min_parallel_pixels(0);
/// assert_eq!(opts.tile_rows, 8);
/// assert!(opts.parallel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RasterOptions {
    /// Rows per work item. Zero is treated as one.
    pub tile_rows: u32,
    /// Smallest fill (pixels over all planes) worth splitting.
    pub min_parallel_pixels: u64,
    /// Allow multi-threaded fills at all.
    pub parallel: bool,
}

impl RasterOptions {
    /// Default rows per work item.
    pub const DEFAULT_TILE_ROWS: u32 = 16;

    /// Default threshold below which fills stay on the calling thread.
    pub const DEFAULT_MIN_PARALLEL_PIXELS: u64 = 64 * 1024;

    /// Options that never split a fill.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the rows per work item.
    pub fn with_tile_rows(mut self, rows: u32) -> Self {
        self.tile_rows = rows;
        self
    }

    /// Sets the parallel threshold.
    pub fn with_min_parallel_pixels(mut self, pixels: u64) -> Self {
        self.min_parallel_pixels = pixels;
        self
    }

    /// Enables or disables multi-threaded fills.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Rows per work item, at least one.
    #[inline]
    pub fn band_rows(&self) -> usize {
        self.tile_rows.max(1) as usize
    }
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            tile_rows: Self::DEFAULT_TILE_ROWS,
            min_parallel_pixels: Self::DEFAULT_MIN_PARALLEL_PIXELS,
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_builders() {
        let opts = RasterOptions::default();
        assert_eq!(opts.tile_rows, 16);
        assert_eq!(opts.min_parallel_pixels, 65536);
        assert!(opts.parallel);

        let seq = RasterOptions::sequential();
        assert!(!seq.parallel);
        assert_eq!(seq.tile_rows, 16);

        assert_eq!(RasterOptions::default().with_tile_rows(0).band_rows(), 1);
        assert!(!RasterOptions::default().with_parallel(false).parallel);
    }
}

use std::path::Path;

use tracing::debug;

use crate::config::PipelineConfig;
use crate::error::SourceError;
use crate::geometry::IntensityField;

/// Produces a normalized intensity field from a slice file.
pub trait SliceSource: Sync {
    /// Loads the slice at `path`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the file cannot be decoded or holds no signal.
    fn load(&self, path: &Path) -> Result<IntensityField, SourceError>;
}

/// Greyscale raster slices with a fixed pixel spacing.
///
/// Reads anything the `image` crate decodes (PNG, TIFF, ...). Raster files
/// carry no calibration, so spacing and depth come from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterSource {
    pixel_spacing: f64,
    slice_depth: f64,
}

impl RasterSource {
    /// `pixel_spacing` and `slice_depth` are in output length units.
    #[must_use]
    pub fn new(pixel_spacing: f64, slice_depth: f64) -> Self {
        Self {
            pixel_spacing,
            slice_depth,
        }
    }

    #[must_use]
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.pixel_spacing(), config.slice_depth())
    }
}

impl SliceSource for RasterSource {
    fn load(&self, path: &Path) -> Result<IntensityField, SourceError> {
        let image = image::open(path)
            .map_err(|source| SourceError::Read {
                path: path.to_path_buf(),
                source,
            })?
            .into_luma16();
        let (width, height) = (image.width() as usize, image.height() as usize);
        let raw: Vec<f64> = image.into_raw().into_iter().map(f64::from).collect();
        debug!("decoded {} ({width} x {height})", path.display());

        IntensityField::normalized(width, height, &raw, self.pixel_spacing, self.slice_depth)?.ok_or_else(
            || SourceError::Blank {
                path: path.to_path_buf(),
            },
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::cast_possible_truncation)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::{ImageBuffer, Luma};

    fn write_png(path: &Path, width: u32, height: u32, f: impl Fn(u32, u32) -> u16) {
        ImageBuffer::<Luma<u16>, Vec<u16>>::from_fn(width, height, |x, y| Luma([f(x, y)]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn loads_and_normalizes_by_maximum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slice.png");
        write_png(&path, 4, 3, |x, y| (x * 100 + y * 10) as u16);

        let field = RasterSource::new(5.0e-4, 0.01).load(&path).unwrap();
        assert_eq!(field.width(), 4);
        assert_eq!(field.height(), 3);
        assert_relative_eq!(field.pixel_spacing(), 5.0e-4);
        assert_relative_eq!(field.slice_depth(), 0.01);
        // Maximum sample is at x = 3, y = 2.
        assert_relative_eq!(field.at(2, 3), 1.0);
        assert_relative_eq!(field.at(0, 0), 0.0);
        assert_relative_eq!(field.at(1, 2), 210.0 / 320.0);
    }

    #[test]
    fn blank_slice_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.png");
        write_png(&path, 8, 8, |_, _| 0);
        assert!(matches!(
            RasterSource::new(1.0e-3, 0.0).load(&path),
            Err(SourceError::Blank { .. })
        ));
    }

    #[test]
    fn unreadable_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(matches!(
            RasterSource::new(1.0e-3, 0.0).load(&path),
            Err(SourceError::Read { .. })
        ));
        assert!(matches!(
            RasterSource::new(1.0e-3, 0.0).load(&dir.path().join("absent.png")),
            Err(SourceError::Read { .. })
        ));
    }

    #[test]
    fn calibration_comes_from_config() {
        let mut config = PipelineConfig::default();
        config.source.pixel_spacing_mm = 0.5;
        config.source.slice_depth_mm = 3.0;
        let source = RasterSource::from_config(&config);
        assert_relative_eq!(source.pixel_spacing, 5.0e-4);
        assert_relative_eq!(source.slice_depth, 3.0e-3);
    }
}

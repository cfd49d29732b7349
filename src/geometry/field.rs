use crate::error::GeometryError;

/// A normalized 2D intensity field sampled on the pixel grid of one slice.
///
/// Samples are stored row-major and lie in `[0, 1]`. `pixel_spacing` is the
/// physical length of one pixel in output units and `slice_depth` is the
/// position of the slice along the scan axis.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityField {
    width: usize,
    height: usize,
    data: Vec<f64>,
    pixel_spacing: f64,
    slice_depth: f64,
}

impl IntensityField {
    /// Creates a field from already-normalized samples.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::SizeMismatch` if `data.len() != width * height`
    /// and `GeometryError::Degenerate` if a sample is not finite or the
    /// spacing is not positive.
    pub fn new(
        width: usize,
        height: usize,
        data: Vec<f64>,
        pixel_spacing: f64,
        slice_depth: f64,
    ) -> Result<Self, GeometryError> {
        let expected = width.checked_mul(height);
        if expected != Some(data.len()) {
            return Err(GeometryError::SizeMismatch {
                width,
                height,
                actual: data.len(),
            });
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(GeometryError::Degenerate(
                "intensity field contains non-finite samples".to_owned(),
            ));
        }
        if pixel_spacing <= 0.0 || !pixel_spacing.is_finite() {
            return Err(GeometryError::Degenerate(format!(
                "pixel spacing must be positive, got {pixel_spacing}"
            )));
        }
        Ok(Self {
            width,
            height,
            data,
            pixel_spacing,
            slice_depth,
        })
    }

    /// Creates a field from raw scanner samples, dividing by the maximum.
    ///
    /// Returns `Ok(None)` when every sample is zero (nothing to normalize by).
    ///
    /// # Errors
    ///
    /// Same as [`IntensityField::new`].
    pub fn normalized(
        width: usize,
        height: usize,
        raw: &[f64],
        pixel_spacing: f64,
        slice_depth: f64,
    ) -> Result<Option<Self>, GeometryError> {
        let max = raw.iter().copied().fold(0.0_f64, f64::max);
        if max <= 0.0 {
            return Ok(None);
        }
        let data = raw.iter().map(|v| v / max).collect();
        Self::new(width, height, data, pixel_spacing, slice_depth).map(Some)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn pixel_spacing(&self) -> f64 {
        self.pixel_spacing
    }

    #[must_use]
    pub fn slice_depth(&self) -> f64 {
        self.slice_depth
    }

    /// Sample at (`row`, `col`). Callers must stay inside the grid.
    #[must_use]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width + col]
    }
}

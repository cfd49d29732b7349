use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::export::GeoParams;
use crate::operations::ShapeFilter;

/// Complete configuration for one batch run.
///
/// Every field has a default, so an empty TOML document gives the standard
/// wrist-slice setup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub extraction: ExtractionConfig,
    pub geometry: GeometryConfig,
    pub source: SourceConfig,
    pub output: OutputConfig,
}

/// Isoline thresholds and artifact filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub bone_threshold: f64,
    pub skin_threshold: f64,
    pub min_vertices: usize,
    pub max_aspect_ratio: f64,
    pub min_aspect_ratio: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        let filter = ShapeFilter::default();
        Self {
            bone_threshold: 0.5,
            skin_threshold: 0.2,
            min_vertices: filter.min_vertices,
            max_aspect_ratio: filter.max_aspect_ratio,
            min_aspect_ratio: filter.min_aspect_ratio,
        }
    }
}

/// Geometry-file emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub decimation: usize,
    pub box_size: f64,
    pub mesh_size: f64,
    pub characteristic_length_max: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        let params = GeoParams::default();
        Self {
            decimation: params.decimation,
            box_size: params.box_size,
            mesh_size: params.mesh_size,
            characteristic_length_max: params.characteristic_length_max,
        }
    }
}

/// Physical calibration of raster slices, which carry no metadata of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Pixel spacing in millimetres.
    pub pixel_spacing_mm: f64,
    /// Slice position along the scan axis in millimetres.
    pub slice_depth_mm: f64,
    /// Output length units per millimetre (1e-3 writes metres).
    pub length_scale: f64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            pixel_spacing_mm: 1.0,
            slice_depth_mm: 0.0,
            length_scale: 1.0e-3,
        }
    }
}

/// Output file naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output files are named `<prefix>-<input stem>.geo`.
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: "munieca".to_owned(),
        }
    }
}

impl PipelineConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML and
    /// `ConfigError::Invalid` for out-of-range values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read, otherwise as
    /// [`PipelineConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let e = &self.extraction;
        unit_interval("extraction.bone_threshold", e.bone_threshold)?;
        unit_interval("extraction.skin_threshold", e.skin_threshold)?;
        if e.min_vertices < 3 {
            return Err(invalid("extraction.min_vertices", e.min_vertices, "must be at least 3"));
        }
        positive("extraction.min_aspect_ratio", e.min_aspect_ratio)?;
        if e.max_aspect_ratio < e.min_aspect_ratio {
            return Err(invalid(
                "extraction.max_aspect_ratio",
                e.max_aspect_ratio,
                "must not be below min_aspect_ratio",
            ));
        }

        let g = &self.geometry;
        if g.decimation == 0 {
            return Err(invalid("geometry.decimation", g.decimation, "must be at least 1"));
        }
        positive("geometry.box_size", g.box_size)?;
        positive("geometry.mesh_size", g.mesh_size)?;
        positive("geometry.characteristic_length_max", g.characteristic_length_max)?;

        positive("source.pixel_spacing_mm", self.source.pixel_spacing_mm)?;
        positive("source.length_scale", self.source.length_scale)?;

        if self.output.prefix.contains(['/', '\\']) {
            return Err(invalid("output.prefix", &self.output.prefix, "must not contain path separators"));
        }
        Ok(())
    }

    #[must_use]
    pub fn shape_filter(&self) -> ShapeFilter {
        ShapeFilter {
            min_vertices: self.extraction.min_vertices,
            max_aspect_ratio: self.extraction.max_aspect_ratio,
            min_aspect_ratio: self.extraction.min_aspect_ratio,
        }
    }

    #[must_use]
    pub fn geo_params(&self) -> GeoParams {
        GeoParams {
            decimation: self.geometry.decimation,
            box_size: self.geometry.box_size,
            mesh_size: self.geometry.mesh_size,
            characteristic_length_max: self.geometry.characteristic_length_max,
        }
    }

    /// Pixel spacing in output length units.
    #[must_use]
    pub fn pixel_spacing(&self) -> f64 {
        self.source.pixel_spacing_mm * self.source.length_scale
    }

    /// Slice depth in output length units.
    #[must_use]
    pub fn slice_depth(&self) -> f64 {
        self.source.slice_depth_mm * self.source.length_scale
    }
}

fn invalid(key: &'static str, value: impl ToString, reason: &'static str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason,
    }
}

fn unit_interval(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(invalid(key, value, "must lie strictly between 0 and 1"))
    }
}

fn positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(key, value, "must be positive"))
    }
}

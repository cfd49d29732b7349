use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for slice-to-geometry conversion.
#[derive(Debug, Error)]
pub enum Slice2GeoError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Batch(#[from] BatchError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("field has {actual} samples, expected {width} x {height}")]
    SizeMismatch {
        width: usize,
        height: usize,
        actual: usize,
    },

    #[error("triangulation failed: {0}")]
    Triangulation(String),
}

/// Errors raised while deriving the bone/skin surface hierarchy.
#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("expected 2 cortical/trabecular bone pairs, found {found}")]
    UnexpectedPairCount { found: usize },

    #[error("bone contour takes part in more than one containment pair")]
    ContourReused,

    #[error("contour not found in store")]
    ContourNotFound,
}

/// Errors raised while writing a geometry file.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to write geometry to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write geometry: {0}")]
    Write(#[from] std::io::Error),

    #[error("loop id mismatch: hierarchy assigned {expected}, context produced {found}")]
    IdMismatch { expected: u32, found: u32 },

    #[error("hierarchy has no surfaces to emit")]
    EmptyHierarchy,
}

/// Errors raised while loading a slice.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read slice {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("slice {path} is blank (maximum intensity is zero)")]
    Blank { path: PathBuf },

    #[error(transparent)]
    Field(#[from] GeometryError),
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value {key} = {value}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Errors raised while preparing a batch run.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to list input directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("output {output} is already claimed by {claimed_by}")]
    DuplicateOutput { output: PathBuf, claimed_by: PathBuf },
}

/// Convenience type alias for results using [`Slice2GeoError`].
pub type Result<T> = std::result::Result<T, Slice2GeoError>;

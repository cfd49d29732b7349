pub mod batch;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod pipeline;
pub mod source;
pub mod topology;

#[cfg(test)]
mod test_support;

pub use batch::{BatchReport, RunBatch};
pub use config::PipelineConfig;
pub use error::{Result, Slice2GeoError};
pub use pipeline::{ProcessSlice, SkipReason, SliceOutcome};
pub use source::{RasterSource, SliceSource};

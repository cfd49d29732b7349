use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::error::{BatchError, Result, Slice2GeoError};
use crate::pipeline::{ProcessSlice, SkipReason, SliceOutcome};
use crate::source::SliceSource;

/// Per-file results of a batch run, each list in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Geometry files written.
    pub written: Vec<PathBuf>,
    /// Input slices without a usable cross-section.
    pub skipped: Vec<(PathBuf, SkipReason)>,
    /// Input slices that failed to load or emit.
    pub failed: Vec<(PathBuf, Slice2GeoError)>,
}

impl BatchReport {
    /// Number of input slices seen.
    #[must_use]
    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len() + self.failed.len()
    }
}

/// Geometry file name for an input slice: `<prefix>-<stem>.geo`.
#[must_use]
pub fn output_path(output_dir: &Path, prefix: &str, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .or_else(|| input.file_name())
        .map_or_else(|| "slice".into(), |s| s.to_string_lossy());
    output_dir.join(format!("{prefix}-{stem}.geo"))
}

/// Processes every slice in a directory.
///
/// Every regular file is treated as one slice. Slices run in parallel on the
/// rayon pool, and one bad slice is recorded without stopping the batch.
pub struct RunBatch<'a, S: SliceSource + ?Sized> {
    source: &'a S,
    config: &'a PipelineConfig,
}

impl<'a, S: SliceSource + ?Sized> RunBatch<'a, S> {
    /// Creates a new `RunBatch` operation.
    #[must_use]
    pub fn new(source: &'a S, config: &'a PipelineConfig) -> Self {
        Self { source, config }
    }

    /// Processes the slices in `input_dir`, writing into `output_dir`.
    ///
    /// Files are visited in name order. The output directory is created if
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns `BatchError` only if a directory cannot be listed or created;
    /// per-slice failures are collected in the report.
    pub fn execute(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchReport> {
        let inputs = list_slices(input_dir)?;
        std::fs::create_dir_all(output_dir).map_err(|source| BatchError::CreateDir {
            path: output_dir.to_path_buf(),
            source,
        })?;
        info!("processing {} slices from {}", inputs.len(), input_dir.display());

        let results: Vec<(PathBuf, Result<SliceOutcome>)> = self
            .plan(inputs, output_dir)
            .into_par_iter()
            .map(|(input, output)| {
                let result = output.and_then(|output| self.process(&input, &output));
                (input, result)
            })
            .collect();

        let mut report = BatchReport::default();
        for (input, result) in results {
            match result {
                Ok(SliceOutcome::Written { path, .. }) => report.written.push(path),
                Ok(SliceOutcome::Skipped(reason)) => {
                    info!("{}: skipped, {reason}", input.display());
                    report.skipped.push((input, reason));
                }
                Err(err) => {
                    warn!("{}: {err}", input.display());
                    report.failed.push((input, err));
                }
            }
        }
        info!(
            "{} written, {} skipped, {} failed",
            report.written.len(),
            report.skipped.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Pairs each input with its output path. Inputs sharing a stem with an
    /// earlier input get a `DuplicateOutput` error instead, so no two slices
    /// ever write the same file.
    fn plan(&self, inputs: Vec<PathBuf>, output_dir: &Path) -> Vec<(PathBuf, Result<PathBuf>)> {
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::with_capacity(inputs.len());
        inputs
            .into_iter()
            .map(|input| {
                let output = output_path(output_dir, &self.config.output.prefix, &input);
                let planned: Result<PathBuf> = match claimed.get(&output) {
                    Some(first) => Err(BatchError::DuplicateOutput {
                        output,
                        claimed_by: first.clone(),
                    }
                    .into()),
                    None => {
                        claimed.insert(output.clone(), input.clone());
                        Ok(output)
                    }
                };
                (input, planned)
            })
            .collect()
    }

    fn process(&self, input: &Path, output: &Path) -> Result<SliceOutcome> {
        let field = self.source.load(input)?;
        ProcessSlice::new(self.config).execute(&field, output)
    }
}

fn list_slices(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_err = |source: std::io::Error| BatchError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut inputs = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

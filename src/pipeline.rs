use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::{HierarchyError, Result};
use crate::export::{EmitSummary, WriteGeo};
use crate::geometry::{ContourClass, IntensityField};
use crate::operations::{BuildHierarchy, ExtractContours, SelectComposition};
use crate::topology::ContourStore;

/// Result of processing one slice.
#[derive(Debug)]
pub enum SliceOutcome {
    /// A geometry file was written.
    Written { path: PathBuf, summary: EmitSummary },
    /// The slice does not show a usable wrist cross-section; nothing was written.
    Skipped(SkipReason),
}

/// Why a slice produced no geometry file.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("no skin contour encloses exactly four bones ({skins} skin, {bones} bone contours)")]
    NoComposition { bones: usize, skins: usize },

    #[error(transparent)]
    InvalidHierarchy(HierarchyError),
}

/// Runs the full contour-to-geometry chain on one intensity field.
pub struct ProcessSlice<'a> {
    config: &'a PipelineConfig,
}

impl<'a> ProcessSlice<'a> {
    /// Creates a new `ProcessSlice` operation.
    #[must_use]
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    /// Processes `field`, writing the geometry to `output` if the slice is
    /// usable.
    ///
    /// A slice without a four-bone composition, or whose bones do not form
    /// two cortical/trabecular pairs, is skipped rather than failed.
    ///
    /// # Errors
    ///
    /// Returns an error for degenerate geometry or I/O failure. No file is
    /// left behind for degenerate geometry.
    pub fn execute(&self, field: &IntensityField, output: &Path) -> Result<SliceOutcome> {
        let extraction = &self.config.extraction;
        let filter = self.config.shape_filter();
        let mut store = ContourStore::new();

        let bones = ExtractContours::new(extraction.bone_threshold, ContourClass::Bone)
            .with_filter(filter)
            .execute(field, &mut store);
        let skins = ExtractContours::new(extraction.skin_threshold, ContourClass::Skin)
            .with_filter(filter)
            .execute(field, &mut store);
        debug!("{} bone and {} skin contours", bones.len(), skins.len());

        let Some(composition) = SelectComposition::new(&bones, &skins).execute(&store) else {
            return Ok(SliceOutcome::Skipped(SkipReason::NoComposition {
                bones: bones.len(),
                skins: skins.len(),
            }));
        };

        let hierarchy = match BuildHierarchy::new(&composition).execute(&store) {
            Ok(hierarchy) => hierarchy,
            Err(err @ (HierarchyError::UnexpectedPairCount { .. } | HierarchyError::ContourReused)) => {
                info!("skipping slice: {err}");
                return Ok(SliceOutcome::Skipped(SkipReason::InvalidHierarchy(err)));
            }
            Err(err) => return Err(err.into()),
        };

        let summary = WriteGeo::new(&hierarchy, &store, field.pixel_spacing())
            .with_params(self.config.geo_params())
            .execute_to_file(output)?;
        Ok(SliceOutcome::Written {
            path: output.to_path_buf(),
            summary,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{slice_field, two_bone_slice, Feature};
    use crate::Slice2GeoError;

    fn line_ids(statement: &str) -> Vec<u32> {
        let start = statement.find('{').unwrap() + 1;
        let end = statement.find('}').unwrap();
        statement[start..end]
            .split(',')
            .map(|id| id.trim().parse().unwrap())
            .collect()
    }

    #[test]
    fn two_bone_slice_writes_six_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("munieca-slice.geo");
        let config = PipelineConfig::default();

        let outcome = ProcessSlice::new(&config).execute(&two_bone_slice(), &output).unwrap();
        let SliceOutcome::Written { path, summary } = outcome else {
            panic!("slice was skipped");
        };
        assert_eq!(path, output);
        assert_eq!(summary.surfaces(), 6);

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("//Meshing bone.\n"));
        assert_eq!(text.matches("Plane Surface(").count(), 6);

        let boundary: Vec<&str> = text
            .lines()
            .filter(|line| line.starts_with("Physical Line(10)"))
            .collect();
        assert_eq!(boundary.len(), 1);
        let ids = line_ids(boundary[0]);
        assert_eq!(ids.len(), 4);
        assert_eq!(ids, summary.box_lines.to_vec());

        assert!(text.contains("Physical Surface(300) = {4,2};"));
        assert!(text.contains("Physical Surface(400) = {3,1};"));
        assert!(text.contains("Plane Surface(5) = {5,4,2};"));
    }

    #[test]
    fn three_bones_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("munieca-three.geo");
        let field = slice_field(&[
            Feature::Ring {
                center: (70.0, 100.0),
            },
            Feature::Disk {
                center: (130.0, 100.0),
            },
        ]);

        let outcome = ProcessSlice::new(&PipelineConfig::default())
            .execute(&field, &output)
            .unwrap();
        assert!(matches!(
            outcome,
            SliceOutcome::Skipped(SkipReason::NoComposition { bones: 3, skins: 1 })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn four_solid_bones_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("munieca-disks.geo");
        let field = slice_field(&[
            Feature::Disk { center: (50.0, 70.0) },
            Feature::Disk { center: (150.0, 70.0) },
            Feature::Disk { center: (50.0, 130.0) },
            Feature::Disk { center: (150.0, 130.0) },
        ]);

        let outcome = ProcessSlice::new(&PipelineConfig::default())
            .execute(&field, &output)
            .unwrap();
        assert!(matches!(
            outcome,
            SliceOutcome::Skipped(SkipReason::InvalidHierarchy(
                HierarchyError::UnexpectedPairCount { found: 0 }
            ))
        ));
        assert!(!output.exists());
    }

    #[test]
    fn over_decimation_fails_without_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("munieca-sparse.geo");
        let mut config = PipelineConfig::default();
        config.geometry.decimation = 10_000;

        let err = ProcessSlice::new(&config)
            .execute(&two_bone_slice(), &output)
            .unwrap_err();
        assert!(matches!(err, Slice2GeoError::Geometry(_)));
        assert!(!output.exists());
    }
}

use tracing::debug;

use crate::geometry::{Contour, ContourClass, IntensityField};
use crate::topology::{ContourId, ContourStore};

use super::marching_squares::trace_isolines;
use super::shape::is_rectangle;

/// Noise and artifact filter applied to raw isolines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeFilter {
    /// Isolines with fewer vertices are dropped as noise.
    pub min_vertices: usize,
    /// Bounding boxes wider than this ratio are frame artifacts.
    pub max_aspect_ratio: f64,
    /// Bounding boxes narrower than this ratio are frame artifacts.
    pub min_aspect_ratio: f64,
}

impl Default for ShapeFilter {
    fn default() -> Self {
        Self {
            min_vertices: 30,
            max_aspect_ratio: 5.0,
            min_aspect_ratio: 0.2,
        }
    }
}

/// Extracts the contours of one tissue class from an intensity field.
pub struct ExtractContours {
    threshold: f64,
    class: ContourClass,
    filter: ShapeFilter,
}

impl ExtractContours {
    /// Creates a new `ExtractContours` operation with the default filter.
    #[must_use]
    pub fn new(threshold: f64, class: ContourClass) -> Self {
        Self {
            threshold,
            class,
            filter: ShapeFilter::default(),
        }
    }

    /// Sets a custom shape filter.
    #[must_use]
    pub fn with_filter(mut self, filter: ShapeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Executes the extraction, inserting surviving contours into `store`.
    ///
    /// Returns their ids in extraction order. An empty result is valid.
    pub fn execute(&self, field: &IntensityField, store: &mut ContourStore) -> Vec<ContourId> {
        let isolines = trace_isolines(field, self.threshold);
        let raw = isolines.len();

        let ids: Vec<ContourId> = isolines
            .into_iter()
            .filter(|line| line.points.len() >= self.filter.min_vertices)
            .filter(|line| {
                !is_rectangle(
                    &line.points,
                    field.pixel_spacing(),
                    self.filter.min_aspect_ratio,
                    self.filter.max_aspect_ratio,
                )
            })
            .map(|line| store.add_contour(Contour::new(line.points, self.class, line.closed)))
            .collect();

        let open = ids
            .iter()
            .filter_map(|&id| store.contour(id).ok())
            .filter(|contour| !contour.closed)
            .count();
        debug!(
            "{:?} contours at threshold {}: kept {} of {} isolines ({open} open at the border)",
            self.class,
            self.threshold,
            ids.len(),
            raw
        );
        ids
    }
}

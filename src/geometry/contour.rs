use crate::math::{polygon_2d, Aabb2, Point2};

/// Tissue class a contour was extracted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContourClass {
    /// High-intensity isoline: cortical or trabecular bone boundary.
    Bone,
    /// Low-intensity isoline: outer skin / soft-tissue boundary.
    Skin,
}

/// A closed polyline in pixel coordinates.
///
/// Vertices use `x` = column and `y` = row. The closing edge from the last
/// vertex back to the first is implicit; the first vertex is not repeated.
#[derive(Debug, Clone)]
pub struct Contour {
    /// Ordered vertices.
    pub points: Vec<Point2>,
    /// Extraction class.
    pub class: ContourClass,
    /// `false` if the isoline ran into the image border and was closed
    /// artificially.
    pub closed: bool,
}

impl Contour {
    /// Creates a new contour.
    #[must_use]
    pub fn new(points: Vec<Point2>, class: ContourClass, closed: bool) -> Self {
        Self {
            points,
            class,
            closed,
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box in pixel coordinates.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb2> {
        Aabb2::from_points(&self.points)
    }

    /// Vertices in physical units.
    #[must_use]
    pub fn physical_points(&self, pixel_spacing: f64) -> Vec<Point2> {
        polygon_2d::scaled(&self.points, pixel_spacing)
    }

    /// Closed perimeter in physical units.
    #[must_use]
    pub fn physical_perimeter(&self, pixel_spacing: f64) -> f64 {
        polygon_2d::closed_perimeter(&self.points) * pixel_spacing
    }
}

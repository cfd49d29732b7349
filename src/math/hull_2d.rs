use spade::{DelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation};

use super::Point2;
use crate::error::GeometryError;

/// Computes the area enclosed by the convex hull of a point set.
///
/// The points are Delaunay-triangulated and the areas of all inner faces are
/// summed; the inner faces of a Delaunay triangulation tile exactly the convex
/// hull. Fewer than three non-collinear points yield an area of zero.
///
/// # Errors
///
/// Returns `GeometryError::Triangulation` if a coordinate cannot be inserted
/// (NaN or out of range).
pub fn convex_hull_area(points: &[Point2]) -> Result<f64, GeometryError> {
    let vertices: Vec<SpadePoint2<f64>> = points
        .iter()
        .map(|p| SpadePoint2::new(p.x, p.y))
        .collect();
    let triangulation = DelaunayTriangulation::<SpadePoint2<f64>>::bulk_load(vertices)
        .map_err(|e: InsertionError| GeometryError::Triangulation(format!("hull: {e}")))?;

    let area = triangulation
        .inner_faces()
        .map(|face| {
            let [a, b, c] = face.positions();
            ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() * 0.5
        })
        .sum();
    Ok(area)
}

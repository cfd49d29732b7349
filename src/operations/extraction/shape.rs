use std::f64::consts::PI;

use crate::error::GeometryError;
use crate::math::{hull_2d, polygon_2d, Aabb2, Point2, TOLERANCE};

/// Circularity window accepted as "near-circular".
const CIRCULARITY_MIN: f64 = 0.7;
const CIRCULARITY_MAX: f64 = 1.3;

/// Returns `true` if the physical bounding box of `points` is so elongated
/// that the polyline is a scan border or frame artifact rather than anatomy.
///
/// The aspect ratio is width over height; anything above `max_ratio` or below
/// `min_ratio` is rejected. A box with no extent along either axis is
/// rejected as well.
#[must_use]
pub fn is_rectangle(points: &[Point2], pixel_spacing: f64, min_ratio: f64, max_ratio: f64) -> bool {
    let Some(bounds) = Aabb2::from_points(points) else {
        return true;
    };
    let bounds = bounds.scaled(pixel_spacing);
    let (width, height) = (bounds.width(), bounds.height());
    if width < TOLERANCE || height < TOLERANCE {
        return true;
    }
    let ratio = width / height;
    ratio > max_ratio || ratio < min_ratio
}

/// Computes `4π · hull_area / perimeter²` for a closed polyline.
///
/// Returns `Ok(None)` when the perimeter is zero.
///
/// # Errors
///
/// Returns `GeometryError::Triangulation` if the hull cannot be built.
pub fn circularity(points: &[Point2]) -> Result<Option<f64>, GeometryError> {
    let perimeter = polygon_2d::closed_perimeter(points);
    if perimeter < TOLERANCE {
        return Ok(None);
    }
    let area = hull_2d::convex_hull_area(points)?;
    Ok(Some(4.0 * PI * area / (perimeter * perimeter)))
}

/// Returns `true` if the polyline is near-circular.
///
/// Not applied by the default extraction filter; available to callers that
/// want to tell round bone cross-sections from irregular outlines.
///
/// # Errors
///
/// Returns `GeometryError::Triangulation` if the hull cannot be built.
pub fn is_circle(points: &[Point2]) -> Result<bool, GeometryError> {
    Ok(circularity(points)?.is_some_and(|c| (CIRCULARITY_MIN..=CIRCULARITY_MAX).contains(&c)))
}

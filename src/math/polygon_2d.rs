use super::{Point2, Vector2, TOLERANCE};

/// Computes the perimeter of a closed polygon, including the closing edge.
#[must_use]
pub fn closed_perimeter(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| (points[(i + 1) % n] - points[i]).norm())
        .sum()
}

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise, in a y-up frame.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Computes the area centroid of a closed polygon.
///
/// Polygons with (near) zero area have no area centroid; for those the mean
/// of the vertices is returned. Returns `None` for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn centroid(points: &[Point2]) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }
    let area = signed_area(points);
    if area.abs() < TOLERANCE {
        let sum = points
            .iter()
            .fold(Vector2::zeros(), |acc, p| acc + p.coords);
        return Some(Point2::from(sum / points.len() as f64));
    }

    // Shift to the first vertex to keep the cross products well conditioned.
    let origin = points[0];
    let n = points.len();
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = points[i] - origin;
        let b = points[(i + 1) % n] - origin;
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    let factor = 1.0 / (6.0 * area);
    Some(Point2::new(origin.x + cx * factor, origin.y + cy * factor))
}

/// Scales every vertex by `factor` (pixel to physical units).
#[must_use]
pub fn scaled(points: &[Point2], factor: f64) -> Vec<Point2> {
    points.iter().map(|p| Point2::from(p.coords * factor)).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(x0: f64, y0: f64, side: f64) -> Vec<Point2> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x0 + side, y0),
            Point2::new(x0 + side, y0 + side),
            Point2::new(x0, y0 + side),
        ]
    }

    #[test]
    fn perimeter_includes_closing_edge() {
        assert_relative_eq!(closed_perimeter(&square(0.0, 0.0, 2.0)), 8.0);
    }

    #[test]
    fn perimeter_degenerate() {
        assert!(closed_perimeter(&[]).abs() < TOLERANCE);
        assert!(closed_perimeter(&[Point2::new(1.0, 1.0)]).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_orientation() {
        let ccw = square(0.0, 0.0, 1.0);
        let mut cw = ccw.clone();
        cw.reverse();
        assert_relative_eq!(signed_area(&ccw), 1.0);
        assert_relative_eq!(signed_area(&cw), -1.0);
    }

    #[test]
    fn centroid_of_offset_square() {
        let c = centroid(&square(10.0, 20.0, 4.0)).unwrap();
        assert_relative_eq!(c.x, 12.0, epsilon = 1e-9);
        assert_relative_eq!(c.y, 22.0, epsilon = 1e-9);
    }

    #[test]
    fn centroid_ignores_vertex_density() {
        // Extra vertices along one edge shift the vertex mean but not the
        // area centroid.
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(0.0, 4.0),
        ];
        let c = centroid(&pts).unwrap();
        assert_relative_eq!(c.x, 2.0, epsilon = 1e-9);
        assert_relative_eq!(c.y, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn centroid_of_collinear_points_is_mean() {
        let pts = vec![Point2::new(0.0, 0.0), Point2::new(2.0, 0.0), Point2::new(4.0, 0.0)];
        let c = centroid(&pts).unwrap();
        assert_relative_eq!(c.x, 2.0);
        assert_relative_eq!(c.y, 0.0);
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn scaling() {
        let s = scaled(&square(1.0, 1.0, 1.0), 0.5);
        assert_relative_eq!(s[2].x, 1.0);
        assert_relative_eq!(s[2].y, 1.0);
    }
}

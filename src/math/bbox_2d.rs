use super::Point2;

/// An axis-aligned bounding box in the image plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2 {
    /// Minimum corner of the bounding box.
    pub min: Point2,
    /// Maximum corner of the bounding box.
    pub max: Point2,
}

impl Aabb2 {
    /// Computes the bounding box of a point set, or `None` if it is empty.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self { min, max })
    }

    /// Extent along x (columns).
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along y (rows).
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns the box with both corners multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            min: Point2::from(self.min.coords * factor),
            max: Point2::from(self.max.coords * factor),
        }
    }

    /// Returns `true` if `item` lies inside `self` on both axes and the two
    /// boxes are not identical.
    ///
    /// The identity guard makes the relation irreflexive, so a contour never
    /// contains itself or an exact duplicate of itself.
    #[must_use]
    pub fn contains(&self, item: &Aabb2) -> bool {
        self.min.x <= item.min.x
            && self.min.y <= item.min.y
            && self.max.x >= item.max.x
            && self.max.y >= item.max.y
            && self != item
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn bbox(x0: f64, y0: f64, x1: f64, y1: f64) -> Aabb2 {
        Aabb2 {
            min: Point2::new(x0, y0),
            max: Point2::new(x1, y1),
        }
    }

    #[test]
    fn from_points_tracks_extremes() {
        let pts = [
            Point2::new(3.0, -1.0),
            Point2::new(-2.0, 4.0),
            Point2::new(0.5, 0.5),
        ];
        let b = Aabb2::from_points(&pts).unwrap();
        assert_eq!(b, bbox(-2.0, -1.0, 3.0, 4.0));
        assert!((b.width() - 5.0).abs() < 1e-12);
        assert!((b.height() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn from_points_empty() {
        assert!(Aabb2::from_points(&[]).is_none());
    }

    #[test]
    fn contains_strictly_inside() {
        assert!(bbox(0.0, 0.0, 10.0, 10.0).contains(&bbox(2.0, 2.0, 5.0, 5.0)));
    }

    #[test]
    fn contains_sharing_an_edge() {
        assert!(bbox(0.0, 0.0, 10.0, 10.0).contains(&bbox(0.0, 2.0, 5.0, 10.0)));
    }

    #[test]
    fn contains_is_irreflexive() {
        let b = bbox(1.0, 2.0, 3.0, 4.0);
        assert!(!b.contains(&b));
        let duplicate = bbox(1.0, 2.0, 3.0, 4.0);
        assert!(!b.contains(&duplicate));
    }

    #[test]
    fn contains_rejects_overlap_and_reverse() {
        let outer = bbox(0.0, 0.0, 10.0, 10.0);
        let inner = bbox(2.0, 2.0, 5.0, 5.0);
        assert!(!inner.contains(&outer));
        assert!(!outer.contains(&bbox(5.0, 5.0, 11.0, 9.0)));
        assert!(!outer.contains(&bbox(-0.1, 1.0, 2.0, 2.0)));
    }
}

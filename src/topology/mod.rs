pub mod surface;

pub use surface::{Composition, Hierarchy, Material, SurfaceSpec, OUTER_BOUNDARY_TAG};

use crate::error::HierarchyError;
use crate::geometry::{Contour, ContourClass};
use crate::math::Aabb2;
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Unique identifier for a contour in the contour store.
    pub struct ContourId;
}

/// Arena that owns every contour extracted from one slice.
///
/// Contours are referenced by [`ContourId`] everywhere identity matters, so
/// two contours that happen to share a coordinate are never confused.
#[derive(Debug, Default)]
pub struct ContourStore {
    contours: SlotMap<ContourId, Contour>,
}

impl ContourStore {
    /// Creates a new, empty contour store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a contour and returns its ID.
    pub fn add_contour(&mut self, contour: Contour) -> ContourId {
        self.contours.insert(contour)
    }

    /// Returns a reference to the contour, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour is not in the store.
    pub fn contour(&self, id: ContourId) -> Result<&Contour, HierarchyError> {
        self.contours.get(id).ok_or(HierarchyError::ContourNotFound)
    }

    /// Bounding box of a stored contour. Unknown or empty contours have none.
    #[must_use]
    pub fn bounds(&self, id: ContourId) -> Option<Aabb2> {
        self.contours.get(id).and_then(Contour::bounds)
    }

    /// Bounding-box containment between two stored contours.
    ///
    /// Unknown contours contain nothing and are contained by nothing.
    #[must_use]
    pub fn contains(&self, container: ContourId, item: ContourId) -> bool {
        match (self.bounds(container), self.bounds(item)) {
            (Some(outer), Some(inner)) => outer.contains(&inner),
            _ => false,
        }
    }

    /// Number of stored contours of the given class.
    #[must_use]
    pub fn count(&self, class: ContourClass) -> usize {
        self.contours.values().filter(|c| c.class == class).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contours.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64, class: ContourClass) -> Contour {
        Contour::new(
            vec![
                Point2::new(x0, y0),
                Point2::new(x1, y0),
                Point2::new(x1, y1),
                Point2::new(x0, y1),
            ],
            class,
            true,
        )
    }

    #[test]
    fn add_and_get() {
        let mut store = ContourStore::new();
        let id = store.add_contour(rect(0.0, 0.0, 1.0, 1.0, ContourClass::Bone));
        assert_eq!(store.contour(id).unwrap().len(), 4);
        assert_eq!(store.count(ContourClass::Bone), 1);
        assert_eq!(store.count(ContourClass::Skin), 0);
    }

    #[test]
    fn unknown_contour_is_an_error() {
        let mut other = ContourStore::new();
        let foreign = other.add_contour(rect(0.0, 0.0, 1.0, 1.0, ContourClass::Bone));
        let store = ContourStore::new();
        assert!(matches!(
            store.contour(foreign),
            Err(HierarchyError::ContourNotFound)
        ));
        assert!(!store.contains(foreign, foreign));
    }

    #[test]
    fn duplicates_do_not_contain_each_other() {
        let mut store = ContourStore::new();
        let a = store.add_contour(rect(0.0, 0.0, 5.0, 5.0, ContourClass::Bone));
        let b = store.add_contour(rect(0.0, 0.0, 5.0, 5.0, ContourClass::Bone));
        let c = store.add_contour(rect(1.0, 1.0, 2.0, 2.0, ContourClass::Bone));
        assert_ne!(a, b);
        assert!(!store.contains(a, b));
        assert!(!store.contains(a, a));
        assert!(store.contains(a, c));
        assert!(!store.contains(c, a));
    }
}

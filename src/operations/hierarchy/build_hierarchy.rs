use tracing::debug;

use crate::error::HierarchyError;
use crate::topology::{Composition, ContourId, ContourStore, Hierarchy, Material, SurfaceSpec};

/// Number of cortical/trabecular pairs a valid composition must contain.
pub const BONE_PAIRS: usize = 2;

/// Derives the nested surface hierarchy of a validated composition.
///
/// Every ordered pair of distinct bones where the first encloses the second
/// becomes a trabecular core (the inner contour, no holes) followed by a
/// cortical shell (the outer contour with the core's loop as a hole). The
/// skin surface comes last and has every cortical loop as a hole, so the
/// output order is `[inner₁, outer₁, inner₂, outer₂, skin]` with ids
/// `1..=5`.
pub struct BuildHierarchy<'a> {
    composition: &'a Composition,
}

impl<'a> BuildHierarchy<'a> {
    /// Creates a new `BuildHierarchy` operation.
    #[must_use]
    pub fn new(composition: &'a Composition) -> Self {
        Self { composition }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// - `HierarchyError::ContourNotFound` if a composition contour is not in `store`
    /// - `HierarchyError::UnexpectedPairCount` unless exactly two containment pairs exist
    /// - `HierarchyError::ContourReused` if a bone belongs to both pairs
    pub fn execute(&self, store: &ContourStore) -> Result<Hierarchy, HierarchyError> {
        let bones = &self.composition.bones;
        store.contour(self.composition.skin)?;
        for &bone in bones {
            store.contour(bone)?;
        }

        let mut pairs: Vec<(ContourId, ContourId)> = Vec::with_capacity(BONE_PAIRS);
        for &outer in bones {
            for &inner in bones {
                if outer != inner && store.contains(outer, inner) {
                    pairs.push((outer, inner));
                }
            }
        }
        if pairs.len() != BONE_PAIRS {
            return Err(HierarchyError::UnexpectedPairCount { found: pairs.len() });
        }
        let mut seen: Vec<ContourId> = Vec::with_capacity(2 * BONE_PAIRS);
        for &(outer, inner) in &pairs {
            for id in [outer, inner] {
                if seen.contains(&id) {
                    return Err(HierarchyError::ContourReused);
                }
                seen.push(id);
            }
        }

        let mut specs = Vec::with_capacity(2 * BONE_PAIRS + 1);
        let mut skin_holes = Vec::with_capacity(BONE_PAIRS);
        let mut next_id = 1;
        for (outer, inner) in pairs {
            let core = next_id;
            let shell = next_id + 1;
            next_id += 2;
            specs.push(SurfaceSpec {
                contour: inner,
                id: core,
                holes: Vec::new(),
                material: Material::TrabecularBone,
            });
            specs.push(SurfaceSpec {
                contour: outer,
                id: shell,
                holes: vec![core],
                material: Material::CorticalBone,
            });
            skin_holes.insert(0, shell);
            debug!("bone pair: trabecular surface {core} inside cortical surface {shell}");
        }

        specs.push(SurfaceSpec {
            contour: self.composition.skin,
            id: next_id,
            holes: skin_holes,
            material: Material::SoftTissue,
        });
        Ok(Hierarchy { specs })
    }
}

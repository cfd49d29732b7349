use tracing::{debug, info};

use crate::topology::{Composition, ContourId, ContourStore};

/// Number of bone contours a valid skin contour must enclose.
pub const BONES_PER_SKIN: usize = 4;

/// Selects the skin contour that encloses exactly four bone contours.
///
/// Skin candidates are tried in extraction order and the first match wins;
/// several valid candidates are not ranked against each other.
pub struct SelectComposition<'a> {
    bones: &'a [ContourId],
    skins: &'a [ContourId],
}

impl<'a> SelectComposition<'a> {
    /// Creates a new `SelectComposition` query.
    #[must_use]
    pub fn new(bones: &'a [ContourId], skins: &'a [ContourId]) -> Self {
        Self { bones, skins }
    }

    /// Executes the query. `None` means the slice has no valid composition.
    #[must_use]
    pub fn execute(&self, store: &ContourStore) -> Option<Composition> {
        for &skin in self.skins {
            let inside: Vec<ContourId> = self
                .bones
                .iter()
                .copied()
                .filter(|&bone| store.contains(skin, bone))
                .collect();
            debug!("skin candidate encloses {} bone contours", inside.len());

            if let Ok(bones) = <[ContourId; BONES_PER_SKIN]>::try_from(inside) {
                return Some(Composition { skin, bones });
            }
        }
        info!(
            "no skin contour encloses exactly {BONES_PER_SKIN} bone contours ({} skin, {} bone candidates)",
            self.skins.len(),
            self.bones.len()
        );
        None
    }
}

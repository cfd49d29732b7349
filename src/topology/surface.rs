use super::ContourId;

/// Physical line tag for the four outer lines of the coupling-medium box.
pub const OUTER_BOUNDARY_TAG: u32 = 10;

/// Material identity of a plane surface, written as a physical surface tag.
///
/// The numeric tags are stable identifiers shared with downstream tools that
/// read the meshed result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    /// Acoustic coupling medium filling the surrounding box.
    CouplingMedium,
    /// Muscle and other soft tissue inside the skin.
    SoftTissue,
    /// Cortical bone shell (annulus).
    CorticalBone,
    /// Trabecular bone core.
    TrabecularBone,
}

impl Material {
    /// Emission order of physical surface groups.
    pub const ALL: [Material; 4] = [
        Material::CouplingMedium,
        Material::SoftTissue,
        Material::CorticalBone,
        Material::TrabecularBone,
    ];

    /// Physical surface tag.
    #[must_use]
    pub fn tag(self) -> u32 {
        match self {
            Material::CouplingMedium => 100,
            Material::SoftTissue => 200,
            Material::CorticalBone => 300,
            Material::TrabecularBone => 400,
        }
    }

    /// Human-readable label written next to the physical group.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Material::CouplingMedium => "coupling medium",
            Material::SoftTissue => "muscle",
            Material::CorticalBone => "cortical bone",
            Material::TrabecularBone => "trabecular bone",
        }
    }
}

/// The validated grouping of one skin contour around four bone contours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    /// The enclosing skin contour.
    pub skin: ContourId,
    /// The four bone contours inside it, in extraction order.
    pub bones: [ContourId; 4],
}

/// One plane surface to emit.
///
/// Anatomical surfaces own exactly one loop, so `id` is both the loop id and
/// the surface id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSpec {
    /// Contour tracing the outer boundary of the surface.
    pub contour: ContourId,
    /// Loop and surface id.
    pub id: u32,
    /// Loop ids cut out of this surface as holes.
    pub holes: Vec<u32>,
    /// Material of the surface.
    pub material: Material,
}

/// Ordered surfaces of one slice: `[inner, outer, inner, outer, skin]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hierarchy {
    pub specs: Vec<SurfaceSpec>,
}

impl Hierarchy {
    /// Surface ids carrying `material`, latest first.
    #[must_use]
    pub fn surfaces_with(&self, material: Material) -> Vec<u32> {
        self.specs
            .iter()
            .rev()
            .filter(|s| s.material == material)
            .map(|s| s.id)
            .collect()
    }

    /// The last spec, which encloses everything else.
    #[must_use]
    pub fn outermost(&self) -> Option<&SurfaceSpec> {
        self.specs.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

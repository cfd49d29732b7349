use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{EmitError, GeometryError, Result};
use crate::math::{polygon_2d, Point2, TOLERANCE};
use crate::topology::{ContourStore, Hierarchy, Material, SurfaceSpec, OUTER_BOUNDARY_TAG};

use super::{EmitContext, EmitSummary, GeoParams};

/// A hierarchy surface with its boundary already centred and decimated.
struct PreparedSurface<'a> {
    spec: &'a SurfaceSpec,
    points: Vec<Point2>,
}

/// Writes a surface hierarchy as a gmsh `.geo` geometry description.
///
/// Coordinates are physical (pixel spacing applied) and re-centred on the
/// area centroid of the longest boundary, so the specimen sits near the
/// origin inside the coupling-medium box.
pub struct WriteGeo<'a> {
    hierarchy: &'a Hierarchy,
    store: &'a ContourStore,
    pixel_spacing: f64,
    params: GeoParams,
}

impl<'a> WriteGeo<'a> {
    /// Creates a new `WriteGeo` operation with default parameters.
    #[must_use]
    pub fn new(hierarchy: &'a Hierarchy, store: &'a ContourStore, pixel_spacing: f64) -> Self {
        Self {
            hierarchy,
            store,
            pixel_spacing,
            params: GeoParams::default(),
        }
    }

    /// Sets custom emission parameters.
    #[must_use]
    pub fn with_params(mut self, params: GeoParams) -> Self {
        self.params = params;
        self
    }

    /// Writes the geometry to `out`.
    ///
    /// # Errors
    ///
    /// - `GeometryError::Degenerate` if no boundary has a positive perimeter
    ///   or a decimated boundary has fewer than 3 points
    /// - `EmitError` if writing fails or the hierarchy ids disagree with the
    ///   running counters
    pub fn execute<W: Write>(&self, out: &mut W) -> Result<EmitSummary> {
        let surfaces = self.prepare()?;
        Ok(self.write(&surfaces, out)?)
    }

    /// Writes the geometry to a new file at `path`.
    ///
    /// The text is staged in a temporary file next to `path` and moved into
    /// place only once complete, so a failed write never leaves a partial
    /// geometry behind. Nothing is created for degenerate geometry.
    ///
    /// # Errors
    ///
    /// Same as [`WriteGeo::execute`], plus `EmitError::Io` if the file cannot
    /// be created, flushed or moved into place.
    pub fn execute_to_file(&self, path: &Path) -> Result<EmitSummary> {
        let surfaces = self.prepare()?;
        let io_err = |source: std::io::Error| EmitError::Io {
            path: path.to_path_buf(),
            source,
        };
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let staged = NamedTempFile::new_in(dir).map_err(io_err)?;
        let mut out = BufWriter::new(staged);
        let summary = self.write(&surfaces, &mut out).map_err(|e| match e {
            EmitError::Write(source) => io_err(source),
            other => other,
        })?;
        let staged = out.into_inner().map_err(|e| io_err(e.into_error()))?;
        staged.persist(path).map_err(|e| io_err(e.error))?;
        info!(
            "wrote {} ({} points, {} surfaces)",
            path.display(),
            summary.points(),
            summary.surfaces()
        );
        Ok(summary)
    }

    fn prepare(&self) -> Result<Vec<PreparedSurface<'a>>> {
        if self.hierarchy.is_empty() {
            return Err(EmitError::EmptyHierarchy.into());
        }
        let origin = self.reference_centroid()?;
        let step = self.params.decimation.max(1);

        let mut surfaces = Vec::with_capacity(self.hierarchy.len());
        for spec in &self.hierarchy.specs {
            let contour = self.store.contour(spec.contour)?;
            let points: Vec<Point2> = contour
                .physical_points(self.pixel_spacing)
                .into_iter()
                .step_by(step)
                .map(|p| Point2::from(p - origin))
                .collect();
            if points.len() < 3 {
                return Err(GeometryError::Degenerate(format!(
                    "surface {} keeps {} of {} boundary points after decimation",
                    spec.id,
                    points.len(),
                    contour.len()
                ))
                .into());
            }
            surfaces.push(PreparedSurface { spec, points });
        }
        Ok(surfaces)
    }

    /// Area centroid of the boundary with the largest physical perimeter.
    fn reference_centroid(&self) -> Result<Point2> {
        let mut longest: Option<(f64, Vec<Point2>)> = None;
        for spec in &self.hierarchy.specs {
            let contour = self.store.contour(spec.contour)?;
            let perimeter = contour.physical_perimeter(self.pixel_spacing);
            if longest.as_ref().is_none_or(|(best, _)| perimeter > *best) {
                longest = Some((perimeter, contour.physical_points(self.pixel_spacing)));
            }
        }
        match longest {
            Some((perimeter, points)) if perimeter > TOLERANCE => polygon_2d::centroid(&points)
                .ok_or_else(|| GeometryError::Degenerate("empty boundary".to_owned()).into()),
            _ => Err(GeometryError::Degenerate("no boundary has a positive perimeter".to_owned()).into()),
        }
    }

    fn write<W: Write>(
        &self,
        surfaces: &[PreparedSurface<'_>],
        out: &mut W,
    ) -> std::result::Result<EmitSummary, EmitError> {
        let mut ctx = EmitContext::new();

        writeln!(out, "//Meshing bone.")?;
        writeln!(out, "//Inputs;")?;
        writeln!(out, "gridsize = {};", self.params.mesh_size)?;
        writeln!(out)?;

        let mut points_per_surface = Vec::with_capacity(surfaces.len());
        let mut last_loop = 0;
        for surface in surfaces {
            let loop_id = write_closed_polygon(out, &mut ctx, &surface.points)?;
            let surface_id = ctx.surface();
            for found in [loop_id, surface_id] {
                if found != surface.spec.id {
                    return Err(EmitError::IdMismatch {
                        expected: surface.spec.id,
                        found,
                    });
                }
            }
            let boundary: Vec<u32> = std::iter::once(loop_id)
                .chain(surface.spec.holes.iter().copied())
                .collect();
            writeln!(out, "Plane Surface({surface_id}) = {{{}}};", join(&boundary))?;
            writeln!(out)?;
            #[allow(clippy::cast_possible_truncation)]
            points_per_surface.push(surface.points.len() as u32);
            last_loop = loop_id;
            debug!(
                "{:?} surface {surface_id}: {} points, holes {:?}",
                surface.spec.material,
                surface.points.len(),
                surface.spec.holes
            );
        }

        let (box_lines, box_surface) = self.write_box(out, &mut ctx, last_loop)?;
        self.write_physical_groups(out, box_surface, &box_lines)?;
        writeln!(
            out,
            "Mesh.CharacteristicLengthMax = {:e};",
            self.params.characteristic_length_max
        )?;

        Ok(EmitSummary {
            points_per_surface,
            box_lines,
            box_surface,
            context: ctx,
        })
    }

    /// Writes the coupling-medium box with the specimen's outer loop cut out.
    fn write_box<W: Write>(
        &self,
        out: &mut W,
        ctx: &mut EmitContext,
        specimen_loop: u32,
    ) -> std::result::Result<([u32; 4], u32), EmitError> {
        let half = self.params.box_size / 2.0;
        let corners = [
            Point2::new(-half, -half),
            Point2::new(-half, half),
            Point2::new(half, half),
            Point2::new(half, -half),
        ];
        let first_line = ctx.next_line;
        let box_loop = write_closed_polygon(out, ctx, &corners)?;
        let box_lines = [first_line, first_line + 1, first_line + 2, first_line + 3];
        let box_surface = ctx.surface();
        writeln!(out, "Plane Surface({box_surface}) = {{{box_loop},{specimen_loop}}};")?;
        writeln!(out)?;
        Ok((box_lines, box_surface))
    }

    fn write_physical_groups<W: Write>(
        &self,
        out: &mut W,
        box_surface: u32,
        box_lines: &[u32; 4],
    ) -> std::result::Result<(), EmitError> {
        for material in Material::ALL {
            let members = match material {
                Material::CouplingMedium => vec![box_surface],
                _ => self.hierarchy.surfaces_with(material),
            };
            writeln!(
                out,
                "Physical Surface({}) = {{{}}}; // \"{}\"",
                material.tag(),
                join(&members),
                material.label()
            )?;
        }
        writeln!(
            out,
            "Physical Line({OUTER_BOUNDARY_TAG}) = {{{}}}; // \"outer boundary\"",
            join(box_lines)
        )?;
        Ok(())
    }
}

/// Writes points, closing lines and one line loop; returns the loop id.
fn write_closed_polygon<W: Write>(
    out: &mut W,
    ctx: &mut EmitContext,
    points: &[Point2],
) -> std::result::Result<u32, EmitError> {
    let point_ids: Vec<u32> = points
        .iter()
        .map(|p| {
            let id = ctx.point();
            writeln!(out, "Point({id}) = {{{},{},0,gridsize}};", p.x, p.y).map(|()| id)
        })
        .collect::<std::io::Result<_>>()?;
    writeln!(out)?;

    let n = point_ids.len();
    let mut line_ids = Vec::with_capacity(n);
    for i in 0..n {
        let id = ctx.line();
        writeln!(out, "Line({id}) = {{{},{}}};", point_ids[i], point_ids[(i + 1) % n])?;
        line_ids.push(id);
    }
    writeln!(out)?;

    let loop_id = ctx.line_loop();
    writeln!(out, "Line Loop({loop_id}) = {{{}}};", join(&line_ids))?;
    Ok(loop_id)
}

fn join(ids: &[u32]) -> String {
    ids.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

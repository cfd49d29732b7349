mod write_geo;

pub use write_geo::WriteGeo;

/// Parameters controlling geometry-file emission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoParams {
    /// Keep every n-th contour vertex.
    pub decimation: usize,
    /// Side length of the square coupling-medium box, centred at the origin.
    pub box_size: f64,
    /// Value of the `gridsize` variable attached to every point.
    pub mesh_size: f64,
    /// Value written to `Mesh.CharacteristicLengthMax`.
    pub characteristic_length_max: f64,
}

impl Default for GeoParams {
    fn default() -> Self {
        Self {
            decimation: 7,
            box_size: 0.25,
            mesh_size: 1.0,
            characteristic_length_max: 1.0e-2,
        }
    }
}

/// Running entity counters for one geometry file.
///
/// Every counter starts at 1 and only ever increases, so no id is reused or
/// skipped within a file. Each slice gets a fresh context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitContext {
    pub next_point: u32,
    pub next_line: u32,
    pub next_loop: u32,
    pub next_surface: u32,
}

impl Default for EmitContext {
    fn default() -> Self {
        Self {
            next_point: 1,
            next_line: 1,
            next_loop: 1,
            next_surface: 1,
        }
    }
}

impl EmitContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point(&mut self) -> u32 {
        bump(&mut self.next_point)
    }

    pub fn line(&mut self) -> u32 {
        bump(&mut self.next_line)
    }

    pub fn line_loop(&mut self) -> u32 {
        bump(&mut self.next_loop)
    }

    pub fn surface(&mut self) -> u32 {
        bump(&mut self.next_surface)
    }
}

fn bump(counter: &mut u32) -> u32 {
    let id = *counter;
    *counter += 1;
    id
}

/// What one geometry file contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitSummary {
    /// Points written per anatomical surface, in emission order.
    pub points_per_surface: Vec<u32>,
    /// Line ids of the coupling-medium box.
    pub box_lines: [u32; 4],
    /// Surface id of the coupling-medium box.
    pub box_surface: u32,
    /// Counters after the last entity was written.
    pub context: EmitContext,
}

impl EmitSummary {
    /// Total points written, box included.
    #[must_use]
    pub fn points(&self) -> u32 {
        self.context.next_point - 1
    }

    /// Total plane surfaces written, box included.
    #[must_use]
    pub fn surfaces(&self) -> u32 {
        self.context.next_surface - 1
    }
}

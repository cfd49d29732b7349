use std::collections::{HashMap, VecDeque};

use crate::geometry::IntensityField;
use crate::math::Point2;

/// A raw isoline traced through an intensity field, in pixel coordinates.
#[derive(Debug, Clone)]
pub struct Isoline {
    /// Ordered vertices (`x` = column, `y` = row). Closed isolines do not
    /// repeat their first vertex.
    pub points: Vec<Point2>,
    /// `false` if both ends of the isoline sit on the image border.
    pub closed: bool,
}

/// A grid edge between two neighbouring samples. Every isoline vertex lies on
/// exactly one grid edge, so segments are stitched by edge identity rather
/// than by comparing floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum GridEdge {
    /// Between `(row, col)` and `(row, col + 1)`.
    Horizontal(usize, usize),
    /// Between `(row, col)` and `(row + 1, col)`.
    Vertical(usize, usize),
}

/// Traces all isolines of `field` at `level` with marching squares.
///
/// A sample `>= level` counts as inside. Crossing points are linearly
/// interpolated along cell edges. Saddle cells are resolved with the mean of
/// the four corners: a mean `>= level` joins the two inside corners.
///
/// Isolines are returned in row-major order of the cell where tracing first
/// met them.
#[must_use]
pub fn trace_isolines(field: &IntensityField, level: f64) -> Vec<Isoline> {
    let (width, height) = (field.width(), field.height());
    if width < 2 || height < 2 {
        return Vec::new();
    }

    let mut segments: Vec<[GridEdge; 2]> = Vec::new();
    for row in 0..height - 1 {
        for col in 0..width - 1 {
            cell_segments(field, level, row, col, &mut segments);
        }
    }

    let mut incident: HashMap<GridEdge, Vec<usize>> = HashMap::new();
    for (i, [a, b]) in segments.iter().enumerate() {
        incident.entry(*a).or_default().push(i);
        incident.entry(*b).or_default().push(i);
    }

    let mut used = vec![false; segments.len()];
    let mut isolines = Vec::new();
    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let [first, second] = segments[start];
        let mut chain = VecDeque::from([first, second]);

        let mut closed = false;
        let mut tip = second;
        while let Some(next) = follow(&segments, &incident, &mut used, tip) {
            if next == first {
                closed = true;
                break;
            }
            chain.push_back(next);
            tip = next;
        }

        if !closed {
            let mut tip = first;
            while let Some(next) = follow(&segments, &incident, &mut used, tip) {
                chain.push_front(next);
                tip = next;
            }
        }

        let points = chain
            .iter()
            .map(|edge| crossing(field, level, *edge))
            .collect();
        isolines.push(Isoline { points, closed });
    }
    isolines
}

/// Marks and returns the far end of an unused segment touching `edge`.
fn follow(
    segments: &[[GridEdge; 2]],
    incident: &HashMap<GridEdge, Vec<usize>>,
    used: &mut [bool],
    edge: GridEdge,
) -> Option<GridEdge> {
    let candidates = incident.get(&edge)?;
    let &next = candidates.iter().find(|&&i| !used[i])?;
    used[next] = true;
    let [a, b] = segments[next];
    Some(if a == edge { b } else { a })
}

/// Appends the isoline segments crossing the cell whose top-left sample is
/// `(row, col)`.
fn cell_segments(
    field: &IntensityField,
    level: f64,
    row: usize,
    col: usize,
    out: &mut Vec<[GridEdge; 2]>,
) {
    let ul = field.at(row, col);
    let ur = field.at(row, col + 1);
    let ll = field.at(row + 1, col);
    let lr = field.at(row + 1, col + 1);

    let case = u8::from(ul >= level)
        | u8::from(ur >= level) << 1
        | u8::from(ll >= level) << 2
        | u8::from(lr >= level) << 3;

    let top = GridEdge::Horizontal(row, col);
    let bottom = GridEdge::Horizontal(row + 1, col);
    let left = GridEdge::Vertical(row, col);
    let right = GridEdge::Vertical(row, col + 1);
    let center_inside = (ul + ur + ll + lr) * 0.25 >= level;

    match case {
        1 | 14 => out.push([top, left]),
        2 | 13 => out.push([top, right]),
        3 | 12 => out.push([left, right]),
        4 | 11 => out.push([left, bottom]),
        5 | 10 => out.push([top, bottom]),
        7 | 8 => out.push([right, bottom]),
        // Saddle: upper-right and lower-left inside.
        6 => {
            if center_inside {
                out.push([top, left]);
                out.push([right, bottom]);
            } else {
                out.push([top, right]);
                out.push([left, bottom]);
            }
        }
        // Saddle: upper-left and lower-right inside.
        9 => {
            if center_inside {
                out.push([top, right]);
                out.push([left, bottom]);
            } else {
                out.push([top, left]);
                out.push([right, bottom]);
            }
        }
        _ => {}
    }
}

/// Interpolated position where the isoline crosses `edge`.
#[allow(clippy::cast_precision_loss)]
fn crossing(field: &IntensityField, level: f64, edge: GridEdge) -> Point2 {
    let fraction = |a: f64, b: f64| {
        let d = b - a;
        if d.abs() < f64::EPSILON {
            0.5
        } else {
            ((level - a) / d).clamp(0.0, 1.0)
        }
    };
    match edge {
        GridEdge::Horizontal(row, col) => {
            let t = fraction(field.at(row, col), field.at(row, col + 1));
            Point2::new(col as f64 + t, row as f64)
        }
        GridEdge::Vertical(row, col) => {
            let t = fraction(field.at(row, col), field.at(row + 1, col));
            Point2::new(col as f64, row as f64 + t)
        }
    }
}

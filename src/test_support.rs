#![allow(clippy::cast_precision_loss, clippy::unwrap_used)]

use crate::geometry::IntensityField;

/// Pixel spacing of synthetic slices: 0.5 mm expressed in metres.
pub const SPACING: f64 = 5.0e-4;

/// Smooth step from 0 to 1 over two pixels, centred on `signed == 0`.
fn ramp(signed: f64) -> f64 {
    (0.5 + signed / 2.0).clamp(0.0, 1.0)
}

fn distance(row: usize, col: usize, center: (f64, f64)) -> f64 {
    let dx = col as f64 - center.0;
    let dy = row as f64 - center.1;
    (dx * dx + dy * dy).sqrt()
}

fn field_from(width: usize, height: usize, f: impl Fn(usize, usize) -> f64) -> IntensityField {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push(f(row, col));
        }
    }
    IntensityField::new(width, height, data, SPACING, 0.0).unwrap()
}

/// Bright disk whose 0.5 isoline has radius `radius`. `center` is (x, y).
pub fn disk_field(width: usize, height: usize, center: (f64, f64), radius: f64) -> IntensityField {
    field_from(width, height, |r, c| ring_value(r, c, center, 0.0, radius))
}

/// Bright annulus whose 0.5 isolines have radii `inner` and `outer`.
pub fn ring_field(
    width: usize,
    height: usize,
    center: (f64, f64),
    inner: f64,
    outer: f64,
) -> IntensityField {
    field_from(width, height, |r, c| ring_value(r, c, center, inner, outer))
}

fn ring_value(row: usize, col: usize, center: (f64, f64), inner: f64, outer: f64) -> f64 {
    let d = distance(row, col, center);
    if inner <= 0.0 {
        return ramp(outer - d);
    }
    let mid = (inner + outer) * 0.5;
    let half = (outer - inner) * 0.5;
    ramp(half - (d - mid).abs())
}

/// A bone feature inside a synthetic slice.
#[derive(Debug, Clone, Copy)]
pub enum Feature {
    /// Cortical shell around a trabecular core: two bone isolines.
    Ring { center: (f64, f64) },
    /// Solid bone without a distinct core: one bone isoline.
    Disk { center: (f64, f64) },
}

/// 200 x 200 slice: a soft-tissue square (plateau 0.35, between the skin and
/// bone thresholds) spanning pixels 20..180, with bone features on top.
pub fn slice_field(features: &[Feature]) -> IntensityField {
    field_from(200, 200, |r, c| {
        let (x, y) = (c as f64, r as f64);
        let inside = (x - 20.0).min(180.0 - x).min(y - 20.0).min(180.0 - y);
        let mut v = 0.35 * ramp(inside);
        for feature in features {
            let bone = match *feature {
                Feature::Ring { center } => ring_value(r, c, center, 8.0, 16.0),
                Feature::Disk { center } => ring_value(r, c, center, 0.0, 12.0),
            };
            v = v.max(bone);
        }
        v
    })
}

/// Two cortical/trabecular pairs side by side.
pub fn two_bone_slice() -> IntensityField {
    slice_field(&[
        Feature::Ring {
            center: (70.0, 100.0),
        },
        Feature::Ring {
            center: (130.0, 100.0),
        },
    ])
}

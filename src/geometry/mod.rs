pub mod contour;
pub mod field;

pub use contour::{Contour, ContourClass};
pub use field::IntensityField;

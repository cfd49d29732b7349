mod extract_contours;
pub mod marching_squares;
pub mod shape;

pub use extract_contours::{ExtractContours, ShapeFilter};
pub use marching_squares::{trace_isolines, Isoline};

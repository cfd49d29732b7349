pub mod bbox_2d;
pub mod hull_2d;
pub mod polygon_2d;

pub use bbox_2d::Aabb2;

/// 2D point type. `x` is the image column, `y` is the image row.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

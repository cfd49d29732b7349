pub mod composition;
pub mod extraction;
pub mod hierarchy;

pub use composition::SelectComposition;
pub use extraction::{ExtractContours, ShapeFilter};
pub use hierarchy::BuildHierarchy;

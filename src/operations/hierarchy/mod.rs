mod build_hierarchy;

pub use build_hierarchy::{BuildHierarchy, BONE_PAIRS};

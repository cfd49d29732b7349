mod select_composition;

pub use select_composition::{SelectComposition, BONES_PER_SKIN};

//! Value interpolation: classify endpoint pairs and blend them per category.

pub mod functions;

pub use functions::{category_for, finalize, interpolate, lerp_f32, lerp_vec2};

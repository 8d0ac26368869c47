// Core helpers shared by the engine and game layers

pub mod math;

pub use math::{Facing, Rect, Vector2};

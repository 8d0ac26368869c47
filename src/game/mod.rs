// Game layer: actors, camera, stages and their configuration

pub mod camera;
pub mod characters;
pub mod config;
pub mod error;
pub mod stage;

pub use camera::Camera;
pub use config::SimConfig;
pub use error::ConfigError;
pub use stage::{Stage, StageDefinition};

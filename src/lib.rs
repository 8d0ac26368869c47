// Gameplay simulation core for a 2D side-scrolling brawler
//
// - `core`: vector and rectangle helpers
// - `engine`: signals, input bindings and the fixed-timestep driver
// - `game`: actors, AI, camera and stages

pub mod core;
pub mod engine;
pub mod game;

pub use engine::input::{Action, InputConfig, InputEvent};
pub use engine::GameLoop;
pub use game::characters::{ActorId, Archetype, ArchetypeRegistry, Character, Signal, Value};
pub use game::{Camera, ConfigError, SimConfig, Stage, StageDefinition};

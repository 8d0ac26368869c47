// Character system
//
// This module contains everything related to the actors of a stage:
// - Archetypes (per-type clips, speeds, strengths, boxes)
// - Character data structure and the per-tick update
// - Actor arena and handles
// - Controllers for players, enemies and pets
// - Animation clock and state flags

pub mod animation;
pub mod archetype;
pub mod arena;
pub mod character;
pub mod controller;
pub mod events;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{AnimationClip, AnimationPlayer, ClipEvent, ClipTable};
pub use archetype::{Archetype, ArchetypeRegistry};
pub use arena::{ActorArena, ActorId, WorldView};
pub use character::{Character, HitReport, Kinematics, RenderState};
pub use controller::{Behavior, Controller, EnemyController, PetController, PlayerController, Role};
pub use events::{Signal, Strike, Value};
pub use state::CharacterState;
pub use stats::CombatStats;

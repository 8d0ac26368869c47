// Input handling
//
// The host captures devices and reports logical events (`InputEvent`). The stage
// fans them out to player actors, whose controllers translate key names into
// actions through an `InputConfig`.
//
// ## Architecture
//
// - `action`: Defines game actions and default key bindings
// - `config`: Per-player key binding table with remapping
// - `event`: Logical key/touch events

pub mod action;
pub mod config;
pub mod event;

// Re-export commonly used types
pub use action::Action;
pub use config::InputConfig;
pub use event::InputEvent;

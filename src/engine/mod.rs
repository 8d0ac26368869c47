// Engine modules: timing, input, signals

pub mod game_loop;
pub mod input;
pub mod signals;

pub use game_loop::GameLoop;
pub use signals::{BindingId, Emitter, Event, EventQueue, SignalBus};

// Actor signals and their argument values

use crate::core::{Facing, Vector2};
use crate::engine::signals::{EventQueue, SignalBus};

use super::arena::ActorId;
use super::character::Character;

/// Signals an actor can emit or receive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// A clip (re)started. Args: `[Text(clip)]`
    AnimationStart,
    /// A clip reached its end. Args: `[Text(clip)]`
    AnimationEnd,
    /// Args: `[Text(key)]`
    KeyDown,
    /// Args: `[Text(key)]`
    KeyUp,
    /// Args: `[Touch(id), Point(position)]`
    TouchStart,
    /// Args: `[Touch(id), Point(position)]`
    TouchMove,
    /// Args: `[Touch(id)]`
    TouchEnd,
    /// Struck by an attack. Args: `[Strike(strike)]`
    Hit,
    /// Health ran out. Emitted once, no args.
    Destroyed,
}

/// Attacker snapshot delivered with a `Hit`
#[derive(Debug, Clone, PartialEq)]
pub struct Strike {
    pub attacker: ActorId,
    pub facing: Facing,
    /// Damage for the attacker's current clip
    pub strength: i32,
    pub clip: String,
}

/// A signal argument
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Point(Vector2),
    Touch(u32),
    Strike(Strike),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Vector2> {
        match self {
            Value::Point(point) => Some(*point),
            _ => None,
        }
    }

    pub fn as_touch(&self) -> Option<u32> {
        match self {
            Value::Touch(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_strike(&self) -> Option<&Strike> {
        match self {
            Value::Strike(strike) => Some(strike),
            _ => None,
        }
    }
}

/// Signal table of an actor
pub type ActorSignals = SignalBus<Signal, Character, Value>;

/// Deferred events waiting for an actor's next tick
pub type ActorEvents = EventQueue<Signal, Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Text("right".into()).as_text(), Some("right"));
        assert_eq!(Value::Touch(1).as_text(), None);
        assert_eq!(Value::Touch(2).as_touch(), Some(2));
        assert_eq!(
            Value::Point(Vector2::new(1.0, 2.0)).as_point(),
            Some(Vector2::new(1.0, 2.0))
        );
    }
}

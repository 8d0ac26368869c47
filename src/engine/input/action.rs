// Game action definitions and default key bindings
//
// The input layer reports logical key names ("right", "c", ...). Bindings turn
// those names into actions.

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,

    // Moves
    Jump,
    Punch,
    Kick,
}

impl Action {
    /// Check if the action is a held movement direction
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            Self::MoveLeft | Self::MoveRight | Self::MoveUp | Self::MoveDown
        )
    }

    /// Clip started by a one-shot action
    pub fn clip_name(&self) -> Option<&'static str> {
        match self {
            Self::Jump => Some("jump"),
            Self::Punch => Some("punch"),
            Self::Kick => Some("kick"),
            _ => None,
        }
    }
}

/// Default bindings for Player 1
pub fn default_p1_bindings() -> Vec<(&'static str, Action)> {
    vec![
        // Arrow keys
        ("left", Action::MoveLeft),
        ("right", Action::MoveRight),
        ("up", Action::MoveUp),
        ("down", Action::MoveDown),
        // WASD aliases
        ("a", Action::MoveLeft),
        ("d", Action::MoveRight),
        ("w", Action::MoveUp),
        ("s", Action::MoveDown),
        // Moves
        ("c", Action::Jump),
        ("x", Action::Punch),
        ("z", Action::Kick),
    ]
}

// Logical input events produced by the host's input layer

use crate::core::Vector2;

/// A discrete input event. Device capture happens outside this crate.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown { key: String },
    KeyUp { key: String },
    TouchStart { id: u32, position: Vector2 },
    TouchMove { id: u32, position: Vector2 },
    TouchEnd { id: u32 },
}

impl InputEvent {
    pub fn key_down(key: impl Into<String>) -> Self {
        Self::KeyDown { key: key.into() }
    }

    pub fn key_up(key: impl Into<String>) -> Self {
        Self::KeyUp { key: key.into() }
    }

    pub fn touch_start(id: u32, x: f32, y: f32) -> Self {
        Self::TouchStart {
            id,
            position: Vector2::new(x, y),
        }
    }

    pub fn touch_move(id: u32, x: f32, y: f32) -> Self {
        Self::TouchMove {
            id,
            position: Vector2::new(x, y),
        }
    }

    pub fn touch_end(id: u32) -> Self {
        Self::TouchEnd { id }
    }

    /// Event type name as reported by the input layer
    pub fn kind(&self) -> &'static str {
        match self {
            Self::KeyDown { .. } => "keydown",
            Self::KeyUp { .. } => "keyup",
            Self::TouchStart { .. } => "touchstart",
            Self::TouchMove { .. } => "touchmove",
            Self::TouchEnd { .. } => "touchend",
        }
    }
}

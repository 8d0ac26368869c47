// Player controller - held keys and the touch stick turned into movement

use std::collections::HashSet;

use crate::core::math::normalize_or_zero;
use crate::core::Vector2;
use crate::engine::input::{Action, InputConfig};
use crate::game::characters::character::Kinematics;
use crate::game::characters::state::clips;

use super::{Behavior, TickContext};

/// Virtual joystick anchored where a touch started
#[derive(Debug, Clone, Copy, PartialEq)]
struct TouchStick {
    id: u32,
    anchor: Vector2,
    /// Normalised drag direction, zero inside the dead zone
    direction: Vector2,
    /// The touch left the dead zone at some point
    dragged: bool,
}

/// Represents the input state for a single player
#[derive(Debug, Clone)]
pub struct PlayerController {
    /// Key name to action table
    input: InputConfig,
    /// Movement actions currently held
    pressed: HashSet<Action>,
    stick: Option<TouchStick>,
    /// Drag distance treated as a tap
    dead_zone: f32,
}

impl PlayerController {
    pub fn new(input: InputConfig, dead_zone: f32) -> Self {
        Self {
            input,
            pressed: HashSet::new(),
            stick: None,
            dead_zone,
        }
    }

    pub fn input(&self) -> &InputConfig {
        &self.input
    }

    /// Remap keys at runtime
    pub fn input_mut(&mut self) -> &mut InputConfig {
        &mut self.input
    }

    /// Register a key press. Returns the bound action, if any.
    pub fn press(&mut self, key: &str) -> Option<Action> {
        let action = self.input.action_for(key)?;
        if action.is_movement() {
            self.pressed.insert(action);
        }
        Some(action)
    }

    /// Register a key release
    pub fn release(&mut self, key: &str) {
        if let Some(action) = self.input.action_for(key) {
            self.pressed.remove(&action);
        }
    }

    /// Check if an action is currently held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    pub fn touch_start(&mut self, id: u32, position: Vector2) {
        if self.stick.is_some() {
            return;
        }
        self.stick = Some(TouchStick {
            id,
            anchor: position,
            direction: Vector2::ZERO,
            dragged: false,
        });
    }

    pub fn touch_move(&mut self, id: u32, position: Vector2) {
        let dead_zone = self.dead_zone;
        let Some(stick) = self.stick.as_mut().filter(|stick| stick.id == id) else {
            return;
        };
        let drag = position - stick.anchor;
        if drag.length() < dead_zone {
            stick.direction = Vector2::ZERO;
        } else {
            stick.direction = normalize_or_zero(drag);
            stick.dragged = true;
        }
    }

    /// Release the stick. Returns true if the touch was a tap.
    pub fn touch_end(&mut self, id: u32) -> bool {
        match self.stick {
            Some(stick) if stick.id == id => {
                self.stick = None;
                !stick.dragged
            }
            _ => false,
        }
    }

    /// Get directional input as a vector, x right and y down the band
    pub fn direction(&self) -> Vector2 {
        if let Some(stick) = &self.stick {
            if stick.direction != Vector2::ZERO {
                return stick.direction;
            }
        }

        let mut direction = Vector2::ZERO;
        if self.is_pressed(Action::MoveLeft) {
            direction.x -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            direction.x += 1.0;
        }
        if self.is_pressed(Action::MoveUp) {
            direction.y -= 1.0;
        }
        if self.is_pressed(Action::MoveDown) {
            direction.y += 1.0;
        }
        direction
    }

    /// Release everything
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.stick = None;
    }
}

impl Behavior for PlayerController {
    fn update_state(
        &mut self,
        motion: &mut Kinematics,
        _ctx: &mut TickContext<'_>,
    ) -> Option<&'static str> {
        motion.intent = self.direction();
        if motion.intent == Vector2::ZERO {
            Some(clips::IDLE)
        } else {
            Some(clips::WALK)
        }
    }
}

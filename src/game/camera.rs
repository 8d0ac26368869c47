// Camera that tracks a group of actors

use glam::Vec2;

use crate::game::characters::{ActorId, WorldView};
use crate::game::config::SimConfig;

/// 2D camera for the stage.
///
/// `position` is the translation applied to the world when drawing: the mean of
/// the followed actors' negated positions, plus half the viewport when centered.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World translation in screen units
    pub position: Vec2,
    /// Keep the followed group in the middle of the viewport
    pub centered: bool,
    /// Viewport width
    viewport_width: f32,
    /// Viewport height
    viewport_height: f32,
    /// Followed actors, without duplicates
    following: Vec<ActorId>,
}

impl Camera {
    /// Create a new camera
    pub fn new(viewport_width: f32, viewport_height: f32, centered: bool) -> Self {
        Self {
            position: Vec2::ZERO,
            centered,
            viewport_width,
            viewport_height,
            following: Vec::new(),
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(
            config.viewport_width,
            config.viewport_height,
            config.camera_centered,
        )
    }

    /// Start following an actor. Returns false if it was already followed.
    pub fn follow(&mut self, id: ActorId) -> bool {
        if self.following.contains(&id) {
            return false;
        }
        self.following.push(id);
        true
    }

    /// Stop following an actor. Returns false if it wasn't followed.
    pub fn unfollow(&mut self, id: ActorId) -> bool {
        let before = self.following.len();
        self.following.retain(|followed| *followed != id);
        self.following.len() != before
    }

    pub fn is_following(&self, id: ActorId) -> bool {
        self.following.contains(&id)
    }

    pub fn following(&self) -> &[ActorId] {
        &self.following
    }

    /// Recompute the position from the followed actors that still resolve.
    /// With nothing to follow the camera stays where it is.
    pub fn update(&mut self, world: WorldView<'_>) {
        let mut sum = Vec2::ZERO;
        let mut count = 0usize;
        for id in &self.following {
            if let Some(position) = world.position_of(*id) {
                sum -= position;
                count += 1;
            }
        }

        if count == 0 {
            return;
        }

        let mut position = sum / count as f32;
        if self.centered {
            position += self.half_viewport();
        }
        self.position = position;
    }

    fn half_viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height) / 2.0
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    pub fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    /// Convert screen coordinates to world coordinates
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        screen_pos - self.position
    }

    /// Convert world coordinates to screen coordinates
    pub fn world_to_screen(&self, world_pos: Vec2) -> Vec2 {
        world_pos + self.position
    }

    /// Get the viewport bounds in world coordinates
    pub fn viewport_bounds(&self) -> Viewport {
        let min = -self.position;
        Viewport {
            min,
            max: min + self.viewport_size(),
        }
    }
}

/// Viewport bounds in world coordinates
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub min: Vec2,
    pub max: Vec2,
}

impl Viewport {
    /// Check if a point is inside the viewport
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

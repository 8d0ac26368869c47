// Simulation tunables

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Every tunable of the simulation in one place. Missing JSON fields fall back
/// to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // Ground constraint
    /// Lowest playable y coordinate
    pub ground_min_y: f32,
    /// Highest playable y coordinate
    pub ground_max_y: f32,

    // Combat
    /// Clip phase (in frames) an attack must pass before it can connect
    pub attack_startup_phase: f32,
    /// Forward offset of the attack probe, scaled by facing
    pub attack_probe: f32,
    /// Damage used when the attacker's clip has no strength entry
    pub default_strength: i32,
    /// Height of the jump arc reported to the renderer
    pub jump_height: f32,

    // AI
    /// Distance within which a new target is acquired
    pub acquisition_radius: f32,
    /// Distance within which the current target is kept
    pub sticky_radius: f32,
    /// Distance at which the AI stops and attacks
    pub melee_radius: f32,
    /// Largest depth gap at which the AI swings; beyond it the AI steps along y first
    pub melee_depth_tolerance: f32,
    /// Cooldown range between AI attacks, in ticks
    pub attack_cooldown_min: u32,
    pub attack_cooldown_max: u32,
    /// Distance a pet keeps from its owner
    pub pet_follow_distance: f32,

    // Touch controls
    /// Drag distance below which the virtual stick reads as neutral
    pub touch_dead_zone: f32,

    // Camera
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Offset the camera by half the viewport so followed actors sit mid-screen
    pub camera_centered: bool,

    // Waves
    /// Horizontal distance ahead of the lead player where waves appear
    pub wave_spawn_offset: f32,
    /// Horizontal spacing between members of a wave
    pub wave_spacing: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ground_min_y: 0.0,
            ground_max_y: 70.0,

            attack_startup_phase: 2.0,
            attack_probe: 4.0,
            default_strength: 10,
            jump_height: 16.0,

            acquisition_radius: 60.0,
            sticky_radius: 80.0,
            melee_radius: 12.0,
            melee_depth_tolerance: 2.0,
            attack_cooldown_min: 20,
            attack_cooldown_max: 45,
            pet_follow_distance: 20.0,

            touch_dead_zone: 4.0,

            viewport_width: 320.0,
            viewport_height: 180.0,
            camera_centered: true,

            wave_spawn_offset: 80.0,
            wave_spacing: 15.0,
        }
    }
}

impl SimConfig {
    /// Load a configuration from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: SimConfig = serde_json::from_str(json)?;
        config.normalize();
        Ok(config)
    }

    /// Clamp a ground band `y` into the playable range
    pub fn clamp_to_ground(&self, y: f32) -> f32 {
        crate::core::math::clamp(y, self.ground_min_y, self.ground_max_y)
    }

    /// Cooldown range with min <= max
    pub fn cooldown_range(&self) -> std::ops::RangeInclusive<u32> {
        let min = self.attack_cooldown_min.min(self.attack_cooldown_max);
        let max = self.attack_cooldown_min.max(self.attack_cooldown_max);
        min..=max
    }

    fn normalize(&mut self) {
        if self.ground_min_y > self.ground_max_y {
            log::warn!(
                "Ground band [{}, {}] is inverted, swapping",
                self.ground_min_y,
                self.ground_max_y
            );
            std::mem::swap(&mut self.ground_min_y, &mut self.ground_max_y);
        }
        if self.sticky_radius < self.acquisition_radius {
            self.sticky_radius = self.acquisition_radius;
        }
    }
}

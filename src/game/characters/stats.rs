// Combat stats - health plus per-clip speed and strength tables

use std::collections::HashMap;

/// Mutable combat state of one actor, seeded from its archetype
#[derive(Debug, Clone, PartialEq)]
pub struct CombatStats {
    /// Current health
    pub health: i32,
    /// Health at spawn
    pub health_max: i32,
    /// Movement speed per clip (units/second)
    pub speed_by_animation: HashMap<String, f32>,
    /// Damage dealt per attack clip
    pub strength_by_animation: HashMap<String, i32>,
}

impl CombatStats {
    pub fn new(
        health: i32,
        speed_by_animation: HashMap<String, f32>,
        strength_by_animation: HashMap<String, i32>,
    ) -> Self {
        Self {
            health,
            health_max: health,
            speed_by_animation,
            strength_by_animation,
        }
    }

    /// Speed for a clip; clips without an entry don't move
    pub fn speed_for(&self, clip: &str) -> f32 {
        self.speed_by_animation.get(clip).copied().unwrap_or(0.0)
    }

    /// Strength for a clip, if the table has one
    pub fn strength_for(&self, clip: &str) -> Option<i32> {
        self.strength_by_animation.get(clip).copied()
    }

    /// Subtract damage, keeping health within [0, health_max]
    pub fn apply_damage(&mut self, damage: i32) {
        self.health = self.health.saturating_sub(damage);
        if self.health < 0 {
            self.health = 0;
        } else if self.health > self.health_max {
            self.health = self.health_max;
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.health <= 0
    }

    /// Fraction of health left, in [0, 1]
    pub fn health_fraction(&self) -> f32 {
        if self.health_max <= 0 {
            return 0.0;
        }
        (self.health as f32 / self.health_max as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> CombatStats {
        CombatStats::new(
            50,
            HashMap::from([("walk".to_string(), 22.0)]),
            HashMap::from([("punch".to_string(), 5)]),
        )
    }

    #[test]
    fn test_speed_lookup_defaults_to_zero() {
        let stats = stats();
        assert_eq!(stats.speed_for("walk"), 22.0);
        assert_eq!(stats.speed_for("moonwalk"), 0.0);
    }

    #[test]
    fn test_strength_lookup() {
        let stats = stats();
        assert_eq!(stats.strength_for("punch"), Some(5));
        assert_eq!(stats.strength_for("kick"), None);
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut stats = stats();
        stats.apply_damage(80);
        assert_eq!(stats.health, 0);
        assert!(stats.is_depleted());
    }

    #[test]
    fn test_negative_damage_caps_at_max() {
        let mut stats = stats();
        stats.apply_damage(10);
        stats.apply_damage(-100);
        assert_eq!(stats.health, 50);
        assert_eq!(stats.health_fraction(), 1.0);
    }
}

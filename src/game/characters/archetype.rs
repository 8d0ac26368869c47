// Actor archetypes - the per-type data table loaded once at registration

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::animation::{AnimationClip, ClipTable};
use super::state::clips;
use super::stats::CombatStats;
use crate::core::Rect;
use crate::game::error::ConfigError;

/// Static data shared by every actor of one type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    /// Name actors and stage tables refer to
    pub name: String,
    /// Animation clips by name
    pub clips: Arc<ClipTable>,
    /// Movement speed per clip
    #[serde(default)]
    pub speed: HashMap<String, f32>,
    /// Damage per attack clip
    #[serde(default)]
    pub strength: HashMap<String, i32>,
    /// Vulnerable body, relative to the actor's feet, facing right
    pub bounding_box: Rect,
    /// Attack probe, relative to the actor's feet, facing right
    pub hit_box: Rect,
    /// Health at spawn
    pub health: i32,
}

impl Archetype {
    /// Check the archetype can be instantiated
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.clips.validate(&self.name)?;
        if self.health <= 0 {
            return Err(ConfigError::NonPositiveHealth {
                archetype: self.name.clone(),
                health: self.health,
            });
        }
        for clip in self.speed.keys().chain(self.strength.keys()) {
            if !self.clips.contains(clip) {
                log::debug!(
                    "Archetype '{}' has a stat entry for clip '{}' it never plays",
                    self.name,
                    clip
                );
            }
        }
        Ok(())
    }

    /// Fresh combat stats for a new actor
    pub fn combat_stats(&self) -> CombatStats {
        CombatStats::new(self.health, self.speed.clone(), self.strength.clone())
    }

    /// Attack clips this archetype can play
    pub fn attack_clips(&self) -> impl Iterator<Item = &'static str> + '_ {
        clips::ATTACKS
            .into_iter()
            .filter(|clip| self.clips.contains(clip))
    }

    /// Player character of the first stage
    pub fn fatguy() -> Self {
        Self {
            name: "fatguy".to_string(),
            clips: Arc::new(
                ClipTable::new()
                    .with(clips::IDLE, AnimationClip::looping(1.0, &[0]))
                    .with(clips::WALK, AnimationClip::looping(0.42, &[0, 1, 0, 2]))
                    .with(clips::JUMP, AnimationClip::then(0.5, &[2], clips::IDLE))
                    .with(clips::HIT, AnimationClip::then(0.4, &[3, 4], clips::IDLE))
                    .with(clips::PUNCH, AnimationClip::then(0.35, &[5, 6, 7, 6], clips::IDLE))
                    .with(clips::KICK, AnimationClip::then(0.5, &[8, 9, 10, 9], clips::IDLE)),
            ),
            speed: table(&[
                (clips::WALK, 37.5),
                (clips::JUMP, 45.0),
                (clips::HIT, -50.0),
                (clips::PUNCH, 15.0),
                (clips::KICK, 10.0),
            ]),
            strength: table(&[(clips::PUNCH, 10), (clips::KICK, 15)]),
            bounding_box: Rect::new(-6.0, -3.0, 12.0, 6.0),
            hit_box: Rect::new(2.0, -3.0, 10.0, 6.0),
            health: 100,
        }
    }

    /// Street thug enemy
    pub fn skinhead() -> Self {
        Self {
            name: "skinhead".to_string(),
            clips: Arc::new(
                ClipTable::new()
                    .with(clips::IDLE, AnimationClip::looping(0.5, &[3, 4, 5]))
                    .with(clips::WALK, AnimationClip::looping(0.5, &[0, 1, 0, 2]))
                    .with(clips::HIT, AnimationClip::then(0.4, &[9, 10], clips::IDLE))
                    .with(clips::PUNCH, AnimationClip::then(0.5, &[6, 7, 8], clips::IDLE))
                    .with(clips::KICK, AnimationClip::then(0.6, &[6, 11, 12, 11], clips::IDLE)),
            ),
            speed: table(&[
                (clips::WALK, 22.0),
                (clips::HIT, -40.0),
                (clips::PUNCH, 8.0),
                (clips::KICK, 6.0),
            ]),
            strength: table(&[(clips::PUNCH, 5), (clips::KICK, 8)]),
            bounding_box: Rect::new(-6.0, -3.0, 12.0, 6.0),
            hit_box: Rect::new(2.0, -3.0, 9.0, 6.0),
            health: 50,
        }
    }

    /// Companion cat
    pub fn cat() -> Self {
        Self {
            name: "cat".to_string(),
            clips: Arc::new(
                ClipTable::new()
                    .with(clips::IDLE, AnimationClip::looping(0.5, &[3, 4, 5]))
                    .with(clips::WALK, AnimationClip::looping(0.5, &[0, 1, 0, 2]))
                    .with(clips::HIT, AnimationClip::then(0.5, &[0, 1, 2, 3, 4, 5], clips::IDLE))
                    .with(clips::PUNCH, AnimationClip::then(0.45, &[6, 7, 8], clips::IDLE)),
            ),
            speed: table(&[
                (clips::WALK, 35.0),
                (clips::JUMP, 50.0),
                (clips::HIT, -50.0),
                (clips::PUNCH, 20.0),
                (clips::KICK, 10.0),
            ]),
            strength: table(&[(clips::PUNCH, 10), (clips::KICK, 15)]),
            bounding_box: Rect::new(-4.0, -2.0, 8.0, 4.0),
            hit_box: Rect::new(1.0, -2.0, 6.0, 4.0),
            health: 1000,
        }
    }
}

fn table<T: Copy>(entries: &[(&str, T)]) -> HashMap<String, T> {
    entries
        .iter()
        .map(|(clip, value)| (clip.to_string(), *value))
        .collect()
}

/// Registered archetypes by name
#[derive(Debug, Clone, Default)]
pub struct ArchetypeRegistry {
    archetypes: HashMap<String, Arc<Archetype>>,
}

impl ArchetypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in archetypes
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for archetype in [Archetype::fatguy(), Archetype::skinhead(), Archetype::cat()] {
            // Built-in tables are valid by construction; a failure here is a bug in them
            if let Err(err) = registry.register(archetype) {
                log::error!("Built-in archetype rejected: {}", err);
            }
        }
        registry
    }

    /// Load archetypes from a JSON array
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.load_json(json)?;
        Ok(registry)
    }

    /// Register every archetype of a JSON array. Nothing is registered if any entry fails.
    pub fn load_json(&mut self, json: &str) -> Result<usize, ConfigError> {
        let archetypes: Vec<Archetype> = serde_json::from_str(json)?;
        for archetype in &archetypes {
            archetype.validate()?;
        }
        let count = archetypes.len();
        for archetype in archetypes {
            self.insert(archetype);
        }
        Ok(count)
    }

    /// Validate and register an archetype, replacing any previous one of the same name
    pub fn register(&mut self, archetype: Archetype) -> Result<Arc<Archetype>, ConfigError> {
        archetype.validate()?;
        Ok(self.insert(archetype))
    }

    fn insert(&mut self, archetype: Archetype) -> Arc<Archetype> {
        let archetype = Arc::new(archetype);
        if self
            .archetypes
            .insert(archetype.name.clone(), Arc::clone(&archetype))
            .is_some()
        {
            log::info!("Archetype '{}' replaced", archetype.name);
        } else {
            log::debug!("Archetype '{}' registered", archetype.name);
        }
        archetype
    }

    /// Look up an archetype by name
    pub fn get(&self, name: &str) -> Result<Arc<Archetype>, ConfigError> {
        self.archetypes
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownArchetype(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.archetypes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_archetypes_are_valid() {
        let registry = ArchetypeRegistry::builtin();
        assert_eq!(registry.len(), 3);
        for name in ["fatguy", "skinhead", "cat"] {
            assert!(registry.get(name).is_ok(), "missing {name}");
        }
    }

    #[test]
    fn test_unknown_archetype() {
        let registry = ArchetypeRegistry::builtin();
        assert!(matches!(
            registry.get("ghost"),
            Err(ConfigError::UnknownArchetype(name)) if name == "ghost"
        ));
    }

    #[test]
    fn test_register_rejects_zero_duration() {
        let mut archetype = Archetype::skinhead();
        archetype.clips = Arc::new(
            ClipTable::new()
                .with("idle", AnimationClip::looping(0.5, &[0]))
                .with("walk", AnimationClip::looping(-1.0, &[0, 1])),
        );
        let mut registry = ArchetypeRegistry::new();
        assert!(registry.register(archetype).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_rejects_zero_health() {
        let mut archetype = Archetype::cat();
        archetype.health = 0;
        assert!(matches!(
            archetype.validate(),
            Err(ConfigError::NonPositiveHealth { .. })
        ));
    }

    #[test]
    fn test_attack_clips_filtered_by_table() {
        let cat = Archetype::cat();
        assert_eq!(cat.attack_clips().collect::<Vec<_>>(), vec!["punch"]);
        let thug = Archetype::skinhead();
        assert_eq!(thug.attack_clips().count(), 2);
    }

    #[test]
    fn test_load_json() {
        let json = r#"[{
            "name": "rat",
            "clips": {
                "idle": { "time": 0.5, "frames": [0, 1] },
                "walk": { "time": 0.5, "frames": [2, 3] }
            },
            "speed": { "walk": 30 },
            "bounding_box": { "x": -3, "y": -2, "width": 6, "height": 4 },
            "hit_box": { "x": 1, "y": -2, "width": 4, "height": 4 },
            "health": 20
        }]"#;
        let registry = ArchetypeRegistry::from_json(json).unwrap();
        let rat = registry.get("rat").unwrap();
        assert_eq!(rat.health, 20);
        assert_eq!(rat.combat_stats().speed_for("walk"), 30.0);
        assert!(rat.strength.is_empty());
    }

    #[test]
    fn test_load_json_missing_idle_registers_nothing() {
        let json = r#"[
            { "name": "ok", "clips": { "idle": { "time": 1, "frames": [0] } },
              "bounding_box": { "x": 0, "y": 0, "width": 1, "height": 1 },
              "hit_box": { "x": 0, "y": 0, "width": 1, "height": 1 }, "health": 1 },
            { "name": "broken", "clips": { "walk": { "time": 1, "frames": [0] } },
              "bounding_box": { "x": 0, "y": 0, "width": 1, "height": 1 },
              "hit_box": { "x": 0, "y": 0, "width": 1, "height": 1 }, "health": 1 }
        ]"#;
        let mut registry = ArchetypeRegistry::new();
        assert!(matches!(
            registry.load_json(json),
            Err(ConfigError::MissingClip { archetype, .. }) if archetype == "broken"
        ));
        assert!(!registry.contains("ok"));
    }
}

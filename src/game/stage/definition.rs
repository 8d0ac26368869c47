// Stage definitions - spawn tables loaded once per level

use serde::{Deserialize, Serialize};

use crate::core::Vector2;
use crate::game::characters::ArchetypeRegistry;
use crate::game::error::ConfigError;

/// An actor placed when the stage is entered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub archetype: String,
    #[serde(with = "vec2_array")]
    pub position: Vector2,
}

impl SpawnPoint {
    pub fn new(archetype: &str, x: f32, y: f32) -> Self {
        Self {
            archetype: archetype.to_string(),
            position: Vector2::new(x, y),
        }
    }
}

/// A stretch of the stage with its enemy waves
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Each wave is a list of archetype names
    #[serde(default)]
    pub waves: Vec<Vec<String>>,
}

/// Data describing one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDefinition {
    pub name: String,
    #[serde(default)]
    pub players: Vec<SpawnPoint>,
    /// Pets, bound to the first player
    #[serde(default)]
    pub pets: Vec<SpawnPoint>,
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Stage to load once this one is cleared
    #[serde(default)]
    pub next: Option<String>,
}

impl StageDefinition {
    /// Empty stage with no actors
    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            players: Vec::new(),
            pets: Vec::new(),
            sections: Vec::new(),
            next: None,
        }
    }

    /// First stage - Evil Town
    pub fn town() -> Self {
        Self {
            name: "town".to_string(),
            players: vec![SpawnPoint::new("fatguy", 40.0, 0.0)],
            pets: vec![SpawnPoint::new("cat", 15.0, 15.0)],
            sections: vec![Section {
                waves: vec![vec!["skinhead".to_string(); 3]],
            }],
            next: Some("pub".to_string()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Waves in play order across all sections
    pub fn waves(&self) -> impl Iterator<Item = &Vec<String>> {
        self.sections.iter().flat_map(|section| section.waves.iter())
    }

    /// Check every archetype the stage names is registered
    pub fn validate(&self, registry: &ArchetypeRegistry) -> Result<(), ConfigError> {
        let spawned = self
            .players
            .iter()
            .chain(self.pets.iter())
            .map(|spawn| spawn.archetype.as_str());
        let waves = self.waves().flat_map(|wave| wave.iter().map(String::as_str));

        for name in spawned.chain(waves) {
            if !registry.contains(name) {
                return Err(ConfigError::UnknownArchetype(name.to_string()));
            }
        }
        Ok(())
    }
}

/// Positions as `[x, y]` pairs in stage files
mod vec2_array {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::core::Vector2;

    pub fn serialize<S: Serializer>(v: &Vector2, serializer: S) -> Result<S::Ok, S::Error> {
        [v.x, v.y].serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vector2, D::Error> {
        let [x, y] = <[f32; 2]>::deserialize(deserializer)?;
        Ok(Vector2::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_town_is_valid() {
        let town = StageDefinition::town();
        assert!(town.validate(&ArchetypeRegistry::builtin()).is_ok());
        assert_eq!(town.waves().count(), 1);
        assert_eq!(town.next.as_deref(), Some("pub"));
    }

    #[test]
    fn test_unknown_archetype_rejected() {
        let mut stage = StageDefinition::town();
        stage.sections[0].waves.push(vec!["dragon".to_string()]);
        assert!(matches!(
            stage.validate(&ArchetypeRegistry::builtin()),
            Err(ConfigError::UnknownArchetype(name)) if name == "dragon"
        ));
    }

    #[test]
    fn test_from_json() {
        let stage = StageDefinition::from_json(
            r#"{
                "name": "pub",
                "players": [{ "archetype": "fatguy", "position": [10, 20] }],
                "sections": [{ "waves": [["skinhead"], ["skinhead", "skinhead"]] }]
            }"#,
        )
        .unwrap();
        assert_eq!(stage.players[0].position, Vector2::new(10.0, 20.0));
        assert!(stage.pets.is_empty());
        assert_eq!(stage.waves().map(Vec::len).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(stage.next, None);
    }
}

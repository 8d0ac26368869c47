// Input configuration and remapping system

use super::action::Action;
use std::collections::HashMap;

/// Input configuration for a single player
/// Maps key names to game actions
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Player index this config is for
    player_index: usize,

    /// Mapping from key names to actions
    bindings: HashMap<String, Action>,

    /// Reverse mapping for quick lookups (action -> all keys)
    action_to_keys: HashMap<Action, Vec<String>>,
}

impl InputConfig {
    /// Create an empty input configuration
    pub fn new(player_index: usize) -> Self {
        Self {
            player_index,
            bindings: HashMap::new(),
            action_to_keys: HashMap::new(),
        }
    }

    /// Create a configuration with the default bindings for this player
    pub fn with_defaults(player_index: usize) -> Self {
        let mut config = Self::new(player_index);
        config.reset_to_defaults();
        config
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings<K: Into<String>>(
        player_index: usize,
        bindings: impl IntoIterator<Item = (K, Action)>,
    ) -> Self {
        let mut config = Self::new(player_index);
        for (key, action) in bindings {
            config.bind(key, action);
        }
        config
    }

    pub fn player_index(&self) -> usize {
        self.player_index
    }

    /// Bind a key to an action, replacing any previous binding of that key
    pub fn bind(&mut self, key: impl Into<String>, action: Action) {
        let key = key.into();
        self.unbind_key(&key);

        self.action_to_keys
            .entry(action)
            .or_default()
            .push(key.clone());
        self.bindings.insert(key, action);
    }

    /// Unbind a key
    pub fn unbind_key(&mut self, key: &str) {
        if let Some(action) = self.bindings.remove(key) {
            if let Some(keys) = self.action_to_keys.get_mut(&action) {
                keys.retain(|k| k != key);
                if keys.is_empty() {
                    self.action_to_keys.remove(&action);
                }
            }
        }
    }

    /// Unbind all keys for an action
    pub fn unbind_action(&mut self, action: Action) {
        if let Some(keys) = self.action_to_keys.remove(&action) {
            for key in keys {
                self.bindings.remove(&key);
            }
        }
    }

    /// Get the action bound to a key
    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Get all keys bound to an action
    pub fn keys_for(&self, action: Action) -> &[String] {
        self.action_to_keys
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_bound(&self, key: &str) -> bool {
        self.bindings.contains_key(key)
    }

    pub fn has_binding(&self, action: Action) -> bool {
        self.action_to_keys.contains_key(&action)
    }

    /// Clear all bindings
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.action_to_keys.clear();
    }

    /// Reset to default bindings for this player
    pub fn reset_to_defaults(&mut self) {
        self.clear();
        let defaults = match self.player_index {
            0 => super::action::default_p1_bindings(),
            _ => Vec::new(), // Other players get bindings from the host
        };
        for (key, action) in defaults {
            self.bind(key, action);
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::with_defaults(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_action() {
        let mut config = InputConfig::new(0);
        config.bind("left", Action::MoveLeft);
        assert_eq!(config.action_for("left"), Some(Action::MoveLeft));
        assert_eq!(config.player_index(), 0);
    }

    #[test]
    fn test_unbind_key() {
        let mut config = InputConfig::new(0);
        config.bind("left", Action::MoveLeft);
        config.unbind_key("left");
        assert_eq!(config.action_for("left"), None);
        assert!(!config.has_binding(Action::MoveLeft));
    }

    #[test]
    fn test_unbind_action() {
        let mut config = InputConfig::new(0);
        config.bind("a", Action::MoveLeft);
        config.bind("left", Action::MoveLeft);
        config.unbind_action(Action::MoveLeft);

        assert!(!config.is_bound("a"));
        assert!(!config.is_bound("left"));
    }

    #[test]
    fn test_rebind_key() {
        let mut config = InputConfig::new(0);
        config.bind("a", Action::MoveLeft);
        config.bind("a", Action::Kick);

        assert_eq!(config.action_for("a"), Some(Action::Kick));
        assert!(!config.has_binding(Action::MoveLeft));
    }

    #[test]
    fn test_keys_for() {
        let config = InputConfig::with_defaults(0);
        let keys = config.keys_for(Action::MoveRight);
        assert_eq!(keys.len(), 2);
        assert!(keys.iter().any(|k| k == "right"));
        assert!(keys.iter().any(|k| k == "d"));
        assert!(InputConfig::new(0).keys_for(Action::Jump).is_empty());
    }

    #[test]
    fn test_reset_to_defaults() {
        let mut config = InputConfig::new(0);
        config.bind("q", Action::MoveLeft);
        config.reset_to_defaults();

        assert!(!config.is_bound("q"));
        assert_eq!(config.action_for("c"), Some(Action::Jump));
        assert!(InputConfig::with_defaults(1).action_for("c").is_none());
    }

    #[test]
    fn test_from_bindings() {
        let config = InputConfig::from_bindings(1, [("j", Action::MoveLeft), ("l", Action::MoveRight)]);
        assert!(config.has_binding(Action::MoveLeft));
        assert!(config.has_binding(Action::MoveRight));
        assert_eq!(config.player_index(), 1);
    }
}

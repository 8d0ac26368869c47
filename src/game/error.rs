// Configuration errors for archetypes and stage definitions

/// Errors raised while registering archetypes or loading stage tables.
/// All of them reject the offending definition; none occur during a tick.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Clip '{clip}' of archetype '{archetype}' has non-positive duration {duration}")]
    NonPositiveDuration {
        archetype: String,
        clip: String,
        duration: f32,
    },

    #[error("Clip '{clip}' of archetype '{archetype}' has no frames")]
    EmptyFrames { archetype: String, clip: String },

    #[error("Archetype '{archetype}' is missing required clip '{clip}'")]
    MissingClip { archetype: String, clip: String },

    #[error("Clip '{clip}' of archetype '{archetype}' continues into unknown clip '{next}'")]
    UnknownNextClip {
        archetype: String,
        clip: String,
        next: String,
    },

    #[error("Archetype '{archetype}' has non-positive health {health}")]
    NonPositiveHealth { archetype: String, health: i32 },

    #[error("Unknown archetype: {0}")]
    UnknownArchetype(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingClip {
            archetype: "cat".to_string(),
            clip: "idle".to_string(),
        };
        assert_eq!(err.to_string(), "Archetype 'cat' is missing required clip 'idle'");

        let err = ConfigError::UnknownArchetype("ghost".to_string());
        assert_eq!(err.to_string(), "Unknown archetype: ghost");
    }
}

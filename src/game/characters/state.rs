// Character state derived from the playing clip

/// Standard clip names
pub mod clips {
    pub const IDLE: &str = "idle";
    pub const WALK: &str = "walk";
    pub const JUMP: &str = "jump";
    pub const HIT: &str = "hit";
    pub const PUNCH: &str = "punch";
    pub const KICK: &str = "kick";

    /// Clips the AI may pick an attack from
    pub const ATTACKS: [&str; 2] = [PUNCH, KICK];
}

/// Represents the current state of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterState {
    /// Standing still
    #[default]
    Idle,
    /// Moving on the ground band
    Walking,
    /// Mid-jump, keeps its momentum
    Jumping,
    /// Taking damage/hit stun
    HitStun,
    /// Punch in progress
    Punching,
    /// Kick in progress
    Kicking,
    /// Any clip outside the standard set
    Other,
}

impl CharacterState {
    /// State for a clip name
    pub fn from_clip(clip: &str) -> Self {
        match clip {
            clips::IDLE => Self::Idle,
            clips::WALK => Self::Walking,
            clips::JUMP => Self::Jumping,
            clips::HIT => Self::HitStun,
            clips::PUNCH => Self::Punching,
            clips::KICK => Self::Kicking,
            _ => Self::Other,
        }
    }

    /// Unlocked states accept movement intent every tick
    pub fn is_walking(&self) -> bool {
        matches!(self, Self::Idle | Self::Walking)
    }

    pub fn is_jumping(&self) -> bool {
        matches!(self, Self::Jumping)
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Self::HitStun)
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self, Self::Punching | Self::Kicking)
    }

    /// Locked states play out before control returns
    pub fn is_locked(&self) -> bool {
        matches!(
            self,
            Self::Jumping | Self::HitStun | Self::Punching | Self::Kicking
        )
    }

    /// Locked states that slide along the facing axis
    pub fn moves_along_facing(&self) -> bool {
        self.is_attacking() || self.is_hit()
    }

    /// Get the clip name for this state
    pub fn animation_name(&self) -> Option<&'static str> {
        match self {
            Self::Idle => Some(clips::IDLE),
            Self::Walking => Some(clips::WALK),
            Self::Jumping => Some(clips::JUMP),
            Self::HitStun => Some(clips::HIT),
            Self::Punching => Some(clips::PUNCH),
            Self::Kicking => Some(clips::KICK),
            Self::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_clip() {
        assert_eq!(CharacterState::from_clip("idle"), CharacterState::Idle);
        assert_eq!(CharacterState::from_clip("kick"), CharacterState::Kicking);
        assert_eq!(CharacterState::from_clip("dance"), CharacterState::Other);
    }

    #[test]
    fn test_walking_states() {
        assert!(CharacterState::Idle.is_walking());
        assert!(CharacterState::Walking.is_walking());
        assert!(!CharacterState::Jumping.is_walking());
        assert!(!CharacterState::Other.is_walking());
    }

    #[test]
    fn test_locked_states() {
        assert!(CharacterState::Jumping.is_locked());
        assert!(CharacterState::HitStun.is_locked());
        assert!(CharacterState::Punching.is_locked());
        assert!(!CharacterState::Walking.is_locked());
    }

    #[test]
    fn test_facing_motion() {
        assert!(CharacterState::Kicking.moves_along_facing());
        assert!(CharacterState::HitStun.moves_along_facing());
        assert!(!CharacterState::Jumping.moves_along_facing());
    }

    #[test]
    fn test_animation_names_round_trip() {
        for state in [
            CharacterState::Idle,
            CharacterState::Walking,
            CharacterState::Jumping,
            CharacterState::HitStun,
            CharacterState::Punching,
            CharacterState::Kicking,
        ] {
            let name = state.animation_name().unwrap();
            assert_eq!(CharacterState::from_clip(name), state);
        }
        assert_eq!(CharacterState::Other.animation_name(), None);
    }
}

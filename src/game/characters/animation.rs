// Character animation system
//
// Clips are data: a duration, a frame sequence and an optional follow-up clip.
// The player keeps a fractional clock phase measured in frames and reports
// start/end transitions as `ClipEvent`s for the owning actor to emit.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::game::error::ConfigError;

/// Clip every archetype must define
pub const REQUIRED_CLIP: &str = "idle";

/// A single animation clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    /// Duration of one pass through all frames, in seconds
    #[serde(alias = "time")]
    pub duration: f32,
    /// Sprite frame indices, in playback order
    pub frames: Vec<usize>,
    /// Clip to continue with once this one ends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl AnimationClip {
    /// Create a looping clip
    pub fn looping(duration: f32, frames: &[usize]) -> Self {
        Self {
            duration,
            frames: frames.to_vec(),
            next: None,
        }
    }

    /// Create a clip that hands over to `next` when it ends
    pub fn then(duration: f32, frames: &[usize], next: &str) -> Self {
        Self {
            duration,
            frames: frames.to_vec(),
            next: Some(next.to_string()),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Named clips of one archetype
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipTable {
    clips: BTreeMap<String, AnimationClip>,
}

impl ClipTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used for tables written in code
    pub fn with(mut self, name: &str, clip: AnimationClip) -> Self {
        self.clips.insert(name.to_string(), clip);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, clip: AnimationClip) {
        self.clips.insert(name.into(), clip);
    }

    pub fn get(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clips.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Check the table is playable: `idle` exists, every clip has frames and a
    /// positive duration, and every follow-up names a known clip
    pub fn validate(&self, archetype: &str) -> Result<(), ConfigError> {
        if !self.contains(REQUIRED_CLIP) {
            return Err(ConfigError::MissingClip {
                archetype: archetype.to_string(),
                clip: REQUIRED_CLIP.to_string(),
            });
        }

        for (name, clip) in &self.clips {
            if !(clip.duration > 0.0) || !clip.duration.is_finite() {
                return Err(ConfigError::NonPositiveDuration {
                    archetype: archetype.to_string(),
                    clip: name.clone(),
                    duration: clip.duration,
                });
            }
            if clip.frames.is_empty() {
                return Err(ConfigError::EmptyFrames {
                    archetype: archetype.to_string(),
                    clip: name.clone(),
                });
            }
            if let Some(next) = &clip.next {
                if !self.contains(next) {
                    return Err(ConfigError::UnknownNextClip {
                        archetype: archetype.to_string(),
                        clip: name.clone(),
                        next: next.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Clip transition reported by the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipEvent {
    Started(String),
    Ended(String),
}

/// Animation clock of one actor
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    /// Clips shared with every actor of the archetype
    clips: Arc<ClipTable>,
    /// Currently playing clip name
    current_clip: String,
    /// Position in the clip, in frames, within [0, frame_count)
    phase: f32,
    /// Sprite frame for the current phase
    frame_index: usize,
    /// Transitions not yet emitted by the owner
    pending: Vec<ClipEvent>,
}

impl AnimationPlayer {
    /// Create a player positioned on the start of `idle`
    pub fn new(clips: Arc<ClipTable>) -> Self {
        let frame_index = clips
            .get(REQUIRED_CLIP)
            .and_then(|clip| clip.frames.first().copied())
            .unwrap_or(0);

        Self {
            clips,
            current_clip: REQUIRED_CLIP.to_string(),
            phase: 0.0,
            frame_index,
            pending: Vec::new(),
        }
    }

    /// Play a clip. Replaying the current clip is a no-op unless `restart` is set.
    /// Returns true if the clip (re)started.
    pub fn play(&mut self, name: &str, restart: bool) -> bool {
        if self.current_clip == name && !restart {
            return false;
        }

        if !self.clips.contains(name) {
            log::debug!("Playing clip '{}' that has no animation data", name);
        }

        self.current_clip = name.to_string();
        self.phase = 0.0;
        self.refresh_frame_index();
        self.pending.push(ClipEvent::Started(self.current_clip.clone()));
        true
    }

    /// Advance the clock by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("Ignoring invalid animation delta {}", dt);
            return;
        }

        let clips = Arc::clone(&self.clips);
        let Some(clip) = clips.get(&self.current_clip) else {
            return;
        };

        let frame_count = clip.frames.len() as f32;
        if frame_count == 0.0 {
            return;
        }

        self.phase += dt * frame_count / clip.duration;

        if self.phase >= frame_count {
            // Wrap instead of clamping so a large delta can skip whole loops
            self.phase = self.phase.rem_euclid(frame_count);
            if self.phase >= frame_count {
                self.phase = 0.0;
            }
            self.pending.push(ClipEvent::Ended(self.current_clip.clone()));

            if let Some(next) = &clip.next {
                self.play(next, false);
            }
        }

        if self.phase < 0.0 {
            log::warn!("Negative clip phase {} clamped to 0", self.phase);
            self.phase = 0.0;
        }

        self.refresh_frame_index();
    }

    fn refresh_frame_index(&mut self) {
        if let Some(clip) = self.clips.get(&self.current_clip) {
            let last = clip.frames.len().saturating_sub(1);
            let index = (self.phase.floor() as usize).min(last);
            self.frame_index = clip.frames.get(index).copied().unwrap_or(0);
        }
    }

    /// Take the transitions recorded since the last call
    pub fn take_events(&mut self) -> Vec<ClipEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Get the current clip name
    pub fn current_clip(&self) -> &str {
        &self.current_clip
    }

    /// Get the clock phase, in frames
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Get the sprite frame index for rendering
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Fraction of the current clip already played, in [0, 1)
    pub fn progress(&self) -> f32 {
        match self.clips.get(&self.current_clip) {
            Some(clip) if !clip.frames.is_empty() => self.phase / clip.frames.len() as f32,
            _ => 0.0,
        }
    }

    /// Get the clip data for the current animation
    pub fn clip(&self) -> Option<&AnimationClip> {
        self.clips.get(&self.current_clip)
    }

    pub fn clips(&self) -> &ClipTable {
        &self.clips
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn table() -> Arc<ClipTable> {
        Arc::new(
            ClipTable::new()
                .with("idle", AnimationClip::looping(1.0, &[0]))
                .with("walk", AnimationClip::looping(0.5, &[0, 1, 0, 2]))
                .with("jump", AnimationClip::then(0.5, &[2], "idle"))
                .with("punch", AnimationClip::then(0.4, &[3, 4, 5, 6], "idle")),
        )
    }

    #[test]
    fn test_new_player_starts_idle() {
        let player = AnimationPlayer::new(table());
        assert_eq!(player.current_clip(), "idle");
        assert_eq!(player.phase(), 0.0);
    }

    #[test]
    fn test_play_same_clip_is_noop() {
        let mut player = AnimationPlayer::new(table());
        assert!(player.play("walk", false));
        player.advance(0.125);
        assert!(!player.play("walk", false));
        assert_relative_eq!(player.phase(), 1.0);
    }

    #[test]
    fn test_play_restart_resets_phase() {
        let mut player = AnimationPlayer::new(table());
        player.play("walk", false);
        player.advance(0.2);
        assert!(player.play("walk", true));
        assert_eq!(player.phase(), 0.0);
    }

    #[test]
    fn test_play_emits_started() {
        let mut player = AnimationPlayer::new(table());
        player.play("walk", false);
        assert_eq!(player.take_events(), vec![ClipEvent::Started("walk".into())]);
        assert!(player.take_events().is_empty());
    }

    #[test]
    fn test_advance_frame_index() {
        let mut player = AnimationPlayer::new(table());
        player.play("walk", false);
        // 4 frames over 0.5s: 8 frames per second
        player.advance(0.3);
        assert_relative_eq!(player.phase(), 2.4, epsilon = 1e-5);
        assert_eq!(player.frame_index(), 0);
        player.advance(0.1);
        assert_eq!(player.frame_index(), 2);
    }

    #[test]
    fn test_advance_wraps_and_reports_end() {
        let mut player = AnimationPlayer::new(table());
        player.play("walk", false);
        player.take_events();

        player.advance(0.625); // 5 frames
        assert_relative_eq!(player.phase(), 1.0, epsilon = 1e-5);
        assert_eq!(player.current_clip(), "walk");
        assert_eq!(player.take_events(), vec![ClipEvent::Ended("walk".into())]);
    }

    #[test]
    fn test_large_delta_skips_loops() {
        let mut player = AnimationPlayer::new(table());
        player.play("walk", false);
        player.advance(1.3125); // 10.5 frames
        assert!(player.phase() >= 0.0 && player.phase() < 4.0);
        assert_relative_eq!(player.phase(), 2.5, epsilon = 1e-4);
    }

    #[test]
    fn test_periodicity() {
        let mut player = AnimationPlayer::new(table());
        player.play("walk", false);
        player.advance(0.125);
        let before = player.phase();
        for _ in 0..8 {
            player.advance(0.125);
        }
        assert_relative_eq!(player.phase(), before, epsilon = 1e-5);
    }

    #[test]
    fn test_next_clip_follows() {
        let mut player = AnimationPlayer::new(table());
        player.play("jump", false);
        player.take_events();

        player.advance(0.6);
        assert_eq!(player.current_clip(), "idle");
        assert_eq!(player.phase(), 0.0);
        assert_eq!(
            player.take_events(),
            vec![
                ClipEvent::Ended("jump".into()),
                ClipEvent::Started("idle".into())
            ]
        );
    }

    #[test]
    fn test_unknown_clip_does_not_advance() {
        let mut player = AnimationPlayer::new(table());
        player.play("dance", false);
        player.advance(1.0);
        assert_eq!(player.phase(), 0.0);
        assert_eq!(player.progress(), 0.0);
    }

    #[test]
    fn test_negative_delta_ignored() {
        let mut player = AnimationPlayer::new(table());
        player.play("walk", false);
        player.advance(-1.0);
        player.advance(f32::NAN);
        assert_eq!(player.phase(), 0.0);
    }

    #[test]
    fn test_progress() {
        let mut player = AnimationPlayer::new(table());
        player.play("punch", false);
        player.advance(0.2);
        assert_relative_eq!(player.progress(), 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        let clips = ClipTable::new()
            .with("idle", AnimationClip::looping(1.0, &[0]))
            .with("walk", AnimationClip::looping(0.0, &[0, 1]));
        assert!(matches!(
            clips.validate("fatguy"),
            Err(ConfigError::NonPositiveDuration { clip, .. }) if clip == "walk"
        ));
    }

    #[test]
    fn test_validate_requires_idle() {
        let clips = ClipTable::new().with("walk", AnimationClip::looping(0.5, &[0]));
        assert!(matches!(
            clips.validate("fatguy"),
            Err(ConfigError::MissingClip { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_next() {
        let clips = ClipTable::new()
            .with("idle", AnimationClip::looping(1.0, &[0]))
            .with("hit", AnimationClip::then(0.5, &[1], "stand"));
        assert!(matches!(
            clips.validate("fatguy"),
            Err(ConfigError::UnknownNextClip { next, .. }) if next == "stand"
        ));
    }

    #[test]
    fn test_validate_rejects_empty_frames() {
        let clips = ClipTable::new().with("idle", AnimationClip::looping(1.0, &[]));
        assert!(matches!(
            clips.validate("fatguy"),
            Err(ConfigError::EmptyFrames { .. })
        ));
    }

    #[test]
    fn test_clip_table_from_json() {
        let clips: ClipTable = serde_json::from_str(
            r#"{ "idle": { "time": 1, "frames": [0] },
                 "jump": { "duration": 0.5, "frames": [2], "next": "idle" } }"#,
        )
        .unwrap();
        assert_eq!(clips.len(), 2);
        assert_eq!(clips.get("jump").and_then(|c| c.next.as_deref()), Some("idle"));
        assert!(clips.validate("fatguy").is_ok());
    }
}

// Character entity - the animated combat actor shared by players, enemies and pets

use std::sync::Arc;

use crate::core::math::normalize_or_zero;
use crate::core::{Facing, Rect, Vector2};
use crate::engine::signals::{BindingId, Emitter};
use crate::game::config::SimConfig;

use super::animation::{AnimationPlayer, ClipEvent};
use super::archetype::Archetype;
use super::arena::{ActorId, WorldView};
use super::controller::{Behavior, Controller, Role, TickContext};
use super::events::{ActorEvents, ActorSignals, Signal, Strike, Value};
use super::state::{clips, CharacterState};
use super::stats::CombatStats;

/// Position and movement of an actor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kinematics {
    /// Feet position; `y` runs along the ground band (depth)
    pub position: Vector2,
    pub facing: Facing,
    /// Direction of travel, scaled by the clip speed when integrated
    pub velocity: Vector2,
    /// Movement requested by input or AI this tick
    pub intent: Vector2,
}

/// A hit found by an attacking actor, delivered by the stage
#[derive(Debug, Clone, PartialEq)]
pub struct HitReport {
    pub target: ActorId,
    pub strike: Strike,
}

/// Snapshot of what a renderer needs for one actor
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub id: ActorId,
    pub archetype: String,
    pub position: Vector2,
    pub facing: Facing,
    pub clip: String,
    pub frame_index: usize,
    /// Height above the ground band, non-zero only mid-jump
    pub elevation: f32,
}

/// Represents a player-controlled or AI-controlled actor in the game
#[derive(Debug)]
pub struct Character {
    /// Unique handle inside the owning arena
    id: ActorId,
    /// Shared per-type data
    archetype: Arc<Archetype>,

    // Movement
    pub motion: Kinematics,

    // Animation and combat
    animation: AnimationPlayer,
    stats: CombatStats,

    // Signals
    signals: ActorSignals,
    events: ActorEvents,

    /// Input or AI driving the actor
    controller: Controller,

    /// Health ran out; terminal
    destroyed: bool,
    /// Scheduled for removal at the end of the tick
    despawn: bool,
}

impl Emitter for Character {
    type Signal = Signal;
    type Value = Value;

    fn signals(&self) -> &ActorSignals {
        &self.signals
    }
}

impl Character {
    /// Create a new actor standing idle at `position`
    pub fn new(
        id: ActorId,
        archetype: Arc<Archetype>,
        position: Vector2,
        controller: Controller,
    ) -> Self {
        let mut character = Self {
            id,
            animation: AnimationPlayer::new(Arc::clone(&archetype.clips)),
            stats: archetype.combat_stats(),
            archetype,
            motion: Kinematics {
                position,
                ..Kinematics::default()
            },
            signals: ActorSignals::new(),
            events: ActorEvents::new(),
            controller,
            destroyed: false,
            despawn: false,
        };
        character.bind_default_handlers();
        character
    }

    fn bind_default_handlers(&mut self) {
        self.signals.bind(Signal::Hit, |actor, args| {
            if let Some(strike) = args.first().and_then(Value::as_strike) {
                actor.on_hit(strike);
            }
        });

        if self.controller.role() != Role::Player {
            return;
        }

        self.signals.bind(Signal::KeyDown, |actor, args| {
            if let Some(key) = args.first().and_then(Value::as_text) {
                actor.on_key_down(key);
            }
        });
        self.signals.bind(Signal::KeyUp, |actor, args| {
            if let Some(key) = args.first().and_then(Value::as_text) {
                actor.on_key_up(key);
            }
        });
        self.signals.bind(Signal::TouchStart, |actor, args| {
            if let (Some(id), Some(point)) = touch_args(args) {
                if let Controller::Player(player) = &mut actor.controller {
                    player.touch_start(id, point);
                }
            }
        });
        self.signals.bind(Signal::TouchMove, |actor, args| {
            if let (Some(id), Some(point)) = touch_args(args) {
                if let Controller::Player(player) = &mut actor.controller {
                    player.touch_move(id, point);
                }
            }
        });
        self.signals.bind(Signal::TouchEnd, |actor, args| {
            let Some(id) = args.first().and_then(Value::as_touch) else {
                return;
            };
            let tapped = match &mut actor.controller {
                Controller::Player(player) => player.touch_end(id),
                _ => false,
            };
            if tapped {
                actor.start_move(clips::PUNCH);
            }
        });
    }

    /// Run one tick. Returns the actor struck by this tick's attack query, if any.
    pub fn update(
        &mut self,
        dt: f32,
        world: WorldView<'_>,
        rng: &mut fastrand::Rng,
        config: &SimConfig,
    ) -> Option<HitReport> {
        if self.destroyed {
            return None;
        }

        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("Actor {:?} got invalid delta {}, treating as 0", self.id, dt);
            0.0
        };

        self.drain_events();
        if self.destroyed {
            return None;
        }

        self.animation.advance(dt);
        self.flush_clip_events();

        let state = self.state();

        if state.is_walking() {
            self.update_state(world, rng, config);
        }

        if state.is_walking() {
            self.motion.velocity = normalize_or_zero(self.motion.intent);
        } else if state.moves_along_facing() {
            self.motion.velocity = Vector2::new(self.motion.facing.sign(), 0.0);
        }

        let report = if state.is_attacking() && self.animation.phase() > config.attack_startup_phase
        {
            self.attack_query(self.motion.facing.sign() * config.attack_probe, world)
                .map(|target| HitReport {
                    target,
                    strike: self.strike(config),
                })
        } else {
            None
        };

        self.integrate(dt, config);
        report
    }

    /// Let the controller pick this tick's intent and clip
    fn update_state(&mut self, world: WorldView<'_>, rng: &mut fastrand::Rng, config: &SimConfig) {
        let mut ctx = TickContext {
            world,
            rng,
            config,
            archetype: &self.archetype,
        };
        let request = self.controller.update_state(&mut self.motion, &mut ctx);

        if let Some(facing) = Facing::from_direction(self.motion.intent.x) {
            self.motion.facing = facing;
        }
        if let Some(clip) = request {
            self.play(clip, false);
        }
    }

    fn integrate(&mut self, dt: f32, config: &SimConfig) {
        let speed = self.stats.speed_for(self.animation.current_clip());
        let position = self.motion.position + self.motion.velocity * speed * dt;
        self.motion.position = Vector2::new(position.x, config.clamp_to_ground(position.y));
    }

    /// Dispatch every queued event, oldest first
    fn drain_events(&mut self) {
        while let Some(event) = self.events.dequeue() {
            self.emit(event.signal, &event.args);
        }
    }

    /// Emit the clip transitions recorded by the animation player
    fn flush_clip_events(&mut self) {
        loop {
            let events = self.animation.take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                let (signal, clip) = match event {
                    ClipEvent::Started(clip) => (Signal::AnimationStart, clip),
                    ClipEvent::Ended(clip) => (Signal::AnimationEnd, clip),
                };
                log::trace!("Actor {:?} {:?} '{}'", self.id, signal, clip);
                self.emit(signal, &[Value::Text(clip)]);
            }
        }
    }

    /// Play a clip, emitting `AnimationStart` when it (re)starts
    pub fn play(&mut self, clip: &str, restart: bool) -> bool {
        let started = self.animation.play(clip, restart);
        if started {
            log::debug!("Actor {:?} plays '{}'", self.id, clip);
        }
        self.flush_clip_events();
        started
    }

    /// Start a locked move (jump or attack) if the actor is free and has the clip
    pub fn start_move(&mut self, clip: &str) -> bool {
        if !self.state().is_walking() || !self.archetype.clips.contains(clip) {
            return false;
        }
        self.play(clip, false)
    }

    fn on_key_down(&mut self, key: &str) {
        let action = match &mut self.controller {
            Controller::Player(player) => player.press(key),
            _ => None,
        };
        if let Some(clip) = action.and_then(|action| action.clip_name()) {
            self.start_move(clip);
        }
    }

    fn on_key_up(&mut self, key: &str) {
        if let Controller::Player(player) = &mut self.controller {
            player.release(key);
        }
    }

    /// React to being struck
    pub fn on_hit(&mut self, strike: &Strike) {
        if self.destroyed {
            return;
        }

        let state = self.state();
        if state.is_hit() || (state.is_jumping() && self.controller.ignores_hits_while_jumping()) {
            log::trace!("Actor {:?} ignores hit from {:?}", self.id, strike.attacker);
            return;
        }

        self.motion.facing = strike.facing.flipped();
        self.stats.apply_damage(strike.strength);
        log::debug!(
            "Actor {:?} hit by {:?} '{}' for {} ({} left)",
            self.id,
            strike.attacker,
            strike.clip,
            strike.strength,
            self.stats.health
        );

        if self.archetype.clips.contains(clips::HIT) {
            self.play(clips::HIT, false);
        }

        if self.stats.is_depleted() {
            self.destroy();
        }
    }

    /// Mark the actor destroyed. Emits `Destroyed` the first time only.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.motion.velocity = Vector2::ZERO;
        log::info!("Actor {:?} ({}) destroyed", self.id, self.archetype.name);
        self.emit(Signal::Destroyed, &[]);
    }

    /// First other live actor whose body overlaps this actor's hit box.
    /// Destroyed and despawn-marked actors are never struck.
    pub fn attack_query(&self, shift: f32, world: WorldView<'_>) -> Option<ActorId> {
        let hit_box = self.world_hit_box(shift);
        world
            .actors()
            .filter(|(id, _)| *id != self.id)
            .find(|(_, other)| hit_box.intersects(&other.world_bounding_box()))
            .map(|(id, _)| id)
    }

    /// Body rectangle in world space
    pub fn world_bounding_box(&self) -> Rect {
        self.archetype
            .bounding_box
            .mirrored(self.motion.facing)
            .translated(self.motion.position)
    }

    /// Attack rectangle in world space, pushed `shift` units along x
    pub fn world_hit_box(&self, shift: f32) -> Rect {
        self.archetype
            .hit_box
            .mirrored(self.motion.facing)
            .translated(self.motion.position + Vector2::new(shift, 0.0))
    }

    /// Attacker snapshot for the current clip
    pub fn strike(&self, config: &SimConfig) -> Strike {
        let clip = self.animation.current_clip();
        Strike {
            attacker: self.id,
            facing: self.motion.facing,
            strength: self
                .stats
                .strength_for(clip)
                .unwrap_or(config.default_strength),
            clip: clip.to_string(),
        }
    }

    /// Queue an event for the next tick
    pub fn enqueue(&mut self, signal: Signal, args: Vec<Value>) {
        self.events.enqueue(signal, args);
    }

    /// Bind an extra callback
    pub fn bind(
        &mut self,
        signal: Signal,
        callback: impl Fn(&mut Character, &[Value]) + 'static,
    ) -> BindingId {
        self.signals.bind(signal, callback)
    }

    pub fn unbind(&mut self, signal: Signal, id: BindingId) -> bool {
        self.signals.unbind(signal, id)
    }

    pub fn signals_mut(&mut self) -> &mut ActorSignals {
        &mut self.signals
    }

    /// What the renderer draws for this actor
    pub fn render_state(&self, jump_height: f32) -> RenderState {
        RenderState {
            id: self.id,
            archetype: self.archetype.name.clone(),
            position: self.motion.position,
            facing: self.motion.facing,
            clip: self.animation.current_clip().to_string(),
            frame_index: self.animation.frame_index(),
            elevation: self.elevation(jump_height),
        }
    }

    /// Jump arc height for the current clip
    pub fn elevation(&self, jump_height: f32) -> f32 {
        if self.state().is_jumping() {
            (self.animation.progress() * std::f32::consts::PI).sin() * jump_height
        } else {
            0.0
        }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn archetype(&self) -> &Archetype {
        &self.archetype
    }

    pub fn role(&self) -> Role {
        self.controller.role()
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    /// Get the current state
    pub fn state(&self) -> CharacterState {
        CharacterState::from_clip(self.animation.current_clip())
    }

    pub fn animation(&self) -> &AnimationPlayer {
        &self.animation
    }

    pub fn current_clip(&self) -> &str {
        self.animation.current_clip()
    }

    pub fn stats(&self) -> &CombatStats {
        &self.stats
    }

    pub fn health(&self) -> i32 {
        self.stats.health
    }

    pub fn position(&self) -> Vector2 {
        self.motion.position
    }

    /// Set character position (for teleporting/respawning)
    pub fn set_position(&mut self, position: Vector2) {
        self.motion.position = position;
        self.motion.velocity = Vector2::ZERO;
    }

    pub fn facing(&self) -> Facing {
        self.motion.facing
    }

    pub fn velocity(&self) -> Vector2 {
        self.motion.velocity
    }

    pub fn intent(&self) -> Vector2 {
        self.motion.intent
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Schedule removal at the end of the tick
    pub fn mark_despawn(&mut self) {
        self.despawn = true;
    }

    /// Destroyed or despawned; removed by the next sweep
    pub fn is_expired(&self) -> bool {
        self.destroyed || self.despawn
    }
}

fn touch_args(args: &[Value]) -> (Option<u32>, Option<Vector2>) {
    (
        args.first().and_then(Value::as_touch),
        args.get(1).and_then(Value::as_point),
    )
}

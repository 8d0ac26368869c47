// Stage - owns the actors of a level and runs the per-tick update
//
// Actors update one after another in depth order. Hits land immediately, so an
// actor can be struck by one that updated earlier in the same tick. Removals
// and wave spawns wait until every actor has updated.

pub mod definition;

pub use definition::{Section, SpawnPoint, StageDefinition};

use std::collections::VecDeque;
use std::sync::Arc;

use crate::core::Vector2;
use crate::engine::input::{InputConfig, InputEvent};
use crate::engine::signals::Emitter;
use crate::game::camera::Camera;
use crate::game::characters::{
    ActorArena, ActorId, ArchetypeRegistry, Character, Controller, EnemyController,
    PetController, PlayerController, RenderState, Role, Signal, Value, WorldView,
};
use crate::game::config::SimConfig;
use crate::game::error::ConfigError;

/// A running level
#[derive(Debug)]
pub struct Stage {
    definition: StageDefinition,
    registry: Arc<ArchetypeRegistry>,
    config: SimConfig,
    rng: fastrand::Rng,

    arena: ActorArena,
    /// Update and draw order, re-sorted by depth every tick
    order: Vec<ActorId>,
    /// Player actors in spawn order
    players: Vec<ActorId>,
    camera: Camera,

    /// Waves not yet spawned
    waves: VecDeque<Vec<String>>,
    entered: bool,
    ticks: u64,
}

impl Stage {
    pub fn new(
        definition: StageDefinition,
        registry: Arc<ArchetypeRegistry>,
        config: SimConfig,
        seed: u64,
    ) -> Self {
        let camera = Camera::from_config(&config);
        Self {
            definition,
            registry,
            config,
            rng: fastrand::Rng::with_seed(seed),
            arena: ActorArena::new(),
            order: Vec::new(),
            players: Vec::new(),
            camera,
            waves: VecDeque::new(),
            entered: false,
            ticks: 0,
        }
    }

    /// Populate the stage from its definition, replacing any actors already present
    pub fn enter(&mut self) -> Result<(), ConfigError> {
        self.definition.validate(&self.registry)?;

        self.arena.clear();
        self.order.clear();
        self.players.clear();
        self.camera = Camera::from_config(&self.config);
        self.ticks = 0;

        let definition = self.definition.clone();
        for spawn in &definition.players {
            self.spawn_player(&spawn.archetype, spawn.position)?;
        }
        if let Some(&owner) = self.players.first() {
            for spawn in &definition.pets {
                self.spawn_pet(&spawn.archetype, spawn.position, owner)?;
            }
        } else if !definition.pets.is_empty() {
            log::warn!("Stage '{}' has pets but no player to own them", definition.name);
        }

        self.waves = definition.waves().cloned().collect();
        self.entered = true;
        log::info!(
            "Entered stage '{}' with {} actors and {} waves",
            definition.name,
            self.arena.len(),
            self.waves.len()
        );
        Ok(())
    }

    /// Spawn an actor with an explicit controller
    pub fn spawn(
        &mut self,
        archetype: &str,
        position: Vector2,
        controller: Controller,
    ) -> Result<ActorId, ConfigError> {
        let archetype = self.registry.get(archetype)?;
        let position = Vector2::new(position.x, self.config.clamp_to_ground(position.y));
        let role = controller.role();
        let id = self
            .arena
            .insert_with(|id| Character::new(id, archetype, position, controller));
        self.order.push(id);
        log::debug!("Spawned {:?} {:?} at {}", role, id, position);
        Ok(id)
    }

    /// Spawn a player with the default bindings for its index; the camera follows it
    pub fn spawn_player(&mut self, archetype: &str, position: Vector2) -> Result<ActorId, ConfigError> {
        let input = InputConfig::with_defaults(self.players.len());
        self.spawn_player_with(archetype, position, input)
    }

    pub fn spawn_player_with(
        &mut self,
        archetype: &str,
        position: Vector2,
        input: InputConfig,
    ) -> Result<ActorId, ConfigError> {
        let controller = Controller::Player(PlayerController::new(input, self.config.touch_dead_zone));
        let id = self.spawn(archetype, position, controller)?;
        self.players.push(id);
        self.camera.follow(id);
        Ok(id)
    }

    pub fn spawn_enemy(&mut self, archetype: &str, position: Vector2) -> Result<ActorId, ConfigError> {
        self.spawn(archetype, position, Controller::Enemy(EnemyController::new()))
    }

    pub fn spawn_pet(
        &mut self,
        archetype: &str,
        position: Vector2,
        owner: ActorId,
    ) -> Result<ActorId, ConfigError> {
        self.spawn(archetype, position, Controller::Pet(PetController::new(owner)))
    }

    /// Schedule an actor for removal at the end of the tick. Returns false for stale handles.
    pub fn despawn(&mut self, id: ActorId) -> bool {
        match self.arena.get_mut(id) {
            Some(actor) => {
                actor.mark_despawn();
                true
            }
            None => false,
        }
    }

    /// Queue an input event on every player
    pub fn handle_input(&mut self, event: &InputEvent) {
        let (signal, args) = match event {
            InputEvent::KeyDown { key } => (Signal::KeyDown, vec![Value::Text(key.clone())]),
            InputEvent::KeyUp { key } => (Signal::KeyUp, vec![Value::Text(key.clone())]),
            InputEvent::TouchStart { id, position } => (
                Signal::TouchStart,
                vec![Value::Touch(*id), Value::Point(*position)],
            ),
            InputEvent::TouchMove { id, position } => (
                Signal::TouchMove,
                vec![Value::Touch(*id), Value::Point(*position)],
            ),
            InputEvent::TouchEnd { id } => (Signal::TouchEnd, vec![Value::Touch(*id)]),
        };

        for id in &self.players {
            if let Some(player) = self.arena.get_mut(*id) {
                player.enqueue(signal, args.clone());
            }
        }
    }

    /// Advance the stage by one tick
    pub fn step(&mut self, dt: f32) {
        self.ticks += 1;
        self.sort_by_depth();

        let order = self.order.clone();
        for id in order {
            let Some(mut actor) = self.arena.take(id) else {
                continue;
            };
            let report = actor.update(dt, WorldView::new(&self.arena), &mut self.rng, &self.config);
            self.arena.restore(id, actor);

            if let Some(report) = report {
                if let Some(target) = self.arena.get_mut(report.target) {
                    log::debug!("{:?} strikes {:?}", report.strike.attacker, report.target);
                    target.emit(Signal::Hit, &[Value::Strike(report.strike)]);
                }
            }
        }

        self.camera.update(WorldView::new(&self.arena));
        self.sweep();
        self.spawn_next_wave();
    }

    /// Stable sort by y; equal depths keep their previous order
    fn sort_by_depth(&mut self) {
        let arena = &self.arena;
        self.order.retain(|id| arena.contains(*id));
        let mut keyed: Vec<(f32, ActorId)> = self
            .order
            .iter()
            .filter_map(|id| arena.get(*id).map(|actor| (actor.position().y, *id)))
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.order = keyed.into_iter().map(|(_, id)| id).collect();
    }

    /// Remove destroyed and despawned actors
    fn sweep(&mut self) {
        let expired: Vec<ActorId> = self
            .arena
            .iter()
            .filter(|(_, actor)| actor.is_expired())
            .map(|(id, _)| id)
            .collect();

        for id in expired {
            if let Some(actor) = self.arena.remove(id) {
                log::info!("Removed {:?} ({})", id, actor.archetype().name);
            }
            self.players.retain(|player| *player != id);
            self.camera.unfollow(id);
        }

        let arena = &self.arena;
        self.order.retain(|id| arena.contains(*id));
    }

    fn spawn_next_wave(&mut self) {
        if !self.entered || self.enemy_count() > 0 {
            return;
        }
        let Some(wave) = self.waves.pop_front() else {
            return;
        };

        let lead_x = self
            .players
            .first()
            .and_then(|id| self.arena.get(*id))
            .map_or(0.0, |player| player.position().x);
        let band = self.config.ground_max_y - self.config.ground_min_y;
        let count = wave.len();

        for (i, archetype) in wave.iter().enumerate() {
            let x = lead_x + self.config.wave_spawn_offset + i as f32 * self.config.wave_spacing;
            let y = self.config.ground_min_y + band * (i + 1) as f32 / (count + 1) as f32;
            // Waves were validated on enter
            if let Err(err) = self.spawn_enemy(archetype, Vector2::new(x, y)) {
                log::warn!("Skipping wave member: {}", err);
            }
        }
        log::info!(
            "Wave of {} spawned, {} waves left",
            count,
            self.waves.len()
        );
    }

    /// Live enemies
    pub fn enemy_count(&self) -> usize {
        self.arena
            .iter()
            .filter(|(_, actor)| actor.role() == Role::Enemy && !actor.is_expired())
            .count()
    }

    /// No waves left and no enemy standing
    pub fn cleared(&self) -> bool {
        self.entered && self.waves.is_empty() && self.enemy_count() == 0
    }

    /// Stage to load after this one
    pub fn next_stage(&self) -> Option<&str> {
        self.definition.next.as_deref()
    }

    /// Render snapshots in draw order
    pub fn render_states(&self) -> Vec<RenderState> {
        self.order
            .iter()
            .filter_map(|id| self.arena.get(*id))
            .map(|actor| actor.render_state(self.config.jump_height))
            .collect()
    }

    /// Handles in update/draw order as of the last tick
    pub fn draw_order(&self) -> &[ActorId] {
        &self.order
    }

    pub fn actor(&self, id: ActorId) -> Option<&Character> {
        self.arena.get(id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Character> {
        self.arena.get_mut(id)
    }

    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &Character)> {
        self.arena.iter()
    }

    pub fn actor_count(&self) -> usize {
        self.arena.len()
    }

    pub fn players(&self) -> &[ActorId] {
        &self.players
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn definition(&self) -> &StageDefinition {
        &self.definition
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn waves_remaining(&self) -> usize {
        self.waves.len()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(definition: StageDefinition) -> Stage {
        Stage::new(
            definition,
            Arc::new(ArchetypeRegistry::builtin()),
            SimConfig::default(),
            42,
        )
    }

    #[test]
    fn test_enter_town() {
        let mut stage = stage(StageDefinition::town());
        stage.enter().unwrap();

        assert_eq!(stage.players().len(), 1);
        assert_eq!(stage.actor_count(), 2);
        assert_eq!(stage.waves_remaining(), 1);
        assert!(stage.camera().is_following(stage.players()[0]));
        assert!(!stage.cleared());
    }

    #[test]
    fn test_enter_rejects_unknown_archetype() {
        let mut definition = StageDefinition::town();
        definition.players[0].archetype = "ghost".to_string();
        let mut stage = stage(definition);
        assert!(stage.enter().is_err());
        assert_eq!(stage.actor_count(), 0);
    }

    #[test]
    fn test_first_wave_spawns_after_first_tick() {
        let mut stage = stage(StageDefinition::town());
        stage.enter().unwrap();
        stage.step(1.0 / 60.0);

        assert_eq!(stage.enemy_count(), 3);
        assert_eq!(stage.waves_remaining(), 0);
        let ahead = stage
            .actors()
            .filter(|(_, actor)| actor.role() == Role::Enemy)
            .all(|(_, actor)| actor.position().x >= 120.0);
        assert!(ahead);
    }

    #[test]
    fn test_despawn_removes_at_end_of_tick() {
        let mut stage = stage(StageDefinition::empty("test"));
        stage.enter().unwrap();
        let id = stage.spawn_enemy("skinhead", Vector2::new(0.0, 10.0)).unwrap();

        assert!(stage.despawn(id));
        assert!(stage.actor(id).is_some());
        stage.step(1.0 / 60.0);
        assert!(stage.actor(id).is_none());
        assert!(!stage.despawn(id));
    }

    #[test]
    fn test_spawn_clamps_to_band() {
        let mut stage = stage(StageDefinition::empty("test"));
        let id = stage.spawn_enemy("skinhead", Vector2::new(0.0, 200.0)).unwrap();
        assert_eq!(stage.actor(id).map(|a| a.position().y), Some(70.0));
    }

    #[test]
    fn test_next_stage() {
        let stage = stage(StageDefinition::town());
        assert_eq!(stage.next_stage(), Some("pub"));
        assert_eq!(stage.name(), "town");
    }
}

// Controllers - what drives an actor while it is free to move
//
// Each variant picks the movement intent for the tick and may request a clip.
// Locked clips (jump, hit, attacks) skip the controller until they finish.

pub mod ai;
pub mod enemy;
pub mod pet;
pub mod player;

pub use ai::Pursuit;
pub use enemy::EnemyController;
pub use pet::PetController;
pub use player::PlayerController;

use crate::game::config::SimConfig;

use super::archetype::Archetype;
use super::arena::{ActorId, WorldView};
use super::character::Kinematics;

/// Which side an actor fights on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Player,
    Enemy,
    Pet,
}

/// Everything a controller may look at during its actor's update
pub struct TickContext<'a> {
    /// The other actors
    pub world: WorldView<'a>,
    pub rng: &'a mut fastrand::Rng,
    pub config: &'a SimConfig,
    pub archetype: &'a Archetype,
}

impl TickContext<'_> {
    /// Random attack clip the archetype can play
    pub fn pick_attack(&mut self) -> Option<&'static str> {
        let attacks: Vec<&'static str> = self.archetype.attack_clips().collect();
        if attacks.is_empty() {
            return None;
        }
        Some(attacks[self.rng.usize(..attacks.len())])
    }
}

/// Per-variant state update hook
pub trait Behavior {
    /// Set `motion.intent` for this tick and return the clip to play, if any
    fn update_state(
        &mut self,
        motion: &mut Kinematics,
        ctx: &mut TickContext<'_>,
    ) -> Option<&'static str>;
}

/// The closed set of actor controllers
#[derive(Debug, Clone)]
pub enum Controller {
    Player(PlayerController),
    Enemy(EnemyController),
    Pet(PetController),
}

impl Controller {
    pub fn role(&self) -> Role {
        match self {
            Self::Player(_) => Role::Player,
            Self::Enemy(_) => Role::Enemy,
            Self::Pet(_) => Role::Pet,
        }
    }

    /// Players can jump over attacks
    pub fn ignores_hits_while_jumping(&self) -> bool {
        matches!(self, Self::Player(_))
    }

    /// Actor the AI is currently chasing
    pub fn target(&self) -> Option<ActorId> {
        match self {
            Self::Player(_) => None,
            Self::Enemy(enemy) => enemy.pursuit.follow,
            Self::Pet(pet) => pet.pursuit.follow,
        }
    }

    pub fn as_player(&self) -> Option<&PlayerController> {
        match self {
            Self::Player(player) => Some(player),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut PlayerController> {
        match self {
            Self::Player(player) => Some(player),
            _ => None,
        }
    }
}

impl Behavior for Controller {
    fn update_state(
        &mut self,
        motion: &mut Kinematics,
        ctx: &mut TickContext<'_>,
    ) -> Option<&'static str> {
        match self {
            Self::Player(player) => player.update_state(motion, ctx),
            Self::Enemy(enemy) => enemy.update_state(motion, ctx),
            Self::Pet(pet) => pet.update_state(motion, ctx),
        }
    }
}

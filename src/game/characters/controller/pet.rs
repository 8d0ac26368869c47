// Pet AI - fights enemies near it, otherwise trails its owner

use crate::game::characters::arena::ActorId;
use crate::game::characters::character::Kinematics;
use crate::game::characters::state::clips;

use super::ai::Pursuit;
use super::{Behavior, Role, TickContext};

#[derive(Debug, Clone)]
pub struct PetController {
    /// Actor the pet follows around
    pub owner: ActorId,
    pub pursuit: Pursuit,
}

impl PetController {
    pub fn new(owner: ActorId) -> Self {
        Self {
            owner,
            pursuit: Pursuit::new(),
        }
    }
}

impl Behavior for PetController {
    fn update_state(
        &mut self,
        motion: &mut Kinematics,
        ctx: &mut TickContext<'_>,
    ) -> Option<&'static str> {
        let world = ctx.world;
        let target = self.pursuit.find_nearest_target(
            motion.position,
            world.with_role(Role::Enemy),
            world,
            ctx.config,
        );
        if let Some(target) = target {
            return self.pursuit.engage(motion, target, ctx);
        }

        let Some(owner) = world.position_of(self.owner) else {
            return Pursuit::rest(motion);
        };

        if motion.position.distance(owner) > ctx.config.pet_follow_distance {
            Pursuit::move_to(motion, owner);
            Some(clips::WALK)
        } else {
            Pursuit::rest(motion)
        }
    }
}

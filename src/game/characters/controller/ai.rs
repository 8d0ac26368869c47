// Target pursuit shared by enemies and pets

use crate::core::math::normalize_or_zero;
use crate::core::{Facing, Vector2};
use crate::game::characters::arena::{ActorId, WorldView};
use crate::game::characters::character::Kinematics;
use crate::game::characters::state::clips;
use crate::game::config::SimConfig;

use super::TickContext;

/// Chases the nearest candidate and attacks it at melee range
#[derive(Debug, Clone, Default)]
pub struct Pursuit {
    /// Current target
    pub follow: Option<ActorId>,
    /// Ticks left before the next attack may fire
    pub cooldown: u32,
}

impl Pursuit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh `follow` and return the target position.
    ///
    /// The current target is kept while it is alive and within the sticky
    /// radius; otherwise the closest candidate within the acquisition radius
    /// is taken. Ties keep the earliest candidate.
    pub fn find_nearest_target(
        &mut self,
        origin: Vector2,
        candidates: impl Iterator<Item = (ActorId, Vector2)>,
        world: WorldView<'_>,
        config: &SimConfig,
    ) -> Option<Vector2> {
        if let Some(follow) = self.follow {
            match world.position_of(follow) {
                Some(position) if origin.distance(position) <= config.sticky_radius => {
                    return Some(position);
                }
                Some(_) => log::trace!("Target {:?} out of range, dropping", follow),
                None => log::trace!("Target {:?} gone, dropping", follow),
            }
            self.follow = None;
        }

        let mut nearest: Option<(ActorId, Vector2, f32)> = None;
        for (id, position) in candidates {
            let distance = origin.distance(position);
            if distance > config.acquisition_radius {
                continue;
            }
            if nearest.map_or(true, |(_, _, best)| distance < best) {
                nearest = Some((id, position, distance));
            }
        }

        let (id, position, _) = nearest?;
        log::debug!("Acquired target {:?}", id);
        self.follow = Some(id);
        Some(position)
    }

    /// Point the intent at `target`
    pub fn move_to(motion: &mut Kinematics, target: Vector2) {
        motion.intent = normalize_or_zero(target - motion.position);
    }

    /// Walk towards `target`. In melee range, line up on the ground band,
    /// then stop and attack.
    pub fn engage(
        &mut self,
        motion: &mut Kinematics,
        target: Vector2,
        ctx: &mut TickContext<'_>,
    ) -> Option<&'static str> {
        self.cooldown = self.cooldown.saturating_sub(1);

        let offset = target - motion.position;
        if offset.length() > ctx.config.melee_radius {
            Self::move_to(motion, target);
            return Some(clips::WALK);
        }

        motion.intent = Vector2::ZERO;
        if let Some(facing) = Facing::from_direction(offset.x) {
            motion.facing = facing;
        }

        if offset.y.abs() > ctx.config.melee_depth_tolerance {
            motion.intent = Vector2::new(0.0, offset.y.signum());
            return Some(clips::WALK);
        }

        if self.cooldown == 0 {
            if let Some(attack) = ctx.pick_attack() {
                self.cooldown = ctx.rng.u32(ctx.config.cooldown_range());
                return Some(attack);
            }
        }
        Some(clips::IDLE)
    }

    /// Stand still
    pub fn rest(motion: &mut Kinematics) -> Option<&'static str> {
        motion.intent = Vector2::ZERO;
        Some(clips::IDLE)
    }
}

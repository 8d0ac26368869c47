// Enemy AI - chase the nearest player and brawl

use crate::game::characters::character::Kinematics;

use super::ai::Pursuit;
use super::{Behavior, Role, TickContext};

#[derive(Debug, Clone, Default)]
pub struct EnemyController {
    pub pursuit: Pursuit,
}

impl EnemyController {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Behavior for EnemyController {
    fn update_state(
        &mut self,
        motion: &mut Kinematics,
        ctx: &mut TickContext<'_>,
    ) -> Option<&'static str> {
        let world = ctx.world;
        let target = self.pursuit.find_nearest_target(
            motion.position,
            world.with_role(Role::Player),
            world,
            ctx.config,
        );

        match target {
            Some(target) => self.pursuit.engage(motion, target, ctx),
            None => Pursuit::rest(motion),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vector2;
    use crate::engine::input::InputConfig;
    use crate::game::characters::arena::{ActorArena, ActorId, WorldView};
    use crate::game::characters::archetype::Archetype;
    use crate::game::characters::character::Character;
    use crate::game::characters::controller::{Controller, PlayerController};
    use crate::game::config::SimConfig;
    use std::sync::Arc;

    fn world_with_player(at: Vector2) -> (ActorArena, ActorId) {
        let mut arena = ActorArena::new();
        let id = arena.insert_with(|id| {
            Character::new(
                id,
                Arc::new(Archetype::fatguy()),
                at,
                Controller::Player(PlayerController::new(InputConfig::with_defaults(0), 4.0)),
            )
        });
        (arena, id)
    }

    fn run(
        enemy: &mut EnemyController,
        motion: &mut Kinematics,
        arena: &ActorArena,
        rng: &mut fastrand::Rng,
    ) -> Option<&'static str> {
        let config = SimConfig::default();
        let archetype = Archetype::skinhead();
        let mut ctx = TickContext {
            world: WorldView::new(arena),
            rng,
            config: &config,
            archetype: &archetype,
        };
        enemy.update_state(motion, &mut ctx)
    }

    #[test]
    fn test_far_player_is_ignored() {
        let (arena, _) = world_with_player(Vector2::new(100.0, 0.0));
        let mut rng = fastrand::Rng::with_seed(1);
        let mut enemy = EnemyController::new();
        let mut motion = Kinematics::default();

        assert_eq!(run(&mut enemy, &mut motion, &arena, &mut rng), Some("idle"));
        assert_eq!(motion.intent, Vector2::ZERO);
        assert_eq!(enemy.pursuit.follow, None);
    }

    #[test]
    fn test_near_player_is_chased() {
        let (arena, player) = world_with_player(Vector2::new(30.0, 0.0));
        let mut rng = fastrand::Rng::with_seed(1);
        let mut enemy = EnemyController::new();
        let mut motion = Kinematics::default();

        assert_eq!(run(&mut enemy, &mut motion, &arena, &mut rng), Some("walk"));
        assert_eq!(motion.intent, Vector2::new(1.0, 0.0));
        assert_eq!(enemy.pursuit.follow, Some(player));
    }

    #[test]
    fn test_attacks_in_melee_range_on_cooldown() {
        let (arena, _) = world_with_player(Vector2::new(-8.0, 0.0));
        let mut rng = fastrand::Rng::with_seed(1);
        let mut enemy = EnemyController::new();
        let mut motion = Kinematics::default();

        let clip = run(&mut enemy, &mut motion, &arena, &mut rng);
        assert!(matches!(clip, Some("punch") | Some("kick")));
        assert_eq!(motion.intent, Vector2::ZERO);
        assert_eq!(motion.facing, crate::core::Facing::Left);
        assert!((20..=45).contains(&enemy.pursuit.cooldown));

        // cooling down: stands and waits
        assert_eq!(run(&mut enemy, &mut motion, &arena, &mut rng), Some("idle"));
    }

    #[test]
    fn test_lines_up_depth_before_attacking() {
        let (arena, _) = world_with_player(Vector2::new(5.0, 8.0));
        let mut rng = fastrand::Rng::with_seed(1);
        let mut enemy = EnemyController::new();
        let mut motion = Kinematics::default();

        assert_eq!(run(&mut enemy, &mut motion, &arena, &mut rng), Some("walk"));
        assert_eq!(motion.intent, Vector2::new(0.0, 1.0));
        assert_eq!(motion.facing, crate::core::Facing::Right);
        assert_eq!(enemy.pursuit.cooldown, 0);

        motion.position.y = 7.0;
        let clip = run(&mut enemy, &mut motion, &arena, &mut rng);
        assert!(matches!(clip, Some("punch") | Some("kick")));
        assert_eq!(motion.intent, Vector2::ZERO);
    }
}

//! Collision resolution between the player and level obstacles.
//!
//! The pure functions take the two participants directly; the system below
//! feeds them from avian's `CollisionStart` messages.

use avian2d::prelude::*;
use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::config::{CollisionConfig, TraversalTuning};
use crate::geometry::obstacle_bounds;
use crate::hook::{HookCue, HookMachine, HookReleased};
use crate::obstacles::{ObstacleFrame, ObstacleSnapshot};
use crate::player::{PlayerSnapshot, TraversalOutput, Traverser};

/// The side of the player that touched an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl CollisionSide {
    /// Unit vector from the player toward the contact.
    pub fn direction(self) -> Vec2 {
        match self {
            CollisionSide::Left => Vec2::NEG_X,
            CollisionSide::Right => Vec2::X,
            CollisionSide::Top => Vec2::Y,
            CollisionSide::Bottom => Vec2::NEG_Y,
        }
    }
}

/// Which side of `player` the overlap with `obstacle` lies on.
///
/// `None` when the boxes are apart or the overlap straddles the player's
/// center on both axes. A vertical side wins over a horizontal one.
pub fn collision_side(player: Rect, obstacle: Rect) -> Option<CollisionSide> {
    let min = player.min.max(obstacle.min);
    let max = player.max.min(obstacle.max);
    if min.x > max.x || min.y > max.y {
        return None;
    }

    let center = player.center();
    if min.y > center.y {
        Some(CollisionSide::Top)
    } else if max.y < center.y {
        Some(CollisionSide::Bottom)
    } else if max.x < center.x {
        Some(CollisionSide::Left)
    } else if min.x > center.x {
        Some(CollisionSide::Right)
    } else {
        None
    }
}

/// What a contact did to the player.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionResponse {
    /// Target of a hook released by the contact.
    pub released_hook: Option<Entity>,
    /// Velocity to apply when the obstacle hurts.
    pub knockback: Option<Vec2>,
}

/// Any obstacle contact ends an attached hook; damaging ones also knock back.
pub fn on_collision_with_obstacle(
    hook: &mut HookMachine,
    player: &PlayerSnapshot,
    obstacle: &ObstacleSnapshot,
    config: &CollisionConfig,
) -> CollisionResponse {
    let released_hook = hook.finish_hooking().ok();

    let knockback = if obstacle.kind.is_dangerous() {
        collision_side(player.bounds(), obstacle_bounds(obstacle))
            .map(|side| -side.direction() * config.knockback_strength)
    } else {
        None
    };

    CollisionResponse {
        released_hook,
        knockback,
    }
}

/// Touching the hooked obstacle itself releases the hook, even mid-throw.
pub fn on_collision_with_hook_target(hook: &mut HookMachine, target: Entity) -> Option<Entity> {
    match hook.detach_from(target) {
        Some(HookCue::Released(entity)) => Some(entity),
        _ => None,
    }
}

/// The player touched a damaging obstacle.
#[derive(Debug)]
pub struct DamagingContact {
    pub entity: Entity,
    pub obstacle: Entity,
    pub knockback: Vec2,
}

impl Message for DamagingContact {}

pub(crate) fn resolve_traversal_collisions(
    tuning: Res<TraversalTuning>,
    frame: Res<ObstacleFrame>,
    mut collision_events: MessageReader<CollisionStart>,
    mut released_events: MessageWriter<HookReleased>,
    mut damage_events: MessageWriter<DamagingContact>,
    mut query: Query<
        (
            &Transform,
            Option<&Collider>,
            Option<&LinearVelocity>,
            &mut HookMachine,
            &mut TraversalOutput,
        ),
        With<Traverser>,
    >,
) {
    for (.., mut output) in &mut query {
        output.knockback = None;
    }

    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (player_entity, obstacle_entity) in pairs {
            let Ok((transform, collider, velocity, mut hook, mut output)) =
                query.get_mut(player_entity)
            else {
                continue;
            };
            let Some(obstacle) = frame.obstacles.iter().find(|o| o.entity == obstacle_entity)
            else {
                continue;
            };

            let player = PlayerSnapshot::from_components(transform, collider, velocity);
            let released = on_collision_with_hook_target(&mut hook, obstacle_entity);
            let response =
                on_collision_with_obstacle(&mut hook, &player, obstacle, &tuning.collision);

            if let Some(target) = released.or(response.released_hook) {
                released_events.write(HookReleased {
                    entity: player_entity,
                    target,
                });
            }

            if let Some(knockback) = response.knockback {
                output.knockback = Some(knockback);
                damage_events.write(DamagingContact {
                    entity: player_entity,
                    obstacle: obstacle_entity,
                    knockback,
                });
                info!(
                    "Damaging contact with {:?}: knockback={:?}",
                    obstacle_entity, knockback
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HookConfig;
    use crate::hook::HookPhase;
    use crate::obstacles::ObstacleKind;
    use crate::test_support::{entities, player_at, wall};

    fn spikes(entity: Entity, x: f32, y: f32) -> ObstacleSnapshot {
        ObstacleSnapshot::new(
            entity,
            ObstacleKind::Damaging,
            Vec2::new(x, y),
            Vec2::new(16.0, 16.0),
        )
        .with_body()
    }

    /// A hook attached to a wall whose nearest point is 40px right of the player.
    fn attached_hook(target: Entity) -> (HookMachine, PlayerSnapshot, Vec<ObstacleSnapshot>) {
        let player = player_at(0.0, 0.0);
        let obstacles = vec![wall(target, 50.0, 0.0, 20.0, 20.0)];
        let mut hook = HookMachine::new(&HookConfig::default());
        hook.update(0.0, &player, &obstacles);
        hook.throw_hook(&player, &obstacles).expect("target in range");
        hook.update(1000.0, &player, &obstacles);
        assert_eq!(hook.phase(), HookPhase::Attached);
        (hook, player, obstacles)
    }

    #[test]
    fn test_collision_side_from_overlap() {
        let player = Rect::from_center_size(Vec2::ZERO, Vec2::splat(16.0));
        let at = |x: f32, y: f32| Rect::from_center_size(Vec2::new(x, y), Vec2::splat(16.0));

        assert_eq!(collision_side(player, at(-14.0, 0.0)), Some(CollisionSide::Left));
        assert_eq!(collision_side(player, at(14.0, 0.0)), Some(CollisionSide::Right));
        assert_eq!(collision_side(player, at(0.0, 14.0)), Some(CollisionSide::Top));
        assert_eq!(collision_side(player, at(0.0, -16.0)), Some(CollisionSide::Bottom));
        // Vertical beats horizontal on a corner.
        assert_eq!(collision_side(player, at(14.0, 14.0)), Some(CollisionSide::Top));
        assert_eq!(collision_side(player, at(40.0, 0.0)), None);
        assert_eq!(collision_side(player, at(0.0, 0.0)), None);
    }

    #[test]
    fn test_damaging_contact_knocks_back_away() {
        let [hazard] = entities::<1>();
        let mut hook = HookMachine::new(&HookConfig::default());
        let config = CollisionConfig::default();

        let response = on_collision_with_obstacle(
            &mut hook,
            &player_at(0.0, 0.0),
            &spikes(hazard, 15.0, 0.0),
            &config,
        );
        assert_eq!(response.knockback, Some(Vec2::new(-10.0, 0.0)));
        assert_eq!(response.released_hook, None);

        let response = on_collision_with_obstacle(
            &mut hook,
            &player_at(0.0, 0.0),
            &spikes(hazard, 0.0, -15.0),
            &config,
        );
        assert_eq!(response.knockback, Some(Vec2::new(0.0, 10.0)));
    }

    #[test]
    fn test_wall_contact_never_knocks_back() {
        let [e] = entities::<1>();
        let mut hook = HookMachine::new(&HookConfig::default());

        let response = on_collision_with_obstacle(
            &mut hook,
            &player_at(0.0, 0.0),
            &wall(e, 15.0, 0.0, 16.0, 16.0),
            &CollisionConfig::default(),
        );

        assert_eq!(response, CollisionResponse::default());
    }

    #[test]
    fn test_any_contact_releases_attached_hook() {
        let [target, other] = entities::<2>();
        let (mut hook, player, _) = attached_hook(target);

        let response = on_collision_with_obstacle(
            &mut hook,
            &player,
            &wall(other, -15.0, 0.0, 16.0, 16.0),
            &CollisionConfig::default(),
        );

        assert_eq!(response.released_hook, Some(target));
        assert_eq!(hook.phase(), HookPhase::Ready);
    }

    #[test]
    fn test_hook_target_contact_releases_only_its_own_hook() {
        let [target, other] = entities::<2>();
        let (mut hook, _, _) = attached_hook(target);

        assert_eq!(on_collision_with_hook_target(&mut hook, other), None);
        assert_eq!(hook.phase(), HookPhase::Attached);

        assert_eq!(on_collision_with_hook_target(&mut hook, target), Some(target));
        assert_eq!(hook.phase(), HookPhase::Ready);
        assert!(hook.lock().is_none());
    }

    #[test]
    fn test_hook_target_contact_cancels_extending_throw() {
        let [target] = entities::<1>();
        let player = player_at(0.0, 0.0);
        let obstacles = vec![wall(target, 50.0, 0.0, 20.0, 20.0)];
        let mut hook = HookMachine::new(&HookConfig::default());
        hook.update(0.0, &player, &obstacles);
        hook.throw_hook(&player, &obstacles).expect("target in range");

        assert_eq!(on_collision_with_hook_target(&mut hook, target), Some(target));
        assert_eq!(hook.phase(), HookPhase::Ready);
    }
}

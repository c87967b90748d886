//! Hook domain: tests for targeting and the hook machine.

use bevy::prelude::*;

use super::{
    HookCommandError, HookCue, HookIndicator, HookMachine, HookPhase, RopeSegment,
    TargetDirection,
};
use crate::config::HookConfig;
use crate::fsm::Phase;
use crate::obstacles::{ObstacleKind, ObstacleSnapshot};
use crate::player::PlayerSnapshot;
use crate::test_support::{assert_close, assert_vec_close, entities, player_at, wall};

/// Player at (150, 100) with one wall whose nearest point is (200, 100).
fn anchor_setup() -> (Entity, PlayerSnapshot, Vec<ObstacleSnapshot>) {
    let [e] = entities::<1>();
    (e, player_at(150.0, 100.0), vec![wall(e, 210.0, 100.0, 20.0, 40.0)])
}

/// Throw at the single wall and extend until attached (5 ticks of 20ms).
fn attached_machine() -> (Entity, PlayerSnapshot, Vec<ObstacleSnapshot>, HookMachine) {
    let (e, player, obstacles) = anchor_setup();
    let mut hook = HookMachine::new(&HookConfig::default());
    hook.update(0.0, &player, &obstacles);
    hook.throw_hook(&player, &obstacles).expect("target in range");
    for _ in 0..5 {
        hook.update(20.0, &player, &obstacles);
    }
    assert_eq!(hook.phase(), HookPhase::Attached);
    (e, player, obstacles, hook)
}

// -----------------------------------------------------------------------------
// Targeting tests
// -----------------------------------------------------------------------------

#[test]
fn test_throw_without_targets_changes_nothing() {
    let mut hook = HookMachine::new(&HookConfig::default());
    let player = player_at(0.0, 0.0);

    hook.update(16.0, &player, &[]);
    let result = hook.throw_hook(&player, &[]);

    assert_eq!(result, Err(HookCommandError::NoTarget));
    assert_eq!(hook.phase(), HookPhase::Ready);
    assert!(hook.lock().is_none());
    assert!(hook.is_ready());
    assert_eq!(hook.cooldown_timer(), 0.0);
}

#[test]
fn test_nearest_candidate_becomes_current() {
    let [far, near] = entities::<2>();
    let obstacles = vec![
        wall(far, 100.0, 0.0, 10.0, 10.0),
        wall(near, 40.0, 0.0, 10.0, 10.0),
    ];
    let mut hook = HookMachine::new(&HookConfig::default());

    hook.update(16.0, &player_at(0.0, 0.0), &obstacles);

    assert_eq!(hook.current_target(), Some(near));
    let distances: Vec<f32> = hook
        .targeting()
        .candidates()
        .iter()
        .map(|c| c.distance)
        .collect();
    assert_eq!(distances, vec![35.0, 95.0]);
}

#[test]
fn test_candidates_respect_range_and_minimum_distance() {
    let [near, mid, far] = entities::<3>();
    let obstacles = vec![
        wall(near, 20.0, 0.0, 10.0, 10.0),
        wall(mid, 100.0, 0.0, 10.0, 10.0),
        wall(far, 200.0, 0.0, 10.0, 10.0),
    ];
    let mut hook = HookMachine::new(&HookConfig {
        minimum_distance_to_target: 30.0,
        ..default()
    });

    hook.update(16.0, &player_at(0.0, 0.0), &obstacles);

    let entities: Vec<Entity> = hook
        .targeting()
        .candidates()
        .iter()
        .map(|c| c.entity)
        .collect();
    assert_eq!(entities, vec![mid]);
}

#[test]
fn test_only_bodied_walls_are_candidates() {
    let [bare, spikes] = entities::<2>();
    let obstacles = vec![
        ObstacleSnapshot::new(
            bare,
            ObstacleKind::Wall,
            Vec2::new(30.0, 0.0),
            Vec2::splat(10.0),
        ),
        ObstacleSnapshot::new(
            spikes,
            ObstacleKind::Damaging,
            Vec2::new(30.0, 0.0),
            Vec2::splat(10.0),
        )
        .with_body(),
    ];
    let mut hook = HookMachine::new(&HookConfig::default());

    hook.update(16.0, &player_at(0.0, 0.0), &obstacles);

    assert!(hook.targeting().candidates().is_empty());
    assert_eq!(hook.current_target(), None);
}

#[test]
fn test_current_target_drops_when_out_of_range() {
    let [a, b] = entities::<2>();
    let obstacles = vec![wall(a, 40.0, 0.0, 10.0, 10.0), wall(b, 160.0, 0.0, 10.0, 10.0)];
    let mut hook = HookMachine::new(&HookConfig::default());

    hook.update(16.0, &player_at(0.0, 0.0), &obstacles);
    assert_eq!(hook.current_target(), Some(a));

    // Still a candidate: kept even though `b` is now closer.
    hook.update(16.0, &player_at(110.0, 0.0), &obstacles);
    assert_eq!(hook.current_target(), Some(a));

    hook.update(16.0, &player_at(250.0, 0.0), &obstacles);
    assert_eq!(hook.current_target(), Some(b));
}

#[test]
fn test_empty_obstacle_list_clears_targets() {
    let (e, player, obstacles) = anchor_setup();
    let mut hook = HookMachine::new(&HookConfig::default());

    hook.update(16.0, &player, &obstacles);
    assert_eq!(hook.current_target(), Some(e));

    hook.update(16.0, &player, &[]);
    assert_eq!(hook.current_target(), None);
    assert!(hook.indicator().is_none());
}

#[test]
fn test_switch_target_by_direction() {
    let [right, left, up, down] = entities::<4>();
    let obstacles = vec![
        wall(right, 50.0, 0.0, 10.0, 40.0),
        wall(left, -60.0, 0.0, 10.0, 40.0),
        wall(up, 0.0, 80.0, 40.0, 10.0),
        wall(down, 0.0, -90.0, 40.0, 10.0),
    ];
    let player = player_at(0.0, 0.0);
    let mut hook = HookMachine::new(&HookConfig::default());
    hook.update(16.0, &player, &obstacles);
    assert_eq!(hook.current_target(), Some(right));

    assert_eq!(hook.switch_target(TargetDirection::Left, &player), Ok(left));
    assert_eq!(hook.switch_target(TargetDirection::Up, &player), Ok(up));
    assert_eq!(hook.switch_target(TargetDirection::Down, &player), Ok(down));
    assert_eq!(hook.switch_target(TargetDirection::Right, &player), Ok(right));

    assert_eq!(
        hook.switch_target(TargetDirection::Right, &player),
        Err(HookCommandError::NoCandidate)
    );
    assert_eq!(hook.current_target(), Some(right));

    // A manual choice survives the next refresh.
    hook.switch_target(TargetDirection::Up, &player).expect("up target");
    hook.update(16.0, &player, &obstacles);
    assert_eq!(hook.current_target(), Some(up));
}

#[test]
fn test_left_and_right_skip_overhead_targets() {
    let [right, overhead_left] = entities::<2>();
    let obstacles = vec![
        wall(right, 30.0, 0.0, 10.0, 40.0),
        wall(overhead_left, -40.0, 60.0, 20.0, 20.0),
    ];
    let player = player_at(0.0, 0.0);
    let mut hook = HookMachine::new(&HookConfig::default());
    hook.update(16.0, &player, &obstacles);
    assert_eq!(hook.current_target(), Some(right));

    assert_eq!(
        hook.switch_target(TargetDirection::Left, &player),
        Err(HookCommandError::NoCandidate)
    );
    assert_eq!(
        hook.switch_target(TargetDirection::Up, &player),
        Ok(overhead_left)
    );
}

// -----------------------------------------------------------------------------
// Hook machine tests
// -----------------------------------------------------------------------------

#[test]
fn test_rope_extends_monotonically_to_anchor() {
    let (e, player, obstacles) = anchor_setup();
    let mut hook = HookMachine::new(&HookConfig::default());
    hook.update(0.0, &player, &obstacles);

    let lock = hook.throw_hook(&player, &obstacles).expect("target in range");
    assert_eq!(lock.target, e);
    assert_eq!(lock.anchor, Vec2::new(200.0, 100.0));
    assert_eq!(lock.distance, 50.0);
    assert_eq!(hook.phase(), HookPhase::Extending);

    let mut previous = hook.rope_length();
    for _ in 0..4 {
        assert_eq!(hook.update(20.0, &player, &obstacles), None);
        assert!(hook.rope_length() >= previous);
        assert!(hook.rope_length() < lock.distance);
        assert_eq!(hook.phase(), HookPhase::Extending);
        previous = hook.rope_length();
    }

    let cue = hook.update(20.0, &player, &obstacles);
    assert_eq!(cue, Some(HookCue::Attached(e)));
    assert_eq!(hook.rope_length(), lock.distance);
    assert_eq!(hook.phase(), HookPhase::Attached);
}

#[test]
fn test_rope_clamps_on_overshoot() {
    let (_, player, obstacles) = anchor_setup();
    let mut hook = HookMachine::new(&HookConfig::default());
    hook.update(0.0, &player, &obstacles);
    hook.throw_hook(&player, &obstacles).expect("target in range");

    hook.update(1000.0, &player, &obstacles);

    assert_eq!(hook.rope_length(), 50.0);
    assert_eq!(hook.phase(), HookPhase::Attached);
}

#[test]
fn test_pull_points_at_anchor() {
    let (_, player, _, hook) = attached_machine();

    let velocity = hook.calculate_hook_velocity(&player, 4.0);

    assert_eq!(velocity, Some(Vec2::new(4.0, 0.0)));
}

#[test]
fn test_no_pull_once_at_the_anchor() {
    let (_, _, _, hook) = attached_machine();

    let velocity = hook.calculate_hook_velocity(&player_at(200.0, 100.0), 4.0);

    assert_eq!(velocity, Some(Vec2::ZERO));
}

#[test]
fn test_no_pull_unless_attached() {
    let (_, player, obstacles) = anchor_setup();
    let mut hook = HookMachine::new(&HookConfig::default());
    hook.update(0.0, &player, &obstacles);
    assert_eq!(hook.calculate_hook_velocity(&player, 4.0), None);

    hook.throw_hook(&player, &obstacles).expect("target in range");
    assert_eq!(hook.calculate_hook_velocity(&player, 4.0), None);
}

#[test]
fn test_pull_rides_a_falling_target_only() {
    let [falling, rising] = entities::<2>();
    let player = player_at(0.0, 0.0);

    let attach_to = |obstacle: ObstacleSnapshot| {
        let obstacles = vec![obstacle];
        let mut hook = HookMachine::new(&HookConfig::default());
        hook.update(0.0, &player, &obstacles);
        hook.throw_hook(&player, &obstacles).expect("target in range");
        hook.update(1000.0, &player, &obstacles);
        hook
    };

    let hook = attach_to(wall(falling, 50.0, 0.0, 20.0, 20.0).with_velocity(Vec2::new(0.0, -10.0)));
    assert_vec_close(
        hook.calculate_hook_velocity(&player, 4.0).expect("attached"),
        Vec2::new(4.0, -10.0),
    );

    let hook = attach_to(wall(rising, 50.0, 0.0, 20.0, 20.0).with_velocity(Vec2::new(0.0, 10.0)));
    assert_vec_close(
        hook.calculate_hook_velocity(&player, 4.0).expect("attached"),
        Vec2::new(4.0, 0.0),
    );

    // Pulling upward toward a falling target still rides it.
    let hook = attach_to(wall(falling, 0.0, 60.0, 40.0, 20.0).with_velocity(Vec2::new(0.0, -10.0)));
    assert_vec_close(
        hook.calculate_hook_velocity(&player, 4.0).expect("attached"),
        Vec2::new(0.0, -6.0),
    );
}

#[test]
fn test_anchor_and_target_frozen_after_throw() {
    let [first, second] = entities::<2>();
    let obstacles = vec![
        wall(first, 60.0, 0.0, 10.0, 40.0),
        wall(second, -100.0, 0.0, 10.0, 40.0),
    ];
    let mut hook = HookMachine::new(&HookConfig::default());
    hook.update(0.0, &player_at(0.0, 0.0), &obstacles);
    let lock = hook
        .throw_hook(&player_at(0.0, 0.0), &obstacles)
        .expect("target in range");

    // The player drifts next to the other wall; nothing moves.
    hook.update(10.0, &player_at(-80.0, 10.0), &obstacles);

    assert_eq!(hook.current_target(), Some(first));
    assert_eq!(hook.lock().map(|l| l.anchor), Some(lock.anchor));
    assert_eq!(
        hook.switch_target(TargetDirection::Left, &player_at(-80.0, 10.0)),
        Err(HookCommandError::WrongPhase(HookPhase::Extending))
    );
}

#[test]
fn test_cooldown_blocks_rethrow_until_elapsed() {
    let (e, player, obstacles, mut hook) = attached_machine();
    assert_eq!(hook.finish_hooking(), Ok(e));
    assert_eq!(hook.phase(), HookPhase::Ready);
    assert!(hook.lock().is_none());

    assert_eq!(
        hook.throw_hook(&player, &obstacles),
        Err(HookCommandError::CoolingDown)
    );

    // 100ms already spent extending.
    for _ in 0..3 {
        hook.update(225.0, &player, &obstacles);
    }
    assert_eq!(
        hook.throw_hook(&player, &obstacles),
        Err(HookCommandError::CoolingDown)
    );

    hook.update(225.0, &player, &obstacles);
    assert_eq!(hook.cooldown_timer(), 0.0);
    assert!(hook.throw_hook(&player, &obstacles).is_ok());
}

#[test]
fn test_cooldown_progress() {
    let (_, player, obstacles) = anchor_setup();
    let mut hook = HookMachine::new(&HookConfig::default());
    assert_eq!(hook.cooldown_progress(), 1.0);

    hook.update(0.0, &player, &obstacles);
    hook.throw_hook(&player, &obstacles).expect("target in range");
    assert_eq!(hook.cooldown_progress(), 0.0);

    hook.update(250.0, &player, &obstacles);
    assert_close(hook.cooldown_progress(), 0.25);
}

#[test]
fn test_commands_in_wrong_phase_are_rejected() {
    let (_, player, obstacles) = anchor_setup();
    let mut hook = HookMachine::new(&HookConfig::default());
    hook.update(0.0, &player, &obstacles);

    assert_eq!(
        hook.finish_hooking(),
        Err(HookCommandError::WrongPhase(HookPhase::Ready))
    );

    hook.throw_hook(&player, &obstacles).expect("target in range");
    assert_eq!(
        hook.throw_hook(&player, &obstacles),
        Err(HookCommandError::WrongPhase(HookPhase::Extending))
    );
    assert_eq!(
        hook.finish_hooking(),
        Err(HookCommandError::WrongPhase(HookPhase::Extending))
    );
    assert_eq!(hook.phase(), HookPhase::Extending);
}

#[test]
fn test_disable_releases_and_keeps_cooldown() {
    let (e, player, obstacles) = anchor_setup();
    let mut hook = HookMachine::new(&HookConfig::default());
    hook.update(0.0, &player, &obstacles);
    hook.throw_hook(&player, &obstacles).expect("target in range");

    assert_eq!(hook.set_enabled(false), Some(HookCue::Released(e)));
    assert_eq!(hook.set_enabled(false), None);
    assert_eq!(hook.phase(), HookPhase::Ready);
    assert_eq!(hook.current_target(), None);
    assert!(hook.indicator().is_none());
    assert!(hook.rope(&player).is_none());
    assert_eq!(
        hook.throw_hook(&player, &obstacles),
        Err(HookCommandError::Disabled)
    );

    hook.update(400.0, &player, &obstacles);
    assert_eq!(hook.cooldown_timer(), 600.0);
    assert_eq!(hook.current_target(), None);

    assert_eq!(hook.set_enabled(true), None);
    hook.update(600.0, &player, &obstacles);
    assert_eq!(hook.current_target(), Some(e));
    assert!(hook.is_ready());
}

#[test]
fn test_vanished_target_releases_hook() {
    let (e, player, _, mut hook) = attached_machine();

    let cue = hook.update(16.0, &player, &[]);

    assert_eq!(cue, Some(HookCue::Released(e)));
    assert_eq!(hook.phase(), HookPhase::Ready);
    assert!(hook.lock().is_none());
}

#[test]
fn test_indicator_and_rope() {
    let (_, player, obstacles) = anchor_setup();
    let mut hook = HookMachine::new(&HookConfig::default());
    hook.update(0.0, &player, &obstacles);

    assert_eq!(
        hook.indicator(),
        Some(HookIndicator {
            point: Vec2::new(200.0, 100.0),
            locked: false,
            ready: true,
        })
    );
    assert!(hook.rope(&player).is_none());

    hook.throw_hook(&player, &obstacles).expect("target in range");
    hook.update(40.0, &player, &obstacles);

    assert_eq!(
        hook.indicator(),
        Some(HookIndicator {
            point: Vec2::new(200.0, 100.0),
            locked: true,
            ready: false,
        })
    );
    assert_eq!(
        hook.rope(&player),
        Some(RopeSegment {
            from: Vec2::new(150.0, 100.0),
            to: Vec2::new(170.0, 100.0),
        })
    );
}

#[test]
fn test_zero_cooldown_is_always_ready() {
    let (_, player, obstacles) = anchor_setup();
    let mut hook = HookMachine::new(&HookConfig {
        cooldown: 0.0,
        ..default()
    });
    hook.update(0.0, &player, &obstacles);
    hook.throw_hook(&player, &obstacles).expect("target in range");

    assert!(hook.is_ready());
    assert_eq!(hook.cooldown_progress(), 1.0);
}

#[test]
fn test_phase_table() {
    assert!(HookPhase::Ready.allows(HookPhase::Extending));
    assert!(HookPhase::Extending.allows(HookPhase::Ready));
    assert!(HookPhase::Attached.allows(HookPhase::Ready));
    assert!(!HookPhase::Ready.allows(HookPhase::Attached));
    assert!(!HookPhase::Attached.allows(HookPhase::Extending));
}

//! Closest-point and bounds math for axis-aligned and rotated rectangles.

use bevy::prelude::*;

use crate::obstacles::ObstacleSnapshot;

/// Rotate `point` about the origin by `radians` (counter-clockwise).
pub fn rotate(point: Vec2, radians: f32) -> Vec2 {
    Vec2::from_angle(radians).rotate(point)
}

/// The point on (or inside) `obstacle` nearest to `source`.
///
/// Axis-aligned obstacles clamp against their bounds. Rotated obstacles are
/// solved in the body's local frame, which needs a body; without one the
/// result is `None`.
pub fn closest_point(source: Vec2, obstacle: &ObstacleSnapshot) -> Option<Vec2> {
    if obstacle.is_axis_aligned() {
        let bounds = Rect::from_center_size(obstacle.position, obstacle.size);
        return Some(source.clamp(bounds.min, bounds.max));
    }

    let body = obstacle.body.as_ref()?;
    let half = obstacle.size / 2.0;
    let local = rotate(source - body.position, -body.angle);
    let clamped = local.clamp(-half, half);

    Some(rotate(clamped, body.angle) + body.position)
}

/// World-space axis-aligned bounds of `obstacle`, including its rotation.
pub fn obstacle_bounds(obstacle: &ObstacleSnapshot) -> Rect {
    if obstacle.is_axis_aligned() {
        return Rect::from_center_size(obstacle.position, obstacle.size);
    }

    let (center, radians) = match &obstacle.body {
        Some(body) => (body.position, body.angle),
        None => (obstacle.position, obstacle.angle.to_radians()),
    };
    let half = obstacle.size / 2.0;
    let corners = [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ];

    corners
        .into_iter()
        .map(|corner| rotate(corner, radians) + center)
        .fold(
            Rect {
                min: Vec2::splat(f32::INFINITY),
                max: Vec2::splat(f32::NEG_INFINITY),
            },
            |bounds, p| Rect {
                min: bounds.min.min(p),
                max: bounds.max.max(p),
            },
        )
}

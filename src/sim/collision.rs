//! Hit tests
//!
//! Circles use center distance against the sum of radii. Rectangular tests
//! use open intervals on both axes, so touching edges do not count.

use glam::Vec2;

use super::state::Obstacle;
use crate::consts::*;

/// Check overlap between two circles
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Whether a circle's horizontal extent overlaps the obstacle's columns
#[inline]
pub fn overlaps_columns(pos: Vec2, radius: f32, obstacle: &Obstacle) -> bool {
    pos.x + radius > obstacle.x && pos.x - radius < obstacle.trailing_edge()
}

/// Whether a circle pokes outside the obstacle's gap window
#[inline]
pub fn violates_gap(pos: Vec2, radius: f32, obstacle: &Obstacle) -> bool {
    pos.y - radius < obstacle.gap_top || pos.y + radius > obstacle.gap_bottom
}

/// Player hitbox against a barrier pair
pub fn player_hits_obstacle(pos: Vec2, radius: f32, obstacle: &Obstacle) -> bool {
    overlaps_columns(pos, radius, obstacle) && violates_gap(pos, radius, obstacle)
}

/// Projectile center against a barrier pair (point test)
pub fn point_hits_obstacle(point: Vec2, obstacle: &Obstacle) -> bool {
    point.x > obstacle.x
        && point.x < obstacle.trailing_edge()
        && (point.y < obstacle.gap_top || point.y > obstacle.gap_bottom)
}

/// Player touching the floor or ceiling
pub fn player_out_of_bounds(pos: Vec2, radius: f32) -> bool {
    pos.y + radius > PLAYFIELD_HEIGHT || pos.y - radius < 0.0
}

/// Outside the playfield expanded by `margin` on every side
pub fn outside_playfield(pos: Vec2, margin: f32) -> bool {
    pos.x < -margin
        || pos.x > PLAYFIELD_WIDTH + margin
        || pos.y < -margin
        || pos.y > PLAYFIELD_HEIGHT + margin
}

//! Overlap checks and play field bounds response
//!
//! Everything in the game collides as an axis-aligned box. Moving bodies are
//! either clamped inside the field (the boat) or bounced off its edges
//! (obstacles).

use glam::Vec2;

use super::rect::Rect;

/// Which field edges a bounce should respect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceAxis {
    /// Left/right edges only
    Horizontal,
    /// Top/bottom edges only
    Vertical,
}

/// Overlap between two hitboxes given as centre + size
#[inline]
pub fn boxes_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    Rect::from_center(a_pos, a_size).overlaps(&Rect::from_center(b_pos, b_size))
}

/// Clamp a centre position so a box of `size` stays inside `field`
pub fn clamp_to_field(pos: Vec2, size: Vec2, field: &Rect) -> Vec2 {
    let half = size / 2.0;
    let min = Vec2::new(field.x, field.y) + half;
    let max = Vec2::new(field.right(), field.bottom()) - half;
    // A box larger than the field sits on its centre line
    Vec2::new(
        if min.x <= max.x { pos.x.clamp(min.x, max.x) } else { field.center().x },
        if min.y <= max.y { pos.y.clamp(min.y, max.y) } else { field.center().y },
    )
}

/// Reflect a body off the field edges along `axis`
///
/// Only a body that is past an edge AND still moving outward is reflected
/// and pushed back to the edge. Bodies entering from off-screen pass freely.
/// Returns true when a bounce happened.
pub fn bounce_in_field(
    pos: &mut Vec2,
    vel: &mut Vec2,
    size: Vec2,
    field: &Rect,
    axis: BounceAxis,
) -> bool {
    let half = size / 2.0;
    match axis {
        BounceAxis::Horizontal => {
            if vel.x < 0.0 && pos.x - half.x < field.x {
                pos.x = field.x + half.x;
                vel.x = -vel.x;
                true
            } else if vel.x > 0.0 && pos.x + half.x > field.right() {
                pos.x = field.right() - half.x;
                vel.x = -vel.x;
                true
            } else {
                false
            }
        }
        BounceAxis::Vertical => {
            if vel.y < 0.0 && pos.y - half.y < field.y {
                pos.y = field.y + half.y;
                vel.y = -vel.y;
                true
            } else if vel.y > 0.0 && pos.y + half.y > field.bottom() {
                pos.y = field.bottom() - half.y;
                vel.y = -vel.y;
                true
            } else {
                false
            }
        }
    }
}

//! Draw list construction
//!
//! A `Frame` is everything a backend needs to present one state: sprites in
//! back-to-front order plus text. It holds no references into the state.

use glam::Vec2;

use super::hud::{self, TextLine};
use crate::consts::{BOAT_DISPLAY_H, BOAT_DISPLAY_W, REPAIR_BOAT_SIZE};
use crate::settings::Settings;
use crate::sim::{GameState, ObstacleKind, Rect};

/// Which texture a sprite uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Port,
    Island,
    RepairBoat,
    Obstacle(ObstacleKind),
    Boat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Destination rectangle in field coordinates
    pub rect: Rect,
    pub visible: bool,
    /// RGB multiply, `None` for untinted
    pub tint: Option<u32>,
    pub alpha: f32,
}

impl Sprite {
    fn new(kind: SpriteKind, center: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            rect: Rect::from_center(center, size),
            visible: true,
            tint: None,
            alpha: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Back to front
    pub sprites: Vec<Sprite>,
    pub text: Vec<TextLine>,
}

impl Frame {
    pub fn build(state: &GameState, settings: &Settings) -> Self {
        let mut sprites = Vec::with_capacity(state.obstacles.len() + 4);
        sprites.push(Sprite::new(SpriteKind::Port, state.port.pos, state.port.size));
        sprites.push(Sprite::new(SpriteKind::Island, state.island.pos, state.island.size));

        if let Some(pickup) = &state.repair_boat {
            sprites.push(Sprite::new(
                SpriteKind::RepairBoat,
                pickup.pos,
                Vec2::splat(REPAIR_BOAT_SIZE),
            ));
        }

        for o in &state.obstacles {
            let mut sprite = Sprite::new(SpriteKind::Obstacle(o.kind), o.pos, o.kind.display_size());
            sprite.alpha = o.alpha(state.now_ms);
            sprites.push(sprite);
        }

        let boat = &state.boat;
        let mut hull = Sprite::new(
            SpriteKind::Boat,
            boat.pos,
            Vec2::new(BOAT_DISPLAY_W, BOAT_DISPLAY_H),
        );
        hull.tint = boat.tint.rgb();
        hull.visible = !settings.effective_blink()
            || boat.is_visible(state.now_ms, state.tuning.blink_rate_ms);
        sprites.push(hull);

        let mut text = vec![hud::island_label(state)];
        text.extend(hud::status_lines(state));
        text.extend(hud::overlay_lines(state));

        Self { sprites, text }
    }

    pub fn boat(&self) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.kind == SpriteKind::Boat)
    }
}

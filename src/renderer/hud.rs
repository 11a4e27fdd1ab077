//! HUD and overlay text

use glam::Vec2;

use crate::sim::{GamePhase, GameState};

const WHITE: u32 = 0xffffff;
const GREEN: u32 = 0x00ff00;
const RED: u32 = 0xff0000;

/// Where a text line's position sits relative to the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    Center,
}

/// A line of outlined text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub pos: Vec2,
    pub anchor: Anchor,
    pub font_px: f32,
    pub color: u32,
    /// Black outline thickness
    pub stroke_px: f32,
}

impl TextLine {
    fn new(text: impl Into<String>, pos: Vec2, anchor: Anchor, font_px: f32, color: u32, stroke_px: f32) -> Self {
        Self {
            text: text.into(),
            pos,
            anchor,
            font_px,
            color,
            stroke_px,
        }
    }
}

/// `Hearts: ` followed by one heart glyph per heart
pub fn hearts_text(hearts: u8) -> String {
    format!("Hearts: {}", "❤️".repeat(usize::from(hearts)))
}

pub fn fruits_text(carried: u8, delivered: u32, to_win: u32) -> String {
    format!("Fruits: {carried} | Delivered: {delivered}/{to_win}")
}

/// Terminal message and its color, `None` while playing
pub fn banner(phase: GamePhase) -> Option<(&'static str, u32)> {
    match phase {
        GamePhase::Playing => None,
        GamePhase::Won => Some(("YOU WON!", GREEN)),
        GamePhase::Lost => Some(("GAME OVER", RED)),
    }
}

/// Status readout in the top-left corner
pub fn status_lines(state: &GameState) -> Vec<TextLine> {
    let boat = &state.boat;
    vec![
        TextLine::new(hearts_text(boat.hearts), Vec2::new(10.0, 10.0), Anchor::TopLeft, 20.0, WHITE, 4.0),
        TextLine::new(
            fruits_text(boat.fruits_carried, boat.fruits_delivered, state.tuning.fruits_to_win),
            Vec2::new(10.0, 40.0),
            Anchor::TopLeft,
            20.0,
            WHITE,
            4.0,
        ),
    ]
}

/// Banner and restart prompt once the session is over
pub fn overlay_lines(state: &GameState) -> Vec<TextLine> {
    let Some((message, color)) = banner(state.phase) else {
        return Vec::new();
    };
    let center = state.field().center();
    vec![
        TextLine::new(message, center - Vec2::new(0.0, 50.0), Anchor::Center, 48.0, color, 6.0),
        TextLine::new("Click to Restart", center + Vec2::new(0.0, 20.0), Anchor::Center, 24.0, WHITE, 4.0),
    ]
}

/// Label floating above the island
pub fn island_label(state: &GameState) -> TextLine {
    let island = state.island.rect();
    TextLine::new(
        "Fruit Island",
        Vec2::new(island.center().x, island.y - 15.0),
        Anchor::Center,
        16.0,
        WHITE,
        3.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(hearts_text(3), "Hearts: ❤️❤️❤️");
        assert_eq!(hearts_text(0), "Hearts: ");
        assert_eq!(fruits_text(2, 9, 25), "Fruits: 2 | Delivered: 9/25");
    }

    #[test]
    fn test_overlay_only_when_finished() {
        let mut state = GameState::new(1);
        assert!(overlay_lines(&state).is_empty());

        state.end_session(GamePhase::Lost);
        let lines = overlay_lines(&state);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "GAME OVER");
        assert_eq!(lines[0].color, RED);
        assert_eq!(lines[0].pos, Vec2::new(600.0, 400.0));
        assert_eq!(lines[1].text, "Click to Restart");
    }

    #[test]
    fn test_won_banner_is_green() {
        assert_eq!(banner(GamePhase::Won), Some(("YOU WON!", GREEN)));
    }

    #[test]
    fn test_island_label_above_island() {
        let state = GameState::new(1);
        let label = island_label(&state);
        assert_eq!(label.text, "Fruit Island");
        assert_eq!(label.pos, Vec2::new(1125.0, 360.0));
    }
}

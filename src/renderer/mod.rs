//! Rendering module
//!
//! Backend-agnostic: turns a `GameState` into a `Frame` of sprites and text
//! that any drawing backend can present.

pub mod frame;
pub mod hud;

pub use frame::{Frame, Sprite, SpriteKind};
pub use hud::{Anchor, TextLine};

//! Frame layout and the renderer interface.

mod frame;
mod renderer;

pub use frame::{
    FramePlan, GridLine, Highlight, Rect, Rgba, Sprite, ALLY_AURA, ENEMY_AURA, GHOST_TINT,
    GRID_DARK, GRID_LIGHT, HIGHLIGHT_COLOR,
};
pub use renderer::{LogRenderer, Renderer};

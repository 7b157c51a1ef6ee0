//! Drawing backends.

use super::frame::{FramePlan, Highlight};

/// Draws frame plans. Renderers only read the scene through the plan.
pub trait Renderer {
    fn render(&mut self, frame: &FramePlan);
}

/// Renderer that describes each frame through the log.
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: usize,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &FramePlan) {
        self.frames += 1;
        log::debug!(
            "Frame {}: {}x{} background {:?}, cell {:.1}px, {} grid lines",
            self.frames,
            frame.window[0],
            frame.window[1],
            frame.background,
            frame.cell_size,
            frame.grid.len()
        );
        match frame.highlight {
            Some(Highlight::Rect(rect)) => log::debug!(
                "  highlight rect ({:.1}, {:.1}) {:.1}x{:.1}",
                rect.x,
                rect.y,
                rect.w,
                rect.h
            ),
            Some(Highlight::Ring { center, radius, .. }) => log::debug!(
                "  highlight ring ({:.1}, {:.1}) r={:.1}",
                center[0],
                center[1],
                radius
            ),
            None => {}
        }
        if let Some(ghost) = &frame.ghost {
            log::debug!(
                "  ghost of {} at ({:.1}, {:.1})",
                ghost.entity,
                ghost.rect.x,
                ghost.rect.y
            );
        }
        for sprite in &frame.sprites {
            log::debug!(
                "  {} {:?} at ({:.1}, {:.1}) {:.1}px {}",
                sprite.entity,
                sprite.image,
                sprite.rect.x,
                sprite.rect.y,
                sprite.rect.w,
                sprite.shape.name()
            );
        }
    }
}

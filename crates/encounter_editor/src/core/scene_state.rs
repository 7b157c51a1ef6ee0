//! The mutable encounter scene: backdrop, grid and tokens.

use std::path::PathBuf;

use super::entity::SceneEntity;
use super::registry::EntityRegistry;
use super::EntityId;

/// Grid density used for encounters started from a bare image.
pub const DEFAULT_MIN_UNITS: u32 = 8;

/// Backdrop image, scaled uniformly to form the window.
#[derive(Clone, Debug, PartialEq)]
pub struct Background {
    pub image: PathBuf,
    /// Pixel size of the source image
    pub native_size: [u32; 2],
    pub scale: f64,
}

impl Background {
    pub fn new(image: impl Into<PathBuf>, native_size: [u32; 2]) -> Self {
        Self {
            image: image.into(),
            native_size,
            scale: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Window size in pixels: the native size scaled and truncated.
    pub fn window_size(&self) -> [u32; 2] {
        [
            (self.native_size[0] as f64 * self.scale) as u32,
            (self.native_size[1] as f64 * self.scale) as u32,
        ]
    }
}

/// Everything the command layer edits.
#[derive(Clone, Debug)]
pub struct SceneState {
    pub background: Background,
    pub entities: EntityRegistry,
    min_units: u32,
}

impl SceneState {
    pub fn new(background: Background, min_units: u32) -> Self {
        Self {
            background,
            entities: EntityRegistry::new(),
            min_units: min_units.max(1),
        }
    }

    /// Number of cells along the shorter window side.
    pub fn min_units(&self) -> u32 {
        self.min_units
    }

    pub fn window_size(&self) -> [u32; 2] {
        self.background.window_size()
    }

    /// Edge length of one grid cell in pixels.
    pub fn cell_size(&self) -> f64 {
        let [w, h] = self.window_size();
        w.min(h) as f64 / self.min_units as f64
    }

    /// Whole cells that fit across and down the window.
    pub fn grid_extent(&self) -> (i32, i32) {
        let [w, h] = self.window_size();
        let cell = self.cell_size();
        if cell <= 0.0 {
            return (0, 0);
        }
        ((w as f64 / cell) as i32, (h as f64 / cell) as i32)
    }

    /// Set the grid density. Values below one are ignored.
    pub fn set_grid(&mut self, min_units: u32) -> bool {
        if min_units < 1 {
            return false;
        }
        let changed = self.min_units != min_units;
        self.min_units = min_units;
        changed
    }

    pub fn set_background_scale(&mut self, scale: f64) -> bool {
        let changed = self.background.scale != scale;
        self.background.scale = scale;
        changed
    }

    pub fn set_background_image(&mut self, image: PathBuf, native_size: [u32; 2]) -> bool {
        let changed = self.background.image != image || self.background.native_size != native_size;
        self.background.image = image;
        self.background.native_size = native_size;
        changed
    }

    /// Front-most token under a pixel point.
    pub fn entity_at(&self, px: f64, py: f64) -> Option<EntityId> {
        let cell = self.cell_size();
        self.entities
            .iter()
            .find(|e| e.contains(px, py, cell))
            .map(|e| e.id)
    }

    /// Grid cell a token dropped at a pixel point lands on.
    ///
    /// Tokens wider than one cell are anchored by their centre, so the
    /// pointer is shifted back by half the extra footprint first.
    pub fn drop_cell(&self, entity: &SceneEntity, px: f64, py: f64) -> (i32, i32) {
        let cell = self.cell_size();
        let size = entity.size.get();
        let offset = if size > 1.0 { (size - 1.0) / 2.0 * cell } else { 0.0 };
        (
            ((px - offset) / cell) as i32,
            ((py - offset) / cell) as i32,
        )
    }

    /// Position of a token pulled back inside the visible grid.
    pub fn home_position(&self, entity: &SceneEntity) -> (i32, i32) {
        let (max_x, max_y) = self.grid_extent();
        let footprint = entity.size.footprint();
        (
            entity.x.min(max_x - footprint).max(0),
            entity.y.min(max_y - footprint).max(0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::EntitySize;

    fn scene() -> SceneState {
        SceneState::new(Background::new("map.png", [800, 600]), 6)
    }

    #[test]
    fn test_cell_size_uses_short_side() {
        let s = scene();
        assert_eq!(s.window_size(), [800, 600]);
        assert_eq!(s.cell_size(), 100.0);
        assert_eq!(s.grid_extent(), (8, 6));
    }

    #[test]
    fn test_scale_resizes_window_and_cells() {
        let mut s = scene();
        assert!(s.set_background_scale(0.5));
        assert_eq!(s.window_size(), [400, 300]);
        assert_eq!(s.cell_size(), 50.0);
        assert!(!s.set_background_scale(0.5));
    }

    #[test]
    fn test_set_grid_ignores_zero() {
        let mut s = scene();
        assert!(!s.set_grid(0));
        assert_eq!(s.min_units(), 6);
        assert!(s.set_grid(3));
        assert_eq!(s.cell_size(), 200.0);
    }

    #[test]
    fn test_entity_at_returns_front_most() {
        let mut s = scene();
        let back = s.entities.allocate_id();
        let front = s.entities.allocate_id();
        s.entities.push_back(SceneEntity::item(front, "a.png").with_position(1, 1));
        s.entities.push_back(SceneEntity::item(back, "b.png").with_position(1, 1));
        assert_eq!(s.entity_at(150.0, 150.0), Some(front));
        assert_eq!(s.entity_at(50.0, 50.0), None);
    }

    #[test]
    fn test_drop_cell_centres_large_tokens() {
        let s = scene();
        let small = SceneEntity::item(EntityId(1), "a.png");
        let large = SceneEntity::item(EntityId(2), "a.png").with_size(EntitySize::new(3.0).unwrap());
        assert_eq!(s.drop_cell(&small, 250.0, 120.0), (2, 1));
        // offset of one cell for a 3-cell token
        assert_eq!(s.drop_cell(&large, 250.0, 120.0), (1, 0));
    }

    #[test]
    fn test_home_position_clamps_into_grid() {
        let s = scene();
        let far = SceneEntity::item(EntityId(1), "a.png").with_position(20, -4);
        assert_eq!(s.home_position(&far), (7, 0));
        let big = far.clone().with_size(EntitySize::new(2.0).unwrap()).with_position(7, 5);
        assert_eq!(s.home_position(&big), (6, 4));
    }
}

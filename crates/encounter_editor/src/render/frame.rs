//! Frame layout computed from the scene, independent of any drawing backend.

use std::path::PathBuf;

use crate::core::{CreatureStatus, CreatureTeam, EntityId, ImageShape, SceneEntity, SceneState};

pub type Rgba = [u8; 4];

pub const HIGHLIGHT_COLOR: Rgba = [240, 240, 60, 128];
pub const GRID_LIGHT: Rgba = [200, 200, 200, 255];
pub const GRID_DARK: Rgba = [0, 0, 0, 255];
pub const ALLY_AURA: Rgba = [80, 250, 80, 255];
pub const ENEMY_AURA: Rgba = [250, 80, 80, 255];
/// Multiplied into the dragged token's ghost.
pub const GHOST_TINT: Rgba = [255, 255, 255, 128];

/// Inflation of a rectangular highlight on every side.
const HIGHLIGHT_MARGIN: f64 = 3.0;
/// Ring width of a circular highlight.
const HIGHLIGHT_RING: f64 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn center(&self) -> [f64; 2] {
        [self.x + self.w / 2.0, self.y + self.h / 2.0]
    }

    pub fn inflated(&self, margin: f64) -> Rect {
        Rect {
            x: self.x - margin,
            y: self.y - margin,
            w: self.w + 2.0 * margin,
            h: self.h + 2.0 * margin,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Highlight {
    Rect(Rect),
    Ring {
        center: [f64; 2],
        radius: f64,
        width: f64,
    },
}

/// A grid line, drawn light with a dark line one pixel further along.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    pub from: [f64; 2],
    pub to: [f64; 2],
}

/// One token to blit.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub entity: EntityId,
    pub image: PathBuf,
    pub rect: Rect,
    pub shape: ImageShape,
    pub status: Option<CreatureStatus>,
    pub team: Option<CreatureTeam>,
}

impl Sprite {
    fn new(entity: &SceneEntity, cell_size: f64) -> Self {
        let (x, y) = entity.pixel_origin(cell_size);
        let extent = entity.pixel_extent(cell_size);
        Self {
            entity: entity.id,
            image: entity.image.clone(),
            rect: Rect {
                x,
                y,
                w: extent,
                h: extent,
            },
            shape: entity.shape,
            status: entity.status(),
            team: entity.team(),
        }
    }

    /// Outline colour marking the creature's side.
    pub fn aura(&self) -> Option<Rgba> {
        match self.team? {
            CreatureTeam::None => None,
            CreatureTeam::Ally => Some(ALLY_AURA),
            CreatureTeam::Enemy => Some(ENEMY_AURA),
        }
    }
}

/// Everything a renderer needs for one frame, in drawing order:
/// background, grid, highlight, sprites back to front, then the ghost.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    pub window: [u32; 2],
    pub background: PathBuf,
    pub cell_size: f64,
    pub grid: Vec<GridLine>,
    pub highlight: Option<Highlight>,
    pub sprites: Vec<Sprite>,
    /// Translucent copy of the selected token centred on the pointer while
    /// it is being dragged, drawn with [`GHOST_TINT`]
    pub ghost: Option<Sprite>,
}

impl FramePlan {
    pub fn build(scene: &SceneState, show_grid: bool) -> Self {
        let window = scene.window_size();
        let cell_size = scene.cell_size();

        let grid = if show_grid {
            grid_lines(window, cell_size)
        } else {
            Vec::new()
        };

        let highlight = scene
            .entities
            .selected_entity()
            .map(|entity| highlight(entity, cell_size));

        let sprites = scene
            .entities
            .iter()
            .rev()
            .map(|entity| Sprite::new(entity, cell_size))
            .collect();

        Self {
            window,
            background: scene.background.image.clone(),
            cell_size,
            grid,
            highlight,
            sprites,
            ghost: None,
        }
    }

    /// Add the ghost of the selected token, centred on `pointer`.
    ///
    /// Nothing is added when no token is selected.
    pub fn with_ghost(mut self, scene: &SceneState, pointer: [f64; 2]) -> Self {
        self.ghost = scene.entities.selected_entity().map(|entity| {
            let mut sprite = Sprite::new(entity, self.cell_size);
            sprite.rect.x = (pointer[0] - sprite.rect.w / 2.0).floor();
            sprite.rect.y = (pointer[1] - sprite.rect.h / 2.0).floor();
            sprite
        });
        self
    }
}

/// Lines closer than this are not drawn.
const MIN_GRID_SPACING: f64 = 1.0;

fn grid_lines(window: [u32; 2], cell_size: f64) -> Vec<GridLine> {
    if !(cell_size >= MIN_GRID_SPACING) {
        log::debug!("Grid overlay skipped: {:.3}px cells", cell_size);
        return Vec::new();
    }
    let [w, h] = [window[0] as f64, window[1] as f64];
    let columns = (w / cell_size).ceil() as usize;
    let rows = (h / cell_size).ceil() as usize;

    let vertical = (1..=columns).map(|i| {
        let x = i as f64 * cell_size;
        GridLine {
            from: [x, 0.0],
            to: [x, h],
        }
    });
    let horizontal = (1..=rows).map(|i| {
        let y = i as f64 * cell_size;
        GridLine {
            from: [0.0, y],
            to: [w, y],
        }
    });
    vertical.chain(horizontal).collect()
}

fn highlight(entity: &SceneEntity, cell_size: f64) -> Highlight {
    let rect = Sprite::new(entity, cell_size).rect;
    match entity.shape {
        ImageShape::Circular => Highlight::Ring {
            center: rect.center(),
            radius: rect.w.max(rect.h) / 2.0 + HIGHLIGHT_RING,
            width: HIGHLIGHT_RING + 1.0,
        },
        ImageShape::Original => Highlight::Rect(rect.inflated(HIGHLIGHT_MARGIN)),
    }
}

//! Tokens placed on the encounter grid.

use std::path::{Path, PathBuf};

use super::values::{CreatureStatus, CreatureTeam, Cyclic, ImageShape};
use super::EntityId;

/// Footprint of a token, in grid cells.
///
/// Values of one or more are whole cells; values below one are sub-cell
/// fractions (1/2, 1/4, ...). Growing steps by one cell above the unit size
/// and doubles below it; shrinking mirrors that, so `grown().shrunk()` and
/// `shrunk().grown()` both return the starting size for every size in those
/// two families.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct EntitySize(f64);

impl EntitySize {
    pub const UNIT: EntitySize = EntitySize(1.0);

    /// Returns `None` unless `value` is finite and strictly positive.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn grown(self) -> Self {
        if self.0 >= 1.0 {
            Self(self.0 + 1.0)
        } else {
            Self(self.0 * 2.0)
        }
    }

    pub fn shrunk(self) -> Self {
        if self.0 <= 1.0 {
            Self(self.0 / 2.0)
        } else {
            Self(self.0 - 1.0)
        }
    }

    /// Whole cells covered when clamping a token onto the grid.
    pub fn footprint(self) -> i32 {
        self.0.ceil() as i32
    }

    pub fn is_sub_cell(self) -> bool {
        self.0 < 1.0
    }
}

impl Default for EntitySize {
    fn default() -> Self {
        Self::UNIT
    }
}

impl std::fmt::Display for EntitySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Variant-specific token data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Creature {
        status: CreatureStatus,
        team: CreatureTeam,
    },
    Item,
}

impl EntityKind {
    pub fn creature() -> Self {
        EntityKind::Creature {
            status: CreatureStatus::Alive,
            team: CreatureTeam::None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Creature { .. } => "creature",
            EntityKind::Item => "item",
        }
    }

    /// Shape a freshly created token of this kind is drawn with.
    pub fn default_shape(&self) -> ImageShape {
        match self {
            EntityKind::Creature { .. } => ImageShape::Circular,
            EntityKind::Item => ImageShape::Original,
        }
    }
}

/// A creature or item token.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneEntity {
    /// Stable handle, unchanged by reordering or variant conversion
    pub id: EntityId,
    /// Image reference, relative to the image directory when possible
    pub image: PathBuf,
    /// Grid column
    pub x: i32,
    /// Grid row
    pub y: i32,
    pub size: EntitySize,
    pub shape: ImageShape,
    pub kind: EntityKind,
}

impl SceneEntity {
    pub fn new(id: EntityId, image: impl Into<PathBuf>, kind: EntityKind) -> Self {
        Self {
            id,
            image: image.into(),
            x: 0,
            y: 0,
            size: EntitySize::UNIT,
            shape: kind.default_shape(),
            kind,
        }
    }

    pub fn creature(id: EntityId, image: impl Into<PathBuf>) -> Self {
        Self::new(id, image, EntityKind::creature())
    }

    pub fn item(id: EntityId, image: impl Into<PathBuf>) -> Self {
        Self::new(id, image, EntityKind::Item)
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_size(mut self, size: EntitySize) -> Self {
        self.size = size;
        self
    }

    pub fn with_shape(mut self, shape: ImageShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_status(mut self, new_status: CreatureStatus) -> Self {
        if let EntityKind::Creature { status, .. } = &mut self.kind {
            *status = new_status;
        }
        self
    }

    pub fn with_team(mut self, new_team: CreatureTeam) -> Self {
        if let EntityKind::Creature { team, .. } = &mut self.kind {
            *team = new_team;
        }
        self
    }

    pub fn image(&self) -> &Path {
        &self.image
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn is_creature(&self) -> bool {
        matches!(self.kind, EntityKind::Creature { .. })
    }

    pub fn status(&self) -> Option<CreatureStatus> {
        match self.kind {
            EntityKind::Creature { status, .. } => Some(status),
            EntityKind::Item => None,
        }
    }

    pub fn team(&self) -> Option<CreatureTeam> {
        match self.kind {
            EntityKind::Creature { team, .. } => Some(team),
            EntityKind::Item => None,
        }
    }

    /// The same token rebuilt as the other variant.
    ///
    /// Handle, image, position, size and shape carry over; a creature made
    /// from an item starts alive and unaligned.
    pub fn converted(&self) -> SceneEntity {
        let kind = match self.kind {
            EntityKind::Creature { .. } => EntityKind::Item,
            EntityKind::Item => EntityKind::creature(),
        };
        SceneEntity { kind, ..self.clone() }
    }

    pub fn next_shape(&self) -> ImageShape {
        self.shape.next()
    }

    /// Top-left pixel corner of the drawn image.
    ///
    /// Sub-cell tokens are drawn centred in their cell.
    pub fn pixel_origin(&self, cell_size: f64) -> (f64, f64) {
        let mut x = self.x as f64 * cell_size;
        let mut y = self.y as f64 * cell_size;
        if self.size.is_sub_cell() {
            let offset = cell_size * self.size.get() / 2.0;
            x += offset;
            y += offset;
        }
        (x, y)
    }

    /// Edge length of the drawn image in pixels.
    pub fn pixel_extent(&self, cell_size: f64) -> f64 {
        cell_size * self.size.get()
    }

    /// Whether the pixel point falls inside the token's box.
    pub fn contains(&self, px: f64, py: f64, cell_size: f64) -> bool {
        let (min_x, min_y) = self.pixel_origin(cell_size);
        let extent = self.pixel_extent(cell_size);
        px >= min_x && px < min_x + extent && py >= min_y && py < min_y + extent
    }
}

//! Enumerated token attributes with cyclic stepping.
//!
//! Every enum here serializes to the lowercase string used in encounter
//! documents, and steps through its variants in declaration order,
//! wrapping at the end.

use serde::{Deserialize, Serialize};

/// A closed set of values that can be stepped through in a fixed order.
pub trait Cyclic: Copy + PartialEq + 'static {
    /// All variants, in stepping order.
    const ALL: &'static [Self];

    /// The variant after this one, wrapping to the first.
    fn next(self) -> Self {
        let all = Self::ALL;
        let idx = all.iter().position(|&v| v == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// The variant before this one, wrapping to the last.
    fn prev(self) -> Self {
        let all = Self::ALL;
        let idx = all.iter().position(|&v| v == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

/// How a token image is cropped when drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageShape {
    Original,
    Circular,
}

impl Cyclic for ImageShape {
    const ALL: &'static [Self] = &[ImageShape::Original, ImageShape::Circular];
}

impl ImageShape {
    pub fn name(&self) -> &'static str {
        match self {
            ImageShape::Original => "original",
            ImageShape::Circular => "circular",
        }
    }
}

/// Condition of a creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatureStatus {
    Alive,
    Sleep,
    Dead,
}

impl Cyclic for CreatureStatus {
    const ALL: &'static [Self] = &[
        CreatureStatus::Alive,
        CreatureStatus::Sleep,
        CreatureStatus::Dead,
    ];
}

impl CreatureStatus {
    pub fn name(&self) -> &'static str {
        match self {
            CreatureStatus::Alive => "alive",
            CreatureStatus::Sleep => "sleep",
            CreatureStatus::Dead => "dead",
        }
    }
}

/// Side a creature fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatureTeam {
    None,
    Ally,
    Enemy,
}

impl Cyclic for CreatureTeam {
    const ALL: &'static [Self] = &[
        CreatureTeam::None,
        CreatureTeam::Ally,
        CreatureTeam::Enemy,
    ];
}

impl CreatureTeam {
    pub fn name(&self) -> &'static str {
        match self {
            CreatureTeam::None => "none",
            CreatureTeam::Ally => "ally",
            CreatureTeam::Enemy => "enemy",
        }
    }
}

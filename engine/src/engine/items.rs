// engine/src/engine/items.rs
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::engine::geometry::Cell;

/// One collectible category: a recycling material worth `points`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TrashKind {
    pub name: String,
    pub points: u32,
    /// Board glyph; defaults to the upper-cased first letter of `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyph: Option<char>,
}

impl TrashKind {
    pub fn new(name: impl Into<String>, points: u32, glyph: char) -> Self {
        Self {
            name: name.into(),
            points,
            glyph: Some(glyph),
        }
    }

    pub fn glyph(&self) -> char {
        self.glyph
            .or_else(|| self.name.chars().next().map(|c| c.to_ascii_uppercase()))
            .unwrap_or('*')
    }

    /// The four materials of the arcade game.
    pub fn defaults() -> Vec<TrashKind> {
        vec![
            TrashKind::new("plastic", 10, 'B'),
            TrashKind::new("paper", 5, 'P'),
            TrashKind::new("metal", 15, 'C'),
            TrashKind::new("glass", 20, 'G'),
        ]
    }
}

/// The single active reward item.
///
/// `kind` indexes the configured category list; `points` is copied at placement time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Item {
    pub cell: Cell,
    pub kind: usize,
    pub points: u32,
}

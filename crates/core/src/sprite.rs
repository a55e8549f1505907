//! Text-art sprites.
//!
//! A sprite file is plain text: each line is one row, spaces are transparent.
//! The bounding box (longest row × row count) is the collision shape of the
//! entity drawn with it.

use std::fs;
use std::path::Path;

use crate::config::ObjectsConfig;
use crate::error::AssetError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    rows: Vec<Vec<char>>,
    width: u16,
}

impl Sprite {
    /// Parse sprite text. Trailing blank lines are dropped; `None` if nothing
    /// visible remains.
    pub fn parse(text: &str) -> Option<Self> {
        let mut rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.trim_end().chars().collect())
            .collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        while rows.first().is_some_and(|r| r.is_empty()) {
            rows.remove(0);
        }
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return None;
        }
        Some(Self {
            rows,
            width: width.min(u16::MAX as usize) as u16,
        })
    }

    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let text = fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).ok_or_else(|| AssetError::Empty {
            path: path.to_path_buf(),
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.rows.len().min(u16::MAX as usize) as u16
    }

    /// Visible glyph at `(x, y)`, `None` for transparent or out of bounds.
    pub fn glyph(&self, x: u16, y: u16) -> Option<char> {
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .filter(|ch| *ch != ' ')
    }
}

/// Sprites the game needs, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Assets {
    pub pumpkin: Sprite,
    pub victim: Sprite,
    pub reward: Sprite,
}

impl Assets {
    pub fn load(objects: &ObjectsConfig) -> Result<Self, AssetError> {
        let assets = Self {
            pumpkin: Sprite::load(&objects.pumpkin_image)?,
            victim: Sprite::load(&objects.victim_image)?,
            reward: Sprite::load(&objects.reward_image)?,
        };
        log::debug!(
            "sprites loaded: pumpkin {}x{}, victim {}x{}",
            assets.pumpkin.width(),
            assets.pumpkin.height(),
            assets.victim.width(),
            assets.victim.height()
        );
        Ok(assets)
    }
}

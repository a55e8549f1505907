//! Text rendering for titles and prompts.
//!
//! A banner font file holds multi-row glyphs:
//!
//! ```text
//! :A
//!  _
//! |_|
//! | |
//! :B
//! ...
//! ```
//!
//! A line `:X` starts the glyph for `X`; the lines after it are its rows.
//! Lines before the first header are ignored. Every glyph is padded to the
//! tallest one, which is the banner height.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::AssetError;
use crate::fb::TextArt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerFont {
    height: u16,
    glyphs: HashMap<char, Vec<Vec<char>>>,
}

impl BannerFont {
    pub fn parse(text: &str) -> Option<Self> {
        let mut glyphs: HashMap<char, Vec<Vec<char>>> = HashMap::new();
        let mut current: Option<char> = None;

        for line in text.lines() {
            let mut chars = line.chars();
            if let (Some(':'), Some(ch), None) = (chars.next(), chars.next(), chars.next()) {
                glyphs.entry(ch).or_default();
                current = Some(ch);
                continue;
            }
            if let Some(ch) = current {
                glyphs
                    .entry(ch)
                    .or_default()
                    .push(line.trim_end().chars().collect());
            }
        }

        for rows in glyphs.values_mut() {
            while rows.last().is_some_and(|r| r.is_empty()) {
                rows.pop();
            }
        }
        let height = glyphs.values().map(Vec::len).max().unwrap_or(0);
        if height == 0 {
            return None;
        }
        for rows in glyphs.values_mut() {
            let width = rows.iter().map(Vec::len).max().unwrap_or(0);
            rows.resize(height, Vec::new());
            for row in rows.iter_mut() {
                row.resize(width, ' ');
            }
        }

        Some(Self {
            height: height.min(u16::MAX as usize) as u16,
            glyphs,
        })
    }

    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let text = fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Self::parse(&text).ok_or_else(|| AssetError::Empty {
            path: path.to_path_buf(),
        })?;
        log::debug!(
            "banner font {}: {} glyphs, {} rows",
            path.display(),
            font.glyphs.len(),
            font.height
        );
        Ok(font)
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn glyph(&self, ch: char) -> Option<&Vec<Vec<char>>> {
        self.glyphs
            .get(&ch)
            .or_else(|| self.glyphs.get(&ch.to_ascii_uppercase()))
    }
}

/// One emphasis tier (big, regular, small), sized in terminal rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    pub size: u16,
}

impl Font {
    pub fn new(size: u16) -> Self {
        Self { size }
    }

    /// Banner glyphs when the tier is tall enough for them, otherwise one
    /// plain line.
    pub fn render(&self, banner: &BannerFont, text: &str) -> TextImage {
        if self.size >= banner.height() {
            TextImage::banner(banner, text)
        } else {
            TextImage::line(text)
        }
    }

    pub fn is_banner(&self, banner: &BannerFont) -> bool {
        self.size >= banner.height()
    }
}

/// Rendered text, ready to blit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextImage {
    rows: Vec<Vec<char>>,
    width: u16,
}

impl TextImage {
    pub fn line(text: &str) -> Self {
        let row: Vec<char> = text.chars().collect();
        Self {
            width: row.len().min(u16::MAX as usize) as u16,
            rows: vec![row],
        }
    }

    /// Glyphs side by side with one blank column between them. A character
    /// without a glyph is drawn as itself on the bottom row.
    pub fn banner(font: &BannerFont, text: &str) -> Self {
        let height = font.height() as usize;
        let mut rows: Vec<Vec<char>> = vec![Vec::new(); height];

        for (i, ch) in text.chars().enumerate() {
            if i > 0 {
                rows.iter_mut().for_each(|r| r.push(' '));
            }
            match font.glyph(ch) {
                Some(glyph) => {
                    for (row, src) in rows.iter_mut().zip(glyph) {
                        row.extend_from_slice(src);
                    }
                }
                None => {
                    for (y, row) in rows.iter_mut().enumerate() {
                        row.push(if y + 1 == height { ch } else { ' ' });
                    }
                }
            }
        }

        let width = rows.first().map(Vec::len).unwrap_or(0);
        Self {
            rows,
            width: width.min(u16::MAX as usize) as u16,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.rows.len() as u16
    }
}

impl TextArt for TextImage {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height())
    }

    fn glyph_at(&self, x: u16, y: u16) -> Option<char> {
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .filter(|ch| *ch != ' ')
    }
}

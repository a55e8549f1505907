//! Framebuffer and style types for terminal rendering.

use crate::core::Sprite;
pub use crate::types::Rgb;

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// Anything drawn as a grid of glyphs with transparent holes.
pub trait TextArt {
    fn size(&self) -> (u16, u16);

    /// Visible glyph at `(x, y)`, `None` where the art is transparent.
    fn glyph_at(&self, x: u16, y: u16) -> Option<char>;
}

impl TextArt for Sprite {
    fn size(&self) -> (u16, u16) {
        (self.width(), self.height())
    }

    fn glyph_at(&self, x: u16, y: u16) -> Option<char> {
        self.glyph(x, y)
    }
}

/// Screen-space rectangle in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl ClipRect {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Draw `art` with its top-left corner at `(x, y)`. Signed coordinates
    /// let art hang off any edge; off-screen glyphs are clipped.
    pub fn blit(&mut self, x: i32, y: i32, art: &impl TextArt, style: CellStyle) {
        let bounds = ClipRect::new(0, 0, self.width, self.height);
        self.blit_clipped(x, y, art, style, bounds);
    }

    /// Like [`blit`](Self::blit) but only cells inside `clip` are touched.
    pub fn blit_clipped(
        &mut self,
        x: i32,
        y: i32,
        art: &impl TextArt,
        style: CellStyle,
        clip: ClipRect,
    ) {
        let x0 = clip.x as i32;
        let y0 = clip.y as i32;
        let x1 = (clip.x as i32 + clip.w as i32).min(self.width as i32);
        let y1 = (clip.y as i32 + clip.h as i32).min(self.height as i32);
        let (w, h) = art.size();
        for dy in 0..h {
            let py = y + dy as i32;
            if py < y0 || py >= y1 {
                continue;
            }
            for dx in 0..w {
                let px = x + dx as i32;
                if px < x0 || px >= x1 {
                    continue;
                }
                if let Some(ch) = art.glyph_at(dx, dy) {
                    self.put_char(px as u16, py as u16, ch, style);
                }
            }
        }
    }

    /// Row `y` as a string, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y).map(|c| c.ch))
            .collect()
    }
}

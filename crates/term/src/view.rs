//! StageView: maps a `core::Scene` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Text placement follows two anchors around the playfield center: titles sit
//! with their bottom edge `textOffset` rows above it, prompts hang with their
//! top edge `textOffset` rows below it.

use crate::core::stage::Stage;
use crate::core::{Level, LevelStatus, Scene};
use crate::fb::{CellStyle, ClipRect, FrameBuffer, Rgb, TextArt};
use crate::font::{BannerFont, Font, TextImage};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the playfield lands on screen. A border is drawn around it when the
/// viewport has room for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldArea {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
    pub framed: bool,
}

impl FieldArea {
    pub fn place(field_w: u16, field_h: u16, viewport: Viewport) -> Self {
        let framed = viewport.width >= field_w.saturating_add(2)
            && viewport.height >= field_h.saturating_add(2);
        let inset = u16::from(framed);
        let outer_w = field_w + 2 * inset;
        let outer_h = field_h + 2 * inset;
        Self {
            x: viewport.width.saturating_sub(outer_w) / 2 + inset,
            y: viewport.height.saturating_sub(outer_h) / 2 + inset,
            w: field_w.min(viewport.width),
            h: field_h.min(viewport.height),
            framed,
        }
    }

    fn clip(&self) -> ClipRect {
        ClipRect::new(self.x, self.y, self.w, self.h)
    }

    fn center_x(&self) -> i32 {
        self.x as i32 + self.w as i32 / 2
    }

    fn center_y(&self) -> i32 {
        self.y as i32 + self.h as i32 / 2
    }

    fn bottom(&self) -> i32 {
        self.y as i32 + self.h as i32
    }
}

struct Palette {
    field: CellStyle,
    title: CellStyle,
    border: CellStyle,
    hazard: CellStyle,
}

impl Palette {
    fn from_theme(background: Rgb, text: Rgb) -> Self {
        let field = CellStyle::new(text, background);
        Self {
            field,
            title: CellStyle { bold: true, ..field },
            border: CellStyle::new(text, Rgb::new(0, 0, 0)),
            hazard: CellStyle {
                fg: Rgb::new(255, 140, 0),
                bold: true,
                ..field
            },
        }
    }
}

struct Fonts {
    big: Font,
    regular: Font,
    small: Font,
}

pub struct StageView {
    banner: BannerFont,
}

impl StageView {
    pub fn new(banner: BannerFont) -> Self {
        Self { banner }
    }

    pub fn banner(&self) -> &BannerFont {
        &self.banner
    }

    /// Render the scene into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when
    /// the terminal size changes.
    pub fn render_into(&self, scene: &Scene<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let theme = &scene.config.theme;
        let palette = Palette::from_theme(theme.background_color, theme.text_color);
        let fonts = Fonts {
            big: Font::new(theme.big_font_size),
            regular: Font::new(theme.font_size),
            small: Font::new(theme.small_font_size),
        };
        let offset = scene.config.screen.text_offset as i32;

        let area = FieldArea::place(
            scene.field.width as u16,
            scene.field.height as u16,
            viewport,
        );
        fb.fill_rect(area.x, area.y, area.w, area.h, ' ', palette.field);
        if area.framed {
            draw_border(fb, area.x - 1, area.y - 1, area.w + 2, area.h + 2, palette.border);
        }

        match scene.stage {
            Stage::Startup(_) => {
                let title = self.text(fonts.big, &scene.config.game.name, area.w);
                place_mid_bottom(fb, &area, &title, area.center_y() - offset, palette.title);
                let hint = self.text(fonts.regular, "Press Enter to Start", area.w);
                place_mid_top(fb, &area, &hint, area.center_y() + offset, palette.field);
                let info = format!("Copyright (c) {}", scene.config.game.developer);
                let info = self.text(fonts.small, &info, area.w);
                place_mid_bottom(fb, &area, &info, area.bottom(), palette.field);
            }
            Stage::LevelPreparation(prep) => {
                let title = self.text(fonts.big, &format!("Level {}", prep.level()), area.w);
                place_mid_bottom(fb, &area, &title, area.center_y() - offset, palette.title);
                let count = self.text(fonts.big, &prep.countdown().to_string(), area.w);
                place_mid_top(fb, &area, &count, area.center_y() + offset, palette.field);
            }
            Stage::Level(level) => self.draw_level(fb, &area, scene, level, &fonts, &palette, offset),
            Stage::Paused(_) => {
                let title = self.text(fonts.big, "Paused", area.w);
                place_mid_bottom(fb, &area, &title, area.center_y() - offset, palette.title);
                let text = self.text(fonts.regular, "Press Any Key to Resume...", area.w);
                place_mid_top(fb, &area, &text, area.center_y() + offset, palette.field);
            }
            Stage::GameEnd(_) => {
                let title = self.text(fonts.big, "Congratulations!", area.w);
                place_mid_bottom(fb, &area, &title, area.center_y() - offset, palette.title);
                place_mid_top(
                    fb,
                    &area,
                    &scene.assets.reward,
                    area.center_y() + offset,
                    palette.hazard,
                );
                let hint = self.text(fonts.small, "Click to Play Again", area.w);
                place_mid_bottom(fb, &area, &hint, area.bottom(), palette.field);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, scene: &Scene<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(scene, viewport, &mut fb);
        fb
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_level(
        &self,
        fb: &mut FrameBuffer,
        area: &FieldArea,
        scene: &Scene<'_>,
        level: &Level,
        fonts: &Fonts,
        palette: &Palette,
        offset: i32,
    ) {
        let dim = CellStyle { dim: true, ..palette.field };
        fb.put_str(area.x, area.y, &format!("Level {}", level.number()), dim);
        let left = format!("Pumpkins {}", level.pumpkins_left());
        let left_x = (area.x + area.w).saturating_sub(left.chars().count() as u16);
        fb.put_str(left_x, area.y, &left, dim);

        let clip = area.clip();
        for hazard in level.hazards() {
            fb.blit_clipped(
                area.x as i32 + hazard.rect.x.floor() as i32,
                area.y as i32 + hazard.rect.y.floor() as i32,
                &scene.assets.pumpkin,
                palette.hazard,
                clip,
            );
        }
        let avatar = level.avatar();
        fb.blit_clipped(
            area.x as i32 + avatar.rect.x.floor() as i32,
            area.y as i32 + avatar.rect.y.floor() as i32,
            &scene.assets.victim,
            palette.title,
            clip,
        );

        let (title, prompt) = match level.status() {
            LevelStatus::Playing => return,
            LevelStatus::Cleared => ("Level cleared", "Click to Continue"),
            LevelStatus::Failed => ("You lost", "Click to Try Again"),
        };
        let title = self.text(fonts.big, title, area.w);
        place_mid_bottom(fb, area, &title, area.center_y() - offset, palette.title);
        let prompt = self.text(fonts.regular, prompt, area.w);
        place_mid_top(fb, area, &prompt, area.center_y() + offset, palette.field);
    }

    /// Render with `font`, dropping to a plain line when banner glyphs would
    /// not fit across the playfield.
    fn text(&self, font: Font, s: &str, max_w: u16) -> TextImage {
        let img = font.render(&self.banner, s);
        if img.width() > max_w && img.height() > 1 {
            TextImage::line(s)
        } else {
            img
        }
    }
}

fn place_mid_bottom(
    fb: &mut FrameBuffer,
    area: &FieldArea,
    art: &impl TextArt,
    bottom: i32,
    style: CellStyle,
) {
    let (_, h) = art.size();
    place_mid_top(fb, area, art, bottom - h as i32, style);
}

fn place_mid_top(fb: &mut FrameBuffer, area: &FieldArea, art: &impl TextArt, top: i32, style: CellStyle) {
    let (w, _) = art.size();
    let x = area.center_x() - w as i32 / 2;
    fb.blit_clipped(x, top, art, style, area.clip());
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{InputEvent, TimerId, Transition};
    use crate::core::{Assets, Game, GameConfig, Playfield, Sprite};
    use crate::font::tests::tiny;
    use std::path::Path;

    const CONFIG: &str = r#"{
        "screen": { "size": [30, 12], "fullscreen": false, "textOffset": 1 },
        "theme": {
            "backgroundColor": [0, 0, 40],
            "textColor": [240, 240, 240],
            "fontLocation": "banner.txt",
            "bigFontSize": 2,
            "smallFontSize": 1,
            "fontSize": 1
        },
        "game": { "name": "Squash", "version": "1.0", "developer": "Pumpkin Works" },
        "control": {
            "preparation": 3, "pumpkinAmount": 2, "initialSpeed": 1.0,
            "acceleration": 0.5, "victimSpeed": 1.0, "victimAcceleration": 0.0,
            "interval": 500, "positionOffset": 0, "levelCount": 2
        },
        "objects": {
            "pumpkinImage": "pumpkin.txt",
            "victimImage": "victim.txt",
            "rewardImage": "reward.txt",
            "database": "save.json"
        }
    }"#;

    fn game() -> Game {
        let config = GameConfig::from_json_str(CONFIG, Path::new("/game")).unwrap();
        let assets = Assets {
            pumpkin: Sprite::parse(" _ \n(@)").unwrap(),
            victim: Sprite::parse("\\o/\n | ").unwrap(),
            reward: Sprite::parse("<*>").unwrap(),
        };
        Game::new(config, assets, Playfield::new(30, 12), 1, 9)
    }

    fn screen(game: &Game, viewport: Viewport) -> Vec<String> {
        let view = StageView::new(tiny());
        let fb = view.render(&game.scene(), viewport);
        (0..fb.height()).map(|y| fb.row_text(y)).collect()
    }

    fn contains(rows: &[String], needle: &str) -> bool {
        rows.iter().any(|r| r.contains(needle))
    }

    #[test]
    fn test_field_is_centered_and_framed_when_it_fits() {
        let area = FieldArea::place(30, 12, Viewport::new(40, 20));
        assert_eq!(area, FieldArea { x: 5, y: 4, w: 30, h: 12, framed: true });

        let tight = FieldArea::place(30, 12, Viewport::new(30, 12));
        assert_eq!(tight, FieldArea { x: 0, y: 0, w: 30, h: 12, framed: false });
    }

    #[test]
    fn test_startup_screen() {
        let rows = screen(&game(), Viewport::new(32, 14));
        assert!(rows[0].starts_with('┌'));
        assert!(contains(&rows, "Copyright (c) Pumpkin Works"));
        assert!(contains(&rows, "Press Enter to Start"));
        // Only `h` has a banner glyph; the rest fall back to plain characters.
        assert!(contains(&rows, "S q u a s | |"));
    }

    #[test]
    fn test_preparation_shows_level_and_countdown() {
        let mut g = game();
        g.apply_transition(Transition::StartGame).unwrap();
        let rows = screen(&g, Viewport::new(32, 14));
        assert!(contains(&rows, "L e v e l   1"));
        assert!(contains(&rows, "3"));
    }

    #[test]
    fn test_level_draws_avatar_on_bottom_row() {
        let mut g = game();
        g.apply_transition(Transition::Prepared).unwrap();
        let view = StageView::new(tiny());
        let fb = view.render(&g.scene(), Viewport::new(32, 14));
        // Field origin (1, 1); avatar at x = 13, y = 10.
        assert_eq!(fb.get(14, 11).map(|c| c.ch), Some('\\'));
        assert_eq!(fb.get(15, 11).map(|c| c.ch), Some('o'));
        assert_eq!(fb.get(15, 12).map(|c| c.ch), Some('|'));
        assert!(fb.row_text(1).contains("Level 1"));
        assert!(fb.row_text(1).contains("Pumpkins 2"));
    }

    #[test]
    fn test_level_draws_spawned_hazard() {
        let mut g = game();
        g.apply_transition(Transition::Prepared).unwrap();
        let mut events = vec![InputEvent::TimerTick(TimerId::Spawn)];
        g.process_frame(&mut events, 0).unwrap();
        let rows = screen(&g, Viewport::new(32, 14));
        assert!(contains(&rows, "(@)"));
        assert!(contains(&rows, "Pumpkins 1"));
    }

    #[test]
    fn test_paused_overlay() {
        let mut g = game();
        g.apply_transition(Transition::Prepared).unwrap();
        g.apply_transition(Transition::Pause).unwrap();
        let rows = screen(&g, Viewport::new(32, 14));
        assert!(contains(&rows, "Press Any Key to Resume..."));
    }

    #[test]
    fn test_game_end_shows_reward() {
        let mut g = game();
        g.apply_transition(Transition::NextLevel).unwrap();
        g.apply_transition(Transition::NextLevel).unwrap();
        let rows = screen(&g, Viewport::new(32, 14));
        assert!(contains(&rows, "<*>"));
        assert!(contains(&rows, "Click to Play Again"));
    }

    #[test]
    fn test_wide_banner_falls_back_to_plain_line() {
        let view = StageView::new(tiny());
        let img = view.text(Font::new(2), "Congratulations!", 10);
        assert_eq!(img.height(), 1);
        assert_eq!(img.width(), 16);
    }
}

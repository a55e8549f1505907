//! Typed game configuration.
//!
//! The configuration is a JSON document read once at startup. Every key is
//! parsed explicitly into [`GameConfig`]; lookups never happen lazily during
//! play. All missing or malformed keys are collected and reported together in
//! [`ConfigError::Invalid`].
//!
//! ```
//! use std::path::Path;
//! use tui_squash_core::config::GameConfig;
//!
//! let err = GameConfig::from_json_str("{}", Path::new(".")).unwrap_err();
//! assert!(err.to_string().contains("missing key `screen.size`"));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ConfigError, ConfigProblem};
use crate::types::Rgb;

/// `screen` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenConfig {
    /// Playfield size in terminal cells (width, height).
    pub size: (u16, u16),
    /// Use the whole terminal as the playfield.
    pub fullscreen: bool,
    /// Vertical gap (rows) between a title and the text around it.
    pub text_offset: u16,
}

/// `theme` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeConfig {
    pub background_color: Rgb,
    pub text_color: Rgb,
    /// Banner glyph file.
    pub font_location: PathBuf,
    pub big_font_size: u16,
    pub small_font_size: u16,
    pub font_size: u16,
}

/// `game` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInfo {
    pub name: String,
    pub version: String,
    pub developer: String,
}

impl GameInfo {
    /// Terminal window title.
    pub fn title(&self) -> String {
        format!("{} version {}", self.name, self.version)
    }
}

/// `control` section: gameplay tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlConfig {
    /// Countdown start value before each level.
    pub preparation: u32,
    /// Hazards spawned per level.
    pub pumpkin_amount: u32,
    /// Hazard fall speed at level 1 (cells per frame).
    pub initial_speed: f32,
    /// Hazard speed gained per level.
    pub acceleration: f32,
    /// Avatar speed at level 1 (cells per frame).
    pub victim_speed: f32,
    /// Avatar speed gained per level.
    pub victim_acceleration: f32,
    /// Milliseconds between two hazard spawns.
    pub interval_ms: u32,
    /// Half-width of the spawn band around the avatar.
    pub position_offset: f32,
    pub level_count: u32,
}

impl ControlConfig {
    /// Hazard fall speed for a 1-based level.
    pub fn pumpkin_speed_for(&self, level: u32) -> f32 {
        self.initial_speed + level.saturating_sub(1) as f32 * self.acceleration
    }

    /// Avatar horizontal speed for a 1-based level.
    pub fn victim_speed_for(&self, level: u32) -> f32 {
        self.victim_speed + level.saturating_sub(1) as f32 * self.victim_acceleration
    }
}

/// `objects` section: asset and save paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectsConfig {
    pub pumpkin_image: PathBuf,
    pub victim_image: PathBuf,
    pub reward_image: PathBuf,
    pub database: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub theme: ThemeConfig,
    pub game: GameInfo,
    pub control: ControlConfig,
    pub objects: ObjectsConfig,
}

impl GameConfig {
    /// Read and parse a config file. Relative paths inside it resolve against
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let config = Self::from_json_str(&text, base_dir)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json_str(text: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let root: Value = serde_json::from_str(text)?;
        Self::from_value(&root, base_dir)
    }

    pub fn from_value(root: &Value, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut r = Reader::new(root, base_dir);

        let screen = ScreenConfig {
            size: r.size("screen.size"),
            fullscreen: r.boolean("screen.fullscreen"),
            text_offset: r.uint16("screen.textOffset"),
        };
        let theme = ThemeConfig {
            background_color: r.color("theme.backgroundColor"),
            text_color: r.color("theme.textColor"),
            font_location: r.path("theme.fontLocation"),
            big_font_size: r.positive16("theme.bigFontSize"),
            small_font_size: r.positive16("theme.smallFontSize"),
            font_size: r.positive16("theme.fontSize"),
        };
        let game = GameInfo {
            name: r.string("game.name"),
            version: r.string("game.version"),
            developer: r.string("game.developer"),
        };
        let control = ControlConfig {
            preparation: r.positive("control.preparation"),
            pumpkin_amount: r.uint("control.pumpkinAmount"),
            initial_speed: r.speed("control.initialSpeed"),
            acceleration: r.speed("control.acceleration"),
            victim_speed: r.speed("control.victimSpeed"),
            victim_acceleration: r.speed("control.victimAcceleration"),
            interval_ms: r.positive("control.interval"),
            position_offset: r.speed("control.positionOffset"),
            level_count: r.positive("control.levelCount"),
        };
        let objects = ObjectsConfig {
            pumpkin_image: r.path("objects.pumpkinImage"),
            victim_image: r.path("objects.victimImage"),
            reward_image: r.path("objects.rewardImage"),
            database: r.path("objects.database"),
        };

        r.finish()?;
        Ok(Self {
            screen,
            theme,
            game,
            control,
            objects,
        })
    }
}

/// Field-by-field reader that records problems instead of stopping at the
/// first one. Accessors return a placeholder when the key is unusable.
struct Reader<'a> {
    root: &'a Value,
    base_dir: &'a Path,
    problems: Vec<ConfigProblem>,
}

impl<'a> Reader<'a> {
    fn new(root: &'a Value, base_dir: &'a Path) -> Self {
        Self {
            root,
            base_dir,
            problems: Vec::new(),
        }
    }

    fn finish(self) -> Result<(), ConfigError> {
        if self.problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(self.problems))
        }
    }

    fn lookup(&mut self, key: &'static str) -> Option<&'a Value> {
        let mut node = self.root;
        for part in key.split('.') {
            match node.get(part) {
                Some(next) => node = next,
                None => {
                    self.problems.push(ConfigProblem::Missing { key });
                    return None;
                }
            }
        }
        Some(node)
    }

    fn invalid(&mut self, key: &'static str, expected: &'static str) {
        self.problems.push(ConfigProblem::Invalid { key, expected });
    }

    fn string(&mut self, key: &'static str) -> String {
        match self.lookup(key) {
            Some(Value::String(s)) => s.clone(),
            // Version numbers are often written as bare numbers.
            Some(Value::Number(n)) => n.to_string(),
            Some(_) => {
                self.invalid(key, "string");
                String::new()
            }
            None => String::new(),
        }
    }

    fn boolean(&mut self, key: &'static str) -> bool {
        match self.lookup(key) {
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                self.invalid(key, "boolean");
                false
            }
            None => false,
        }
    }

    fn uint(&mut self, key: &'static str) -> u32 {
        match self.lookup(key).map(|v| v.as_u64()) {
            Some(Some(n)) if n <= u32::MAX as u64 => n as u32,
            Some(_) => {
                self.invalid(key, "non-negative integer");
                0
            }
            None => 0,
        }
    }

    fn positive(&mut self, key: &'static str) -> u32 {
        match self.lookup(key).map(|v| v.as_u64()) {
            Some(Some(n)) if n > 0 && n <= u32::MAX as u64 => n as u32,
            Some(_) => {
                self.invalid(key, "positive integer");
                1
            }
            None => 1,
        }
    }

    fn uint16(&mut self, key: &'static str) -> u16 {
        match self.lookup(key).map(|v| v.as_u64()) {
            Some(Some(n)) if n <= u16::MAX as u64 => n as u16,
            Some(_) => {
                self.invalid(key, "integer in 0..=65535");
                0
            }
            None => 0,
        }
    }

    fn positive16(&mut self, key: &'static str) -> u16 {
        match self.lookup(key).map(|v| v.as_u64()) {
            Some(Some(n)) if (1..=u16::MAX as u64).contains(&n) => n as u16,
            Some(_) => {
                self.invalid(key, "integer in 1..=65535");
                1
            }
            None => 1,
        }
    }

    fn speed(&mut self, key: &'static str) -> f32 {
        match self.lookup(key).map(|v| v.as_f64()) {
            Some(Some(n)) if n.is_finite() && n >= 0.0 => n as f32,
            Some(_) => {
                self.invalid(key, "non-negative number");
                0.0
            }
            None => 0.0,
        }
    }

    fn size(&mut self, key: &'static str) -> (u16, u16) {
        let Some(value) = self.lookup(key) else {
            return (1, 1);
        };
        match pair_of(value, |n| (1..=u16::MAX as u64).contains(&n)) {
            Some([w, h]) => (w as u16, h as u16),
            None => {
                self.invalid(key, "[width, height] of positive integers");
                (1, 1)
            }
        }
    }

    fn color(&mut self, key: &'static str) -> Rgb {
        let Some(value) = self.lookup(key) else {
            return Rgb::default();
        };
        let channels = value.as_array().filter(|a| a.len() == 3).and_then(|a| {
            let mut out = [0u8; 3];
            for (slot, v) in out.iter_mut().zip(a) {
                *slot = u8::try_from(v.as_u64()?).ok()?;
            }
            Some(out)
        });
        match channels {
            Some([r, g, b]) => Rgb::new(r, g, b),
            None => {
                self.invalid(key, "[r, g, b] with channels 0-255");
                Rgb::default()
            }
        }
    }

    fn path(&mut self, key: &'static str) -> PathBuf {
        match self.lookup(key) {
            Some(Value::String(s)) if !s.is_empty() => {
                let p = PathBuf::from(s);
                if p.is_absolute() {
                    p
                } else {
                    self.base_dir.join(p)
                }
            }
            Some(_) => {
                self.invalid(key, "non-empty path string");
                PathBuf::new()
            }
            None => PathBuf::new(),
        }
    }
}

fn pair_of(value: &Value, accept: impl Fn(u64) -> bool) -> Option<[u64; 2]> {
    let items = value.as_array().filter(|a| a.len() == 2)?;
    let a = items[0].as_u64().filter(|n| accept(*n))?;
    let b = items[1].as_u64().filter(|n| accept(*n))?;
    Some([a, b])
}

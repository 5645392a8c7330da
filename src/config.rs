use crate::grid::Board;
use anyhow::{Context, ensure};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "SNAKE_CONFIG";

pub type Rgba = [u8; 4];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgba,
    pub food: Rgba,
    pub head: Rgba,
    pub body: Rgba,
    /// Painted once over the board on game over.
    pub overlay: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [0, 100, 0, 255],
            food: [255, 165, 0, 255],
            head: [139, 0, 0, 255],
            body: [255, 255, 255, 255],
            overlay: [0, 0, 0, 85],
        }
    }
}

/// Settings for one play session
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Framebuffer width in pixels
    pub canvas_width: u32,
    /// Framebuffer height in pixels
    pub canvas_height: u32,
    /// Edge length of one square board cell in pixels
    pub tile_size: u32,
    pub tick_interval_ms: u64,
    pub clock_interval_ms: u64,
    /// Re-draw food positions that land on the snake
    pub reroll_food_on_snake: bool,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_width: 640,
            canvas_height: 480,
            tile_size: 32,
            tick_interval_ms: 100,
            clock_interval_ms: 1000,
            reroll_food_on_snake: false,
            seed: None,
            palette: Palette::default(),
        }
    }
}

impl Config {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: Config = serde_json::from_str(text).context("malformed config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("loading config file {}", path.display()))
    }

    /// Loads the file named by `SNAKE_CONFIG`, or the defaults when it is unset.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.tile_size > 0, "tile_size must be positive");
        ensure!(
            self.canvas_width % self.tile_size == 0,
            "canvas_width {} is not a multiple of tile_size {}",
            self.canvas_width,
            self.tile_size
        );
        ensure!(
            self.canvas_height % self.tile_size == 0,
            "canvas_height {} is not a multiple of tile_size {}",
            self.canvas_height,
            self.tile_size
        );
        let board = self.board();
        ensure!(
            board.width >= 2 && board.height >= 2,
            "board of {}x{} cells is too small",
            board.width,
            board.height
        );
        ensure!(self.tick_interval_ms > 0, "tick_interval_ms must be positive");
        ensure!(self.clock_interval_ms > 0, "clock_interval_ms must be positive");
        Ok(())
    }

    pub fn board(&self) -> Board {
        Board::new(
            (self.canvas_width / self.tile_size) as i32,
            (self.canvas_height / self.tile_size) as i32,
        )
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_give_a_20_by_15_board() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.board(), Board::new(20, 15));
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.clock_interval(), Duration::from_secs(1));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "tile_size": 16, "seed": 7 }"#).unwrap();
        assert_eq!(config.board(), Board::new(40, 30));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.palette, Palette::default());
        assert!(!config.reroll_food_on_snake);
    }

    #[test]
    fn palette_override() {
        let config = Config::from_json(r#"{ "palette": { "food": [1, 2, 3, 255] } }"#).unwrap();
        assert_eq!(config.palette.food, [1, 2, 3, 255]);
        assert_eq!(config.palette.head, Palette::default().head);
    }

    #[test]
    fn rejects_canvas_not_divisible_by_tile() {
        let err = Config::from_json(r#"{ "canvas_width": 650 }"#).unwrap_err();
        assert!(err.to_string().contains("canvas_width"));
    }

    #[test]
    fn rejects_degenerate_values() {
        assert!(Config::from_json(r#"{ "tile_size": 0 }"#).is_err());
        assert!(Config::from_json(r#"{ "tick_interval_ms": 0 }"#).is_err());
        assert!(Config::from_json(r#"{ "canvas_width": 32, "canvas_height": 32 }"#).is_err());
        assert!(Config::from_json("not json").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(Path::new("/nonexistent/snake.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/snake.json"));
    }
}

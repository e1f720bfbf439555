pub mod loader;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::components::{Position, RenderStyle, Rgb};
use crate::game;

pub use loader::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub render: RenderConfig,
    pub host: HostConfig,
}

// Board and gravity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub cols: usize,
    pub rows: usize,
    pub spawn_column: i32,
    pub spawn_row: i32,
    pub drop_interval_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cols: game::BOARD_WIDTH,
            rows: game::BOARD_HEIGHT,
            spawn_column: game::SPAWN_COLUMN,
            spawn_row: game::SPAWN_ROW,
            drop_interval_ms: game::DROP_INTERVAL_MS,
            seed: None,
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        Duration::from_millis(self.drop_interval_ms)
    }

    #[must_use]
    pub fn spawn(&self) -> Position {
        Position::new(self.spawn_column, self.spawn_row)
    }
}

// Block styling and layout, in surface pixels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub board_padding: u32,
    pub default_block_size: u32,
    pub background: Rgb,
    pub outline: Rgb,
    pub line_width: u32,
    pub glow_blur: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            board_padding: game::BOARD_PADDING,
            default_block_size: game::DEFAULT_BLOCK_SIZE,
            background: game::BACKGROUND,
            outline: game::OUTLINE,
            line_width: game::OUTLINE_WIDTH,
            glow_blur: game::GLOW_BLUR,
        }
    }
}

impl RenderConfig {
    #[must_use]
    pub fn style(&self) -> RenderStyle {
        RenderStyle {
            background: self.background,
            outline: self.outline,
            line_width: self.line_width,
            glow_blur: self.glow_blur,
            board_padding: self.board_padding,
        }
    }
}

// Terminal host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub frame_interval_ms: u64,
    pub log_file: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: game::FRAME_INTERVAL_MS,
            log_file: "neonfall.log".to_string(),
        }
    }
}

impl HostConfig {
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

impl Config {
    /// Rejects settings the simulator cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;

        if sim.cols == 0 {
            return Err(ConfigError::Invalid("simulation.cols must be at least 1".into()));
        }
        if sim.rows < game::MAX_SHAPE_WIDTH {
            return Err(ConfigError::Invalid(format!(
                "simulation.rows must be at least {}",
                game::MAX_SHAPE_WIDTH
            )));
        }
        if sim.drop_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "simulation.drop_interval_ms must be positive".into(),
            ));
        }

        let fits = usize::try_from(sim.spawn_column)
            .is_ok_and(|col| col + game::MAX_SHAPE_WIDTH <= sim.cols);
        if !fits {
            return Err(ConfigError::Invalid(format!(
                "simulation.spawn_column {} leaves no room for a {}-wide piece in {} columns",
                sim.spawn_column,
                game::MAX_SHAPE_WIDTH,
                sim.cols
            )));
        }
        let fits = usize::try_from(sim.spawn_row)
            .is_ok_and(|row| row + game::MAX_SHAPE_WIDTH <= sim.rows);
        if !fits {
            return Err(ConfigError::Invalid(format!(
                "simulation.spawn_row {} leaves no room for a {}-tall piece in {} rows",
                sim.spawn_row,
                game::MAX_SHAPE_WIDTH,
                sim.rows
            )));
        }

        if self.host.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "host.frame_interval_ms must be positive".into(),
            ));
        }

        Ok(())
    }
}

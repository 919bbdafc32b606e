use macroquad::prelude::Conf;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::simulation::{ClampMode, DEFAULT_START_POSITION, DEFAULT_TICK_BUDGET, Rgb, Spawn};

// Window constants
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 1024.0;

pub const DEFAULT_MAP: &str = "maps/map1.png";
pub const DEFAULT_BOUNDARY_COLOR: Rgb = Rgb(34, 177, 76);

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub map: PathBuf,
    /// Exact color that marks impassable pixels.
    pub boundary_color: Rgb,
    pub start_position: [f64; 2],
    pub start_angle: f64,
    pub tick_budget: u32,
    pub population_size: usize,
    pub generations: u32,
    pub seed: u64,
    pub clamp: ClampMode,
    /// Viewer pacing only. Headless runs go as fast as possible.
    pub ticks_per_second: f64,
    pub champion_path: Option<PathBuf>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            map: PathBuf::from(DEFAULT_MAP),
            boundary_color: DEFAULT_BOUNDARY_COLOR,
            start_position: DEFAULT_START_POSITION,
            start_angle: 0.0,
            tick_budget: DEFAULT_TICK_BUDGET,
            population_size: 30,
            generations: 1000,
            seed: 0,
            clamp: ClampMode::default(),
            ticks_per_second: 60.0,
            champion_path: None,
        }
    }
}

impl SimulationConfig {
    pub fn spawn(&self) -> Spawn {
        Spawn {
            position: self.start_position,
            angle: self.start_angle,
        }
    }
}

pub fn window_conf() -> Conf {
    Conf {
        window_title: "Ant Course".to_owned(),
        window_width: DEFAULT_WINDOW_WIDTH as i32,
        window_height: DEFAULT_WINDOW_HEIGHT as i32,
        high_dpi: true,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: SimulationConfig = toml::from_str("").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.tick_budget, 1200);
        assert_eq!(config.boundary_color, Rgb(34, 177, 76));
    }

    #[test]
    fn test_partial_file_overrides_fields() {
        let config: SimulationConfig = toml::from_str(
            r#"
            map = "maps/oval.png"
            boundary_color = [0, 0, 0]
            population_size = 8
            clamp = "per_axis"
            champion_path = "out/champion.bin"
            "#,
        )
        .unwrap();
        assert_eq!(config.map, PathBuf::from("maps/oval.png"));
        assert_eq!(config.boundary_color, Rgb(0, 0, 0));
        assert_eq!(config.population_size, 8);
        assert_eq!(config.clamp, ClampMode::PerAxis);
        assert_eq!(config.champion_path, Some(PathBuf::from("out/champion.bin")));
        assert_eq!(config.generations, 1000, "unset fields keep their defaults");
    }

    #[test]
    fn test_unknown_clamp_mode_is_rejected() {
        let result: Result<SimulationConfig, _> = toml::from_str(r#"clamp = "diagonal""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_spawn_uses_start_pose() {
        let config = SimulationConfig {
            start_position: [5.0, 6.0],
            start_angle: 45.0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.spawn(),
            Spawn {
                position: [5.0, 6.0],
                angle: 45.0
            }
        );
    }
}

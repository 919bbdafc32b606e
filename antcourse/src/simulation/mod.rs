mod action;
mod ant;
mod episode;
mod map;
mod radar;
mod runner;

// Re-export key types for easier imports
pub use action::Action;
pub use ant::{Ant, ClampMode, CourseBounds, Spawn};
pub use episode::{
    AgentSummary, Episode, EpisodeContext, EpisodeOutcome, EpisodeReport, EpisodeState,
};
pub use map::{CourseMap, Rgb};
pub use radar::{RadarReading, RadarSweep, sense_vector};
pub use runner::{PopulationManager, Runner};

// Ant body
pub const ANT_SIZE: f64 = 30.0;
pub const ANT_HALF_EXTENT: f64 = ANT_SIZE / 2.0;
/// Collision corners, in degrees relative to the heading.
pub const CORNER_OFFSETS: [f64; 4] = [30.0, 150.0, 210.0, 330.0];

// Radar
/// Sweep order, in degrees relative to the heading.
pub const RADAR_OFFSETS: [f64; shared::SENSOR_COUNT] = [-90.0, -45.0, 0.0, 45.0, 90.0];
pub const RADAR_MAX_LENGTH: i32 = 300;
/// Raw distances are integer-divided by this before reaching the controller.
pub const RADAR_SCALE: i32 = 30;

// Kinematics
pub const DEFAULT_SPEED: f64 = 10.0;
pub const MIN_SPEED: f64 = 12.0;
pub const SPEED_STEP: f64 = 2.0;
pub const TURN_STEP: f64 = 10.0;
pub const CLAMP_MIN: f64 = 20.0;
pub const CLAMP_MARGIN: f64 = 4.0 * ANT_SIZE;

// Episode
pub const DEFAULT_TICK_BUDGET: u32 = 30 * 40;
pub const DEFAULT_START_POSITION: [f64; 2] = [100.0, 936.0];

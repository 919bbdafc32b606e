use macroquad::math::DVec2;
use serde::{Deserialize, Serialize};
use shared::{SenseVector, heading_offset, heading_vector};

use super::action::Action;
use super::map::CourseMap;
use super::radar::{self, RadarSweep};
use super::{
    ANT_HALF_EXTENT, CLAMP_MARGIN, CLAMP_MIN, CORNER_OFFSETS, DEFAULT_START_POSITION,
    DEFAULT_SPEED,
};

/// Which extent bounds the vertical axis when clamping an ant's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampMode {
    /// Both axes are bounded by the course width, as the reference courses were tuned with.
    #[default]
    HorizontalExtent,
    /// x is bounded by the width and y by the height.
    PerAxis,
}

/// Range the reference corner of an ant is kept in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourseBounds {
    pub min: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl CourseBounds {
    pub fn new(map: &CourseMap, mode: ClampMode) -> Self {
        let max_x = map.width() as f64 - CLAMP_MARGIN;
        let max_y = match mode {
            ClampMode::HorizontalExtent => max_x,
            ClampMode::PerAxis => map.height() as f64 - CLAMP_MARGIN,
        };
        Self {
            min: CLAMP_MIN,
            max_x,
            max_y,
        }
    }

    /// Lower bound first, then upper, so a course smaller than the margin
    /// pins ants to the upper bound instead of failing.
    pub fn clamp(&self, position: DVec2) -> DVec2 {
        DVec2::new(
            position.x.max(self.min).min(self.max_x),
            position.y.max(self.min).min(self.max_y),
        )
    }
}

/// Where and how ants start each episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    pub position: [f64; 2],
    pub angle: f64,
}

impl Default for Spawn {
    fn default() -> Self {
        Self {
            position: DEFAULT_START_POSITION,
            angle: 0.0,
        }
    }
}

/// State of one ant for one episode.
#[derive(Debug, Clone)]
pub struct Ant {
    /// Reference (top-left) corner of the body.
    pub(crate) position: DVec2,
    /// Heading in degrees, unbounded.
    pub(crate) angle: f64,
    pub(crate) speed: f64,
    speed_set: bool,
    center: DVec2,
    alive: bool,
    distance: f64,
    age_ticks: u32,
}

impl Ant {
    /// Create a new ant at rest.
    pub fn new(position: DVec2, angle: f64) -> Self {
        Self {
            position,
            angle,
            speed: 0.0,
            speed_set: false,
            center: position + DVec2::splat(ANT_HALF_EXTENT),
            alive: true,
            distance: 0.0,
            age_ticks: 0,
        }
    }

    pub fn spawn(spawn: &Spawn) -> Self {
        Self::new(DVec2::from_array(spawn.position), spawn.angle)
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn center(&self) -> DVec2 {
        self.center
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn age_ticks(&self) -> u32 {
        self.age_ticks
    }

    /// Distance traveled in units of half a body.
    pub fn reward(&self) -> f64 {
        self.distance / ANT_HALF_EXTENT
    }

    /// Radar sweep from the current center.
    pub fn radar(&self, map: &CourseMap) -> RadarSweep {
        radar::sweep(map, self.center, self.angle)
    }

    /// Controller input for the current pose.
    pub fn sense(&self, map: &CourseMap) -> SenseVector {
        radar::sense_vector(&self.radar(map))
    }

    /// Rotated body corners used for collision sampling.
    pub fn corners(&self) -> [DVec2; 4] {
        CORNER_OFFSETS.map(|offset| {
            let (x, y) = heading_offset(
                self.center.x,
                self.center.y,
                self.angle + offset,
                ANT_HALF_EXTENT,
            );
            DVec2::new(x, y)
        })
    }

    /// Advance the ant by one tick: apply the action, move, clamp, and check
    /// for collision at the new position. Dead ants are left untouched.
    pub fn update(&mut self, action: Action, map: &CourseMap, bounds: &CourseBounds) {
        if !self.alive {
            return;
        }

        action.apply(self);

        // The first tick always moves at the default speed, whatever the
        // action did to the speed.
        if !self.speed_set {
            self.speed = DEFAULT_SPEED;
            self.speed_set = true;
        }

        let (dx, dy) = heading_vector(self.angle);
        self.position = bounds.clamp(self.position + DVec2::new(dx, dy) * self.speed);

        // Counted even when the clamp ate part of the move.
        self.distance += self.speed;
        self.age_ticks += 1;

        self.center = DVec2::new(self.position.x.trunc(), self.position.y.trunc())
            + DVec2::splat(ANT_HALF_EXTENT);
        self.check_collision(map);
    }

    fn check_collision(&mut self, map: &CourseMap) {
        if self
            .corners()
            .iter()
            .any(|corner| map.is_boundary_at(corner.x as i64, corner.y as i64))
        {
            self.alive = false;
        }
    }
}

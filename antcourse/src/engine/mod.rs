mod camera;
mod rendering;

pub use camera::CourseCamera;
pub use rendering::{CameraAction, Renderer};

use macroquad::prelude::Color;

pub const ANT_COLOR: Color = Color::new(0.54, 0.71, 0.98, 1.0);
pub const RAY_COLOR: Color = Color::new(0.95, 0.55, 0.66, 0.9);
pub const RAY_ENDPOINT_RADIUS: f32 = 3.0;

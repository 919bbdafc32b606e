use macroquad::prelude::*;

/// Minimum zoom level allowed (1.0 = whole course in view)
const MIN_ZOOM: f32 = 1.0;
const MAX_ZOOM: f32 = 20.0;
/// Speed multiplier for zoom operations
const ZOOM_SPEED: f32 = 0.1;

/// Fits the course to the window and handles zooming and panning.
pub struct CourseCamera {
    zoom: f32,
    pub map_width: u32,
    pub map_height: u32,
    pub camera: Camera2D,
}

impl CourseCamera {
    pub fn new(map_width: u32, map_height: u32) -> Self {
        let mut camera = Self {
            zoom: 1.0,
            map_width,
            map_height,
            camera: Camera2D {
                target: vec2(map_width as f32 / 2.0, map_height as f32 / 2.0),
                ..Default::default()
            },
        };
        camera.update_camera_zoom();
        camera
    }

    /// Zoom around the point under the cursor.
    pub fn adjust_zoom(&mut self, wheel_movement: f32) {
        let old_zoom = self.zoom;
        let mouse_screen_pos = Vec2::from(mouse_position());
        let mouse_world_pos = self.camera.screen_to_world(mouse_screen_pos);

        self.zoom = (self.zoom - wheel_movement * self.zoom * ZOOM_SPEED).clamp(MIN_ZOOM, MAX_ZOOM);

        if old_zoom != self.zoom {
            self.update_camera_zoom();
            let new_mouse_world_pos = self.camera.screen_to_world(mouse_screen_pos);
            self.move_by(mouse_world_pos - new_mouse_world_pos);
        }
    }

    pub fn move_by(&mut self, movement: Vec2) {
        self.camera.target += movement;
        self.adjust_camera_bounds();
    }

    /// Aspect ratio correction so the course is never stretched.
    fn aspect_adjustment(&self) -> (f32, f32) {
        let map_ratio = self.map_width as f32 / self.map_height as f32;
        let screen_ratio = screen_width() / screen_height();
        if map_ratio >= screen_ratio {
            (1.0, screen_ratio / map_ratio)
        } else {
            (map_ratio / screen_ratio, 1.0)
        }
    }

    fn update_camera_zoom(&mut self) {
        let (horizontal, vertical) = self.aspect_adjustment();
        self.camera.zoom = vec2(
            2.0 / self.map_width as f32 * self.zoom * horizontal,
            2.0 / self.map_height as f32 * self.zoom * vertical,
        );
    }

    // Keep the view inside the course
    fn adjust_camera_bounds(&mut self) {
        let (horizontal, vertical) = self.aspect_adjustment();
        let horizontal_view = self.map_width as f32 / (self.zoom * horizontal);
        let vertical_view = self.map_height as f32 / (self.zoom * vertical);

        self.camera.target.x =
            adjust_coordinate(self.camera.target.x, horizontal_view, self.map_width as f32);
        self.camera.target.y =
            adjust_coordinate(self.camera.target.y, vertical_view, self.map_height as f32);
    }

    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.camera.target = vec2(self.map_width as f32 / 2.0, self.map_height as f32 / 2.0);
        self.update_camera_zoom();
    }

    pub fn handle_resize(&mut self) {
        self.update_camera_zoom();
        self.adjust_camera_bounds();
    }
}

fn adjust_coordinate(value: f32, view_size: f32, map_size: f32) -> f32 {
    let min = view_size / 2.0;
    let max = map_size - min;
    if max < min {
        // View is larger than the course
        map_size / 2.0
    } else {
        value.clamp(min, max)
    }
}

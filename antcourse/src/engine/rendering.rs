use super::CourseCamera;
use super::{ANT_COLOR, RAY_COLOR, RAY_ENDPOINT_RADIUS};
use antcourse::simulation::{ANT_SIZE, Ant, CourseMap, Episode};
use macroquad::prelude::*;

/// Enum representing possible camera actions like dragging or zooming.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CameraAction {
    Drag,
    Zoom,
    None,
}

/// Draws the course, the ants and their radar rays.
pub struct Renderer {
    course_texture: Texture2D,
    pub course_camera: CourseCamera,
    is_dragging: bool,
    drag_start_world_pos: Vec2,
}

impl Renderer {
    pub fn new(map: &CourseMap) -> Self {
        let course_texture =
            Texture2D::from_rgba8(map.width() as u16, map.height() as u16, &map.to_rgba8());
        course_texture.set_filter(FilterMode::Nearest);

        Self {
            course_texture,
            course_camera: CourseCamera::new(map.width() as u32, map.height() as u32),
            is_dragging: false,
            drag_start_world_pos: Vec2::ZERO,
        }
    }

    /// Processes mouse wheel input for zooming the camera.
    pub fn process_mouse_wheel_zoom(&mut self) -> CameraAction {
        let wheel_movement = mouse_wheel().1;
        if wheel_movement != 0.0 {
            self.course_camera.adjust_zoom(-wheel_movement.signum());
            return CameraAction::Zoom;
        }
        CameraAction::None
    }

    /// Processes mouse drag input for panning the camera.
    pub fn process_mouse_drag_pan(&mut self) -> CameraAction {
        let current_mouse_pos = Vec2::from(mouse_position());
        let mut drag_action_occurred = false;

        if is_mouse_button_pressed(MouseButton::Left) {
            self.is_dragging = true;
            self.drag_start_world_pos = self.course_camera.camera.screen_to_world(current_mouse_pos);
        }

        if self.is_dragging {
            if is_mouse_button_down(MouseButton::Left) {
                let current_world_pos = self.course_camera.camera.screen_to_world(current_mouse_pos);
                let offset = current_world_pos - self.drag_start_world_pos;
                if offset.length_squared() > 0.01 {
                    self.course_camera.move_by(-offset);
                    drag_action_occurred = true;
                }
            }
            if is_mouse_button_released(MouseButton::Left) {
                self.is_dragging = false;
            }
        }

        if drag_action_occurred {
            CameraAction::Drag
        } else {
            CameraAction::None
        }
    }

    /// Only living ants are drawn.
    pub fn render(&self, episode: &Episode, show_rays: bool) {
        set_camera(&self.course_camera.camera);

        self.draw_course(episode.map());
        for ant in living(episode.ants()) {
            if show_rays {
                draw_rays(ant, episode.map());
            }
            draw_ant(ant, ANT_COLOR);
        }
    }

    fn draw_course(&self, map: &CourseMap) {
        draw_texture_ex(
            &self.course_texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(map.width() as f32, map.height() as f32)),
                ..Default::default()
            },
        );
    }
}

/// Body as a rotated square around the ant's center.
fn living(ants: &[Ant]) -> impl Iterator<Item = &Ant> {
    ants.iter().filter(|ant| ant.is_alive())
}

fn draw_ant(ant: &Ant, color: Color) {
    let center = ant.center().as_vec2();
    draw_rectangle_ex(
        center.x,
        center.y,
        ANT_SIZE as f32,
        ANT_SIZE as f32,
        DrawRectangleParams {
            offset: vec2(0.5, 0.5),
            // Headings turn counterclockwise on screen.
            rotation: -(ant.angle() as f32).to_radians(),
            color,
        },
    );
}

fn draw_rays(ant: &Ant, map: &CourseMap) {
    let center = ant.center().as_vec2();
    for reading in ant.radar(map) {
        let end = reading.endpoint.as_vec2();
        draw_line(center.x, center.y, end.x, end.y, 1.0, RAY_COLOR);
        draw_circle(end.x, end.y, RAY_ENDPOINT_RADIUS, RAY_COLOR);
    }
}

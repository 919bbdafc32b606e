use catppuccin_egui::set_theme;
use egui::{self};

use crate::ui::{BASE_PADDING, BASE_SPACING};

fn auto_zoom(ctx: &egui::Context, base_px: egui::Vec2) -> f32 {
    let logical = ctx.screen_rect().size();
    let win_px = logical * ctx.pixels_per_point();
    let s = (win_px.x / base_px.x).min(win_px.y / base_px.y);
    ((s * 4.0).round() / 4.0).clamp(0.75, 3.0) // snap to 0.25 for crisp text
}

/// Numbers shown in the run panel for the current frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlayStats {
    pub generation: u32,
    pub generations: u32,
    pub alive: usize,
    pub population: usize,
    pub tick: u32,
    pub tick_budget: u32,
    pub best_fitness: f64,
    pub champion_fitness: Option<f64>,
}

/// The egui panel drawn over the course.
pub struct OverlayUi {
    last_win_px: egui::Vec2,
    pub show_rays: bool,
    pub paused: bool,
}

impl OverlayUi {
    pub fn new() -> Self {
        Self {
            last_win_px: egui::vec2(0.0, 0.0),
            show_rays: true,
            paused: false,
        }
    }

    /// Lay out the panel. Returns true if the pointer is over it.
    pub fn update(&mut self, stats: &OverlayStats) -> bool {
        let mut pointer_over_ui = false;

        new_egui_macroquad::ui(|egui_ctx| {
            set_theme(egui_ctx, catppuccin_egui::MOCHA);
            let win_px = egui_ctx.screen_rect().size() * egui_ctx.pixels_per_point();
            if (win_px.x - self.last_win_px.x).abs() > 1.0
                || (win_px.y - self.last_win_px.y).abs() > 1.0
            {
                self.last_win_px = win_px;
                egui_ctx.set_zoom_factor(auto_zoom(egui_ctx, egui::vec2(1280.0, 1024.0)));
            }

            egui::Window::new("Run")
                .anchor(egui::Align2::LEFT_TOP, egui::vec2(BASE_PADDING, BASE_PADDING))
                .collapsible(true)
                .resizable(false)
                .show(egui_ctx, |ui| {
                    egui::Grid::new("run_stats")
                        .num_columns(2)
                        .spacing([BASE_SPACING * 2.0, BASE_SPACING])
                        .show(ui, |ui| {
                            ui.label("Generation");
                            ui.monospace(format!("{} / {}", stats.generation, stats.generations));
                            ui.end_row();

                            ui.label("Ants still alive");
                            ui.monospace(format!("{} / {}", stats.alive, stats.population));
                            ui.end_row();

                            ui.label("Tick");
                            ui.monospace(format!("{} / {}", stats.tick, stats.tick_budget));
                            ui.end_row();

                            ui.label("Best fitness");
                            ui.monospace(format!("{:.1}", stats.best_fitness));
                            ui.end_row();

                            ui.label("Champion");
                            match stats.champion_fitness {
                                Some(fitness) => ui.monospace(format!("{:.1}", fitness)),
                                None => ui.monospace("-"),
                            };
                            ui.end_row();
                        });

                    ui.add_space(BASE_PADDING);
                    ui.horizontal(|ui| {
                        ui.checkbox(&mut self.show_rays, "Radar");
                        let label = if self.paused { "Resume" } else { "Pause" };
                        if ui.button(label).clicked() {
                            self.paused = !self.paused;
                        }
                    });
                    ui.small("Space pauses, R toggles radar, Esc quits");
                });

            pointer_over_ui = egui_ctx.is_pointer_over_area();
        });

        pointer_over_ui
    }

    pub fn render(&self) {
        new_egui_macroquad::draw();
    }
}

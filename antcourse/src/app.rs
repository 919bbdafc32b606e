use antcourse::config::SimulationConfig;
use antcourse::population::RandomPopulation;
use antcourse::simulation::{Episode, EpisodeReport, Runner};
use macroquad::prelude::*;
use tracing::info;

use crate::engine::Renderer;
use crate::ui::{OverlayStats, OverlayUi};

/// Upper bound on ticks simulated in one frame, so a slow frame cannot stall the window.
const MAX_TICKS_PER_FRAME: u32 = 240;

/// Windowed run: episodes advance at a fixed tick rate while the course is drawn.
pub struct AntCourseApp {
    runner: Runner,
    population: RandomPopulation,
    episode: Episode,
    renderer: Renderer,
    ui: OverlayUi,
    ticks_per_second: f64,
    tick_accumulator: f64,
    reports: Vec<EpisodeReport>,
}

impl AntCourseApp {
    pub fn new(mut runner: Runner, mut population: RandomPopulation, config: &SimulationConfig) -> Self {
        let renderer = Renderer::new(runner.map());
        let episode = runner.start_episode(&mut population);
        Self {
            runner,
            population,
            episode,
            renderer,
            ui: OverlayUi::new(),
            ticks_per_second: config.ticks_per_second.max(1.0),
            tick_accumulator: 0.0,
            reports: Vec::new(),
        }
    }

    /// Runs the main loop until every generation is done or the user quits.
    pub async fn run(mut self) -> anyhow::Result<Vec<EpisodeReport>> {
        prevent_quit();

        loop {
            if is_quit_requested() || is_key_pressed(KeyCode::Escape) {
                info!(generation = self.runner.generation(), "Stop requested");
                self.episode.stop();
            } else if !self.ui.paused {
                self.advance(get_frame_time() as f64)?;
            }

            if !self.episode.is_running() {
                self.reports
                    .push(self.runner.finish_episode(&self.episode, &mut self.population)?);
                if self.runner.is_finished() {
                    break;
                }
                self.episode = self.runner.start_episode(&mut self.population);
                self.tick_accumulator = 0.0;
            }

            self.handle_input();
            self.render();
            next_frame().await;
        }

        Ok(self.reports)
    }

    fn advance(&mut self, dt: f64) -> anyhow::Result<()> {
        self.tick_accumulator += dt * self.ticks_per_second;
        let mut ticks = 0;
        while self.tick_accumulator >= 1.0 && ticks < MAX_TICKS_PER_FRAME && self.episode.is_running() {
            self.episode.step()?;
            self.tick_accumulator -= 1.0;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            self.tick_accumulator = 0.0;
        }
        Ok(())
    }

    fn handle_input(&mut self) {
        if is_key_pressed(KeyCode::Space) {
            self.ui.paused = !self.ui.paused;
        }
        if is_key_pressed(KeyCode::R) {
            self.ui.show_rays = !self.ui.show_rays;
        }
        if is_key_pressed(KeyCode::Home) {
            self.renderer.course_camera.reset();
        }
    }

    fn stats(&self) -> OverlayStats {
        let context = self.episode.context();
        OverlayStats {
            generation: context.generation,
            generations: self.runner.generations(),
            alive: self.episode.alive_count(),
            population: self.episode.ants().len(),
            tick: self.episode.tick(),
            tick_budget: context.tick_budget,
            best_fitness: self.episode.fitness().iter().copied().fold(0.0, f64::max),
            champion_fitness: self.population.champion_fitness(),
        }
    }

    fn render(&mut self) {
        clear_background(Color::from_hex(0x181820));

        let stats = self.stats();
        let pointer_over_ui = self.ui.update(&stats);
        if !pointer_over_ui {
            self.renderer.process_mouse_wheel_zoom();
            self.renderer.process_mouse_drag_pan();
        }

        self.renderer.render(&self.episode, self.ui.show_rays);

        // Switch to default camera for UI rendering
        set_default_camera();
        self.ui.render();
    }
}

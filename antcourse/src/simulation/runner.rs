use shared::Controller;
use std::sync::Arc;
use tracing::info;

use super::ant::{ClampMode, Spawn};
use super::episode::{Episode, EpisodeContext, EpisodeOutcome, EpisodeReport};
use super::map::CourseMap;
use crate::config::SimulationConfig;
use crate::error::SimError;

/// Supplies one controller per ant for each generation and receives the
/// fitness those controllers earned.
pub trait PopulationManager {
    fn controllers(&mut self, generation: u32) -> Vec<Box<dyn Controller>>;
    fn assign_fitness(&mut self, report: &EpisodeReport) -> Result<(), SimError>;
}

/// Drives a sequence of episodes on one course, one per generation.
pub struct Runner {
    map: Arc<CourseMap>,
    tick_budget: u32,
    spawn: Spawn,
    clamp: ClampMode,
    generations: u32,
    /// Number of episodes started so far.
    generation: u32,
    stopped: bool,
}

impl Runner {
    pub fn new(map: CourseMap, config: &SimulationConfig) -> Self {
        Self {
            map: Arc::new(map),
            tick_budget: config.tick_budget,
            spawn: config.spawn(),
            clamp: config.clamp,
            generations: config.generations,
            generation: 0,
            stopped: false,
        }
    }

    pub fn map(&self) -> &CourseMap {
        &self.map
    }

    /// Index of the most recently started generation, 1-based. 0 before the first.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn generations(&self) -> u32 {
        self.generations
    }

    pub fn is_finished(&self) -> bool {
        self.stopped || self.generation >= self.generations
    }

    /// Build the next generation's episode with fresh ants at the spawn.
    pub fn start_episode(&mut self, manager: &mut dyn PopulationManager) -> Episode {
        self.generation += 1;
        let ctx = EpisodeContext::new(self.generation, Arc::clone(&self.map))
            .with_tick_budget(self.tick_budget)
            .with_spawn(self.spawn)
            .with_clamp(self.clamp);
        let controllers = manager.controllers(self.generation);
        info!(
            generation = self.generation,
            ants = controllers.len(),
            "Starting generation"
        );
        Episode::new(ctx, controllers)
    }

    /// Hand a finished episode's results to the manager. A stopped episode
    /// ends the run.
    pub fn finish_episode(
        &mut self,
        episode: &Episode,
        manager: &mut dyn PopulationManager,
    ) -> Result<EpisodeReport, SimError> {
        let report = episode.report();
        let best = report.best().map_or(0.0, |(_, agent)| agent.fitness);
        info!(
            generation = report.generation,
            ticks = report.ticks,
            outcome = ?report.outcome,
            survivors = report.survivors(),
            best_fitness = best,
            mean_fitness = report.mean_fitness(),
            "Generation finished"
        );
        manager.assign_fitness(&report)?;
        if report.outcome == EpisodeOutcome::Stopped {
            self.stopped = true;
        }
        Ok(report)
    }

    /// Run every remaining generation to completion. `should_stop` is polled
    /// between ticks; once it returns true the current episode is stopped and
    /// no further generations start.
    pub fn run(
        &mut self,
        manager: &mut dyn PopulationManager,
        mut should_stop: impl FnMut() -> bool,
    ) -> Result<Vec<EpisodeReport>, SimError> {
        let mut reports = Vec::new();
        while !self.is_finished() {
            let mut episode = self.start_episode(manager);
            episode.run_to_end(&mut should_stop)?;
            reports.push(self.finish_episode(&episode, manager)?);
        }
        if self.stopped {
            info!(generation = self.generation, "Run stopped");
        }
        Ok(reports)
    }
}

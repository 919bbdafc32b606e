use shared::{ACTION_COUNT, Controller, SenseVector};
use std::sync::Arc;
use tracing::{debug, trace, warn};

use super::action::Action;
use super::ant::{Ant, ClampMode, CourseBounds, Spawn};
use super::map::CourseMap;
use super::DEFAULT_TICK_BUDGET;
use crate::error::SimError;

/// Everything an episode needs to know about the run it belongs to.
#[derive(Debug, Clone)]
pub struct EpisodeContext {
    /// 1-based generation index.
    pub generation: u32,
    pub tick_budget: u32,
    pub map: Arc<CourseMap>,
    pub spawn: Spawn,
    pub clamp: ClampMode,
}

impl EpisodeContext {
    pub fn new(generation: u32, map: Arc<CourseMap>) -> Self {
        Self {
            generation,
            tick_budget: DEFAULT_TICK_BUDGET,
            map,
            spawn: Spawn::default(),
            clamp: ClampMode::default(),
        }
    }

    pub fn with_tick_budget(mut self, tick_budget: u32) -> Self {
        self.tick_budget = tick_budget;
        self
    }

    pub fn with_spawn(mut self, spawn: Spawn) -> Self {
        self.spawn = spawn;
        self
    }

    pub fn with_clamp(mut self, clamp: ClampMode) -> Self {
        self.clamp = clamp;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeOutcome {
    AllDead,
    BudgetExhausted,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeState {
    Running,
    Ended(EpisodeOutcome),
}

/// Final state of one ant, as handed to the population manager.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSummary {
    pub fitness: f64,
    pub distance: f64,
    pub age_ticks: u32,
    pub alive: bool,
}

#[derive(Debug, Clone)]
pub struct EpisodeReport {
    pub generation: u32,
    pub ticks: u32,
    pub outcome: EpisodeOutcome,
    pub agents: Vec<AgentSummary>,
}

impl EpisodeReport {
    pub fn fitness(&self) -> Vec<f64> {
        self.agents.iter().map(|agent| agent.fitness).collect()
    }

    /// Index and summary of the fittest ant. The first one wins ties.
    pub fn best(&self) -> Option<(usize, &AgentSummary)> {
        self.agents
            .iter()
            .enumerate()
            .fold(None, |best, (index, agent)| match best {
                Some((_, top)) if agent.fitness <= top.fitness => best,
                _ => Some((index, agent)),
            })
    }

    pub fn mean_fitness(&self) -> f64 {
        if self.agents.is_empty() {
            return 0.0;
        }
        self.agents.iter().map(|agent| agent.fitness).sum::<f64>() / self.agents.len() as f64
    }

    pub fn survivors(&self) -> usize {
        self.agents.iter().filter(|agent| agent.alive).count()
    }
}

/// One generation of ants on one course, advanced one tick at a time.
///
/// Ant `i` is steered by controller `i` for the whole episode. Fitness is
/// accumulated after every completed tick and can be read at any point.
pub struct Episode {
    ctx: EpisodeContext,
    bounds: CourseBounds,
    ants: Vec<Ant>,
    controllers: Vec<Box<dyn Controller>>,
    fitness: Vec<f64>,
    tick: u32,
    state: EpisodeState,
}

impl Episode {
    pub fn new(ctx: EpisodeContext, controllers: Vec<Box<dyn Controller>>) -> Self {
        let bounds = CourseBounds::new(&ctx.map, ctx.clamp);
        let ants = controllers.iter().map(|_| Ant::spawn(&ctx.spawn)).collect();
        let fitness = vec![0.0; controllers.len()];
        let state = if controllers.is_empty() {
            EpisodeState::Ended(EpisodeOutcome::AllDead)
        } else if ctx.tick_budget == 0 {
            EpisodeState::Ended(EpisodeOutcome::BudgetExhausted)
        } else {
            EpisodeState::Running
        };

        Self {
            ctx,
            bounds,
            ants,
            controllers,
            fitness,
            tick: 0,
            state,
        }
    }

    pub fn context(&self) -> &EpisodeContext {
        &self.ctx
    }

    pub fn map(&self) -> &CourseMap {
        &self.ctx.map
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    /// Fitness accumulated so far, one entry per ant.
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Number of completed ticks.
    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn state(&self) -> EpisodeState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EpisodeState::Running
    }

    pub fn alive_count(&self) -> usize {
        self.ants.iter().filter(|ant| ant.is_alive()).count()
    }

    /// Advance every living ant by one tick.
    ///
    /// All sense vectors are taken before any ant moves, and all controllers
    /// are queried before any action is applied, so a controller contract
    /// error leaves the episode exactly as it was after the last whole tick.
    pub fn step(&mut self) -> Result<EpisodeState, SimError> {
        if !self.is_running() {
            return Ok(self.state);
        }

        let map = Arc::clone(&self.ctx.map);

        let senses: Vec<Option<SenseVector>> = self
            .ants
            .iter()
            .map(|ant| ant.is_alive().then(|| ant.sense(&map)))
            .collect();

        let mut actions = Vec::with_capacity(self.ants.len());
        for (agent, (sense, controller)) in senses.iter().zip(&mut self.controllers).enumerate() {
            let action = match sense {
                Some(sense) => Some(select_action(agent, &controller.evaluate(sense))?),
                None => None,
            };
            actions.push(action);
        }

        for (agent, (ant, action)) in self.ants.iter_mut().zip(actions).enumerate() {
            let Some(action) = action else { continue };
            ant.update(action, &map, &self.bounds);
            if !ant.is_alive() {
                debug!(
                    generation = self.ctx.generation,
                    agent,
                    tick = self.tick + 1,
                    distance = ant.distance(),
                    "Ant hit the boundary"
                );
            }
        }

        // The absolute reward is re-added every tick an ant survives.
        for (fitness, ant) in self.fitness.iter_mut().zip(&self.ants) {
            if ant.is_alive() {
                *fitness += ant.reward();
            }
        }

        self.tick += 1;
        let alive = self.alive_count();
        self.state = if alive == 0 {
            EpisodeState::Ended(EpisodeOutcome::AllDead)
        } else if self.tick >= self.ctx.tick_budget {
            EpisodeState::Ended(EpisodeOutcome::BudgetExhausted)
        } else {
            EpisodeState::Running
        };

        trace!(
            generation = self.ctx.generation,
            tick = self.tick,
            alive,
            "Tick complete"
        );
        Ok(self.state)
    }

    /// End the episode between ticks. Fitness from completed ticks is kept.
    pub fn stop(&mut self) {
        if self.is_running() {
            self.state = EpisodeState::Ended(EpisodeOutcome::Stopped);
        }
    }

    /// Step until the episode ends. `should_stop` is polled before every tick.
    pub fn run_to_end(
        &mut self,
        mut should_stop: impl FnMut() -> bool,
    ) -> Result<EpisodeReport, SimError> {
        while self.is_running() {
            if should_stop() {
                self.stop();
                break;
            }
            self.step()?;
        }
        Ok(self.report())
    }

    pub fn report(&self) -> EpisodeReport {
        let outcome = match self.state {
            EpisodeState::Ended(outcome) => outcome,
            EpisodeState::Running => EpisodeOutcome::Stopped,
        };
        EpisodeReport {
            generation: self.ctx.generation,
            ticks: self.tick,
            outcome,
            agents: self
                .ants
                .iter()
                .zip(&self.fitness)
                .map(|(ant, &fitness)| AgentSummary {
                    fitness,
                    distance: ant.distance(),
                    age_ticks: ant.age_ticks(),
                    alive: ant.is_alive(),
                })
                .collect(),
        }
    }
}

fn select_action(agent: usize, output: &[f32]) -> Result<Action, SimError> {
    if output.iter().take(ACTION_COUNT).any(|value| value.is_nan()) {
        warn!(agent, ?output, "Controller returned NaN, ignoring those outputs");
    }
    Action::select(output).ok_or(SimError::ControllerOutput {
        agent,
        len: output.len(),
        expected: ACTION_COUNT,
    })
}

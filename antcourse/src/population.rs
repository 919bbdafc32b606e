use rand::SeedableRng;
use rand::rngs::StdRng;
use shared::Controller;
use std::path::PathBuf;
use tracing::info;

use crate::controllers::LinearController;
use crate::error::SimError;
use crate::simulation::{EpisodeReport, PopulationManager};

/// Samples a fresh set of random linear controllers every generation and
/// remembers the best one seen so far.
pub struct RandomPopulation {
    rng: StdRng,
    size: usize,
    current: Vec<LinearController>,
    champion: Option<(LinearController, f64)>,
    champion_path: Option<PathBuf>,
}

impl RandomPopulation {
    pub fn new(size: usize, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            size,
            current: Vec::new(),
            champion: None,
            champion_path: None,
        }
    }

    /// Save every new champion to `path`.
    pub fn with_champion_path(mut self, path: PathBuf) -> Self {
        self.champion_path = Some(path);
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn champion(&self) -> Option<&LinearController> {
        self.champion.as_ref().map(|(controller, _)| controller)
    }

    pub fn champion_fitness(&self) -> Option<f64> {
        self.champion.as_ref().map(|(_, fitness)| *fitness)
    }
}

impl PopulationManager for RandomPopulation {
    fn controllers(&mut self, _generation: u32) -> Vec<Box<dyn Controller>> {
        self.current = (0..self.size)
            .map(|_| LinearController::random(&mut self.rng))
            .collect();
        self.current
            .iter()
            .map(|controller| Box::new(controller.clone()) as Box<dyn Controller>)
            .collect()
    }

    fn assign_fitness(&mut self, report: &EpisodeReport) -> Result<(), SimError> {
        let Some((index, best)) = report.best() else {
            return Ok(());
        };
        let improved = self
            .champion_fitness()
            .is_none_or(|fitness| best.fitness > fitness);
        if !improved {
            return Ok(());
        }
        let Some(controller) = self.current.get(index) else {
            return Ok(());
        };

        info!(
            generation = report.generation,
            agent = index,
            fitness = best.fitness,
            "New champion"
        );
        if let Some(path) = &self.champion_path {
            controller.save(path)?;
        }
        self.champion = Some((controller.clone(), best.fitness));
        Ok(())
    }
}

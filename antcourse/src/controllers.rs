use bincode::{decode_from_slice, encode_to_vec};
use bincode_derive::{Decode, Encode};
use rand::Rng;
use serde::{Deserialize, Serialize};
use shared::{ACTION_COUNT, ActionVector, Controller, SENSOR_COUNT, SenseVector};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::SimError;
use crate::simulation::Action;

/// A single affine layer from the sense vector to the action outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct LinearController {
    pub weights: [[f32; SENSOR_COUNT]; ACTION_COUNT],
    pub biases: [f32; ACTION_COUNT],
}

impl LinearController {
    pub fn new(weights: [[f32; SENSOR_COUNT]; ACTION_COUNT], biases: [f32; ACTION_COUNT]) -> Self {
        Self { weights, biases }
    }

    /// Weights and biases drawn uniformly from `[-1, 1]`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut weights = [[0.0; SENSOR_COUNT]; ACTION_COUNT];
        for row in &mut weights {
            for weight in row.iter_mut() {
                *weight = rng.random_range(-1.0..=1.0);
            }
        }
        let biases = std::array::from_fn(|_| rng.random_range(-1.0..=1.0));
        Self { weights, biases }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SimError> {
        let path = path.as_ref();
        let data = encode_to_vec(self, bincode::config::standard())?;
        if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SimError::ChampionIo {
                path: path.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, data).map_err(|source| SimError::ChampionIo {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Saved champion");
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| SimError::ChampionIo {
            path: path.to_path_buf(),
            source,
        })?;
        let (controller, _len): (LinearController, _) =
            decode_from_slice(&data, bincode::config::standard())?;
        Ok(controller)
    }
}

impl Controller for LinearController {
    fn evaluate(&mut self, sense: &SenseVector) -> ActionVector {
        self.weights
            .iter()
            .zip(&self.biases)
            .map(|(row, bias)| {
                row.iter()
                    .zip(sense)
                    .map(|(weight, input)| weight * input)
                    .sum::<f32>()
                    + bias
            })
            .collect()
    }
}

/// Always picks the same action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAction(pub Action);

impl Controller for FixedAction {
    fn evaluate(&mut self, _sense: &SenseVector) -> ActionVector {
        self.0.one_hot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::tempdir;

    #[test]
    fn test_linear_evaluate_is_affine() {
        let mut weights = [[0.0; SENSOR_COUNT]; ACTION_COUNT];
        weights[0] = [1.0, 0.0, 0.0, 0.0, 0.0];
        weights[3] = [0.0, 0.0, 1.0, 0.0, 1.0];
        let mut controller = LinearController::new(weights, [0.0, 0.5, 0.0, -1.0]);

        let output = controller.evaluate(&[2.0, 9.0, 3.0, 9.0, 4.0]);
        assert_eq!(output, vec![2.0, 0.5, 0.0, 6.0]);
        assert_eq!(Action::select(&output), Some(Action::SpeedUp));
    }

    #[test]
    fn test_random_is_seeded_and_bounded() {
        let a = LinearController::random(&mut StdRng::seed_from_u64(7));
        let b = LinearController::random(&mut StdRng::seed_from_u64(7));
        let c = LinearController::random(&mut StdRng::seed_from_u64(8));
        assert_eq!(a, b, "same seed must give the same controller");
        assert_ne!(a, c);
        let values = a.weights.iter().flatten().chain(&a.biases);
        for &value in values {
            assert!((-1.0..=1.0).contains(&value), "{} out of range", value);
        }
    }

    #[test]
    fn test_champion_save_and_load() {
        let dir = tempdir().unwrap();
        // save creates missing parent directories
        let path = dir.path().join("runs").join("champion.bin");
        let champion = LinearController::random(&mut StdRng::seed_from_u64(3));
        champion.save(&path).unwrap();
        let loaded = LinearController::load(&path).unwrap();
        assert_eq!(loaded, champion);
    }

    #[test]
    fn test_load_missing_champion_is_io_error() {
        let result = LinearController::load("no/such/champion.bin");
        assert!(matches!(result, Err(SimError::ChampionIo { .. })));
    }

    #[test]
    fn test_fixed_action_always_selects_its_action() {
        for action in Action::ALL {
            let mut controller = FixedAction(action);
            let output = controller.evaluate(&[0.0; SENSOR_COUNT]);
            assert_eq!(Action::select(&output), Some(action));
        }
    }
}

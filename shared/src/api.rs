pub const SENSOR_COUNT: usize = 5;
pub const ACTION_COUNT: usize = 4;

/// Largest value a normalized sensor reading can take.
pub const SENSOR_MAX: f32 = 10.0;

/// Normalized radar distances in sweep order (right to left), each in `0..=SENSOR_MAX`.
pub type SenseVector = [f32; SENSOR_COUNT];

/// Raw controller output. Only the first `ACTION_COUNT` entries are read.
pub type ActionVector = Vec<f32>;

/// A controller steering one ant for one episode.
///
/// Called once per tick for every living ant with that tick's sense vector.
/// The returned vector must hold at least `ACTION_COUNT` values; the index of
/// the largest one is the selected action.
pub trait Controller {
    fn evaluate(&mut self, sense: &SenseVector) -> ActionVector;
}

impl<F> Controller for F
where
    F: FnMut(&SenseVector) -> ActionVector,
{
    fn evaluate(&mut self, sense: &SenseVector) -> ActionVector {
        self(sense)
    }
}

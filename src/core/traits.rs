use crate::StepRecord;
use ndarray::*;

pub trait SaveData {
    fn get_headers(&self) -> String;
    fn num_storable_variables(&self) -> usize;
    fn get_storable_data(&self) -> Array1<f64>;
}

/// Consumes the structured per-step event produced by the adjust hook.
/// Keeps diagnostics out of the integration path.
pub trait StepObserver {
    fn on_step(&mut self, record: &StepRecord);
}

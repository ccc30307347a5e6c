use crate::connector::boundary::BoundaryCoupling;
use crate::connector::conn_core::{FaceRegistry, Reduction};
use crate::core::traits::{SaveData, StepObserver};
use crate::zero_dim::environment::Environment;
use crate::zero_dim::reservoir::Reservoir;
use crate::{StepRecord, VentStatus};

/// The assembled vent simulation, driven by the external solver's step loop.
/// One `adjust` call per time step updates the vessel and the cached
/// boundary value; the profile reads may run any number of times after it.
pub struct VentSystem {
    vessel: Reservoir,
    ambient: Option<Environment>,
    coupling: BoundaryCoupling,
    reduction: Box<dyn Reduction>,
    observers: Vec<Box<dyn StepObserver>>,
    previous_time: Option<f64>,
    pub stored_data: Vec<String>,
}

impl VentSystem {
    pub(crate) fn new(
        vessel: Reservoir,
        ambient: Option<Environment>,
        coupling: BoundaryCoupling,
        reduction: Box<dyn Reduction>,
        observers: Vec<Box<dyn StepObserver>>,
    ) -> VentSystem {
        VentSystem {
            vessel,
            ambient,
            coupling,
            reduction,
            observers,
            previous_time: None,
            stored_data: Vec::new(),
        }
    }

    /// Once-per-time-step hook. The first call only records the time origin;
    /// a repeated timestamp leaves the state untouched, so firing the hook
    /// twice within a step is harmless.
    pub fn adjust(&mut self, current_time: f64, registry: &dyn FaceRegistry) -> VentStatus {
        let previous_time = match self.previous_time {
            Some(time) => time,
            None => {
                self.previous_time = Some(current_time);
                let record = self.make_record(current_time, 0.0, 0.0, false);
                self.notify(&record);
                return self.vessel.status();
            }
        };

        let dt = current_time - previous_time;
        if dt <= 0.0 {
            return self.vessel.status();
        }
        self.previous_time = Some(current_time);

        let partial = self.coupling.sample(registry, &self.vessel);
        let flow = self.reduction.reduce_sum(partial);
        self.vessel.update_flow(flow);
        let outcome = self.vessel.advance(dt, self.ambient.as_ref());
        self.coupling.refresh(&self.vessel, flow);

        let record = self.make_record(current_time, dt, flow, outcome.mass_clamped);
        self.notify(&record);
        self.store_row(current_time);
        outcome.status
    }

    /// Latest boundary value, safe to read any number of times per step.
    pub fn profile_value(&self) -> f64 {
        self.coupling.value()
    }

    /// Writes the cached boundary value to every face of the profile.
    pub fn emit_profile(&self, faces: &mut [f64]) {
        self.coupling.emit(faces)
    }

    pub fn vessel(&self) -> &Reservoir {
        &self.vessel
    }

    pub fn ambient(&self) -> Option<&Environment> {
        self.ambient.as_ref()
    }

    pub fn boundary_name<'a>(&'a self) -> &'a str {
        self.coupling.name()
    }

    pub fn print_state(&self) {
        println!("{}", self.vessel.get_state());
    }

    pub fn stored_headers(&self) -> String {
        format!(
            "time [s]\t{}\t{}",
            self.vessel.get_headers(),
            self.coupling.get_headers()
        )
    }

    fn make_record(&self, time: f64, dt: f64, flow: f64, mass_clamped: bool) -> StepRecord {
        StepRecord {
            time,
            dt,
            flow,
            mass: self.vessel.mass(),
            pressure: self.vessel.pressure(),
            status: self.vessel.status(),
            mass_clamped,
        }
    }

    fn notify(&mut self, record: &StepRecord) {
        for observer in self.observers.iter_mut() {
            observer.on_step(record);
        }
    }

    fn store_row(&mut self, time: f64) {
        let mut row = format!("{:.6}", time);
        for value in self.vessel.get_storable_data().iter() {
            row.push_str(&format!("\t{}", value));
        }
        for value in self.coupling.get_storable_data().iter() {
            row.push_str(&format!("\t{}", value));
        }
        row.push('\n');
        self.stored_data.push(row);
    }
}

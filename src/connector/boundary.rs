use crate::connector::conn_core::FaceRegistry;
use crate::connector::flow_model::FlowModel;
use crate::core::traits::SaveData;
use crate::zero_dim::reservoir::Reservoir;
use crate::{ProfileKind, VentStatus};
use ndarray::*;

/// Binds the vent to one named boundary of the solver case and caches the
/// uniform value its profile receives. The cache decouples the once-per-step
/// integration from the profile evaluations, which may run more often.
#[derive(Clone)]
pub struct BoundaryCoupling {
    name: String, // must match the boundary name in the case setup exactly
    kind: ProfileKind,
    flow_model: Box<dyn FlowModel>,
    last_value: f64,
}

impl BoundaryCoupling {
    pub fn new(
        name: &str,
        kind: ProfileKind,
        flow_model: Box<dyn FlowModel>,
    ) -> Result<BoundaryCoupling, String> {
        if name.is_empty() {
            return Err("boundary name cannot be empty".to_string());
        }

        Ok(BoundaryCoupling {
            name: name.to_string(),
            kind,
            flow_model,
            last_value: 0.0,
        })
    }

    pub fn name<'a>(&'a self) -> &'a str {
        &self.name
    }

    pub fn kind(&self) -> ProfileKind {
        self.kind
    }

    pub fn model_name<'a>(&'a self) -> &'a str {
        self.flow_model.model_name()
    }

    /// Samples the boundary mass flow for this step. A boundary the registry
    /// cannot resolve contributes zero flow; the run goes on.
    pub fn sample(&self, registry: &dyn FaceRegistry, vessel: &Reservoir) -> f64 {
        let faces = if self.flow_model.needs_faces() {
            let found = registry.lookup(&self.name);
            if found.is_none() {
                println!(
                    "Warning: boundary '{}' not found, assuming zero flow this step",
                    self.name
                );
            }
            found
        } else {
            None
        };
        self.flow_model.mass_flow(vessel, faces.as_deref())
    }

    /// Recomputes the cached profile value after an integration step.
    /// `measured_flow` is the reduced flow the step was integrated with.
    pub fn refresh(&mut self, vessel: &Reservoir, measured_flow: f64) {
        self.last_value = match self.kind {
            ProfileKind::Pressure => vessel.pressure(),
            ProfileKind::MassFlow => {
                if vessel.status() == VentStatus::Equilibrium {
                    // the disk has resealed, nothing crosses the boundary
                    0.0
                } else if self.flow_model.needs_faces() {
                    measured_flow.max(0.0)
                } else {
                    self.flow_model.mass_flow(vessel, None)
                }
            }
        };
    }

    pub fn value(&self) -> f64 {
        self.last_value
    }

    /// Writes the cached value identically to every face of the profile.
    pub fn emit(&self, faces: &mut [f64]) {
        for face in faces.iter_mut() {
            *face = self.last_value;
        }
    }
}

impl SaveData for BoundaryCoupling {
    fn get_headers(&self) -> String {
        "boundary value".to_string()
    }
    fn num_storable_variables(&self) -> usize {
        1
    }
    fn get_storable_data(&self) -> Array1<f64> {
        array![self.last_value]
    }
}

use crate::zero_dim::reservoir::Reservoir;
use crate::FaceSample;
use dyn_clone::DynClone;

/// Boundary mass-flow estimation, selected once at configuration time.
pub trait FlowModel: DynClone {
    fn model_name<'a>(&'a self) -> &str;
    /// Whether the model consumes per-face samples from the solver.
    fn needs_faces(&self) -> bool;
    /// Returns the boundary mass flow in `[kg/s]`, positive = leaving the
    /// vessel.
    fn mass_flow(&self, vessel: &Reservoir, faces: Option<&[FaceSample]>) -> f64;
}

dyn_clone::clone_trait_object!(FlowModel);

/// Sums the sampled face fluxes of the monitored boundary.
#[derive(Debug, Clone)]
pub struct FluxAggregation {
    model_name: String,
    mass_weighted: bool,
}

impl FluxAggregation {
    /// With `mass_weighted`, the face samples already carry mass flux in
    /// `[kg/s]` and are summed directly; otherwise each face contributes
    /// `density * flux`.
    pub fn new(mass_weighted: bool) -> FluxAggregation {
        FluxAggregation {
            model_name: "Flux aggregation".to_string(),
            mass_weighted,
        }
    }
}

impl FlowModel for FluxAggregation {
    fn model_name<'a>(&'a self) -> &str {
        &self.model_name
    }
    fn needs_faces(&self) -> bool {
        true
    }
    fn mass_flow(&self, _vessel: &Reservoir, faces: Option<&[FaceSample]>) -> f64 {
        let faces = match faces {
            Some(faces) => faces,
            None => return 0.0,
        };
        if self.mass_weighted {
            faces.iter().map(|face| face.flux).sum()
        } else {
            faces.iter().map(|face| face.effective_density() * face.flux).sum()
        }
    }
}

/// Flow proportional to the remaining supply mass: blow-down from a bottle
/// through a fixed orifice, with no face sampling available.
#[derive(Debug, Clone)]
pub struct MassRatio {
    model_name: String,
    base_flow: f64, // [kg/s]
}

impl MassRatio {
    pub fn new(base_flow: f64) -> MassRatio {
        MassRatio {
            model_name: "Mass ratio".to_string(),
            base_flow,
        }
    }
}

impl FlowModel for MassRatio {
    fn model_name<'a>(&'a self) -> &str {
        &self.model_name
    }
    fn needs_faces(&self) -> bool {
        false
    }
    fn mass_flow(&self, vessel: &Reservoir, _faces: Option<&[FaceSample]>) -> f64 {
        if vessel.initial_mass() > 0.0 {
            let flow = self.base_flow * vessel.mass() / vessel.initial_mass();
            flow.max(0.0)
        } else {
            // undefined ratio, treat as 1
            self.base_flow
        }
    }
}

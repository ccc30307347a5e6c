//! # vessel_blowdown
//!
//! The `vessel_blowdown` crate provides an easy way to simulate a pressurized
//! gas vessel venting into a transient CFD run and to feed the resulting
//! boundary value back to the solver.
//!
//! The vessel is a lumped, isothermal, fixed-volume reservoir. Once per time
//! step the solver-driven adjust hook samples the boundary mass flow,
//! advances the vessel mass with a forward-Euler step, recomputes the
//! pressure from the ideal-gas relation and caches a uniform value. The
//! profile hook then broadcasts that value to every face of the monitored
//! boundary, as often as the solver asks for it.

pub mod case;
pub mod connector;
pub mod core;
pub mod numerics;
pub mod thermo;
pub mod zero_dim;

// Re-exporting
pub use crate::connector::conn_core::{FaceRegistry, NoFaces, Reduction, SerialReduction};
pub use crate::connector::flow_model::{FlowModel, FluxAggregation, MassRatio};
pub use crate::core::monitor::ConsoleMonitor;
pub use crate::core::system::VentSystem;
pub use crate::core::system_builder::VentSystemBuilder;
pub use crate::thermo::gas::Gas;

/// Which scalar the boundary profile receives each evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileKind {
    Pressure,
    MassFlow,
}

/// Physical state of the vent, reported after every integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VentStatus {
    Integrating,
    NearEquilibrium,
    Equilibrium,
    Depleted,
}

impl std::fmt::Display for VentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VentStatus::Integrating => "integrating",
            VentStatus::NearEquilibrium => "near equilibrium",
            VentStatus::Equilibrium => "equilibrium",
            VentStatus::Depleted => "depleted",
        };
        write!(f, "{}", name)
    }
}

/// One boundary face sample supplied by the solver for the current step.
///
/// Sign convention: positive `flux` means mass leaving the vessel into the
/// fluid domain. The convention must be confirmed per boundary when the
/// profile is assigned in the case setup; it is not checked here.
#[derive(Debug, Clone, Copy)]
pub struct FaceSample {
    pub density: f64,                  // [kg/m³]
    pub flux: f64,                     // [m³/s], or [kg/s] when mass weighted
    pub neighbor_density: Option<f64>, // [kg/m³] - set for an interior cell pair
}

impl FaceSample {
    /// Density seen by the face. A face adjoining an interior cell pair
    /// averages both neighboring cell densities.
    pub fn effective_density(&self) -> f64 {
        match self.neighbor_density {
            Some(other) => 0.5 * (self.density + other),
            None => self.density,
        }
    }
}

/// Structured record of one adjust step, handed to the observers.
#[derive(Debug, Clone, Copy)]
pub struct StepRecord {
    pub time: f64,     // [s]
    pub dt: f64,       // [s]
    pub flow: f64,     // [kg/s]
    pub mass: f64,     // [kg]
    pub pressure: f64, // [Pa]
    pub status: VentStatus,
    pub mass_clamped: bool,
}

#[derive(Debug)]
pub struct VesselProperties<'a> {
    pub name: &'a str,
    pub pressure: f64,    // Pa
    pub temperature: f64, // K
    pub mass: f64,        // kg
    pub volume: f64,      // m³
    pub gas_const: f64,   // J/(kg.K)
}

impl<'a> std::fmt::Display for VesselProperties<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:
        pressure: {} [Pa]
        temperature: {} [K]
        mass: {} [kg]
        volume: {} [m³]
        R: {} [J/(kg.K)]",
            self.name, self.pressure, self.temperature, self.mass, self.volume, self.gas_const
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_density_of_interior_pair_is_the_mean() {
        let interior = FaceSample {
            density: 1.0,
            flux: 0.2,
            neighbor_density: Some(3.0),
        };
        assert_eq!(interior.effective_density(), 2.0);

        let exterior = FaceSample {
            density: 1.2,
            flux: 0.2,
            neighbor_density: None,
        };
        assert_eq!(exterior.effective_density(), 1.2);
    }

    #[test]
    fn status_displays_as_plain_words() {
        assert_eq!(format!("{}", VentStatus::NearEquilibrium), "near equilibrium");
        assert_eq!(format!("{}", VentStatus::Depleted), "depleted");
    }
}

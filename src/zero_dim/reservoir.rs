use crate::core::traits::SaveData;
use crate::numerics::integrator::{MassIntegrator, StepOutcome};
use crate::thermo::gas::Gas;
use crate::zero_dim::environment::Environment;
use crate::{VentStatus, VesselProperties};
use ndarray::*;

/// The pressurized vessel: a fixed-volume, isothermal gas reservoir whose
/// mass depletes through the vent boundary. The initial mass comes from the
/// ideal-gas relation at the gas object's pressure and temperature; there is
/// no way to re-derive it afterwards.
pub struct Reservoir {
    name: String,
    gas: Gas,
    volume: f64,           // [m³]
    mass: f64,             // [kg]
    initial_mass: f64,     // [kg]
    initial_pressure: f64, // [Pa]
    flow: f64,             // [kg/s] - latest boundary flow, positive = leaving
    status: VentStatus,
}

impl Reservoir {
    pub fn new(name: String, gas: &Gas, volume: f64) -> Result<Reservoir, &'static str> {
        if volume <= 0.0 {
            return Err("`volume` must be greater than zero");
        }
        if gas.R() <= 0.0 || gas.T() <= 0.0 {
            return Err("gas constant and temperature must be greater than zero");
        }
        if gas.P() < 0.0 {
            return Err("initial pressure cannot be negative");
        }

        let mass = gas.P() * volume / (gas.R() * gas.T());
        Ok(Reservoir {
            name,
            gas: gas.clone(),
            volume,
            mass,
            initial_mass: mass,
            initial_pressure: gas.P(),
            flow: 0.0,
            status: VentStatus::Integrating,
        })
    }

    pub fn name<'a>(&'a self) -> &'a str {
        &self.name
    }

    pub fn gas(&self) -> &Gas {
        &self.gas
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn pressure(&self) -> f64 {
        self.gas.P()
    }

    pub fn initial_mass(&self) -> f64 {
        self.initial_mass
    }

    pub fn initial_pressure(&self) -> f64 {
        self.initial_pressure
    }

    pub fn flow(&self) -> f64 {
        self.flow
    }

    pub fn status(&self) -> VentStatus {
        self.status
    }

    pub fn update_flow(&mut self, flow: f64) {
        self.flow = flow;
    }

    /// Advances mass and pressure over `dt` using the latest boundary flow.
    pub fn advance(&mut self, dt: f64, ambient: Option<&Environment>) -> StepOutcome {
        let integrator = MassIntegrator::from_gas(&self.gas, self.volume);
        let outcome = integrator.step(self.mass, self.gas.P(), self.status, self.flow, dt, ambient);
        self.mass = outcome.mass;
        self.gas.TP(self.gas.T(), outcome.pressure);
        self.status = outcome.status;
        outcome
    }

    pub fn get_state(&self) -> VesselProperties {
        VesselProperties {
            name: self.name(),
            pressure: self.gas.P(),
            temperature: self.gas.T(),
            mass: self.mass,
            volume: self.volume,
            gas_const: self.gas.R(),
        }
    }
}

impl SaveData for Reservoir {
    fn get_headers(&self) -> String {
        "mass [kg]\tpressure [bar]\ttemperature [K]\tflow [kg/s]".to_string()
    }
    fn num_storable_variables(&self) -> usize {
        4
    }
    fn get_storable_data(&self) -> Array1<f64> {
        array![self.mass, self.gas.P() / 1e5, self.gas.T(), self.flow]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charged_gas() -> Gas {
        let mut gas = Gas::from_molar_mass("vent gas", 88.15);
        gas.TP(298.15, 405300.0);
        gas
    }

    #[test]
    fn initial_mass_from_ideal_gas_relation() {
        let gas = charged_gas();
        let res = Reservoir::new("bottle".to_string(), &gas, 10.0).unwrap();
        let expected = 405300.0 * 10.0 / (gas.R() * 298.15);
        assert!((res.mass() - expected).abs() < 1e-9);
        assert_eq!(res.initial_mass(), res.mass());
        assert_eq!(res.initial_pressure(), 405300.0);
        assert_eq!(res.pressure(), 405300.0);
    }

    #[test]
    fn rejects_invalid_configuration() {
        let gas = charged_gas();
        assert!(Reservoir::new("bottle".to_string(), &gas, 0.0).is_err());
        assert!(Reservoir::new("bottle".to_string(), &gas, -1.0).is_err());

        let mut cold = charged_gas();
        cold.TP(0.0, 405300.0);
        assert!(Reservoir::new("bottle".to_string(), &cold, 10.0).is_err());
    }

    #[test]
    fn advance_keeps_pressure_consistent_with_mass() {
        let gas = charged_gas();
        let mut res = Reservoir::new("bottle".to_string(), &gas, 10.0).unwrap();
        let before = res.mass();

        res.update_flow(50.0);
        let outcome = res.advance(1.0, None);

        assert!((res.mass() - (before - 50.0)).abs() < 1e-9);
        assert!((res.pressure() - res.mass() * gas.R() * 298.15 / 10.0).abs() < 1e-6);
        assert_eq!(outcome.status, VentStatus::Integrating);
        assert_eq!(res.status(), VentStatus::Integrating);
    }

    #[test]
    fn drains_to_depleted_without_an_ambient() {
        let gas = charged_gas();
        let mut res = Reservoir::new("small".to_string(), &gas, 0.01).unwrap();
        res.update_flow(res.mass() * 10.0);
        res.advance(1.0, None);
        assert_eq!(res.mass(), 0.0);
        assert_eq!(res.pressure(), 0.0);
        assert_eq!(res.status(), VentStatus::Depleted);
    }
}

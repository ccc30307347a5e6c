//! Closed-form per-step update of the vessel mass balance.
//!
//! The update is explicit forward-Euler: one subtraction per step, a
//! non-negativity clamp, and an ideal-gas pressure recomputation. Accuracy
//! is bounded only by the `dt` granularity of the caller's time stepping.

use crate::thermo::gas::Gas;
use crate::zero_dim::environment::Environment;
use crate::VentStatus;

/// Result of a single integration step.
#[derive(Debug, Clone, Copy)]
pub struct StepOutcome {
    pub mass: f64,     // [kg]
    pub pressure: f64, // [Pa]
    pub status: VentStatus,
    pub mass_clamped: bool,
}

/// Advances the mass and pressure of a fixed-volume isothermal vessel.
#[derive(Debug, Clone, Copy)]
pub struct MassIntegrator {
    gas_const: f64,   // [J/(kg.K)]
    temperature: f64, // [K]
    volume: f64,      // [m³]
}

impl MassIntegrator {
    pub fn new(gas_const: f64, temperature: f64, volume: f64) -> MassIntegrator {
        MassIntegrator {
            gas_const,
            temperature,
            volume,
        }
    }

    pub fn from_gas(gas: &Gas, volume: f64) -> MassIntegrator {
        MassIntegrator::new(gas.R(), gas.T(), volume)
    }

    /// Pressure of `mass` kilograms filling the vessel volume.
    pub fn pressure_of(&self, mass: f64) -> f64 {
        mass * self.gas_const * self.temperature / self.volume
    }

    /// Advances `(mass, pressure)` over `dt` given the boundary mass flow,
    /// positive = leaving the vessel. `dt <= 0` returns the state unchanged,
    /// which also covers duplicate-timestamp calls.
    pub fn step(
        &self,
        mass: f64,
        pressure: f64,
        status: VentStatus,
        flow: f64,
        dt: f64,
        ambient: Option<&Environment>,
    ) -> StepOutcome {
        if dt <= 0.0 {
            return StepOutcome {
                mass,
                pressure,
                status,
                mass_clamped: false,
            };
        }

        // A resealed disk keeps the vessel at the ambient state once the
        // pressures have equalized.
        if let Some(env) = ambient {
            if env.reseal() && status == VentStatus::Equilibrium {
                return StepOutcome {
                    mass,
                    pressure,
                    status,
                    mass_clamped: false,
                };
            }
        }

        let mut new_mass = mass - flow * dt;
        let mut mass_clamped = false;
        if new_mass < 0.0 {
            new_mass = 0.0;
            mass_clamped = true;
        }

        let mut new_pressure = self.pressure_of(new_mass);
        let mut new_status = if new_mass == 0.0 {
            VentStatus::Depleted
        } else {
            VentStatus::Integrating
        };

        if let Some(env) = ambient {
            if new_pressure <= env.pressure() {
                new_pressure = env.pressure();
                new_status = VentStatus::Equilibrium;
            } else if new_pressure - env.pressure() < env.margin() {
                new_status = VentStatus::NearEquilibrium;
            }
        }

        StepOutcome {
            mass: new_mass,
            pressure: new_pressure,
            status: new_status,
            mass_clamped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ambient(reseal: bool) -> Environment {
        Environment::new("ambient".to_string(), 101325.0, reseal).unwrap()
    }

    #[test]
    fn no_op_on_non_positive_dt() {
        let integrator = MassIntegrator::new(287.0, 300.0, 1.0);
        for dt in &[0.0, -1.0] {
            let out = integrator.step(5.0, 999.0, VentStatus::NearEquilibrium, 3.0, *dt, None);
            assert_eq!(out.mass, 5.0);
            assert_eq!(out.pressure, 999.0);
            assert_eq!(out.status, VentStatus::NearEquilibrium);
            assert!(!out.mass_clamped);
        }
    }

    #[test]
    fn bottle_discharge_step() {
        // 10 m³ vessel charged to 405300 Pa with a 88.15 kg/kmol gas at 25 °C
        let r = 8.3143 / 0.08815;
        let integrator = MassIntegrator::new(r, 298.15, 10.0);
        let env = ambient(true);

        let mass0 = 405300.0 * 10.0 / (r * 298.15);
        assert!((mass0 - 144.12).abs() < 1e-2);

        let out = integrator.step(mass0, 405300.0, VentStatus::Integrating, 50.0, 1.0, Some(&env));
        assert!((out.mass - (mass0 - 50.0)).abs() < 1e-9);
        assert!((out.pressure - integrator.pressure_of(out.mass)).abs() < 1e-9);
        assert!((out.pressure - 264692.6).abs() < 1.0);
        // well above atmospheric, no clamp
        assert_eq!(out.status, VentStatus::Integrating);
    }

    #[test]
    fn mass_never_goes_negative() {
        let integrator = MassIntegrator::new(287.0, 300.0, 1.0);
        let mut mass = 3.0;
        let mut pressure = integrator.pressure_of(mass);
        let mut status = VentStatus::Integrating;
        let flows = [5.0, -1.0, 12.0, 0.0, 7.5];
        let dts = [0.5, 1.0, 2.0, 0.1, 0.7];
        for (flow, dt) in flows.iter().zip(dts.iter()) {
            let out = integrator.step(mass, pressure, status, *flow, *dt, None);
            assert!(out.mass >= 0.0);
            mass = out.mass;
            pressure = out.pressure;
            status = out.status;
        }
    }

    #[test]
    fn constant_outflow_depletes_monotonically() {
        let integrator = MassIntegrator::new(287.0, 300.0, 1.0);
        let mut mass = 3.0;
        let mut pressure = integrator.pressure_of(mass);
        let mut status = VentStatus::Integrating;
        let mut previous = mass;
        let mut clamp_seen = false;
        for _ in 0..10 {
            let out = integrator.step(mass, pressure, status, 1.0, 0.5, None);
            assert!(out.mass <= previous);
            // consistency holds whenever no ambient clamp is in play
            assert!((out.pressure - integrator.pressure_of(out.mass)).abs() < 1e-9);
            clamp_seen |= out.mass_clamped;
            previous = out.mass;
            mass = out.mass;
            pressure = out.pressure;
            status = out.status;
        }
        assert_eq!(mass, 0.0);
        assert_eq!(status, VentStatus::Depleted);
        assert!(clamp_seen);
    }

    #[test]
    fn clamps_at_ambient_and_reports_equilibrium() {
        let integrator = MassIntegrator::new(287.0, 300.0, 1.0); // pressure_of(m) = 86100 m
        let env = ambient(true);

        let out = integrator.step(1.25, integrator.pressure_of(1.25), VentStatus::Integrating, 0.25, 1.0, Some(&env));
        assert_eq!(out.mass, 1.0);
        assert_eq!(out.pressure, 101325.0);
        assert_eq!(out.status, VentStatus::Equilibrium);

        // resealed: the next step holds mass and pressure no matter the flow
        let held = integrator.step(out.mass, out.pressure, out.status, 0.25, 1.0, Some(&env));
        assert_eq!(held.mass, 1.0);
        assert_eq!(held.pressure, 101325.0);
        assert_eq!(held.status, VentStatus::Equilibrium);
    }

    #[test]
    fn without_reseal_the_floor_stays_but_mass_keeps_moving() {
        let integrator = MassIntegrator::new(287.0, 300.0, 1.0);
        let env = ambient(false);

        let out = integrator.step(1.0, 101325.0, VentStatus::Equilibrium, 0.25, 1.0, Some(&env));
        assert_eq!(out.mass, 0.75);
        assert_eq!(out.pressure, 101325.0);
        assert_eq!(out.status, VentStatus::Equilibrium);
    }

    #[test]
    fn reports_near_equilibrium_within_the_margin() {
        let integrator = MassIntegrator::new(287.0, 300.0, 1.0);
        let env = ambient(true);

        // lands at 102008.7 Pa, 683.7 Pa above ambient: inside the 1000 Pa band
        let out = integrator.step(1.19477, integrator.pressure_of(1.19477), VentStatus::Integrating, 0.01, 1.0, Some(&env));
        assert_eq!(out.status, VentStatus::NearEquilibrium);
        assert!(out.pressure > env.pressure());
        assert!(out.pressure - env.pressure() < env.margin());
    }
}

use crate::case::json_reader;
use crate::connector::boundary::BoundaryCoupling;
use crate::connector::conn_core::{Reduction, SerialReduction};
use crate::connector::flow_model::{FlowModel, FluxAggregation, MassRatio};
use crate::core::monitor::ConsoleMonitor;
use crate::core::system::VentSystem;
use crate::core::traits::StepObserver;
use crate::thermo::gas::Gas;
use crate::zero_dim::environment::Environment;
use crate::zero_dim::reservoir::Reservoir;
use crate::ProfileKind;

pub struct VentSystemBuilder {
    objs_name: Vec<String>,
    vessel: Option<Reservoir>,
    ambient: Option<Environment>,
    coupling: Option<BoundaryCoupling>,
    reduction: Box<dyn Reduction>,
    observers: Vec<Box<dyn StepObserver>>,
}

impl VentSystemBuilder {
    /// Creates a `VentSystemBuilder`. This object is used to construct the
    /// desired vent case to simulate. The construction is made by the object
    /// methods exclusively. Once the building is finished, the system can be
    /// built using `build_system()` method.
    pub fn new() -> VentSystemBuilder {
        VentSystemBuilder {
            objs_name: Vec::new(),
            vessel: None,
            ambient: None,
            coupling: None,
            reduction: Box::new(SerialReduction),
            observers: Vec::new(),
        }
    }

    /// Build a `VentSystem`. `VentSystemBuilder` object is consumed in the process.
    pub fn build_system(self) -> VentSystem {
        let vessel = match self.vessel {
            Some(vessel) => vessel,
            None => {
                println!("Error at 'VentSystemBuilder::build_system()':");
                println!(" no vessel was added");
                std::process::exit(1)
            }
        };
        let mut coupling = match self.coupling {
            Some(coupling) => coupling,
            None => {
                println!("Error at 'VentSystemBuilder::build_system()':");
                println!(" no vent boundary was added");
                std::process::exit(1)
            }
        };
        coupling.refresh(&vessel, 0.0);
        VentSystem::new(vessel, self.ambient, coupling, self.reduction, self.observers)
    }

    /// Add the pressurized vessel. `volume` must be in cubic meters [m³];
    /// the initial pressure and the constant temperature are taken from `gas`.
    pub fn add_vessel<'a>(&'a mut self, elem_name: &str, volume: f64, gas: &Gas) -> &'a mut Self {
        // checking if 'elem_name' already exists
        if self.does_it_exist(elem_name) {
            println!("Error at 'add_vessel':");
            println!("Object with the same name already exists: `{}`", elem_name);
            std::process::exit(1)
        }
        if self.vessel.is_some() {
            println!("Error at 'add_vessel':");
            println!("A vessel was already added");
            std::process::exit(1)
        }

        let vessel = match Reservoir::new(elem_name.to_string(), gas, volume) {
            Ok(v) => v,
            Err(err) => {
                println!("Error at 'add_vessel':\n {}", err);
                std::process::exit(1)
            }
        };

        self.objs_name.push(elem_name.to_string());
        self.vessel = Some(vessel);
        self
    }

    /// Add the ambient the vessel vents into. With `reseal`, the vent closes
    /// for good once vessel and ambient pressures equalize.
    pub fn add_environment<'a>(
        &'a mut self,
        elem_name: &str,
        pressure: f64,
        reseal: bool,
    ) -> &'a mut Self {
        if self.does_it_exist(elem_name) {
            println!("Error at 'add_environment':");
            println!("Object with the same name already exists: `{}`", elem_name);
            std::process::exit(1)
        }
        if self.ambient.is_some() {
            println!("Error at 'add_environment':");
            println!("An environment was already added");
            std::process::exit(1)
        }

        let env = match Environment::new(elem_name.to_string(), pressure, reseal) {
            Ok(v) => v,
            Err(err) => {
                println!("Error at 'add_environment':\n {}", err);
                std::process::exit(1)
            }
        };

        self.objs_name.push(elem_name.to_string());
        self.ambient = Some(env);
        self
    }

    /// Set the pressure band above ambient reported as near equilibrium, in [Pa].
    pub fn equilibrium_margin<'a>(&'a mut self, margin: f64) -> &'a mut Self {
        match self.ambient.as_mut() {
            Some(env) => {
                if let Err(err) = env.set_margin(margin) {
                    println!("Error at 'equilibrium_margin':\n {}", err);
                    std::process::exit(1)
                }
            }
            None => {
                println!("Error at 'equilibrium_margin':");
                println!("No environment was added");
                std::process::exit(1)
            }
        }
        self
    }

    /// Bind the vent to a named boundary of the solver case. The name must
    /// exactly match the boundary name configured in the case setup.
    /// Positive sampled flux is assumed to leave the vessel; validate that
    /// convention per boundary when assigning the profile, it is not checked
    /// here.
    pub fn vent_through<'a>(
        &'a mut self,
        boundary_name: &str,
        kind: ProfileKind,
        flow_model: Box<dyn FlowModel>,
    ) -> &'a mut Self {
        if self.does_it_exist(boundary_name) {
            println!("Error at 'vent_through':");
            println!("Object with the same name already exists: `{}`", boundary_name);
            std::process::exit(1)
        }
        if self.coupling.is_some() {
            println!("Error at 'vent_through':");
            println!("A vent boundary was already added");
            std::process::exit(1)
        }

        let coupling = match BoundaryCoupling::new(boundary_name, kind, flow_model) {
            Ok(v) => v,
            Err(err) => {
                println!("Error at 'vent_through':\n {}", err);
                std::process::exit(1)
            }
        };

        self.objs_name.push(boundary_name.to_string());
        self.coupling = Some(coupling);
        self
    }

    /// Add a console monitor printing a step summary every `every` steps.
    pub fn add_monitor<'a>(&'a mut self, every: usize) -> &'a mut Self {
        self.observers.push(Box::new(ConsoleMonitor::every(every)));
        self
    }

    pub fn add_observer<'a>(&'a mut self, observer: Box<dyn StepObserver>) -> &'a mut Self {
        self.observers.push(observer);
        self
    }

    /// Replace the cross-partition reduction used to combine the per-node
    /// partial flow sums. Single-partition runs keep the default identity.
    pub fn set_reduction<'a>(&'a mut self, reduction: Box<dyn Reduction>) -> &'a mut Self {
        self.reduction = reduction;
        self
    }

    /// Add vessel, gas, ambient and vent boundary from a `.json` case file.
    pub fn add_case_file<'a>(&'a mut self, file_name: &str) -> &'a mut Self {
        let case = match json_reader::read_case(file_name) {
            Ok(case) => case,
            Err(err) => {
                println!("Error at 'add_case_file':\n {}", err);
                std::process::exit(1)
            }
        };

        let mut gas = Gas::from_molar_mass(&case.gas.name, case.gas.molar_weight);
        gas.TP(case.gas.temperature, case.vessel.initial_pressure);
        self.add_vessel(&case.vessel.name, case.vessel.volume, &gas);

        if let Some(amb) = &case.ambient {
            self.add_environment(&amb.name, amb.pressure, amb.reseal.unwrap_or(true));
            if let Some(margin) = amb.margin {
                self.equilibrium_margin(margin);
            }
        }

        let kind = match case.boundary.profile.as_str() {
            "pressure" => ProfileKind::Pressure,
            "mass_flow" => ProfileKind::MassFlow,
            other => {
                println!("Error at 'add_case_file':");
                println!("Unknown profile kind: `{}`. Use \"pressure\" or \"mass_flow\"", other);
                std::process::exit(1)
            }
        };
        let model: Box<dyn FlowModel> = match case.boundary.model.as_str() {
            "flux" => Box::new(FluxAggregation::new(
                case.boundary.mass_weighted.unwrap_or(false),
            )),
            "mass_ratio" => {
                let base_flow = match case.boundary.base_flow {
                    Some(base_flow) => base_flow,
                    None => {
                        println!("Error at 'add_case_file':");
                        println!("`base_flow` is required by the mass_ratio model");
                        std::process::exit(1)
                    }
                };
                Box::new(MassRatio::new(base_flow))
            }
            other => {
                println!("Error at 'add_case_file':");
                println!("Unknown flow model: `{}`. Use \"flux\" or \"mass_ratio\"", other);
                std::process::exit(1)
            }
        };
        self.vent_through(&case.boundary.name, kind, model);
        self
    }

    fn does_it_exist(&self, obj_name: &str) -> bool {
        self.objs_name.iter().any(|name| name == obj_name)
    }
}

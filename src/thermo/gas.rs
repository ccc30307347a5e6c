#![allow(non_snake_case)]

use crate::thermo::json_data;

/// Single-species ideal gas at fixed composition. The specific gas constant
/// is derived once from the molar weight; density follows temperature and
/// pressure.
#[derive(Debug, Clone)]
pub struct Gas {
    name: String,
    thermo_prop: ThermoProp,
}

impl Gas {
    /// Creates a `Gas` object from a file
    pub fn new(gas_file: &str) -> Gas {
        let json_output = json_data::read_and_treat_json(gas_file);
        let mut gas = Gas::from_molar_mass(&json_output.name, json_output.molar_weight);
        gas.TP(json_output.ini_temp, json_output.ini_press);
        gas
    }

    /// Creates a `Gas` directly from a molar weight in `[kg/kmol]`, at
    /// ambient reference temperature and pressure.
    pub fn from_molar_mass(name: &str, molar_weight: f64) -> Gas {
        if molar_weight <= 0.0 {
            panic!("'molar_weight' must be greater than zero: {}", molar_weight);
        }
        let M = molar_weight * 1e-3; // [kg/mol]
        let mut gas = Gas {
            name: name.to_string(),
            thermo_prop: ThermoProp {
                P: 0.0,
                T: 0.0,
                rho: 0.0,
                R: 8.3143 / M,
                M,
            },
        };
        gas.TP(298.15, 101325.0);
        gas
    }

    /// Set temperature and pressure. Density is recalculated
    /// # Examples
    /// ```
    /// use vessel_blowdown::Gas;
    /// let mut gas = Gas::from_molar_mass("air", 28.96);
    /// gas.TP(350.0, 2e5);
    /// assert_eq!(350.0, gas.T());
    /// assert_eq!(2e5, gas.P());
    /// ```
    pub fn TP(&mut self, temp: f64, press: f64) {
        self.thermo_prop.T = temp;
        self.thermo_prop.P = press;
        self.calc_prop();
    }

    fn calc_prop(&mut self) {
        let prop = &mut self.thermo_prop;
        prop.rho = if prop.T > 0.0 {
            prop.P / (prop.R * prop.T)
        } else {
            0.0
        };
    }

    pub fn name(&self) -> String {
        self.name.clone()
    }

    pub fn T(&self) -> f64 {
        self.thermo_prop.T
    }

    pub fn P(&self) -> f64 {
        self.thermo_prop.P
    }

    pub fn rho(&self) -> f64 {
        self.thermo_prop.rho
    }

    pub fn R(&self) -> f64 {
        self.thermo_prop.R
    }

    pub fn M(&self) -> f64 {
        self.thermo_prop.M
    }
}

#[derive(Debug, Clone)]
struct ThermoProp {
    P: f64,   // pressure
    T: f64,   // temperature
    rho: f64, // density
    R: f64,   // ideal gas constant [J/(kg.K)]
    M: f64,   // molecular weight [kg/mol]
}

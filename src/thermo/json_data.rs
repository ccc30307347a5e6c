// File to read and treat the data in the .json gas files

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
struct IdealGas {
    name: String,
    molar_weight: f64, // [kg/kmol]
    state: State,
}

#[derive(Serialize, Deserialize, Debug)]
struct State {
    temperature: f64, // [K]
    pressure: f64,    // [Pa]
}

#[derive(Debug)]
pub struct OutputJson {
    pub name: String,
    pub molar_weight: f64,
    pub ini_temp: f64,
    pub ini_press: f64,
}

pub fn read_and_treat_json(file_name: &str) -> OutputJson {
    // Reading .json file
    let json_file = std::fs::read_to_string(file_name).expect("Unable to read file");
    let gas: IdealGas = serde_json::from_str(&json_file).unwrap();

    if gas.molar_weight <= 0.0 {
        panic!("'molar_weight' must be greater than zero: {}", gas.molar_weight);
    }

    OutputJson {
        name: gas.name,
        molar_weight: gas.molar_weight,
        ini_temp: gas.state.temperature,
        ini_press: gas.state.pressure,
    }
}

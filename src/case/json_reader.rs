use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonCase {
    pub vessel: JsonVessel,
    pub gas: JsonGas,
    pub ambient: Option<JsonAmbient>,
    pub boundary: JsonBoundary,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonVessel {
    pub name: String,
    pub volume: f64,           // [m³]
    pub initial_pressure: f64, // [Pa]
}

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonGas {
    pub name: String,
    pub molar_weight: f64, // [kg/kmol]
    pub temperature: f64,  // [K]
}

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonAmbient {
    pub name: String,
    pub pressure: f64,       // [Pa]
    pub margin: Option<f64>, // [Pa]
    pub reseal: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonBoundary {
    pub name: String,
    pub profile: String,             // "pressure" or "mass_flow"
    pub model: String,               // "flux" or "mass_ratio"
    pub base_flow: Option<f64>,      // [kg/s] - mass_ratio model
    pub mass_weighted: Option<bool>, // flux model: samples already in [kg/s]
}

pub fn read_case(file_name: &str) -> Result<JsonCase, String> {
    let json_file = std::fs::read_to_string(file_name)
        .map_err(|err| format!("Unable to read '{}': {}", file_name, err))?;
    parse_case(&json_file)
}

pub fn parse_case(contents: &str) -> Result<JsonCase, String> {
    serde_json::from_str(contents).map_err(|err| format!("Invalid case file: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_case() {
        let case = parse_case(
            r#"{
                "vessel": { "name": "bottle", "volume": 10.0, "initial_pressure": 405300.0 },
                "gas": { "name": "vent gas", "molar_weight": 88.15, "temperature": 298.15 },
                "ambient": { "name": "ambient", "pressure": 101325.0, "margin": 500.0, "reseal": true },
                "boundary": { "name": "inlet_burst_disk", "profile": "pressure", "model": "flux",
                              "mass_weighted": false }
            }"#,
        )
        .unwrap();

        assert_eq!(case.vessel.name, "bottle");
        assert_eq!(case.gas.molar_weight, 88.15);
        assert_eq!(case.ambient.unwrap().margin, Some(500.0));
        assert_eq!(case.boundary.profile, "pressure");
        assert_eq!(case.boundary.base_flow, None);
    }

    #[test]
    fn ambient_and_options_may_be_omitted() {
        let case = parse_case(
            r#"{
                "vessel": { "name": "bottle", "volume": 0.2, "initial_pressure": 2.0e6 },
                "gas": { "name": "nitrogen", "molar_weight": 28.01, "temperature": 293.15 },
                "boundary": { "name": "supply_inlet", "profile": "mass_flow",
                              "model": "mass_ratio", "base_flow": 1.0 }
            }"#,
        )
        .unwrap();

        assert!(case.ambient.is_none());
        assert_eq!(case.boundary.base_flow, Some(1.0));
        assert_eq!(case.boundary.mass_weighted, None);
    }

    #[test]
    fn rejects_malformed_case_files() {
        assert!(parse_case("{ not json }").is_err());
        assert!(parse_case(r#"{ "vessel": { "name": "bottle" } }"#).is_err());
    }
}

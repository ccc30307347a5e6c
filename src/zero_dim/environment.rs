/// Zero-dimensional ambient the vessel vents into. Constant pressure and
/// infinite extent; the vent acts as a one-way boundary, so venting stops
/// once vessel and ambient pressures equalize.
pub struct Environment {
    name: String,
    pressure: f64, // [Pa]
    margin: f64,   // [Pa] - band above `pressure` reported as near equilibrium
    reseal: bool,
}

impl Environment {
    /// With `reseal`, the vent closes for good at equilibrium (burst-disk
    /// behavior); otherwise integration continues with the pressure floored
    /// at the ambient level.
    pub fn new(name: String, pressure: f64, reseal: bool) -> Result<Environment, &'static str> {
        if pressure <= 0.0 {
            return Err("`pressure` must be greater than zero");
        }

        Ok(Environment {
            name,
            pressure,
            margin: 1000.0,
            reseal,
        })
    }

    pub fn name<'a>(&'a self) -> &'a str {
        &self.name
    }

    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn set_margin(&mut self, margin: f64) -> Result<(), &'static str> {
        if margin <= 0.0 {
            return Err("`margin` must be greater than zero");
        }
        self.margin = margin;
        Ok(())
    }

    pub fn reseal(&self) -> bool {
        self.reseal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_pressure() {
        assert!(Environment::new("ambient".to_string(), 0.0, true).is_err());
        assert!(Environment::new("ambient".to_string(), -101325.0, true).is_err());
    }

    #[test]
    fn margin_defaults_and_can_be_tightened() {
        let mut env = Environment::new("ambient".to_string(), 101325.0, true).unwrap();
        assert_eq!(env.margin(), 1000.0);
        env.set_margin(500.0).unwrap();
        assert_eq!(env.margin(), 500.0);
        assert!(env.set_margin(0.0).is_err());
    }
}

use crate::core::traits::StepObserver;
use crate::{StepRecord, VentStatus};
use ansi_term::Style;

/// Prints per-step summaries in the solver console style. Status changes
/// are always announced; the regular summary line can be thinned out with
/// `every`.
pub struct ConsoleMonitor {
    every: usize,
    count: usize,
    last_status: Option<VentStatus>,
}

impl ConsoleMonitor {
    pub fn new() -> ConsoleMonitor {
        ConsoleMonitor::every(1)
    }

    /// Prints the summary line every `every` steps.
    pub fn every(every: usize) -> ConsoleMonitor {
        ConsoleMonitor {
            every: every.max(1),
            count: 0,
            last_status: None,
        }
    }

    fn announce(&self, record: &StepRecord) {
        match record.status {
            VentStatus::Equilibrium => println!(
                "{}",
                Style::new()
                    .bold()
                    .paint("*** EQUILIBRIUM REACHED - vessel pressure at the ambient level ***")
            ),
            VentStatus::Depleted => println!(
                "{}",
                Style::new().bold().paint("*** VESSEL DEPLETED - no gas left to vent ***")
            ),
            VentStatus::NearEquilibrium => {
                println!("*** approaching equilibrium at t = {:.6} s ***", record.time)
            }
            VentStatus::Integrating => {}
        }
    }
}

impl StepObserver for ConsoleMonitor {
    fn on_step(&mut self, record: &StepRecord) {
        if self.last_status.is_none() && record.dt == 0.0 {
            // the very first adjust call only records the time origin
            println!(
                "First adjust call - mass: {:.4} kg, pressure: {:.1} Pa",
                record.mass, record.pressure
            );
            self.last_status = Some(record.status);
            return;
        }

        self.count += 1;
        if record.mass_clamped {
            println!("Warning: mass became negative, setting to zero");
        }
        if self.last_status != Some(record.status) {
            self.announce(record);
            self.last_status = Some(record.status);
        }
        if self.count % self.every == 0 {
            println!(
                "t: {:.6} s, dt: {:.6} s, flow: {:e} kg/s, mass: {:.4} kg, pressure: {:.1} Pa ({:.2} bar) [{}]",
                record.time,
                record.dt,
                record.flow,
                record.mass,
                record.pressure,
                record.pressure / 1e5,
                record.status
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_stride_is_promoted_to_one() {
        let mut monitor = ConsoleMonitor::every(0);
        let record = StepRecord {
            time: 1.0,
            dt: 0.5,
            flow: 1.0,
            mass: 2.0,
            pressure: 1e5,
            status: VentStatus::Integrating,
            mass_clamped: false,
        };
        // must not divide by zero
        monitor.on_step(&record);
        monitor.on_step(&record);
    }
}

use gnuplot::{AxesCommon, Caption, Color, Figure};
use std::io::Write;
use vessel_blowdown as vbd;
use vbd::Gas;

// Blow-down of a 10 m³ bottle through a rupture disk into the atmosphere,
// driven by a fixed-dt step loop standing in for the solver.
fn main() {
    let mut gas = Gas::from_molar_mass("vent gas", 88.15);
    gas.TP(298.15, 405300.0);

    let mut builder = vbd::VentSystemBuilder::new();
    builder
        .add_vessel("bottle", 10.0, &gas)
        .add_environment("ambient", 101325.0, true)
        .vent_through(
            "inlet_burst_disk",
            vbd::ProfileKind::MassFlow,
            Box::new(vbd::MassRatio::new(5.0)),
        )
        .add_monitor(50);
    let mut system = builder.build_system();

    let dt = 0.05;
    let registry = vbd::NoFaces;
    let mut profile = vec![0.0_f64; 64]; // stand-in for the boundary face set
    let mut times: Vec<f64> = Vec::new();
    let mut pressures: Vec<f64> = Vec::new();

    for n in 0..=1200 {
        let time = n as f64 * dt;
        let status = system.adjust(time, &registry);
        system.emit_profile(&mut profile);
        times.push(time);
        pressures.push(system.vessel().pressure() / 1e5);
        if status == vbd::VentStatus::Equilibrium {
            break;
        }
    }

    system.print_state();

    let mut file = std::fs::File::create("result").expect("Error opening writing file");
    write!(
        file,
        "{}\n{}",
        system.stored_headers(),
        system.stored_data.join("")
    )
    .expect("Unable to write data");

    let mut fg = Figure::new();
    fg.axes2d()
        .set_x_label("time [s]", &[])
        .set_y_label("vessel pressure [bar]", &[])
        .lines(&times, &pressures, &[Caption("vessel blow-down"), Color("blue")]);
    fg.echo_to_file("blowdown.gnuplot");
}

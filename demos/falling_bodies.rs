//! Drops a cube, a tilted box and a sphere onto the ground and prints their
//! heights. Run with `RUST_LOG=debug` to see contacts as they are resolved.

use log::info;
use rs_rigid_body::utils::rotation_from_axis_angle;
use rs_rigid_body::{BodyInit, Geometry, PhysicsError, Simulation, SimulationConfig};

fn main() -> Result<(), PhysicsError> {
    env_logger::init();

    let config = SimulationConfig { ground_angular_damping: 0.9, ..SimulationConfig::default() };
    let mut simulation = Simulation::new(config)?;

    simulation.add_body(Geometry::cube(1.0)?, 1.0, BodyInit { restitution: 0.5, ..BodyInit::at((0.0, 5.5, 0.0)) })?;
    simulation.add_body(
        Geometry::cuboid(2.0, 0.5, 1.0)?,
        2.0,
        BodyInit {
            orientation: rotation_from_axis_angle((1.0, 0.0, 1.0), 0.6)?,
            angular_velocity: (0.0, 1.0, 0.0),
            restitution: 0.3,
            ..BodyInit::at((3.0, 4.0, 0.0))
        },
    )?;
    simulation.add_body(
        Geometry::uv_sphere(0.75, 10, 20)?,
        1.5,
        BodyInit { velocity: (-0.5, 0.0, 0.0), restitution: 0.8, ..BodyInit::at((6.0, 3.0, 0.0)) },
    )?;

    let frames_per_second = (1.0 / config.step_size).round() as usize;
    for frame in 0..5 * frames_per_second {
        let report = simulation.step_frame();
        if report.contacts_resolved > 0 {
            info!("frame {}: {} contact(s)", frame, report.contacts_resolved);
        }
        if frame % (frames_per_second / 4).max(1) == 0 {
            let heights: Vec<String> = simulation
                .bodies()
                .iter()
                .map(|body| format!("{:7.3}", body.position().1))
                .collect();
            println!("t = {:5.2} s  heights: {}", simulation.elapsed(), heights.join(" "));
        }
    }

    println!("{:#?}", simulation.stats());
    Ok(())
}

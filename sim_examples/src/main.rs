//! Headless demo scenes for the rigid-body engine.
//!
//! - `sim_examples drop` - a box falling onto the ground
//! - `sim_examples pendulum` - a link swinging from a fixed pivot
//! - `sim_examples biped` - a four-segment leg with a knee motor pulse
//!
//! Set `RUST_LOG=rigid_sim2d=debug` to see engine logging.

mod scenes;

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use scenes::Scene;

#[derive(Parser)]
#[command(name = "sim_examples")]
#[command(about = "Run a rigid-body scene and print telemetry", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Frames to simulate at 60 Hz
    #[arg(long, default_value_t = 180, global = true)]
    frames: u32,

    /// Substeps per frame
    #[arg(long, default_value_t = 8, global = true)]
    substeps: u32,

    /// Print telemetry every N frames
    #[arg(long, default_value_t = 30, global = true)]
    every: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Drop a unit box onto the ground
    Drop {
        /// Starting height of the box center
        #[arg(long, default_value_t = 3.0)]
        height: f64,

        /// Coefficient of restitution
        #[arg(long, default_value_t = 0.3)]
        restitution: f64,
    },

    /// Swing a link from a static pivot
    Pendulum,

    /// Drop a leg and pulse the knee motor
    Biped {
        /// Knee motor torque during the pulse
        #[arg(long, default_value_t = 30.0)]
        knee_torque: f64,
    },
}

const DT: f64 = 1.0 / 60.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    ensure!(cli.substeps > 0, "--substeps must be at least 1");
    ensure!(cli.every > 0, "--every must be at least 1");

    match &cli.command {
        Commands::Drop { height, restitution } => {
            let scene = scenes::drop_box(*height, *restitution)?;
            run(scene, &cli, |_, _| Ok(()))
        }
        Commands::Pendulum => run(scenes::pendulum()?, &cli, |_, _| Ok(())),
        Commands::Biped { knee_torque } => {
            let knee_torque = *knee_torque;
            let scene = scenes::biped(cli.substeps)?;
            let knee = scene
                .joints
                .iter()
                .find(|(name, _)| *name == "knee")
                .map(|(_, handle)| *handle)
                .context("biped scene has no knee joint")?;
            let pulse = cli.frames / 2..cli.frames / 2 + 30;
            run(scene, &cli, move |world, frame| {
                let torque = if pulse.contains(&frame) { knee_torque } else { 0.0 };
                if let Some(joint) = world.joint_mut(knee) {
                    joint.set_motor_torque(torque)?;
                }
                Ok(())
            })
        }
    }
}

/// Steps the scene, calling `control` before every frame.
fn run<F>(mut scene: Scene, cli: &Cli, mut control: F) -> Result<()>
where
    F: FnMut(&mut rigid_sim2d::World, u32) -> Result<()>,
{
    info!(
        bodies = scene.world.bodies().len(),
        joints = scene.world.joints().len(),
        frames = cli.frames,
        substeps = cli.substeps,
        "starting scene"
    );

    for frame in 0..cli.frames {
        control(&mut scene.world, frame)?;
        scene.world.step(DT, cli.substeps)?;
        if (frame + 1) % cli.every == 0 {
            report(&scene);
        }
    }

    println!(
        "done: t={:.3}s  kinetic energy={:.4}  max joint error={:.5}",
        scene.world.time(),
        scene.world.kinetic_energy(),
        scene.world.max_joint_error()
    );
    Ok(())
}

fn report(scene: &Scene) {
    let world = &scene.world;
    print!("t={:6.3}", world.time());
    for (name, handle) in &scene.tracked {
        if let Some(body) = world.body(*handle) {
            print!(
                "  {name}: pos=({:.3}, {:.3}) angle={:.3} vel=({:.3}, {:.3})",
                body.position.x, body.position.y, body.angle, body.linear_velocity.x, body.linear_velocity.y
            );
        }
    }
    for (name, handle) in &scene.joints {
        if let Some(angle) = world.relative_angle(*handle) {
            print!("  {name}={angle:.3}");
        }
    }
    println!("  contacts={}", world.contacts().len());
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use nalgebra::Vector3;
use tracing::info;
use tracing_subscriber::EnvFilter;

use imu_align::{
    sensors::imu::ImuUpdate,
    visualization::{legend, save_plot, PlotOptions},
};

/// Computes the global-to-IMU rotation from a stationary accelerometer reading.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Acceleration sensed by the IMU at rest, in any unit
    #[arg(
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        default_values_t = [4.29, 5.34, 7.02],
        allow_negative_numbers = true
    )]
    accel: Vec<f64>,

    /// Write a PNG plot of the global axes, projections and basis vectors
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Edge length of the plot in pixels
    #[arg(long, default_value_t = PlotOptions::default().size)]
    size: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let update = ImuUpdate::stationary(0.0, Vector3::from_column_slice(&args.accel));
    info!(acceleration = ?update.acceleration, "Aligning IMU frame");

    let alignment = update
        .frame_alignment()
        .context("failed to compute the IMU basis")?;
    let basis = &alignment.basis;

    println!("Orthonormal basis in IMU coordinate:");
    println!("X(e2): {}", format_vector(&basis.e2));
    println!("Y(e3): {}", format_vector(&basis.e3));
    println!("Z(e1): {}", format_vector(&basis.e1));

    let rot_g_to_imu = alignment.rotation();
    println!();
    println!("Global to IMU:");
    let global_axes: [Vector3<f64>; 3] = [Vector3::x(), Vector3::y(), Vector3::z()];
    for axis in global_axes {
        println!("{}", format_vector(&(rot_g_to_imu * axis)));
    }

    if let Some(path) = args.plot {
        let options = PlotOptions {
            size: args.size,
            ..Default::default()
        };
        save_plot(&alignment, &path, &options)
            .with_context(|| format!("failed to write plot to {}", path.display()))?;

        println!();
        println!("Plot legend:");
        for (name, color) in legend() {
            let [r, g, b, _] = color.0;
            println!("{name:>12}: #{r:02x}{g:02x}{b:02x}");
        }
    }

    Ok(())
}

fn format_vector(v: &Vector3<f64>) -> String {
    format!("[{:.8} {:.8} {:.8}]", v.x, v.y, v.z)
}

//! Key-moment CLI
//!
//! JSON pose/detection artifacts → key-moment JSON.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use moment_cli::{kinematics_path, load_detections, load_pose_frames, moments_path, write_json};
use serve_core::analysis::right_wrist_kinematics;
use serve_core::engine::{DetectorConfig, PhaseDetector};

#[derive(Parser)]
#[command(name = "moment_cli")]
#[command(about = "Detect tennis-serve key moments from pose and detection JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment a serve into key moments
    Analyze {
        /// Pose frames JSON (array, one entry per frame)
        #[arg(long)]
        poses: PathBuf,

        /// Ball detections JSON (optional)
        #[arg(long)]
        balls: Option<PathBuf>,

        /// Racket detections JSON (optional)
        #[arg(long)]
        rackets: Option<PathBuf>,

        /// Source video frame rate
        #[arg(long, default_value_t = 30.0)]
        fps: f64,

        /// Output stem; moments land in <stem>_moments.json
        #[arg(long)]
        out: PathBuf,

        /// Synthesize peak-fallback moments for phases never observed
        #[arg(long, default_value_t = false)]
        peak_fallback: bool,
    },

    /// Compute the right-wrist velocity/acceleration series
    Kinematics {
        /// Pose frames JSON (array, one entry per frame)
        #[arg(long)]
        poses: PathBuf,

        /// Source video frame rate
        #[arg(long, default_value_t = 30.0)]
        fps: f64,

        /// Output stem; series lands in <stem>_kinematics.json
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { poses, balls, rackets, fps, out, peak_fallback } => {
            if fps <= 0.0 {
                bail!("fps must be positive, got {fps}");
            }

            let frames = load_pose_frames(&poses)?;
            let ball_detections = load_detections(balls.as_deref())?;
            let racket_detections = load_detections(rackets.as_deref())?;

            let config = DetectorConfig {
                enable_peak_fallback: peak_fallback,
                ..DetectorConfig::from_env_or_default()
            };
            let moments = PhaseDetector::new(config).detect(
                &frames,
                &ball_detections,
                &racket_detections,
                fps,
            );

            let out_path = moments_path(&out);
            write_json(&out_path, &moments)?;
            info!(
                moments = moments.len(),
                out = %out_path.display(),
                "wrote key moments"
            );
        }
        Commands::Kinematics { poses, fps, out } => {
            if fps <= 0.0 {
                bail!("fps must be positive, got {fps}");
            }

            let frames = load_pose_frames(&poses)?;
            let series = right_wrist_kinematics(&frames, fps);

            let out_path = kinematics_path(&out);
            write_json(&out_path, &series)?;
            info!(
                samples = series.time_s.len(),
                out = %out_path.display(),
                "wrote wrist kinematics"
            );
        }
    }

    Ok(())
}

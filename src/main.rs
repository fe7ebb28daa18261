// src/main.rs - CLI entry point for the arm host
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use armctl::arm::{Arm, JogDirection};
use armctl::config::Config;
use armctl::error::ArmError;
use armctl::hardware::PulseSink;
use armctl::pose::CHANNEL_COUNT;
use armctl::storage::{HistoryLog, Method, Pacing, SequenceRecorder, pose_file};

#[derive(Parser)]
#[command(name = "armctl", version, about = "Six-channel servo robot arm controller")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "armctl.toml")]
    config: String,

    /// Speed profile index into the configured speed table
    #[arg(long, default_value_t = 1)]
    speed: usize,

    /// Step channels rigidly instead of easing between poses
    #[arg(long)]
    rigid: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the last commanded pulse width of one servo (1-6)
    Read { servo: usize },

    /// Move one servo (1-6) to a pulse width in milliseconds
    Write { servo: usize, value: f64 },

    /// Move all servos to a comma-separated list of pulse widths
    Pose { values: String },

    /// Nudge one servo (1-6) by a fixed step
    Jog {
        servo: usize,
        #[arg(value_enum)]
        direction: Direction,
        #[arg(long, default_value_t = 0.01)]
        step: f64,
    },

    /// Play a recorded sequence file
    Play { file: PathBuf },

    /// Manage sequence recordings
    Record {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// Write the default pose file without moving the arm
    Init,
}

#[derive(Subcommand)]
enum RecordAction {
    /// Start a new recording with the given pacing header
    Start {
        file: PathBuf,
        /// Pause between individual servo emissions during playback (seconds)
        #[arg(long, default_value_t = 0.0)]
        pause_servos: f64,
        /// Pause after each full pose during playback (seconds)
        #[arg(long, default_value_t = 0.0)]
        pause_steps: f64,
    },
    /// Append the current persisted pose to a recording
    Capture { file: PathBuf },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Direction {
    Up,
    Down,
}

impl From<Direction> for JogDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => JogDirection::Up,
            Direction::Down => JogDirection::Down,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!("{e}");
        if matches!(e, ArmError::Config(_)) {
            eprintln!("Run `armctl --help` for usage.");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ArmError> {
    let mut config = Config::load(&cli.config)?;
    config.validate()?;
    if cli.rigid {
        config.motion.smooth = false;
    }

    // Commands that never move the arm are handled before any hardware
    // handle is constructed.
    match &cli.command {
        Command::Init => {
            pose_file::store(&config.files.pose_file, &config.default_pose())?;
            tracing::info!("Wrote default pose to {}", config.files.pose_file);
            return Ok(());
        }
        Command::Record { action } => {
            return record(&config, action);
        }
        Command::Read { servo } => {
            let channel = parse_servo(*servo)?;
            let pose = pose_file::load(&config.files.pose_file, config.default_pose())?;
            let value = pose[channel];
            HistoryLog::new(&config.files.history_file).append(channel + 1, Method::Read, value)?;
            println!("{value}");
            return Ok(());
        }
        _ => {}
    }

    // Resolve and validate all arguments, including the speed index,
    // before the hardware handle exists.
    let action = match cli.command {
        Command::Write { servo, value } => Action::Write(parse_servo(servo)?, value),
        Command::Pose { values } => Action::Pose(parse_values(&values)?),
        Command::Jog {
            servo,
            direction,
            step,
        } => Action::Jog(parse_servo(servo)?, direction.into(), step),
        Command::Play { file } => Action::Play(file.to_string_lossy().into_owned()),
        Command::Read { .. } | Command::Record { .. } | Command::Init => {
            unreachable!("handled above")
        }
    };
    config.speed(cli.speed)?;

    let sink = build_sink(&config)?;
    let mut arm = Arm::new(config, sink, cli.speed)?;

    match action {
        Action::Write(channel, value) => arm.write_channel(channel, value).await?,
        Action::Pose(values) => arm.write_all(&values).await?,
        Action::Jog(channel, direction, step) => {
            let value = arm.jog(channel, direction, step).await?;
            println!("{value}");
        }
        Action::Play(path) => arm.play_sequence(&path).await?,
    }

    Ok(())
}

/// A fully validated command, safe to run against the hardware.
enum Action {
    Write(usize, f64),
    Pose(Vec<f64>),
    Jog(usize, JogDirection, f64),
    Play(String),
}

fn record(config: &Config, action: &RecordAction) -> Result<(), ArmError> {
    match action {
        RecordAction::Start {
            file,
            pause_servos,
            pause_steps,
        } => {
            SequenceRecorder::create(
                &file.to_string_lossy(),
                Pacing {
                    between_servos: *pause_servos,
                    between_steps: *pause_steps,
                },
            )?;
            Ok(())
        }
        RecordAction::Capture { file } => {
            let pose = pose_file::load(&config.files.pose_file, config.default_pose())?;
            let mut recorder = SequenceRecorder::append_to(&file.to_string_lossy())?;
            recorder.append(&pose)?;
            tracing::info!("Captured current pose into {}", file.display());
            Ok(())
        }
    }
}

/// CLI servo numbers are 1-based; internally channels are 0-based.
fn parse_servo(servo: usize) -> Result<usize, ArmError> {
    if (1..=CHANNEL_COUNT).contains(&servo) {
        Ok(servo - 1)
    } else {
        Err(ArmError::Config(format!(
            "invalid servo number {servo}, must be 1..={CHANNEL_COUNT}"
        )))
    }
}

fn parse_values(list: &str) -> Result<Vec<f64>, ArmError> {
    list.split(',')
        .map(|part| {
            part.trim()
                .parse()
                .map_err(|_| ArmError::Config(format!("invalid pulse value: {part:?}")))
        })
        .collect()
}

fn build_sink(config: &Config) -> Result<Box<dyn PulseSink>, ArmError> {
    #[cfg(feature = "hardware")]
    {
        Ok(Box::new(armctl::hardware::Pca9685Sink::open(
            &config.pwm.i2c_bus,
            config.pwm.address,
        )?))
    }
    #[cfg(not(feature = "hardware"))]
    {
        let _ = config;
        tracing::warn!("Built without the hardware feature; pulses are recorded, not emitted");
        Ok(Box::new(armctl::hardware::MockSink::new()))
    }
}

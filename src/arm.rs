// src/arm.rs - Top-level arm object: owns the sink, pose state and config
use std::time::Duration;

use tokio::time::sleep;

use crate::config::{Config, SpeedProfile};
use crate::error::ArmError;
use crate::hardware::PulseSink;
use crate::motion::{EasingProfile, MotionPlayer, RigidStepper, TrajectoryPlanner};
use crate::pose::{CHANNEL_COUNT, Pose};
use crate::storage::{HistoryLog, Method, pose_file, read_sequence};

/// Direction of a single-channel jog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JogDirection {
    Up,
    Down,
}

impl JogDirection {
    fn signum(&self) -> f64 {
        match self {
            JogDirection::Up => 1.0,
            JogDirection::Down => -1.0,
        }
    }
}

/// The robot arm host. Owns the one hardware sink for the lifetime of the
/// process; every movement runs sequentially through it.
pub struct Arm {
    config: Config,
    player: MotionPlayer,
    history: HistoryLog,
    speed: SpeedProfile,
}

impl Arm {
    /// `speed_index` selects from the configured speed table and is
    /// validated here, before any pulse can be emitted.
    pub fn new(config: Config, sink: Box<dyn PulseSink>, speed_index: usize) -> Result<Self, ArmError> {
        let speed = config.speed(speed_index)?;
        let player = MotionPlayer::new(sink, &config);
        let history = HistoryLog::new(&config.files.history_file);
        Ok(Self {
            config,
            player,
            history,
            speed,
        })
    }

    /// Pose the arm was last commanded to, recovered from the pose file.
    pub fn current_pose(&self) -> Result<Pose, ArmError> {
        pose_file::load(&self.config.files.pose_file, self.config.default_pose())
    }

    fn persist(&self, pose: &Pose) -> Result<(), ArmError> {
        pose_file::store(&self.config.files.pose_file, pose)
    }

    fn check_range(&self, channel: usize, value: f64) -> Result<(), ArmError> {
        let (min, max) = (self.config.arm.min_pulse, self.config.arm.max_pulse);
        if value < min || value > max {
            return Err(ArmError::RangeViolation {
                servo: channel + 1,
                value,
                min,
                max,
            });
        }
        Ok(())
    }

    /// Move a single channel to `value`. Out-of-range targets are rejected
    /// before anything moves and leave no history entry.
    pub async fn write_channel(&mut self, channel: usize, value: f64) -> Result<(), ArmError> {
        self.check_range(channel, value)?;
        let start = self.current_pose()?;
        let mut target = start;
        target[channel] = value;
        self.move_to(&start, &target).await?;
        self.persist(&target)?;
        self.history.append(channel + 1, Method::Write, value)?;
        Ok(())
    }

    /// Move every listed channel at once; channels beyond the list keep
    /// their current position.
    pub async fn write_all(&mut self, values: &[f64]) -> Result<(), ArmError> {
        if values.len() > CHANNEL_COUNT {
            return Err(ArmError::Config(format!(
                "expected at most {CHANNEL_COUNT} values, got {}",
                values.len()
            )));
        }
        for (channel, value) in values.iter().enumerate() {
            self.check_range(channel, *value)?;
        }
        let start = self.current_pose()?;
        let mut target = start;
        for (channel, value) in values.iter().enumerate() {
            target[channel] = *value;
        }
        self.move_to(&start, &target).await?;
        self.persist(&target)
    }

    /// Nudge one channel by `step`, clamped to the pulse limits, emitted
    /// directly without interpolation. Returns the new value. Key-to-axis
    /// mapping layers on top of this, outside the crate.
    pub async fn jog(
        &mut self,
        channel: usize,
        direction: JogDirection,
        step: f64,
    ) -> Result<f64, ArmError> {
        let mut pose = self.current_pose()?;
        pose[channel] = (pose[channel] + direction.signum() * step)
            .clamp(self.config.arm.min_pulse, self.config.arm.max_pulse);
        self.player.play_pose(&pose, Duration::ZERO).await?;
        self.persist(&pose)?;
        Ok(pose[channel])
    }

    /// Play a recorded sequence file. Whatever happens, the arm is driven
    /// back to the configured rest pose before this returns, so a failed
    /// playback never leaves it mid-trajectory.
    pub async fn play_sequence(&mut self, path: &str) -> Result<(), ArmError> {
        let outcome = self.play_sequence_inner(path).await;
        if let Err(reset_error) = self.return_to_default().await {
            tracing::error!("Failed to return to rest pose: {reset_error}");
            // The playback error is the more useful report when both fail.
            outcome?;
            return Err(reset_error);
        }
        outcome
    }

    async fn play_sequence_inner(&mut self, path: &str) -> Result<(), ArmError> {
        let sequence = read_sequence(path)?;
        tracing::info!(
            "Playing {} poses from {} (pacing {}s / {}s)",
            sequence.poses.len(),
            path,
            sequence.pacing.between_servos,
            sequence.pacing.between_steps
        );
        let servo_pause = Duration::from_secs_f64(sequence.pacing.between_servos);
        let step_pause = Duration::from_secs_f64(sequence.pacing.between_steps);
        for pose in &sequence.poses {
            self.player.play_pose(pose, servo_pause).await?;
            self.persist(pose)?;
            if !step_pause.is_zero() {
                sleep(step_pause).await;
            }
        }
        Ok(())
    }

    /// Drive the arm to the configured rest pose and persist it.
    pub async fn return_to_default(&mut self) -> Result<(), ArmError> {
        let pose = self.config.default_pose();
        self.player.play_pose(&pose, Duration::ZERO).await?;
        self.persist(&pose)
    }

    async fn move_to(&mut self, start: &Pose, target: &Pose) -> Result<(), ArmError> {
        if self.config.motion.smooth {
            // The eased path samples at a fixed density; the selected speed
            // profile only applies to rigid stepping.
            let planner =
                TrajectoryPlanner::new(EasingProfile::Cosine, self.config.motion.sample_increment);
            let trajectory = planner.plan(start, target);
            self.player.play_smooth(&trajectory, target).await
        } else {
            let stepper = RigidStepper::new(*start, *target, self.speed.step);
            self.player
                .play_rigid(stepper, Duration::from_secs_f64(self.speed.delay))
                .await
        }
    }
}

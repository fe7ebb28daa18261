// src/motion/player.rs - Drives trajectories out to the PWM sink
use std::time::Duration;

use tokio::time::sleep;

use crate::config::Config;
use crate::error::ArmError;
use crate::hardware::PulseSink;
use crate::motion::encoder::pulse_counts;
use crate::motion::stepper::RigidStepper;
use crate::pose::{CHANNEL_COUNT, Pose};

/// Consumes trajectories and emits each intermediate pose to the hardware
/// sink, honoring inter-step and inter-channel pacing.
///
/// Owns the single process-wide sink handle; all motion is serialized
/// through one player, so only one invocation is ever active on it.
pub struct MotionPlayer {
    sink: Box<dyn PulseSink>,
    frequency_hz: u32,
    resolution: u32,
    min_pulse: f64,
    max_pulse: f64,
    frequency_configured: bool,
}

impl MotionPlayer {
    pub fn new(sink: Box<dyn PulseSink>, config: &Config) -> Self {
        Self {
            sink,
            frequency_hz: config.pwm.frequency_hz,
            resolution: config.pwm.resolution,
            min_pulse: config.arm.min_pulse,
            max_pulse: config.arm.max_pulse,
            frequency_configured: false,
        }
    }

    /// Clamp, encode and emit one channel. The frequency is configured on
    /// the sink once, before the first pulse.
    async fn emit(&mut self, channel: usize, width_ms: f64) -> Result<(), ArmError> {
        if !self.frequency_configured {
            self.sink.set_frequency(self.frequency_hz).await?;
            self.frequency_configured = true;
        }
        let clamped = width_ms.clamp(self.min_pulse, self.max_pulse);
        let counts = pulse_counts(clamped, self.frequency_hz, self.resolution);
        self.sink.set_pulse(channel, counts).await
    }

    /// Emit one full pose, channels 0 through 5 in order, with an optional
    /// pause between channel emissions.
    pub async fn play_pose(
        &mut self,
        pose: &Pose,
        inter_channel_pause: Duration,
    ) -> Result<(), ArmError> {
        for channel in 0..CHANNEL_COUNT {
            self.emit(channel, pose[channel]).await?;
            if !inter_channel_pause.is_zero() {
                sleep(inter_channel_pause).await;
            }
        }
        Ok(())
    }

    /// Play an eased trajectory. No delay between samples or channels; the
    /// cadence is whatever the encode-and-emit calls cost. After the
    /// sampled sequence the target is emitted once more exactly, so the
    /// terminal position never carries sampling drift.
    pub async fn play_smooth(&mut self, trajectory: &[Pose], target: &Pose) -> Result<(), ArmError> {
        tracing::debug!("Playing eased trajectory of {} poses", trajectory.len());
        for pose in trajectory {
            self.play_pose(pose, Duration::ZERO).await?;
        }
        self.play_pose(target, Duration::ZERO).await
    }

    /// Play the rigid path: every tick emits all six channels, then the
    /// inter-step delay elapses before the next tick. The stepper's final
    /// tick is the exact target by construction.
    pub async fn play_rigid(
        &mut self,
        stepper: RigidStepper,
        inter_step_delay: Duration,
    ) -> Result<(), ArmError> {
        for tick in stepper {
            self.play_pose(&tick.pose, Duration::ZERO).await?;
            if !inter_step_delay.is_zero() {
                sleep(inter_step_delay).await;
            }
        }
        Ok(())
    }
}

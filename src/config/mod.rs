// src/config/mod.rs - TOML configuration for the arm host
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ArmError;
use crate::pose::{CHANNEL_COUNT, Pose};

/// Main configuration structure, loaded from a TOML file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub arm: ArmConfig,

    #[serde(default)]
    pub pwm: PwmConfig,

    #[serde(default)]
    pub motion: MotionConfig,

    #[serde(default)]
    pub files: FileConfig,
}

/// Arm geometry: valid pulse range and the rest pose.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArmConfig {
    #[serde(default = "default_min_pulse")]
    pub min_pulse: f64,

    #[serde(default = "default_max_pulse")]
    pub max_pulse: f64,

    /// Pose the arm returns to after sequence playback and on `init`.
    #[serde(default = "default_pose")]
    pub default_pose: [f64; CHANNEL_COUNT],
}

/// PWM controller parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PwmConfig {
    #[serde(default = "default_frequency")]
    pub frequency_hz: u32,

    /// Counts per PWM period of the controller's counter.
    #[serde(default = "default_resolution")]
    pub resolution: u32,

    #[serde(default = "default_i2c_bus")]
    pub i2c_bus: String,

    #[serde(default = "default_i2c_address")]
    pub address: u8,
}

/// Motion engine parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MotionConfig {
    /// Ease between poses instead of stepping each channel rigidly.
    #[serde(default = "default_smooth")]
    pub smooth: bool,

    /// Normalized progress per trajectory sample on the eased path.
    #[serde(default = "default_sample_increment")]
    pub sample_increment: f64,

    /// Per-profile (step increment, inter-step delay) pairs for the rigid
    /// path, selected by index. The eased path ignores both components and
    /// samples at `sample_increment` regardless of the selected profile.
    #[serde(default = "default_speeds")]
    pub speeds: Vec<SpeedProfile>,
}

/// One rigid-stepping speed profile.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct SpeedProfile {
    /// Pulse-width increment applied per tick (ms).
    pub step: f64,

    /// Delay between ticks (seconds).
    pub delay: f64,
}

/// Paths of the persisted state files.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default = "default_pose_file")]
    pub pose_file: String,

    #[serde(default = "default_history_file")]
    pub history_file: String,
}

// Default value functions
fn default_min_pulse() -> f64 {
    0.4
}
fn default_max_pulse() -> f64 {
    2.5
}
fn default_pose() -> [f64; CHANNEL_COUNT] {
    [1.5, 1.5, 1.5, 1.5, 1.5, 1.6]
}
fn default_frequency() -> u32 {
    50
}
fn default_resolution() -> u32 {
    4096
}
fn default_i2c_bus() -> String {
    "/dev/i2c-1".to_string()
}
fn default_i2c_address() -> u8 {
    0x41
}
fn default_smooth() -> bool {
    true
}
fn default_sample_increment() -> f64 {
    0.006
}
fn default_speeds() -> Vec<SpeedProfile> {
    vec![
        SpeedProfile {
            step: 0.001,
            delay: 0.001,
        },
        SpeedProfile {
            step: 0.01,
            delay: 0.001,
        },
        SpeedProfile {
            step: 0.02,
            delay: 0.001,
        },
        SpeedProfile {
            step: 1.0,
            delay: 0.0,
        },
    ]
}
fn default_pose_file() -> String {
    "lastServoValues".to_string()
}
fn default_history_file() -> String {
    "robotHistory".to_string()
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            min_pulse: default_min_pulse(),
            max_pulse: default_max_pulse(),
            default_pose: default_pose(),
        }
    }
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            frequency_hz: default_frequency(),
            resolution: default_resolution(),
            i2c_bus: default_i2c_bus(),
            address: default_i2c_address(),
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            smooth: default_smooth(),
            sample_increment: default_sample_increment(),
            speeds: default_speeds(),
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            pose_file: default_pose_file(),
            history_file: default_history_file(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file. A missing file yields the
    /// built-in defaults, so the tool works out of the box.
    pub fn load(path: &str) -> Result<Self, ArmError> {
        if !Path::new(path).exists() {
            tracing::debug!("No configuration file at {}, using defaults", path);
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| ArmError::Config(format!("failed to parse {path}: {e}")))?;
        tracing::info!("Loaded configuration from {}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ArmError> {
        // The PCA9685 prescale register only reaches roughly 24-1526 Hz;
        // anything outside would wrap during prescale computation.
        if !(24..=1526).contains(&self.pwm.frequency_hz) {
            return Err(ArmError::Config(format!(
                "pwm.frequency_hz ({}) must be within 24..=1526",
                self.pwm.frequency_hz
            )));
        }
        if self.pwm.resolution == 0 {
            return Err(ArmError::Config("pwm.resolution must be positive".into()));
        }
        if self.arm.min_pulse >= self.arm.max_pulse {
            return Err(ArmError::Config(format!(
                "arm.min_pulse ({}) must be below arm.max_pulse ({})",
                self.arm.min_pulse, self.arm.max_pulse
            )));
        }
        if self.motion.sample_increment <= 0.0 || self.motion.sample_increment > 1.0 {
            return Err(ArmError::Config(
                "motion.sample_increment must be in (0, 1]".into(),
            ));
        }
        if self.motion.speeds.is_empty() {
            return Err(ArmError::Config("motion.speeds must not be empty".into()));
        }
        for (index, profile) in self.motion.speeds.iter().enumerate() {
            if profile.step <= 0.0 || profile.delay < 0.0 {
                return Err(ArmError::Config(format!(
                    "motion.speeds[{index}] has step {} / delay {}",
                    profile.step, profile.delay
                )));
            }
        }
        for (channel, value) in self.arm.default_pose.iter().enumerate() {
            if *value < self.arm.min_pulse || *value > self.arm.max_pulse {
                return Err(ArmError::Config(format!(
                    "arm.default_pose channel {channel} value {value} outside pulse limits"
                )));
            }
        }
        Ok(())
    }

    /// Resolve a speed-profile index, rejecting out-of-range values before
    /// any hardware is touched.
    pub fn speed(&self, index: usize) -> Result<SpeedProfile, ArmError> {
        self.motion.speeds.get(index).copied().ok_or_else(|| {
            ArmError::Config(format!(
                "invalid speed index {index}, must be in 0..{}",
                self.motion.speeds.len()
            ))
        })
    }

    pub fn default_pose(&self) -> Pose {
        Pose::new(self.arm.default_pose)
    }
}

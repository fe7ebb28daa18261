// src/hardware/mod.rs - PWM sink capability and implementations
#[cfg(feature = "hardware")]
pub mod pca9685;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::ArmError;

#[cfg(feature = "hardware")]
pub use pca9685::Pca9685Sink;

/// Capability consumed by the motion player: set a raw pulse count on one
/// of the controller's channels. The frequency must be configured once
/// before the first pulse.
#[async_trait]
pub trait PulseSink: Send {
    async fn set_frequency(&mut self, frequency_hz: u32) -> Result<(), ArmError>;

    async fn set_pulse(&mut self, channel: usize, counts: u16) -> Result<(), ArmError>;
}

/// Recording sink used in tests and in builds without the `hardware`
/// feature. Clones share the same recording buffers.
#[derive(Debug, Clone, Default)]
pub struct MockSink {
    pulses: Arc<Mutex<Vec<(usize, u16)>>>,
    frequency: Arc<Mutex<Option<u32>>>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All pulses emitted so far, in emission order.
    pub fn pulses(&self) -> Vec<(usize, u16)> {
        self.pulses.lock().unwrap().clone()
    }

    pub fn frequency(&self) -> Option<u32> {
        *self.frequency.lock().unwrap()
    }

    /// Counts of the most recently emitted full pose, channel order.
    pub fn last_pose_counts(&self) -> Option<[u16; crate::pose::CHANNEL_COUNT]> {
        let pulses = self.pulses.lock().unwrap();
        if pulses.len() < crate::pose::CHANNEL_COUNT {
            return None;
        }
        let mut counts = [0u16; crate::pose::CHANNEL_COUNT];
        for &(channel, value) in &pulses[pulses.len() - crate::pose::CHANNEL_COUNT..] {
            counts[channel] = value;
        }
        Some(counts)
    }
}

#[async_trait]
impl PulseSink for MockSink {
    async fn set_frequency(&mut self, frequency_hz: u32) -> Result<(), ArmError> {
        tracing::debug!("mock sink: frequency set to {} Hz", frequency_hz);
        *self.frequency.lock().unwrap() = Some(frequency_hz);
        Ok(())
    }

    async fn set_pulse(&mut self, channel: usize, counts: u16) -> Result<(), ArmError> {
        tracing::trace!("mock sink: channel {} <- {} counts", channel, counts);
        self.pulses.lock().unwrap().push((channel, counts));
        Ok(())
    }
}

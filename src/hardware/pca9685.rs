// src/hardware/pca9685.rs - PCA9685 sink over Linux I2C
use async_trait::async_trait;
use linux_embedded_hal::I2cdev;
use pwm_pca9685::{Address, Channel, Pca9685};

use crate::error::ArmError;
use crate::hardware::PulseSink;

// Internal oscillator of the PCA9685.
const OSCILLATOR_HZ: f64 = 25_000_000.0;

/// Real PWM controller driver. One long-lived handle, constructed once at
/// process start and passed into the motion player.
pub struct Pca9685Sink {
    pwm: Pca9685<I2cdev>,
}

impl Pca9685Sink {
    pub fn open(bus: &str, address: u8) -> Result<Self, ArmError> {
        let dev = I2cdev::new(bus)
            .map_err(|e| ArmError::Hardware(format!("failed to open {bus}: {e}")))?;
        let mut pwm = Pca9685::new(dev, Address::from(address))
            .map_err(|e| ArmError::Hardware(format!("PCA9685 init failed: {e:?}")))?;
        pwm.enable()
            .map_err(|e| ArmError::Hardware(format!("PCA9685 enable failed: {e:?}")))?;
        tracing::info!("Connected to PCA9685 at {bus} address 0x{address:02x}");
        Ok(Self { pwm })
    }

    fn channel(index: usize) -> Result<Channel, ArmError> {
        match index {
            0 => Ok(Channel::C0),
            1 => Ok(Channel::C1),
            2 => Ok(Channel::C2),
            3 => Ok(Channel::C3),
            4 => Ok(Channel::C4),
            5 => Ok(Channel::C5),
            _ => Err(ArmError::Hardware(format!("no such channel: {index}"))),
        }
    }
}

#[async_trait]
impl PulseSink for Pca9685Sink {
    async fn set_frequency(&mut self, frequency_hz: u32) -> Result<(), ArmError> {
        // Clamp to the prescale register's valid 3..=255 range so an
        // out-of-band frequency cannot wrap the subtraction.
        let ratio = (OSCILLATOR_HZ / (4096.0 * frequency_hz as f64)).round();
        let prescale = (ratio as u16).saturating_sub(1).clamp(3, 255) as u8;
        self.pwm
            .set_prescale(prescale)
            .map_err(|e| ArmError::Hardware(format!("set_prescale failed: {e:?}")))?;
        tracing::debug!("PCA9685 frequency set to {frequency_hz} Hz (prescale {prescale})");
        Ok(())
    }

    async fn set_pulse(&mut self, channel: usize, counts: u16) -> Result<(), ArmError> {
        self.pwm
            .set_channel_on_off(Self::channel(channel)?, 0, counts)
            .map_err(|e| ArmError::Hardware(format!("set_channel_on_off failed: {e:?}")))
    }
}

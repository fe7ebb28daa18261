// src/motion/stepper.rs - Fixed-increment per-channel stepping
use crate::pose::{CHANNEL_COUNT, Pose};

/// One step of the rigid path: the pose to emit and which channels are
/// still travelling after this tick.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    pub pose: Pose,
    pub moving: [bool; CHANNEL_COUNT],
}

/// Advances each channel toward its target by a fixed increment per tick,
/// independently per channel, until every channel has locked onto its
/// target. Used when easing is disabled.
///
/// Pull-based: each `next()` advances all channels once. A channel whose
/// accumulated travel reaches the channel's total distance snaps to the
/// exact target value and is excluded from further increments; a channel
/// with zero distance is locked from the start. Iteration ends once every
/// channel is locked, so the final tick emits the target exactly.
#[derive(Debug, Clone)]
pub struct RigidStepper {
    start: Pose,
    target: Pose,
    step: f64,
    sign: [f64; CHANNEL_COUNT],
    travelled: [f64; CHANNEL_COUNT],
}

impl RigidStepper {
    pub fn new(start: Pose, target: Pose, step: f64) -> Self {
        let mut sign = [0.0; CHANNEL_COUNT];
        for (channel, direction) in sign.iter_mut().enumerate() {
            let diff = target[channel] - start[channel];
            if diff > 0.0 {
                *direction = 1.0;
            } else if diff < 0.0 {
                *direction = -1.0;
            }
        }
        Self {
            start,
            target,
            step,
            sign,
            travelled: [0.0; CHANNEL_COUNT],
        }
    }
}

impl Iterator for RigidStepper {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        if self.sign.iter().all(|direction| *direction == 0.0) {
            return None;
        }

        // Locked channels re-emit their exact target value every tick.
        let mut pose = self.target;
        let mut moving = [false; CHANNEL_COUNT];

        for channel in 0..CHANNEL_COUNT {
            if self.sign[channel] == 0.0 {
                continue;
            }
            self.travelled[channel] += self.step;
            let distance = (self.target[channel] - self.start[channel]).abs();
            if self.travelled[channel] < distance {
                pose[channel] = self.start[channel] + self.travelled[channel] * self.sign[channel];
                moving[channel] = true;
            } else {
                self.sign[channel] = 0.0;
            }
        }

        Some(Tick { pose, moving })
    }
}

// src/motion/planner.rs - Eased trajectory generation
use crate::motion::easing::EasingProfile;
use crate::pose::{CHANNEL_COUNT, Pose};

/// Produces an ordered, finite sequence of intermediate poses between a
/// start and a target pose, with velocity shaped by an easing profile.
#[derive(Debug, Clone)]
pub struct TrajectoryPlanner {
    easing: EasingProfile,
    sample_increment: f64,
}

impl TrajectoryPlanner {
    pub fn new(easing: EasingProfile, sample_increment: f64) -> Self {
        Self {
            easing,
            sample_increment,
        }
    }

    /// Sample normalized progress from 0 through 1.0 inclusive in fixed
    /// increments; each sample moves every channel independently along
    /// `start + diff * ease(x)`.
    ///
    /// The sampled grid may stop short of x = 1.0 because of floating
    /// increment drift, so one final pose exactly equal to `target` is
    /// appended. The last element is therefore always bit-for-bit the
    /// target. `start == target` still yields the full degenerate sequence
    /// so playback timing is unchanged.
    pub fn plan(&self, start: &Pose, target: &Pose) -> Vec<Pose> {
        let mut diff = [0.0; CHANNEL_COUNT];
        for (channel, delta) in diff.iter_mut().enumerate() {
            *delta = target[channel] - start[channel];
        }

        let mut trajectory = Vec::with_capacity((1.0 / self.sample_increment) as usize + 2);
        let mut x = 0.0;
        while x <= 1.0 {
            let eased = self.easing.ease(x);
            let mut pose = *start;
            for channel in 0..CHANNEL_COUNT {
                pose[channel] = start[channel] + diff[channel] * eased;
            }
            trajectory.push(pose);
            x += self.sample_increment;
        }

        trajectory.push(*target);
        trajectory
    }
}

// src/motion/mod.rs - Motion interpolation and playback engine
pub mod easing;
pub mod encoder;
pub mod planner;
pub mod player;
pub mod stepper;

pub use easing::EasingProfile;
pub use planner::TrajectoryPlanner;
pub use player::MotionPlayer;
pub use stepper::{RigidStepper, Tick};

// src/lib.rs - armctl library root
pub mod arm;
pub mod config;
pub mod error;
pub mod hardware;
pub mod motion;
pub mod pose;
pub mod storage;

pub use arm::Arm;
pub use config::Config;
pub use error::ArmError;
pub use pose::{CHANNEL_COUNT, Pose};

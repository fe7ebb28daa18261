// src/storage/mod.rs - Persistent state: pose file, sequences, history
pub mod history;
pub mod pose_file;
pub mod sequence;

pub use history::{HistoryLog, Method};
pub use sequence::{Pacing, Sequence, SequenceRecorder, read_sequence};

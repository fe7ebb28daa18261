// src/storage/sequence.rs - Recorded pose sequences
//
// Format: line 1 is "<interServoPause>,<interStepPause>" (floats); every
// following run of six lines is one pose in playback order.
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::ArmError;
use crate::pose::{CHANNEL_COUNT, Pose};

/// Pacing header of a recorded sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pacing {
    /// Pause between individual channel emissions (seconds).
    pub between_servos: f64,
    /// Pause after each fully played pose (seconds).
    pub between_steps: f64,
}

/// A fully parsed sequence file.
#[derive(Debug, Clone)]
pub struct Sequence {
    pub pacing: Pacing,
    pub poses: Vec<Pose>,
}

/// Read a sequence file front to back. An incomplete trailing run of fewer
/// than six lines carries no playable pose and is dropped.
pub fn read_sequence(path: &str) -> Result<Sequence, ArmError> {
    let contents = fs::read_to_string(path)?;
    let mut lines = contents.lines();

    let header = lines.next().ok_or_else(|| storage_error(path, "missing pacing header"))?;
    let pacing = parse_header(path, header)?;

    let mut poses = Vec::new();
    let mut run = [0.0; CHANNEL_COUNT];
    let mut filled = 0;
    for line in lines {
        run[filled] = line.trim().parse().map_err(|_| {
            storage_error(path, &format!("invalid float in pose data: {line:?}"))
        })?;
        filled += 1;
        if filled == CHANNEL_COUNT {
            poses.push(Pose::new(run));
            filled = 0;
        }
    }
    if filled != 0 {
        tracing::warn!(
            "Ignoring incomplete trailing pose ({filled} of {CHANNEL_COUNT} values) in {path}"
        );
    }

    Ok(Sequence { pacing, poses })
}

fn parse_header(path: &str, header: &str) -> Result<Pacing, ArmError> {
    let mut parts = header.split(',');
    let between_servos = parts
        .next()
        .and_then(|v| v.trim().parse().ok())
        .ok_or_else(|| storage_error(path, "malformed pacing header"))?;
    let between_steps = parts
        .next()
        .and_then(|v| v.trim().parse().ok())
        .ok_or_else(|| storage_error(path, "malformed pacing header"))?;
    Ok(Pacing {
        between_servos,
        between_steps,
    })
}

fn storage_error(path: &str, reason: &str) -> ArmError {
    ArmError::Storage {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

/// Appends poses to a recording file. `create` starts a new recording and
/// writes the pacing header once; `append_to` reopens an existing one.
pub struct SequenceRecorder {
    file: File,
}

impl SequenceRecorder {
    pub fn create(path: &str, pacing: Pacing) -> Result<Self, ArmError> {
        let mut file = File::create(path)?;
        writeln!(file, "{},{}", pacing.between_servos, pacing.between_steps)?;
        tracing::info!("Started recording to {}", path);
        Ok(Self { file })
    }

    pub fn append_to(path: &str) -> Result<Self, ArmError> {
        if !Path::new(path).exists() {
            return Err(storage_error(path, "recording does not exist, start it first"));
        }
        let file = OpenOptions::new().append(true).open(path)?;
        Ok(Self { file })
    }

    pub fn append(&mut self, pose: &Pose) -> Result<(), ArmError> {
        for value in pose.values() {
            writeln!(self.file, "{value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_record_then_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seq").to_str().unwrap().to_string();
        let pacing = Pacing {
            between_servos: 0.5,
            between_steps: 2.0,
        };

        let first = Pose::uniform(1.5);
        let second = Pose::new([2.0, 1.0, 1.5, 0.4, 2.5, 1.6]);
        {
            let mut recorder = SequenceRecorder::create(&path, pacing).unwrap();
            recorder.append(&first).unwrap();
        }
        {
            let mut recorder = SequenceRecorder::append_to(&path).unwrap();
            recorder.append(&second).unwrap();
        }

        let sequence = read_sequence(&path).unwrap();
        assert_eq!(sequence.pacing, pacing);
        assert_eq!(sequence.poses, vec![first, second]);
    }

    #[test]
    fn test_incomplete_trailing_run_is_dropped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seq").to_str().unwrap().to_string();
        fs::write(&path, "0,0\n1.5\n1.5\n1.5\n1.5\n1.5\n1.6\n2.0\n2.0\n").unwrap();
        let sequence = read_sequence(&path).unwrap();
        assert_eq!(sequence.poses.len(), 1);
    }

    #[test]
    fn test_missing_header_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty").to_str().unwrap().to_string();
        fs::write(&path, "").unwrap();
        assert!(matches!(
            read_sequence(&path),
            Err(ArmError::Storage { .. })
        ));
    }

    #[test]
    fn test_append_to_missing_recording_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent").to_str().unwrap().to_string();
        assert!(SequenceRecorder::append_to(&path).is_err());
    }
}

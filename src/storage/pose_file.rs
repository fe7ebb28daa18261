// src/storage/pose_file.rs - Last commanded pose persistence
//
// Format: six newline-separated decimal float literals, read in channel
// order. No trailing newline is required after the last value.
use std::fs;
use std::path::Path;

use crate::error::ArmError;
use crate::pose::{CHANNEL_COUNT, Pose};

/// Read the persisted pose, falling back to `default` when the file does
/// not exist yet (first run).
pub fn load(path: &str, default: Pose) -> Result<Pose, ArmError> {
    if !Path::new(path).exists() {
        tracing::debug!("No pose file at {}, using default pose", path);
        return Ok(default);
    }
    read(path)
}

pub fn read(path: &str) -> Result<Pose, ArmError> {
    let contents = fs::read_to_string(path)?;
    let mut lines = contents.lines();
    let mut values = [0.0; CHANNEL_COUNT];
    for (channel, slot) in values.iter_mut().enumerate() {
        let line = lines.next().ok_or_else(|| ArmError::Storage {
            path: path.to_string(),
            reason: format!("expected {CHANNEL_COUNT} values, found {channel}"),
        })?;
        *slot = line.trim().parse().map_err(|_| ArmError::Storage {
            path: path.to_string(),
            reason: format!("invalid float on line {}: {line:?}", channel + 1),
        })?;
    }
    Ok(Pose::new(values))
}

/// Overwrite the pose file with the given pose. Values are written with
/// Rust's shortest round-trip float formatting, so a read-back yields the
/// originals exactly.
pub fn store(path: &str, pose: &Pose) -> Result<(), ArmError> {
    let body = pose
        .values()
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(path, body)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pose").to_str().unwrap().to_string();
        let pose = Pose::new([0.4, 2.5, 1.5, 1.2345678901234, 0.7, 1.6]);
        store(&path, &pose).unwrap();
        assert_eq!(read(&path).unwrap(), pose);
    }

    #[test]
    fn test_missing_file_yields_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent").to_str().unwrap().to_string();
        let default = Pose::uniform(1.5);
        assert_eq!(load(&path, default).unwrap(), default);
    }

    #[test]
    fn test_truncated_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short").to_str().unwrap().to_string();
        fs::write(&path, "1.5\n1.5\n1.5").unwrap();
        assert!(matches!(read(&path), Err(ArmError::Storage { .. })));
    }

    #[test]
    fn test_garbage_line_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad").to_str().unwrap().to_string();
        fs::write(&path, "1.5\n1.5\nnope\n1.5\n1.5\n1.5").unwrap();
        assert!(matches!(read(&path), Err(ArmError::Storage { .. })));
    }
}

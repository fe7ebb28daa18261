// src/storage/history.rs - Append-only audit trail
//
// Lines of the form "<timestamp>: Servo=<n>, Method=<read|write>, Value=<v>".
// Write-only from the host's perspective; nothing ever reads it back.
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;

use chrono::Local;

use crate::error::ArmError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method {
    Read,
    Write,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Read => write!(f, "read"),
            Method::Write => write!(f, "write"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: String,
}

impl HistoryLog {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }

    /// Append one record. `servo` is the 1-based servo number as shown to
    /// the user.
    pub fn append(&self, servo: usize, method: Method, value: f64) -> Result<(), ArmError> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.6f");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{timestamp}: Servo={servo}, Method={method}, Value={value}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_append_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history").to_str().unwrap().to_string();
        let log = HistoryLog::new(&path);
        log.append(3, Method::Write, 1.25).unwrap();
        log.append(1, Method::Read, 1.5).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(": Servo=3, Method=write, Value=1.25"));
        assert!(lines[1].ends_with(": Servo=1, Method=read, Value=1.5"));
    }
}

// Integration tests for the arm host driving a mock PWM sink

#[cfg(test)]
mod tests {
    use armctl::arm::{Arm, JogDirection};
    use armctl::config::Config;
    use armctl::error::ArmError;
    use armctl::hardware::MockSink;
    use armctl::motion::encoder::pulse_counts;
    use armctl::pose::Pose;
    use armctl::storage::{Pacing, SequenceRecorder, pose_file};
    use std::path::Path;
    use tempfile::tempdir;

    fn test_config(dir: &Path) -> Config {
        let mut config = Config::default();
        config.files.pose_file = dir.join("pose").to_string_lossy().into_owned();
        config.files.history_file = dir.join("history").to_string_lossy().into_owned();
        config
    }

    fn build_arm(config: Config) -> (Arm, MockSink) {
        let sink = MockSink::new();
        let mock = sink.clone();
        let arm = Arm::new(config, Box::new(sink), 1).unwrap();
        (arm, mock)
    }

    fn counts(pose: &Pose) -> [u16; 6] {
        let mut out = [0u16; 6];
        for (channel, value) in pose.values().iter().enumerate() {
            out[channel] = pulse_counts(*value, 50, 4096);
        }
        out
    }

    #[tokio::test]
    async fn test_out_of_range_write_is_fully_rejected() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path());
        let history_path = config.files.history_file.clone();
        let (mut arm, mock) = build_arm(config);

        let result = arm.write_channel(0, 3.0).await;
        assert!(matches!(result, Err(ArmError::RangeViolation { .. })));
        // No pulse went out and no history entry was written
        assert!(mock.pulses().is_empty());
        assert!(!Path::new(&history_path).exists());
    }

    #[tokio::test]
    async fn test_smooth_write_lands_exactly_on_target() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path());
        let pose_path = config.files.pose_file.clone();
        let history_path = config.files.history_file.clone();
        let (mut arm, mock) = build_arm(config);

        arm.write_channel(0, 2.0).await.unwrap();

        assert_eq!(mock.frequency(), Some(50));
        let expected = Pose::new([2.0, 1.5, 1.5, 1.5, 1.5, 1.6]);
        assert_eq!(mock.last_pose_counts(), Some(counts(&expected)));
        assert_eq!(pose_file::read(&pose_path).unwrap(), expected);

        let history = std::fs::read_to_string(&history_path).unwrap();
        assert!(history.trim().ends_with("Servo=1, Method=write, Value=2"));
    }

    #[tokio::test]
    async fn test_rigid_write_emits_one_tick_per_step() {
        let dir = tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.motion.smooth = false;
        // Exactly representable step so the tick count is deterministic
        config.motion.speeds = vec![armctl::config::SpeedProfile {
            step: 0.25,
            delay: 0.0,
        }];
        let sink = MockSink::new();
        let mock = sink.clone();
        let mut arm = Arm::new(config, Box::new(sink), 0).unwrap();

        // 0.5 of travel at 0.25 per tick locks on the second tick, six
        // channels emitted per tick.
        arm.write_channel(0, 2.0).await.unwrap();
        assert_eq!(mock.pulses().len(), 12);
        let expected = Pose::new([2.0, 1.5, 1.5, 1.5, 1.5, 1.6]);
        assert_eq!(mock.last_pose_counts(), Some(counts(&expected)));
    }

    #[tokio::test]
    async fn test_write_all_moves_listed_channels_only() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path());
        let pose_path = config.files.pose_file.clone();
        let (mut arm, mock) = build_arm(config);

        arm.write_all(&[2.0, 1.0]).await.unwrap();

        let expected = Pose::new([2.0, 1.0, 1.5, 1.5, 1.5, 1.6]);
        assert_eq!(mock.last_pose_counts(), Some(counts(&expected)));
        assert_eq!(pose_file::read(&pose_path).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_sequence_playback_returns_to_rest_pose() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path());
        let rest = config.default_pose();
        let pose_path = config.files.pose_file.clone();
        let seq_path = dir.path().join("seq").to_string_lossy().into_owned();

        let mut recorder = SequenceRecorder::create(
            &seq_path,
            Pacing {
                between_servos: 0.0,
                between_steps: 0.0,
            },
        )
        .unwrap();
        recorder.append(&Pose::uniform(2.0)).unwrap();
        recorder.append(&Pose::uniform(1.0)).unwrap();
        drop(recorder);

        let (mut arm, mock) = build_arm(config);
        arm.play_sequence(&seq_path).await.unwrap();

        // Two poses plus the rest pose, six channels each
        assert_eq!(mock.pulses().len(), 18);
        assert_eq!(mock.last_pose_counts(), Some(counts(&rest)));
        assert_eq!(pose_file::read(&pose_path).unwrap(), rest);
    }

    #[tokio::test]
    async fn test_failed_playback_still_returns_to_rest_pose() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path());
        let rest = config.default_pose();
        let (mut arm, mock) = build_arm(config);

        let missing = dir.path().join("missing").to_string_lossy().into_owned();
        let result = arm.play_sequence(&missing).await;
        assert!(result.is_err());
        // The compensating move still drove the arm to rest
        assert_eq!(mock.last_pose_counts(), Some(counts(&rest)));
    }

    #[tokio::test]
    async fn test_jog_clamps_at_pulse_limits() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path());
        let (mut arm, mock) = build_arm(config);

        let value = arm.jog(0, JogDirection::Up, 2.0).await.unwrap();
        assert_eq!(value, 2.5);
        let expected = Pose::new([2.5, 1.5, 1.5, 1.5, 1.5, 1.6]);
        assert_eq!(mock.last_pose_counts(), Some(counts(&expected)));

        let value = arm.jog(0, JogDirection::Down, 0.01).await.unwrap();
        assert!((value - 2.49).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_invalid_speed_index_rejected_before_motion() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path());
        let sink = MockSink::new();
        let mock = sink.clone();
        let result = Arm::new(config, Box::new(sink), 9);
        assert!(matches!(result, Err(ArmError::Config(_))));
        assert!(mock.pulses().is_empty());
    }
}

use {nalgebra as na, std::path::PathBuf};

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: bodytrack::Config,

    #[serde(default)]
    pub viewer: ViewerConfig,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct ViewerConfig {
    /// Recorded anchor stream to replay.
    /// Synthetic body is animated when absent.
    #[serde(default)]
    pub recording: Option<PathBuf>,

    /// Where to save the anchor stream that was played.
    #[serde(default)]
    pub record_to: Option<PathBuf>,

    /// Number of synthetic frames.
    #[serde(default = "default_frames")]
    pub frames: u64,

    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// World anchor placement.
    #[serde(default)]
    pub anchor_offset: [f32; 3],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            recording: None,
            record_to: None,
            frames: default_frames(),
            frame_interval_ms: default_frame_interval_ms(),
            anchor_offset: [0.0; 3],
        }
    }
}

impl ViewerConfig {
    pub fn anchor_iso(&self) -> na::Isometry3<f32> {
        let [x, y, z] = self.anchor_offset;
        na::Isometry3::translation(x, y, z)
    }
}

fn default_frames() -> u64 {
    120
}

fn default_frame_interval_ms() -> u64 {
    16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = ron::de::from_str("()").unwrap();
        assert!(config.viewer.recording.is_none());
        assert_eq!(config.viewer.frames, 120);
        assert_eq!(config.viewer.frame_interval_ms, 16);
    }

    #[test]
    fn nested_sections() {
        let config: Config = ron::de::from_str(
            r#"(
                engine: (skeleton: (joint_radius: 0.1)),
                viewer: (frames: 3, recording: Some("walk.ron"), anchor_offset: (0.0, 0.0, -1.5)),
            )"#,
        )
        .unwrap();

        assert!((config.engine.skeleton.joint_radius - 0.1).abs() < 1e-6);
        assert_eq!(config.viewer.frames, 3);
        assert_eq!(config.viewer.recording, Some(PathBuf::from("walk.ron")));
        assert_eq!(
            config.viewer.anchor_iso().translation.vector,
            na::Vector3::new(0.0, 0.0, -1.5)
        );
    }
}

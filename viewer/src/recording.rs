use {
    bodytrack::{config::ConfigError, Anchor},
    eyre::WrapErr,
    std::path::Path,
};

/// Anchor batches captured frame by frame.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Recording {
    pub frames: Vec<Vec<Anchor>>,
}

impl Recording {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        bodytrack::config::load(path)
    }

    pub fn push(&mut self, frame: Vec<Anchor>) {
        self.frames.push(frame);
    }

    #[tracing::instrument(skip(self))]
    pub fn save(&self, path: &Path) -> Result<(), eyre::Report> {
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .wrap_err("Failed to encode recording")?;
        std::fs::write(path, text)
            .wrap_err_with(|| format!("Failed to write recording to '{}'", path.display()))?;
        Ok(())
    }
}

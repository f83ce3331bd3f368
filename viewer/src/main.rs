mod config;
mod pose;
mod recording;

use {
    self::{config::Config, pose::SyntheticBody, recording::Recording},
    bodytrack::{Anchor, AnchorId, Engine, Global3},
    color_eyre::Report,
    eyre::WrapErr,
    nalgebra as na,
    std::{path::Path, time::Duration},
};

fn main() -> Result<(), Report> {
    install_tracing();
    color_eyre::install()?;

    let config = load_config(&bodytrack::config::default_path())?;
    tracing::info!("Config loaded: {:?}", config);

    let frames: Box<dyn Iterator<Item = Vec<Anchor>>> =
        match &config.viewer.recording {
            Some(path) => {
                let recording = Recording::load(path).wrap_err_with(|| {
                    format!("Failed to load recording '{}'", path.display())
                })?;
                tracing::info!(
                    "Replaying {} frames from '{}'",
                    recording.frames.len(),
                    path.display()
                );
                Box::new(recording.frames.into_iter())
            }
            None => {
                let body = SyntheticBody::new(
                    AnchorId(1),
                    na::Vector3::new(0.0, 0.9, -2.0),
                );
                let dt = config.viewer.frame_interval_ms.max(1) as f32 / 1000.0;
                Box::new((0..config.viewer.frames).map(move |i| {
                    vec![Anchor::Body(body.frame(i as f32 * dt))]
                }))
            }
        };

    let mut engine =
        Engine::with_anchor(&config.engine, config.viewer.anchor_iso());
    let mut captured = Recording::default();
    let interval = Duration::from_millis(config.viewer.frame_interval_ms);

    for frame in frames {
        if config.viewer.record_to.is_some() {
            captured.push(frame.clone());
        }

        engine.submit(frame);
        engine.advance();
        report(&engine);

        if interval > Duration::from_millis(0) {
            std::thread::sleep(interval);
        }
    }

    if let Some(path) = &config.viewer.record_to {
        captured.save(path)?;
        tracing::info!("Recorded {} frames to '{}'", captured.frames.len(), path.display());
    }

    Ok(())
}

/// Loads config from `path`, falling back to defaults if there is no file.
fn load_config(path: &Path) -> Result<Config, Report> {
    if !path.exists() {
        tracing::warn!(
            "Config file '{}' not found, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let config = bodytrack::config::load(path)
        .wrap_err_with(|| format!("Failed to load config '{}'", path.display()))?;
    Ok(config)
}

fn report(engine: &Engine) {
    let skeleton = match engine.session.skeleton() {
        Some(skeleton) => skeleton,
        None => {
            tracing::debug!("Frame {}: no body tracked", engine.frame());
            return;
        }
    };

    match head_position(engine) {
        Some(head) => tracing::info!(
            "Frame {}: body {:?}, head at ({:.3}, {:.3}, {:.3}), {} bones",
            engine.frame(),
            skeleton.body(),
            head.x,
            head.y,
            head.z,
            skeleton.bone_count(),
        ),
        None => tracing::warn!("Frame {}: head joint is missing", engine.frame()),
    }
}

/// World position of the tracked body's head.
fn head_position(engine: &Engine) -> Option<na::Vector3<f32>> {
    let head = engine.session.skeleton()?.joint("head_joint")?;
    let global = engine.world.get::<Global3>(head).ok()?;
    Some(global.position())
}

fn install_tracing() {
    use {
        tracing_error::ErrorLayer,
        tracing_subscriber::{fmt, prelude::*, EnvFilter},
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(ErrorLayer::default())
        .init();
}

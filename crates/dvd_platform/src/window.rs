use std::sync::Arc;

use anyhow::{Context, Result};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "DVD".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// The window is a fixed canvas: the camera and the bounce bounds are
/// compile-time constants, so resizing is disabled at creation.
pub fn create_window(event_loop: &ActiveEventLoop, config: &PlatformConfig) -> Result<Arc<Window>> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height))
        .with_resizable(false);

    let window = event_loop
        .create_window(attrs)
        .context("failed to create window")?;
    log::info!(
        "Window created: \"{}\" {}x{}",
        config.title,
        config.width,
        config.height
    );
    Ok(Arc::new(window))
}

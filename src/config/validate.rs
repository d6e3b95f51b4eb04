// src/config/validate.rs

use anyhow::{Result, anyhow};

use crate::config::model::Settings;

/// Run basic semantic validation against merged settings.
///
/// This checks:
/// - thumbnail size is at least 1 pixel
/// - the debounce period is finite and positive
/// - the watched extension is non-empty and a bare suffix (no dot, no slash)
/// - the renderer command is non-empty
///
/// It does **not** check that the source directory exists; that is a runtime
/// concern handled when the watch target is resolved.
pub fn validate_settings(settings: &Settings) -> Result<()> {
    if settings.size == 0 {
        return Err(anyhow!("thumbnail size must be >= 1 pixel (got 0)"));
    }

    if !settings.debounce_secs.is_finite() || settings.debounce_secs <= 0.0 {
        return Err(anyhow!(
            "debounce must be a positive number of seconds (got {})",
            settings.debounce_secs
        ));
    }

    let ext = settings.extension.as_str();
    if ext.is_empty() {
        return Err(anyhow!("[watch].extension must not be empty"));
    }
    if ext.contains(['.', '/', '\\', '*']) {
        return Err(anyhow!(
            "[watch].extension must be a bare suffix like \"pdf\" (got {ext:?})"
        ));
    }

    if settings.command.trim().is_empty() {
        return Err(anyhow!("[generate].command must not be empty"));
    }

    Ok(())
}

//! Terminal stand-ins for the platform audio, haptic, permission and picker
//! services.

use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use counter_core::{
    AudioPlayer, ClipPicker, HapticDriver, PermissionGate, PermissionStatus, PickOutcome,
};
use shared::domain::{ClipId, ClipRef};
use tracing::{debug, info};

const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a"];

/// Logs each clip and holds it for a fixed latency, like a real player would
/// while the sample plays.
pub struct ConsoleAudio {
    latency: Duration,
}

impl ConsoleAudio {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl AudioPlayer for ConsoleAudio {
    async fn play(&self, clip: &ClipId) -> Result<()> {
        ensure_supported(Path::new(clip.as_str()))?;
        info!(clip = %clip, "audio: playing");
        tokio::time::sleep(self.latency).await;
        debug!(clip = %clip, "audio: finished");
        Ok(())
    }
}

fn ensure_supported(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| anyhow!("clip '{}' has no file extension", path.display()))?;
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        bail!("unsupported clip format '.{extension}'");
    }
    Ok(())
}

pub struct TerminalHaptics;

impl HapticDriver for TerminalHaptics {
    fn pulse(&self, duration: Duration) {
        info!(?duration, "haptics: pulse");
        let mut stderr = std::io::stderr();
        let _ = stderr.write_all(b"\x07");
        let _ = stderr.flush();
    }
}

pub struct ConfiguredPermission {
    granted: bool,
}

impl ConfiguredPermission {
    pub fn new(granted: bool) -> Self {
        Self { granted }
    }
}

#[async_trait]
impl PermissionGate for ConfiguredPermission {
    async fn request(&self, resource: &str) -> PermissionStatus {
        info!(resource, granted = self.granted, "permissions: request");
        if self.granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }
}

/// Picker fed by the `pick <path>` command. With no queued path the pick is
/// treated as cancelled.
#[derive(Default)]
pub struct PathPicker {
    next: Mutex<Option<PathBuf>>,
}

impl PathPicker {
    pub fn queue(&self, path: Option<PathBuf>) {
        *self.next.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = path;
    }
}

#[async_trait]
impl ClipPicker for PathPicker {
    async fn pick_audio_clip(&self) -> Result<PickOutcome> {
        let next = self
            .next
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        let Some(path) = next else {
            return Ok(PickOutcome::Cancelled);
        };

        tokio::fs::metadata(&path)
            .await
            .with_context(|| format!("cannot open '{}'", path.display()))?;
        ensure_supported(&path)?;

        let label = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(PickOutcome::Picked(ClipRef::new(
            path.to_string_lossy().into_owned(),
            label,
        )))
    }
}

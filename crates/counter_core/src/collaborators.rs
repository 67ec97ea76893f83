//! Contracts the core calls on platform services.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use shared::domain::{ClipId, ClipRef};

pub const MEDIA_LIBRARY_PERMISSION: &str = "media-library";

#[async_trait]
pub trait AudioPlayer: Send + Sync {
    async fn play(&self, clip: &ClipId) -> Result<()>;
}

pub trait HapticDriver: Send + Sync {
    fn pulse(&self, duration: Duration);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Picked(ClipRef),
    Cancelled,
}

#[async_trait]
pub trait ClipPicker: Send + Sync {
    async fn pick_audio_clip(&self) -> Result<PickOutcome>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[async_trait]
pub trait PermissionGate: Send + Sync {
    async fn request(&self, resource: &str) -> PermissionStatus;
}

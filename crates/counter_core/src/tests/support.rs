//! Recording fakes for the platform collaborators.

#![allow(dead_code)]

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::domain::{ClipId, ClipRef};

use crate::collaborators::{
    AudioPlayer, ClipPicker, HapticDriver, PermissionGate, PermissionStatus, PickOutcome,
};

#[derive(Default)]
pub struct RecordingAudio {
    pub started: Arc<Mutex<Vec<ClipId>>>,
    pub completed: Arc<Mutex<Vec<ClipId>>>,
    fail_with: Option<String>,
    hang_first: bool,
    calls: AtomicUsize,
}

impl RecordingAudio {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(err: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Some(err.into()),
            ..Self::default()
        })
    }

    /// First playback never finishes on its own.
    pub fn hanging_first() -> Arc<Self> {
        Arc::new(Self {
            hang_first: true,
            ..Self::default()
        })
    }

    pub fn started(&self) -> Vec<ClipId> {
        self.started.lock().expect("started lock").clone()
    }

    pub fn completed(&self) -> Vec<ClipId> {
        self.completed.lock().expect("completed lock").clone()
    }
}

#[async_trait]
impl AudioPlayer for RecordingAudio {
    async fn play(&self, clip: &ClipId) -> Result<()> {
        self.started.lock().expect("started lock").push(clip.clone());
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hang_first && call == 0 {
            std::future::pending::<()>().await;
        }
        if let Some(err) = &self.fail_with {
            return Err(anyhow!(err.clone()));
        }
        self.completed.lock().expect("completed lock").push(clip.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingHaptics {
    pub pulses: Mutex<Vec<Duration>>,
}

impl RecordingHaptics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn pulses(&self) -> Vec<Duration> {
        self.pulses.lock().expect("pulses lock").clone()
    }
}

impl HapticDriver for RecordingHaptics {
    fn pulse(&self, duration: Duration) {
        self.pulses.lock().expect("pulses lock").push(duration);
    }
}

pub struct FixedPermission {
    status: PermissionStatus,
    pub requested: Mutex<Vec<String>>,
}

impl FixedPermission {
    pub fn granted() -> Arc<Self> {
        Arc::new(Self {
            status: PermissionStatus::Granted,
            requested: Mutex::new(Vec::new()),
        })
    }

    pub fn denied() -> Arc<Self> {
        Arc::new(Self {
            status: PermissionStatus::Denied,
            requested: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl PermissionGate for FixedPermission {
    async fn request(&self, resource: &str) -> PermissionStatus {
        self.requested
            .lock()
            .expect("requested lock")
            .push(resource.to_string());
        self.status
    }
}

pub struct ScriptedPicker {
    outcome: std::result::Result<PickOutcome, String>,
    pub calls: AtomicUsize,
}

impl ScriptedPicker {
    pub fn picks(id: &str, label: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(PickOutcome::Picked(ClipRef::new(id, label))),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn cancels() -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(PickOutcome::Cancelled),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn broken(err: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(err.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClipPicker for ScriptedPicker {
    async fn pick_audio_clip(&self) -> Result<PickOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().map_err(|err| anyhow!(err))
    }
}

/// Yields until `cond` holds, so spawned playback gets a chance to run.
pub async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..1_000 {
        if cond() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}

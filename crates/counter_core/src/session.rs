//! One counter screen: engine, settings, overlays and their collaborators
//! wired together behind the entry points the UI calls.

use std::sync::Arc;

use shared::{
    domain::ClipId,
    state::{CounterState, OverlayVisibility, SettingsState},
};
use tokio::sync::broadcast;

use crate::{
    clip_selection::{self, ClipSelection},
    collaborators::{AudioPlayer, ClipPicker, HapticDriver, PermissionGate},
    engine::CounterEngine,
    error::{Result, ValidationError},
    events::{EventBus, SessionEvent},
    feedback::{FeedbackConfig, FeedbackDispatcher},
    overlay::{OverlayController, SettingsClose},
    settings::SettingsStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub counter: CounterState,
    pub settings: SettingsState,
    pub draft: Option<SettingsState>,
    pub overlays: OverlayVisibility,
}

pub struct SessionDeps {
    pub audio: Arc<dyn AudioPlayer>,
    pub haptics: Arc<dyn HapticDriver>,
    pub permissions: Arc<dyn PermissionGate>,
    pub picker: Arc<dyn ClipPicker>,
}

pub struct CounterSession {
    engine: CounterEngine,
    settings: SettingsStore,
    overlays: OverlayController,
    permissions: Arc<dyn PermissionGate>,
    picker: Arc<dyn ClipPicker>,
    events: EventBus,
}

impl CounterSession {
    pub fn new(initial: SettingsState, feedback: FeedbackConfig, deps: SessionDeps) -> Self {
        let events = EventBus::new();
        let settings = SettingsStore::new(initial, events.clone());
        let dispatcher = FeedbackDispatcher::new(deps.audio, deps.haptics, feedback);
        let engine = CounterEngine::new(dispatcher, settings.reader(), events.clone());
        let overlays = OverlayController::new(events.clone());

        Self {
            engine,
            settings,
            overlays,
            permissions: deps.permissions,
            picker: deps.picker,
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            counter: self.engine.state(),
            settings: self.settings.committed(),
            draft: self.settings.draft().cloned(),
            overlays: self.overlays.visibility(),
        }
    }

    pub fn counter(&self) -> CounterState {
        self.engine.state()
    }

    pub fn settings(&self) -> SettingsState {
        self.settings.committed()
    }

    pub fn overlays(&self) -> OverlayVisibility {
        self.overlays.visibility()
    }

    pub fn tap(&mut self) {
        self.engine.increment();
    }

    pub fn undo(&mut self) {
        self.engine.decrement();
    }

    pub fn long_press(&mut self) {
        self.engine.reset();
    }

    pub fn open_limit_form(&mut self) {
        self.overlays.open_limit_form();
    }

    pub fn close_limit_form(&mut self) {
        self.overlays.close_limit_form();
    }

    pub fn submit_limit(&mut self, candidate: &str) -> std::result::Result<u64, ValidationError> {
        self.overlays.submit_limit(&mut self.engine, candidate)
    }

    pub fn clear_limit(&mut self) {
        self.engine.clear_limit();
    }

    pub fn open_settings(&mut self) {
        self.overlays.open_settings(&mut self.settings);
    }

    pub fn close_settings(&mut self, how: SettingsClose) {
        self.overlays.close_settings(&mut self.settings, how);
    }

    pub fn set_vibration(&mut self, enabled: bool) -> Result<()> {
        self.settings.set_vibration(enabled)
    }

    pub fn set_sound(&mut self, enabled: bool) -> Result<()> {
        self.settings.set_sound(enabled)
    }

    pub fn select_builtin_clip(&mut self, clip: ClipId) -> Result<()> {
        clip_selection::select_builtin_clip(&mut self.settings, clip)
    }

    pub async fn pick_custom_clip(&mut self) -> Result<ClipSelection> {
        clip_selection::pick_custom_clip(
            &mut self.settings,
            self.permissions.as_ref(),
            self.picker.as_ref(),
        )
        .await
    }

    /// Number of clips still playing.
    pub fn active_playbacks(&self) -> usize {
        self.engine.feedback().active_playbacks()
    }

    /// Lets queued feedback finish; call before dropping the session.
    pub async fn shutdown(&mut self) {
        self.engine.feedback_mut().flush().await;
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;

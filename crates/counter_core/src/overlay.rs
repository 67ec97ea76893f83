//! Visibility of the limit form and settings panel, and routing of their
//! save/close actions.

use shared::state::OverlayVisibility;
use tracing::debug;

use crate::{
    engine::CounterEngine,
    error::ValidationError,
    events::{EventBus, SessionEvent},
    settings::SettingsStore,
};

/// How the settings panel is being closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsClose {
    Save,
    Dismiss,
}

pub struct OverlayController {
    visibility: OverlayVisibility,
    events: EventBus,
}

impl OverlayController {
    pub fn new(events: EventBus) -> Self {
        Self {
            visibility: OverlayVisibility::default(),
            events,
        }
    }

    pub fn visibility(&self) -> OverlayVisibility {
        self.visibility
    }

    pub fn limit_form_open(&self) -> bool {
        self.visibility.limit_form_open
    }

    pub fn settings_open(&self) -> bool {
        self.visibility.settings_open
    }

    pub fn open_limit_form(&mut self) {
        self.set_limit_form(true);
    }

    pub fn close_limit_form(&mut self) {
        self.set_limit_form(false);
    }

    /// Applies the limit form's input. The form closes only on success.
    pub fn submit_limit(
        &mut self,
        engine: &mut CounterEngine,
        candidate: &str,
    ) -> Result<u64, ValidationError> {
        let limit = engine.set_limit(candidate)?;
        self.close_limit_form();
        Ok(limit)
    }

    /// Opens the settings panel with a fresh draft. An already open panel
    /// keeps its draft.
    pub fn open_settings(&mut self, store: &mut SettingsStore) {
        if self.visibility.settings_open {
            debug!("overlay: settings already open");
            return;
        }
        store.open_draft();
        self.set_settings(true);
    }

    pub fn close_settings(&mut self, store: &mut SettingsStore, how: SettingsClose) {
        if !self.visibility.settings_open {
            return;
        }
        match how {
            SettingsClose::Save => {
                store.commit();
            }
            SettingsClose::Dismiss => {
                store.discard_draft();
            }
        }
        self.set_settings(false);
    }

    fn set_limit_form(&mut self, open: bool) {
        if self.visibility.limit_form_open == open {
            return;
        }
        self.visibility.limit_form_open = open;
        self.publish();
    }

    fn set_settings(&mut self, open: bool) {
        self.visibility.settings_open = open;
        self.publish();
    }

    fn publish(&self) {
        debug!(visibility = ?self.visibility, "overlay: visibility changed");
        self.events.publish(SessionEvent::OverlaysChanged(self.visibility));
    }
}

#[cfg(test)]
#[path = "tests/overlay_tests.rs"]
mod tests;

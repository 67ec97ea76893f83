//! Committed settings plus the isolated draft edited by the settings overlay.

use shared::{domain::ClipId, state::SettingsState};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::{
    error::{CounterError, Result},
    events::{EventBus, SessionEvent},
};

/// Read-only view of the committed settings. Draft edits never show up here.
#[derive(Clone)]
pub struct SettingsReader {
    rx: watch::Receiver<SettingsState>,
}

impl SettingsReader {
    pub fn current(&self) -> SettingsState {
        self.rx.borrow().clone()
    }
}

pub struct SettingsStore {
    committed: watch::Sender<SettingsState>,
    draft: Option<SettingsState>,
    events: EventBus,
}

impl SettingsStore {
    pub fn new(initial: SettingsState, events: EventBus) -> Self {
        let (committed, _) = watch::channel(initial);
        Self {
            committed,
            draft: None,
            events,
        }
    }

    pub fn committed(&self) -> SettingsState {
        self.committed.borrow().clone()
    }

    pub fn reader(&self) -> SettingsReader {
        SettingsReader {
            rx: self.committed.subscribe(),
        }
    }

    /// Change notifications for committed settings.
    pub fn subscribe(&self) -> watch::Receiver<SettingsState> {
        self.committed.subscribe()
    }

    pub fn draft(&self) -> Option<&SettingsState> {
        self.draft.as_ref()
    }

    pub fn is_draft_open(&self) -> bool {
        self.draft.is_some()
    }

    /// Starts a draft as an independent copy of the committed settings,
    /// replacing any draft already open.
    pub fn open_draft(&mut self) {
        let draft = self.committed();
        debug!(?draft, "settings: draft opened");
        self.draft = Some(draft);
    }

    pub fn set_vibration(&mut self, enabled: bool) -> Result<()> {
        self.draft_mut()?.vibration_enabled = enabled;
        Ok(())
    }

    pub fn set_sound(&mut self, enabled: bool) -> Result<()> {
        self.draft_mut()?.sound_enabled = enabled;
        Ok(())
    }

    pub fn set_clip(&mut self, clip: ClipId) -> Result<()> {
        self.draft_mut()?.selected_clip = clip;
        Ok(())
    }

    /// Replaces the committed settings with the draft in one step and drops
    /// the draft. Returns `false` when no draft was open.
    pub fn commit(&mut self) -> bool {
        let Some(draft) = self.draft.take() else {
            return false;
        };

        self.committed.send_replace(draft.clone());
        info!(
            vibration = draft.vibration_enabled,
            sound = draft.sound_enabled,
            clip = %draft.selected_clip,
            "settings: committed"
        );
        self.events.publish(SessionEvent::SettingsCommitted(draft));
        true
    }

    /// Drops the draft. Returns `false` when no draft was open.
    pub fn discard_draft(&mut self) -> bool {
        let discarded = self.draft.take().is_some();
        if discarded {
            debug!("settings: draft discarded");
        }
        discarded
    }

    fn draft_mut(&mut self) -> Result<&mut SettingsState> {
        self.draft.as_mut().ok_or(CounterError::NoOpenDraft)
    }
}

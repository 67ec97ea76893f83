use serde::{Deserialize, Serialize};

use crate::domain::{ClipId, DEFAULT_CLIP};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CounterState {
    pub value: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl CounterState {
    pub fn at_limit(&self) -> bool {
        self.limit.is_some_and(|limit| self.value >= limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsState {
    pub vibration_enabled: bool,
    pub sound_enabled: bool,
    pub selected_clip: ClipId,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            vibration_enabled: true,
            sound_enabled: true,
            selected_clip: ClipId::new(DEFAULT_CLIP),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverlayVisibility {
    pub limit_form_open: bool,
    pub settings_open: bool,
}

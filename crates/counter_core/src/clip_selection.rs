//! Choosing the clip that plays on each tap: built-in sounds or a file the
//! user picks after granting media access.

use shared::domain::{is_builtin_clip, ClipId, ClipRef};
use tracing::{debug, info, warn};

use crate::{
    collaborators::{
        ClipPicker, PermissionGate, PermissionStatus, PickOutcome, MEDIA_LIBRARY_PERMISSION,
    },
    error::{CounterError, Result, ValidationError},
    settings::SettingsStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipSelection {
    Selected(ClipRef),
    Cancelled,
}

pub fn select_builtin_clip(store: &mut SettingsStore, clip: ClipId) -> Result<()> {
    if !is_builtin_clip(&clip) {
        return Err(ValidationError::UnknownClip { clip }.into());
    }
    store.set_clip(clip)
}

/// Asks for media access, then lets the user pick a file. Denial and
/// cancellation leave the draft untouched.
pub async fn pick_custom_clip(
    store: &mut SettingsStore,
    permissions: &dyn PermissionGate,
    picker: &dyn ClipPicker,
) -> Result<ClipSelection> {
    if !store.is_draft_open() {
        return Err(CounterError::NoOpenDraft);
    }

    if permissions.request(MEDIA_LIBRARY_PERMISSION).await == PermissionStatus::Denied {
        warn!(resource = MEDIA_LIBRARY_PERMISSION, "clip selection: permission denied");
        return Err(CounterError::PermissionDenied {
            resource: MEDIA_LIBRARY_PERMISSION.to_string(),
        });
    }

    match picker.pick_audio_clip().await.map_err(CounterError::Picker)? {
        PickOutcome::Cancelled => {
            debug!("clip selection: cancelled");
            Ok(ClipSelection::Cancelled)
        }
        PickOutcome::Picked(clip) => {
            store.set_clip(clip.id.clone())?;
            info!(clip = %clip.id, label = %clip.label, "clip selection: picked");
            Ok(ClipSelection::Selected(clip))
        }
    }
}

#[cfg(test)]
#[path = "tests/clip_selection_tests.rs"]
mod tests;

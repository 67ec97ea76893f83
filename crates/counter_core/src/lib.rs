//! Counter screen core: counter state machine, settings draft/commit, overlay
//! routing, and fire-and-forget audio/haptic feedback.

pub mod clip_selection;
pub mod collaborators;
pub mod engine;
pub mod error;
pub mod events;
pub mod feedback;
pub mod overlay;
pub mod session;
pub mod settings;

pub use clip_selection::ClipSelection;
pub use collaborators::{
    AudioPlayer, ClipPicker, HapticDriver, PermissionGate, PermissionStatus, PickOutcome,
};
pub use engine::CounterEngine;
pub use error::{CounterError, ValidationError};
pub use events::{EventBus, SessionEvent};
pub use feedback::{FeedbackConfig, FeedbackDispatcher, PlaybackOverlap};
pub use overlay::{OverlayController, SettingsClose};
pub use session::{CounterSession, SessionDeps, SessionSnapshot};
pub use settings::{SettingsReader, SettingsStore};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_newtype!(ClipId);

pub const DEFAULT_CLIP: &str = "tap.mp3";

/// An audio clip as offered to the user: the resource id plus a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipRef {
    pub id: ClipId,
    pub label: String,
}

impl ClipRef {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: ClipId::new(id),
            label: label.into(),
        }
    }
}

/// Clips bundled with the app.
pub fn builtin_clips() -> Vec<ClipRef> {
    vec![
        ClipRef::new(DEFAULT_CLIP, "Tap Sound 1"),
        ClipRef::new("tap2.mp3", "Tap Sound 2"),
    ]
}

pub fn is_builtin_clip(id: &ClipId) -> bool {
    builtin_clips().iter().any(|clip| &clip.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Tap,
    Undo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStrength {
    Standard,
    Strong,
}

impl FeedbackKind {
    pub fn strength(self) -> FeedbackStrength {
        match self {
            FeedbackKind::Tap => FeedbackStrength::Standard,
            FeedbackKind::Undo => FeedbackStrength::Strong,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackEvent {
    pub kind: FeedbackKind,
}

impl FeedbackEvent {
    pub fn tap() -> Self {
        Self {
            kind: FeedbackKind::Tap,
        }
    }

    pub fn undo() -> Self {
        Self {
            kind: FeedbackKind::Undo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_maps_to_strong_feedback() {
        assert_eq!(FeedbackKind::Tap.strength(), FeedbackStrength::Standard);
        assert_eq!(FeedbackKind::Undo.strength(), FeedbackStrength::Strong);
    }

    #[test]
    fn builtin_catalog_contains_default_clip() {
        assert!(is_builtin_clip(&ClipId::new(DEFAULT_CLIP)));
        assert!(!is_builtin_clip(&ClipId::new("/sdcard/ding.wav")));
    }

    #[test]
    fn clip_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&ClipId::new("tap2.mp3")).expect("serialize");
        assert_eq!(json, "\"tap2.mp3\"");
    }
}

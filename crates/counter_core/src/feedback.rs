//! Fire-and-forget audio/haptic feedback for counter mutations.

use std::{
    fmt,
    str::FromStr,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use shared::{
    domain::{ClipId, FeedbackEvent, FeedbackStrength},
    state::SettingsState,
};
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, warn};

use crate::collaborators::{AudioPlayer, HapticDriver};

const DEFAULT_STRONG_PULSE: Duration = Duration::from_millis(80);

/// What happens to a clip that is still playing when the next one starts.
/// Requests that have not reached the player yet are never dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackOverlap {
    StopOnReplace,
    #[default]
    Overlap,
}

impl FromStr for PlaybackOverlap {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "stop_on_replace" | "replace" => Ok(Self::StopOnReplace),
            "overlap" => Ok(Self::Overlap),
            other => Err(format!("unknown playback overlap policy '{other}'")),
        }
    }
}

impl fmt::Display for PlaybackOverlap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StopOnReplace => f.write_str("stop_on_replace"),
            Self::Overlap => f.write_str("overlap"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackConfig {
    pub strong_pulse: Duration,
    pub overlap: PlaybackOverlap,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            strong_pulse: DEFAULT_STRONG_PULSE,
            overlap: PlaybackOverlap::default(),
        }
    }
}

impl FeedbackConfig {
    /// Haptic pulse for a feedback strength. Standard feedback does not vibrate.
    pub fn pulse_for(&self, strength: FeedbackStrength) -> Option<Duration> {
        match strength {
            FeedbackStrength::Standard => None,
            FeedbackStrength::Strong => Some(self.strong_pulse),
        }
    }
}

pub struct FeedbackDispatcher {
    audio: Arc<dyn AudioPlayer>,
    haptics: Arc<dyn HapticDriver>,
    config: FeedbackConfig,
    in_flight: Vec<Playback>,
}

struct Playback {
    handle: JoinHandle<()>,
    reached_player: Arc<AtomicBool>,
}

impl Playback {
    fn reached_player(&self) -> bool {
        self.reached_player.load(Ordering::Acquire)
    }
}

impl FeedbackDispatcher {
    pub fn new(
        audio: Arc<dyn AudioPlayer>,
        haptics: Arc<dyn HapticDriver>,
        config: FeedbackConfig,
    ) -> Self {
        Self {
            audio,
            haptics,
            config,
            in_flight: Vec::new(),
        }
    }

    /// Plays the selected clip and pulses the haptic driver as `settings`
    /// allow. Playback is spawned and never awaited here; failures are logged.
    pub fn dispatch(&mut self, event: FeedbackEvent, settings: &SettingsState) {
        if settings.sound_enabled {
            self.start_playback(settings.selected_clip.clone());
        }

        if !settings.vibration_enabled {
            return;
        }
        if let Some(duration) = self.config.pulse_for(event.kind.strength()) {
            debug!(?duration, "feedback: haptic pulse");
            self.haptics.pulse(duration);
        }
    }

    /// Number of playback tasks that have not finished yet.
    pub fn active_playbacks(&self) -> usize {
        self.in_flight
            .iter()
            .filter(|playback| !playback.handle.is_finished())
            .count()
    }

    pub fn stop_all(&mut self) {
        for playback in self.in_flight.drain(..) {
            playback.handle.abort();
        }
    }

    /// Waits for outstanding playback to finish.
    pub async fn flush(&mut self) {
        for playback in self.in_flight.drain(..) {
            if let Err(err) = playback.handle.await {
                if err.is_panic() {
                    warn!("feedback: audio task panicked: {err}");
                }
            }
        }
    }

    fn start_playback(&mut self, clip: ClipId) {
        let Ok(runtime) = Handle::try_current() else {
            warn!(clip = %clip, "feedback: no async runtime available, skipping audio");
            return;
        };

        if self.config.overlap == PlaybackOverlap::StopOnReplace {
            // Only clips already handed to the player are cut off.
            for playback in self.in_flight.iter().filter(|p| p.reached_player()) {
                playback.handle.abort();
            }
        }
        self.in_flight.retain(|playback| !playback.handle.is_finished());

        let audio = Arc::clone(&self.audio);
        let reached_player = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&reached_player);
        let handle = runtime.spawn(async move {
            flag.store(true, Ordering::Release);
            if let Err(err) = audio.play(&clip).await {
                warn!(clip = %clip, "feedback: audio playback failed: {err:#}");
            }
        });
        self.in_flight.push(Playback {
            handle,
            reached_player,
        });
    }
}

impl fmt::Debug for FeedbackDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedbackDispatcher")
            .field("config", &self.config)
            .field("in_flight", &self.in_flight.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/feedback_tests.rs"]
mod tests;

//! Counter value, optional limit, and the operations that move them.

use shared::{domain::FeedbackEvent, state::CounterState};
use tracing::{debug, info};

use crate::{
    error::ValidationError,
    events::{EventBus, SessionEvent},
    feedback::FeedbackDispatcher,
    settings::SettingsReader,
};

pub struct CounterEngine {
    state: CounterState,
    feedback: FeedbackDispatcher,
    settings: SettingsReader,
    events: EventBus,
}

impl CounterEngine {
    pub fn new(feedback: FeedbackDispatcher, settings: SettingsReader, events: EventBus) -> Self {
        Self {
            state: CounterState::default(),
            feedback,
            settings,
            events,
        }
    }

    pub fn state(&self) -> CounterState {
        self.state
    }

    pub fn feedback(&self) -> &FeedbackDispatcher {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut FeedbackDispatcher {
        &mut self.feedback
    }

    /// Adds one unless the limit has been reached. Tap feedback fires either way.
    pub fn increment(&mut self) {
        let before = self.state.value;
        if !self.state.at_limit() {
            self.state.value = before.saturating_add(1);
        }

        if self.state.value != before {
            self.publish();
        } else {
            debug!(value = before, limit = ?self.state.limit, "counter: increment blocked");
        }
        self.emit_feedback(FeedbackEvent::tap());
    }

    /// Subtracts one, stopping at zero.
    pub fn decrement(&mut self) {
        let before = self.state.value;
        self.state.value = before.saturating_sub(1);
        if self.state.value != before {
            self.publish();
        }
        self.emit_feedback(FeedbackEvent::undo());
    }

    pub fn reset(&mut self) {
        self.state.value = 0;
        info!("counter: reset");
        self.publish();
    }

    /// Parses and applies a new upper bound. On error the limit is unchanged.
    pub fn set_limit(&mut self, candidate: &str) -> Result<u64, ValidationError> {
        let limit = parse_limit(candidate)?;
        self.state.limit = Some(limit);
        info!(limit, value = self.state.value, "counter: limit set");
        self.publish();
        Ok(limit)
    }

    pub fn clear_limit(&mut self) {
        if self.state.limit.take().is_some() {
            info!("counter: limit cleared");
            self.publish();
        }
    }

    fn emit_feedback(&mut self, event: FeedbackEvent) {
        let settings = self.settings.current();
        self.feedback.dispatch(event, &settings);
    }

    fn publish(&self) {
        self.events.publish(SessionEvent::CounterChanged(self.state));
    }
}

pub fn parse_limit(candidate: &str) -> Result<u64, ValidationError> {
    let trimmed = candidate.trim();
    let parsed = trimmed
        .parse::<i128>()
        .map_err(|_| ValidationError::NotAnInteger {
            input: candidate.to_string(),
        })?;

    if parsed < 0 {
        return Err(ValidationError::Negative { value: parsed });
    }

    u64::try_from(parsed).map_err(|_| ValidationError::TooLarge {
        input: trimmed.to_string(),
    })
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;

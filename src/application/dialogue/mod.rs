//! Preference-collection dialogue.
//!
//! Transports translate their updates into [`DialogueEvent`]s keyed by a
//! conversation id and render the returned [`Reply`]. The service owns the
//! [`SessionRegistry`] and writes the finished preference to the store.

mod event;
mod registry;
mod reply;
mod state;

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::domain::SubscriberPreference;
use crate::port::PreferenceStore;

pub use event::{CallbackToken, DialogueEvent};
pub use registry::SessionRegistry;
pub use reply::{help_text, Choice, Prompt, Reply};
pub use state::{Advance, Completion, DialogueState, Input, Session};

/// Drives conversations from start to a persisted preference.
pub struct DialogueService {
    registry: SessionRegistry,
    store: Arc<dyn PreferenceStore>,
}

impl DialogueService {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            registry: SessionRegistry::new(),
            store,
        }
    }

    /// Current step for a conversation, if a session is active.
    #[must_use]
    pub fn state(&self, key: &str) -> Option<DialogueState> {
        self.registry.state(key)
    }

    /// Number of conversations with an active session.
    #[must_use]
    pub fn active_sessions(&self) -> usize {
        self.registry.len()
    }

    /// Handle one event and return the single reply to send.
    pub async fn handle(&self, key: &str, event: DialogueEvent) -> Reply {
        match event {
            DialogueEvent::Start => {
                debug!(conversation = key, "Dialogue started");
                Reply::Prompt(self.registry.start(key))
            }
            DialogueEvent::Cancel => {
                if self.registry.cancel(key) {
                    debug!(conversation = key, "Dialogue cancelled");
                    Reply::Cancelled
                } else {
                    Reply::NothingToCancel
                }
            }
            DialogueEvent::Help => Reply::Help,
            DialogueEvent::Text(text) => self.advance(key, Input::Text(text)).await,
            DialogueEvent::Button(data) => self.advance(key, Input::Button(data)).await,
        }
    }

    async fn advance(&self, key: &str, input: Input) -> Reply {
        let Some(outcome) = self.registry.advance(key, &input) else {
            return Reply::NoSession;
        };

        match outcome {
            Advance::Moved(prompt) => Reply::Prompt(prompt),
            Advance::Rejected(prompt) => {
                debug!(conversation = key, state = ?prompt.state, "Rejected dialogue input");
                Reply::Prompt(prompt)
            }
            Advance::Complete(completion) => self.persist(key, completion).await,
        }
    }

    async fn persist(&self, key: &str, completion: Completion) -> Reply {
        let preference = SubscriberPreference::new(
            key,
            completion.market,
            completion.instrument,
            completion.timeframe,
        );

        match self.store.create(&preference).await {
            Ok(()) => {
                info!(
                    conversation = key,
                    subscriber_id = %preference.subscriber_id,
                    market = %preference.market,
                    instrument = %preference.instrument,
                    timeframe = %preference.timeframe,
                    "Stored subscriber preference"
                );
                Reply::Subscribed(preference)
            }
            Err(e) => {
                error!(conversation = key, error = %e, "Failed to store subscriber preference");
                Reply::SaveFailed
            }
        }
    }
}

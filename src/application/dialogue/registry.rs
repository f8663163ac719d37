//! Per-conversation session registry.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::reply::Prompt;
use super::state::{Advance, DialogueState, Input, Session};

/// Maps conversation keys to in-progress sessions.
///
/// Each key owns at most one session. Sessions for different keys never
/// share state.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, Session>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh session for `key`, replacing any existing one.
    pub fn start(&self, key: &str) -> Prompt {
        let session = Session::new();
        let prompt = session.prompt();
        self.sessions.insert(key.to_string(), session);
        prompt
    }

    /// Feed input to the session for `key`.
    ///
    /// Returns `None` when no session exists. A completed session is removed
    /// before this returns.
    pub fn advance(&self, key: &str, input: &Input) -> Option<Advance> {
        match self.sessions.entry(key.to_string()) {
            Entry::Occupied(mut entry) => {
                let outcome = entry.get_mut().advance(input);
                if matches!(outcome, Advance::Complete(_)) {
                    entry.remove();
                }
                Some(outcome)
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Destroy the session for `key`. Returns whether one existed.
    pub fn cancel(&self, key: &str) -> bool {
        self.sessions.remove(key).is_some()
    }

    #[must_use]
    pub fn state(&self, key: &str) -> Option<DialogueState> {
        self.sessions.get(key).map(|s| s.state())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(s: &str) -> Input {
        Input::Button(s.to_string())
    }

    #[test]
    fn sessions_are_isolated_per_key() {
        let registry = SessionRegistry::new();
        registry.start("a");
        registry.start("b");

        registry.advance("a", &button("market_forex"));

        assert_eq!(registry.state("a"), Some(DialogueState::AwaitingInstrument));
        assert_eq!(registry.state("b"), Some(DialogueState::AwaitingMarket));
    }

    #[test]
    fn advance_without_session_returns_none() {
        let registry = SessionRegistry::new();
        assert!(registry.advance("missing", &button("market_forex")).is_none());
    }

    #[test]
    fn completion_removes_session() {
        let registry = SessionRegistry::new();
        registry.start("a");
        registry.advance("a", &button("market_forex"));
        registry.advance("a", &button("instrument_EURUSD"));

        let outcome = registry.advance("a", &button("timeframe_1h"));

        assert!(matches!(outcome, Some(Advance::Complete(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn restart_discards_progress() {
        let registry = SessionRegistry::new();
        registry.start("a");
        registry.advance("a", &button("market_forex"));

        registry.start("a");

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.state("a"), Some(DialogueState::AwaitingMarket));
    }

    #[test]
    fn cancel_reports_whether_session_existed() {
        let registry = SessionRegistry::new();
        registry.start("a");
        assert!(registry.cancel("a"));
        assert!(!registry.cancel("a"));
        assert_eq!(registry.state("a"), None);
    }
}

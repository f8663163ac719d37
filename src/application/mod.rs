//! Application services: matching, dispatch, and the preference dialogue.

pub mod dialogue;
pub mod dispatch;
pub mod matcher;

pub use dialogue::DialogueService;
pub use dispatch::ForwardDispatcher;
pub use matcher::SignalMatcher;

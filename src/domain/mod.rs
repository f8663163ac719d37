//! Transport-agnostic domain types.

mod market;
mod preference;
mod record;
mod signal;
mod timeframe;

pub use market::{Market, UnknownMarket};
pub use preference::{SubscriberId, SubscriberPreference};
pub use record::SubscriberRecord;
pub use signal::{MatchResult, Signal};
pub use timeframe::{Timeframe, UnknownTimeframe};

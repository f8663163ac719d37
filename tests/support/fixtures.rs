use signal_relay::domain::{Market, SubscriberPreference, Timeframe};

pub fn preference(chat: &str, market: Market, instrument: &str, timeframe: Timeframe) -> SubscriberPreference {
    SubscriberPreference::new(chat, market, instrument, timeframe)
}

/// Two EURUSD/1h subscribers, one EURUSD/4h and one XAUUSD/1h.
pub fn mixed_preferences() -> Vec<SubscriberPreference> {
    vec![
        preference("100", Market::Forex, "EURUSD", Timeframe::H1),
        preference("200", Market::Forex, "EURUSD", Timeframe::H1),
        preference("300", Market::Forex, "EURUSD", Timeframe::H4),
        preference("400", Market::Commodities, "XAUUSD", Timeframe::H1),
    ]
}

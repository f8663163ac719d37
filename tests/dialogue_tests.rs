mod support;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use signal_relay::application::dialogue::{CallbackToken, DialogueEvent, DialogueState, Reply};
use signal_relay::application::DialogueService;
use signal_relay::domain::{Market, Timeframe};
use signal_relay::testkit::{MemoryPreferenceStore, RecordingForwarder};
use support::api;

fn button(token: &str) -> DialogueEvent {
    DialogueEvent::Button(token.to_string())
}

fn text(value: &str) -> DialogueEvent {
    DialogueEvent::Text(value.to_string())
}

fn service() -> (Arc<DialogueService>, Arc<MemoryPreferenceStore>) {
    let store = Arc::new(MemoryPreferenceStore::new());
    (Arc::new(DialogueService::new(store.clone())), store)
}

#[tokio::test]
async fn button_flow_stores_preference_that_the_api_then_matches() {
    let (dialogue, store) = service();

    let reply = dialogue.handle("555", DialogueEvent::Start).await;
    let prompt = reply.prompt().unwrap();
    assert_eq!(prompt.state, DialogueState::AwaitingMarket);
    assert_eq!(prompt.choices.len(), Market::ALL.len());

    let reply = dialogue.handle("555", button("market_commodities")).await;
    let prompt = reply.prompt().unwrap();
    assert_eq!(prompt.state, DialogueState::AwaitingInstrument);
    assert!(prompt
        .choices
        .iter()
        .any(|c| c.token == CallbackToken::Instrument("XAUUSD".into())));

    dialogue.handle("555", button("instrument_XAUUSD")).await;
    let reply = dialogue.handle("555", button("timeframe_15m")).await;

    let Reply::Subscribed(pref) = reply else {
        panic!("expected Subscribed, got {reply:?}");
    };
    assert_eq!(pref.market, Market::Commodities);
    assert_eq!(pref.timeframe, Timeframe::M15);
    assert_eq!(dialogue.state("555"), None);

    let router = api::router(store, Arc::new(RecordingForwarder::new()));
    let (status, body) = api::post_json(
        router,
        "/match-subscribers",
        json!({ "instrument": "XAUUSD", "timeframe": "15m" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["subscriber_count"], 1);
    assert_eq!(body["data"]["subscribers"][0]["chat_id"], "555");
}

#[tokio::test]
async fn typed_text_is_accepted_and_instrument_normalized() {
    let (dialogue, store) = service();

    dialogue.handle("1", DialogueEvent::Start).await;
    dialogue.handle("1", text("Crypto")).await;
    dialogue.handle("1", text("btcusd")).await;
    let reply = dialogue.handle("1", text("4h")).await;

    assert!(matches!(reply, Reply::Subscribed(_)));
    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].instrument, "BTCUSD");
}

#[tokio::test]
async fn invalid_timeframe_keeps_state_and_replies_once() {
    let (dialogue, store) = service();

    dialogue.handle("2", DialogueEvent::Start).await;
    dialogue.handle("2", button("market_forex")).await;
    dialogue.handle("2", button("instrument_EURUSD")).await;

    let reply = dialogue.handle("2", text("2h")).await;
    let prompt = reply.prompt().unwrap();
    assert!(prompt.rejected);
    assert_eq!(prompt.state, DialogueState::AwaitingTimeframe);
    assert_eq!(prompt.instrument.as_deref(), Some("EURUSD"));
    assert_eq!(prompt.choices.len(), Timeframe::ALL.len());
    assert!(store.records().is_empty());

    let reply = dialogue.handle("2", text("1h")).await;
    assert!(matches!(reply, Reply::Subscribed(_)));
}

#[tokio::test]
async fn back_navigation_returns_to_earlier_steps() {
    let (dialogue, store) = service();

    dialogue.handle("3", DialogueEvent::Start).await;
    dialogue.handle("3", button("market_forex")).await;
    dialogue.handle("3", button("instrument_GBPUSD")).await;

    let reply = dialogue.handle("3", button("back_to_instrument")).await;
    let prompt = reply.prompt().unwrap();
    assert_eq!(prompt.state, DialogueState::AwaitingInstrument);
    assert_eq!(prompt.market, Some(Market::Forex));

    let reply = dialogue.handle("3", button("back_to_market")).await;
    assert_eq!(reply.prompt().unwrap().state, DialogueState::AwaitingMarket);

    dialogue.handle("3", button("market_indices")).await;
    dialogue.handle("3", button("instrument_US500")).await;
    dialogue.handle("3", button("timeframe_1d")).await;

    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].market, Market::Indices);
    assert_eq!(records[0].instrument, "US500");
}

#[tokio::test]
async fn restart_discards_partial_progress() {
    let (dialogue, _store) = service();

    dialogue.handle("4", DialogueEvent::Start).await;
    dialogue.handle("4", button("market_forex")).await;
    assert_eq!(dialogue.state("4"), Some(DialogueState::AwaitingInstrument));

    dialogue.handle("4", DialogueEvent::Start).await;
    assert_eq!(dialogue.state("4"), Some(DialogueState::AwaitingMarket));
}

#[tokio::test]
async fn help_does_not_touch_the_session() {
    let (dialogue, _store) = service();

    dialogue.handle("6", DialogueEvent::Start).await;
    dialogue.handle("6", button("market_forex")).await;

    assert_eq!(dialogue.handle("6", DialogueEvent::Help).await, Reply::Help);
    assert_eq!(dialogue.state("6"), Some(DialogueState::AwaitingInstrument));
}

#[tokio::test]
async fn concurrent_conversations_are_isolated() {
    let (dialogue, store) = service();

    let flows = [
        ("10", "market_forex", "instrument_EURUSD", "timeframe_1m"),
        ("11", "market_crypto", "instrument_ETHUSD", "timeframe_5m"),
        ("12", "market_indices", "instrument_US30", "timeframe_30m"),
        ("13", "market_commodities", "instrument_USOIL", "timeframe_1h"),
    ];

    let handles: Vec<_> = flows
        .iter()
        .map(|&(key, market, instrument, timeframe)| {
            let dialogue = Arc::clone(&dialogue);
            tokio::spawn(async move {
                dialogue.handle(key, DialogueEvent::Start).await;
                dialogue.handle(key, button(market)).await;
                dialogue.handle(key, button(instrument)).await;
                dialogue.handle(key, button(timeframe)).await
            })
        })
        .collect();

    for handle in handles {
        assert!(matches!(handle.await.unwrap(), Reply::Subscribed(_)));
    }

    let mut records = store.records();
    records.sort_by(|a, b| a.chat_id.cmp(&b.chat_id));
    let summary: Vec<(&str, &str)> = records
        .iter()
        .map(|r| (r.chat_id.as_str(), r.instrument.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![("10", "EURUSD"), ("11", "ETHUSD"), ("12", "US30"), ("13", "USOIL")]
    );
    assert_eq!(dialogue.active_sessions(), 0);
}

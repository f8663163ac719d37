//! Inline keyboard rendering for dialogue prompts.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::application::dialogue::{Choice, DialogueState, Prompt, Reply};

/// Keyboard for a reply, if it presents choices.
pub fn keyboard_for(reply: &Reply) -> Option<InlineKeyboardMarkup> {
    reply.prompt().map(prompt_keyboard)
}

fn prompt_keyboard(prompt: &Prompt) -> InlineKeyboardMarkup {
    let per_row = match prompt.state {
        DialogueState::AwaitingMarket => 2,
        DialogueState::AwaitingInstrument | DialogueState::AwaitingTimeframe => 3,
    };

    let mut rows: Vec<Vec<InlineKeyboardButton>> = prompt
        .choices
        .chunks(per_row)
        .map(|chunk| chunk.iter().map(button).collect())
        .collect();

    if let Some(back) = &prompt.back {
        rows.push(vec![button(back)]);
    }

    InlineKeyboardMarkup::new(rows)
}

fn button(choice: &Choice) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(choice.label.clone(), choice.token.encode())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dialogue::Session;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(markup: &InlineKeyboardMarkup) -> Vec<String> {
        markup
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|b| match &b.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn market_prompt_has_two_per_row() {
        let reply = Reply::Prompt(Session::new().prompt());
        let markup = keyboard_for(&reply).unwrap();

        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(
            callback_data(&markup),
            vec!["market_forex", "market_crypto", "market_commodities", "market_indices"]
        );
    }

    #[test]
    fn back_button_is_last_row() {
        let mut session = Session::new();
        session.advance(&crate::application::dialogue::Input::Button("market_crypto".into()));
        let markup = keyboard_for(&Reply::Prompt(session.prompt())).unwrap();

        let last = markup.inline_keyboard.last().unwrap();
        assert_eq!(last.len(), 1);
        assert_eq!(callback_data(&markup).last().unwrap(), "back_to_market");
        assert!(callback_data(&markup).contains(&"instrument_BTCUSD".to_string()));
    }

    #[test]
    fn outcome_replies_have_no_keyboard() {
        assert!(keyboard_for(&Reply::Cancelled).is_none());
        assert!(keyboard_for(&Reply::NoSession).is_none());
    }
}

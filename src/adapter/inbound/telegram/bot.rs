//! Long-polling bot that drives the preference dialogue.
//!
//! Each update becomes one [`DialogueEvent`](crate::application::dialogue::DialogueEvent)
//! keyed by chat id; each event produces exactly one outbound message.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{error, info, warn};

use super::command::{bot_commands, event_for_text};
use super::keyboard::keyboard_for;
use crate::application::dialogue::{DialogueEvent, Reply};
use crate::application::DialogueService;

/// Conversation key for a chat.
#[must_use]
pub fn conversation_key(chat_id: ChatId) -> String {
    chat_id.0.to_string()
}

/// Run the bot until Ctrl-C.
pub async fn run_bot(bot_token: String, dialogue: Arc<DialogueService>) {
    let bot = Bot::new(bot_token);

    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(handle_callback));

    info!("Telegram dialogue listener started");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![dialogue])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    warn!("Telegram dialogue listener stopped");
}

async fn handle_message(
    bot: Bot,
    msg: Message,
    dialogue: Arc<DialogueService>,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let reply = dialogue
        .handle(&conversation_key(msg.chat.id), event_for_text(text))
        .await;
    send_reply(&bot, msg.chat.id, &reply).await;
    Ok(())
}

async fn handle_callback(
    bot: Bot,
    query: CallbackQuery,
    dialogue: Arc<DialogueService>,
) -> ResponseResult<()> {
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }

    let (Some(data), Some(message)) = (query.data.clone(), query.message.as_ref()) else {
        return Ok(());
    };
    let chat_id = message.chat().id;

    let reply = dialogue
        .handle(&conversation_key(chat_id), DialogueEvent::Button(data))
        .await;
    send_reply(&bot, chat_id, &reply).await;
    Ok(())
}

async fn send_reply(bot: &Bot, chat_id: ChatId, reply: &Reply) {
    let mut request = bot.send_message(chat_id, reply.text());
    if let Some(markup) = keyboard_for(reply) {
        request = request.reply_markup(markup);
    }

    if let Err(e) = request.await {
        error!(chat_id = chat_id.0, error = %e, "Failed to send Telegram reply");
    }
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}

//! Telegram update handlers.
//!
//! Handlers translate teloxide updates into core actions/commands and push the
//! resulting screens through the MessagingPort. Failures to talk to Telegram
//! are logged; they never stop the dispatcher.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, Message},
};

use aqb_core::{
    app::AirQualityService,
    domain::{ChatId, MessageRef},
    menu::{Action, Command},
    messaging::{
        port::{edit_screen, send_screen, MessagingPort},
        types::InlineKeyboard,
    },
    Result,
};

use crate::router::AppState;

mod callback;
mod commands;

pub async fn handle_callback(q: CallbackQuery, state: Arc<AppState>) -> ResponseResult<()> {
    callback::handle_callback(q, state).await
}

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    if let Some(text) = msg.text() {
        if text.trim_start().starts_with('/') {
            return commands::handle_command(msg, state).await;
        }
    }

    tracing::debug!(chat_id = msg.chat.id.0, "ignoring non-command message");
    Ok(())
}

/// Replace the message that carried the pressed button with the action's
/// screen, showing a loading placeholder first when the action fetches data.
pub(crate) async fn present_action(
    messenger: &dyn MessagingPort,
    service: &AirQualityService,
    target: MessageRef,
    action: Action,
) -> Result<()> {
    if let Some(loading) = action.loading_text() {
        messenger
            .edit_html(target, loading, InlineKeyboard::default())
            .await?;
    }
    let screen = service.handle_action(action).await;
    edit_screen(messenger, target, &screen).await
}

/// Answer a command with a new message. Data commands send a placeholder and
/// edit it once the report is ready.
pub(crate) async fn present_command(
    messenger: &dyn MessagingPort,
    service: &AirQualityService,
    chat_id: ChatId,
    command: Command,
) -> Result<()> {
    let loading = command.action().and_then(Action::loading_text);
    let Some(loading) = loading else {
        let screen = service.handle_command(command).await;
        send_screen(messenger, chat_id, &screen).await?;
        return Ok(());
    };

    let placeholder = messenger
        .send_html(chat_id, loading, InlineKeyboard::default())
        .await?;
    let screen = service.handle_command(command).await;
    edit_screen(messenger, placeholder, &screen).await
}

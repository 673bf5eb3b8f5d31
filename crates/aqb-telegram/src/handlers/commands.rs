use std::sync::Arc;

use teloxide::prelude::*;

use aqb_core::{
    domain::ChatId,
    menu::{parse_command, Command, UNKNOWN_COMMAND_TEXT},
    messaging::types::InlineKeyboard,
};

use crate::router::AppState;

use super::present_command;

pub async fn handle_command(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some((name, _args)) = msg.text().and_then(parse_command) else {
        return Ok(());
    };
    let chat_id = ChatId(msg.chat.id.0);

    let Some(command) = Command::from_name(&name) else {
        tracing::debug!(chat_id = chat_id.0, command = %name, "unknown command");
        if let Err(e) = state
            .messenger
            .send_html(chat_id, UNKNOWN_COMMAND_TEXT, InlineKeyboard::default())
            .await
        {
            tracing::warn!(chat_id = chat_id.0, error = %e, "failed to answer unknown command");
        }
        return Ok(());
    };

    tracing::info!(chat_id = chat_id.0, ?command, "command");
    if let Err(e) = present_command(
        state.messenger.as_ref(),
        state.service.as_ref(),
        chat_id,
        command,
    )
    .await
    {
        tracing::warn!(chat_id = chat_id.0, ?command, error = %e, "failed to deliver command reply");
    }

    Ok(())
}

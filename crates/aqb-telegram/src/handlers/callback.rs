use std::sync::Arc;

use teloxide::prelude::*;

use aqb_core::{
    domain::{ChatId, MessageId, MessageRef},
    menu::Action,
    messaging::port::MessagingPort,
};

use crate::router::AppState;

use super::present_action;

pub async fn handle_callback(q: CallbackQuery, state: Arc<AppState>) -> ResponseResult<()> {
    let target = q.message.as_ref().map(|m| MessageRef {
        chat_id: ChatId(m.chat.id.0),
        message_id: MessageId(m.id.0),
    });
    let data = q.data.clone().unwrap_or_default();

    dispatch_callback(&state, &q.id, target, &data).await;
    Ok(())
}

async fn dispatch_callback(
    state: &AppState,
    callback_id: &str,
    target: Option<MessageRef>,
    data: &str,
) {
    let messenger = state.messenger.as_ref();

    // Always answer the callback query so the client stops its spinner.
    let (target, action) = match (target, Action::parse(data)) {
        (Some(target), Some(action)) => (target, action),
        (_, None) => {
            tracing::debug!(data, "unknown callback data");
            answer(messenger, callback_id, Some("Unknown action")).await;
            return;
        }
        (None, Some(_)) => {
            answer(messenger, callback_id, None).await;
            return;
        }
    };
    answer(messenger, callback_id, None).await;

    tracing::info!(chat_id = target.chat_id.0, ?action, "callback");
    if let Err(e) = present_action(messenger, state.service.as_ref(), target, action).await {
        tracing::warn!(chat_id = target.chat_id.0, ?action, error = %e, "failed to update screen");
    }
}

async fn answer(messenger: &dyn MessagingPort, callback_id: &str, text: Option<&str>) {
    if let Err(e) = messenger.answer_callback_query(callback_id, text).await {
        tracing::debug!(error = %e, "failed to answer callback query");
    }
}

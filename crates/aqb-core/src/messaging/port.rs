use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    formatting::truncate_html,
    menu::Screen,
    messaging::types::{InlineKeyboard, MessagingCapabilities},
    Result,
};

/// Cross-messenger port.
///
/// Keyboards are optional everywhere: an empty keyboard means plain text.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    fn capabilities(&self) -> MessagingCapabilities;

    async fn send_html(
        &self,
        chat_id: ChatId,
        html: &str,
        keyboard: InlineKeyboard,
    ) -> Result<MessageRef>;

    async fn edit_html(&self, msg: MessageRef, html: &str, keyboard: InlineKeyboard)
        -> Result<()>;

    async fn answer_callback_query(&self, callback_id: &str, text: Option<&str>) -> Result<()>;
}

/// Send a screen as a new message.
pub async fn send_screen(
    messenger: &dyn MessagingPort,
    chat_id: ChatId,
    screen: &Screen,
) -> Result<MessageRef> {
    messenger
        .send_html(
            chat_id,
            &clip(messenger, &screen.text),
            InlineKeyboard::from_menu(&screen.buttons),
        )
        .await
}

/// Replace an existing message with a screen.
pub async fn edit_screen(
    messenger: &dyn MessagingPort,
    msg: MessageRef,
    screen: &Screen,
) -> Result<()> {
    messenger
        .edit_html(
            msg,
            &clip(messenger, &screen.text),
            InlineKeyboard::from_menu(&screen.buttons),
        )
        .await
}

fn clip(messenger: &dyn MessagingPort, text: &str) -> String {
    truncate_html(text, messenger.capabilities().max_message_len)
}

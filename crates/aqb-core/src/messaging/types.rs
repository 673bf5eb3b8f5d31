use crate::menu::MenuButton;

/// Inline keyboard (buttons), one button per row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub buttons: Vec<InlineButton>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub callback_data: String,
}

impl InlineKeyboard {
    pub fn from_menu(buttons: &[MenuButton]) -> Self {
        Self {
            buttons: buttons
                .iter()
                .map(|b| InlineButton {
                    label: b.label.to_string(),
                    callback_data: b.action.callback_data().to_string(),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}

/// Limits of a messenger implementation.
#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    pub max_message_len: usize,
}

//! Bot API wire types for `sendMessage`.

use serde::{Deserialize, Serialize};

use relay::Notification;

#[derive(Debug, Serialize)]
pub(crate) struct SendMessageRequest<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
    pub parse_mode: &'static str,
    pub link_preview_options: LinkPreviewOptions,
    pub reply_markup: InlineKeyboardMarkup<'a>,
}

impl<'a> SendMessageRequest<'a> {
    pub fn new(chat_id: &'a str, notification: &'a Notification) -> Self {
        Self {
            chat_id,
            text: &notification.text,
            parse_mode: "HTML",
            link_preview_options: LinkPreviewOptions { is_disabled: true },
            reply_markup: InlineKeyboardMarkup {
                inline_keyboard: vec![vec![InlineKeyboardButton {
                    text: &notification.button.text,
                    url: &notification.button.url,
                }]],
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LinkPreviewOptions {
    pub is_disabled: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct InlineKeyboardMarkup<'a> {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton<'a>>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InlineKeyboardButton<'a> {
    pub text: &'a str,
    pub url: &'a str,
}

/// Envelope every Bot API method answers with.
///
/// `result` is ignored: the relay only cares whether the message went out.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    pub ok: bool,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay::LinkButton;

    #[test]
    fn request_shape() {
        let notification = Notification {
            text: "<b>Deployment: api</b>".to_owned(),
            button: LinkButton {
                text: "View Deployment".to_owned(),
                url: "https://railway.app/project/123/".to_owned(),
            },
        };

        let json = serde_json::to_value(SendMessageRequest::new("-10042", &notification)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "chat_id": "-10042",
                "text": "<b>Deployment: api</b>",
                "parse_mode": "HTML",
                "link_preview_options": { "is_disabled": true },
                "reply_markup": {
                    "inline_keyboard": [[
                        { "text": "View Deployment", "url": "https://railway.app/project/123/" }
                    ]]
                }
            })
        );
    }
}

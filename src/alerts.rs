use serenity::all::{ChannelId, CreateMessage, Http};
use tracing::error;

use crate::embeds;
use crate::error::Error;

// Discord rejects embed descriptions above 4096 characters.
const MAX_DESCRIPTION_CHARS: usize = 4000;

pub fn alert_description(source: &str, err: &Error) -> String {
    let text = format!("An error occurred in `{}`:\n```{}```", source, err);
    match text.chars().count() > MAX_DESCRIPTION_CHARS {
        true => text.chars().take(MAX_DESCRIPTION_CHARS).collect(),
        false => text,
    }
}

// Logs an unexpected error and, when an alert channel is configured, posts it
// there. User errors never reach this channel.
pub async fn report_error(http: &Http, channel_id: Option<ChannelId>, source: &str, err: &Error) {
    error!(source, error = %err, "Unexpected error");

    let channel_id = match channel_id {
        Some(channel_id) if !err.is_user_error() => channel_id,
        _ => return,
    };

    let embed = embeds::error_embed()
        .title("Error Alert!")
        .description(alert_description(source, err));
    if let Err(why) = channel_id
        .send_message(http, CreateMessage::new().embed(embed))
        .await
    {
        error!(error = %why, "Failed to send the error alert");
    }
}

#[cfg(test)]
mod tests {
    use crate::alerts::{MAX_DESCRIPTION_CHARS, alert_description};
    use crate::error::Error;

    #[test]
    fn test_alert_description() {
        let err = Error::Storage("Database error: disk I/O error".to_string());

        assert_eq!(
            alert_description("giveaway setup", &err),
            "An error occurred in `giveaway setup`:\n```Database error: disk I/O error```"
        );
    }

    #[test]
    fn test_alert_description_is_truncated() {
        let err = Error::SerenityError("x".repeat(10_000));

        assert_eq!(
            alert_description("scheduler", &err).chars().count(),
            MAX_DESCRIPTION_CHARS
        );
    }
}

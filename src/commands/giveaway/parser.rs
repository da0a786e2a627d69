use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use serenity::model::id::UserId;

use crate::commands::giveaway::models::GiveawaySetup;
use crate::error::{Error, Result};

lazy_static! {
    static ref DURATION_REGEX: Regex =
        Regex::new(r"^(?P<value>\d+)(?P<unit>[smhdw])$").unwrap();
}

pub const INVALID_DURATION_MESSAGE: &str =
    "Invalid duration format. Use formats like 1s, 1m, 1h, 1d, 1w.";
pub const INVALID_WINNERS_MESSAGE: &str = "The number of winners must be a positive integer.";

// Parses `<integer><unit>` where the unit is one of s, m, h, d or w.
pub fn parse_duration(text: &str) -> Result<Duration> {
    let invalid = || Error::Validation(INVALID_DURATION_MESSAGE.to_string());

    let captures = DURATION_REGEX.captures(text.trim()).ok_or_else(invalid)?;
    let value = captures["value"].parse::<u64>().map_err(|_| invalid())?;
    if value == 0 {
        return Err(invalid());
    }

    let unit_secs = match &captures["unit"] {
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        "w" => 7 * 24 * 60 * 60,
        _ => return Err(invalid()),
    };

    // Anything beyond what a Unix timestamp can hold is nonsense input.
    value
        .checked_mul(unit_secs)
        .filter(|secs| *secs <= i64::MAX as u64)
        .map(Duration::from_secs)
        .ok_or_else(invalid)
}

pub fn parse_num_winners(text: &str) -> Result<u32> {
    match text.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(Error::Validation(INVALID_WINNERS_MESSAGE.to_string())),
    }
}

pub fn parse_message_id(text: &str) -> Result<u64> {
    match text.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(Error::Validation(
            "Invalid message ID. Provide a valid integer.".to_string(),
        )),
    }
}

// Turns the raw setup form into giveaway parameters ending `duration` after `now`.
pub fn parse_setup(
    duration: &str,
    prize: &str,
    num_winners: &str,
    host_id: UserId,
    now: i64,
) -> Result<GiveawaySetup> {
    let duration = parse_duration(duration)?;
    let num_winners = parse_num_winners(num_winners)?;

    let prize = prize.trim();
    if prize.is_empty() {
        return Err(Error::Validation("The prize can't be empty.".to_string()));
    }

    let end_time = now
        .checked_add(duration.as_secs() as i64)
        .ok_or_else(|| Error::Validation(INVALID_DURATION_MESSAGE.to_string()))?;

    Ok(GiveawaySetup {
        prize: prize.to_string(),
        end_time,
        num_winners,
        host_id,
    })
}

#[cfg(test)]
mod tests {
    use serenity::model::id::UserId;

    use crate::commands::giveaway::models::GiveawaySetup;
    use crate::commands::giveaway::parser::{
        INVALID_DURATION_MESSAGE, INVALID_WINNERS_MESSAGE, parse_duration, parse_message_id,
        parse_num_winners, parse_setup,
    };
    use crate::error::Error;

    #[test]
    fn test_parse_every_unit() {
        let cases = [
            ("45s", 45),
            ("5m", 5 * 60),
            ("2h", 2 * 60 * 60),
            ("3d", 3 * 24 * 60 * 60),
            ("1w", 7 * 24 * 60 * 60),
        ];

        for (text, expected) in cases {
            assert_eq!(parse_duration(text).unwrap().as_secs(), expected, "{}", text);
        }
    }

    #[test]
    fn test_parse_duration_with_surrounding_whitespace() {
        assert_eq!(parse_duration(" 10m ").unwrap().as_secs(), 600);
    }

    #[test]
    fn test_parse_large_values() {
        assert_eq!(parse_duration("1000d").unwrap().as_secs(), 1000 * 86_400);
    }

    #[test]
    fn test_get_error_for_invalid_durations() {
        let cases = ["", "h", "10", "0s", "-5m", "1.5h", "1y", "1H", "1h30m", "h1", "1 h"];

        for text in cases {
            assert_eq!(
                parse_duration(text).unwrap_err(),
                Error::Validation(INVALID_DURATION_MESSAGE.to_string()),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_get_error_for_overflowing_duration() {
        let result = parse_duration("99999999999999999999w");
        assert_eq!(result.is_err(), true);

        let result = parse_duration("9999999999999999w");
        assert_eq!(result.is_err(), true);
    }

    #[test]
    fn test_parse_num_winners() {
        assert_eq!(parse_num_winners("3").unwrap(), 3);
        assert_eq!(parse_num_winners(" 1 ").unwrap(), 1);
    }

    #[test]
    fn test_get_error_for_non_positive_winners() {
        for text in ["0", "-1", "one", ""] {
            assert_eq!(
                parse_num_winners(text).unwrap_err(),
                Error::Validation(INVALID_WINNERS_MESSAGE.to_string())
            );
        }
    }

    #[test]
    fn test_parse_message_id() {
        assert_eq!(parse_message_id("1234567890123").unwrap(), 1234567890123);
        assert_eq!(parse_message_id("abc").is_err(), true);
        assert_eq!(parse_message_id("0").is_err(), true);
    }

    #[test]
    fn test_parse_setup() {
        let setup = parse_setup("2h", " Nitro ", "3", UserId::new(7), 1_000).unwrap();

        assert_eq!(
            setup,
            GiveawaySetup {
                prize: "Nitro".to_string(),
                end_time: 1_000 + 7_200,
                num_winners: 3,
                host_id: UserId::new(7),
            }
        );
    }

    #[test]
    fn test_get_error_for_invalid_setup() {
        let host_id = UserId::new(7);

        assert_eq!(
            parse_setup("soon", "Nitro", "1", host_id, 1_000).unwrap_err(),
            Error::Validation(INVALID_DURATION_MESSAGE.to_string())
        );
        assert_eq!(
            parse_setup("1h", "Nitro", "0", host_id, 1_000).unwrap_err(),
            Error::Validation(INVALID_WINNERS_MESSAGE.to_string())
        );
        assert_eq!(
            parse_setup("1h", "   ", "1", host_id, 1_000).unwrap_err(),
            Error::Validation("The prize can't be empty.".to_string())
        );
        assert_eq!(
            parse_setup("1h", "Nitro", "1", host_id, i64::MAX - 10).is_err(),
            true
        );
    }
}

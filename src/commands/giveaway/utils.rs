use serenity::model::Timestamp;

// Current Unix time in seconds, as the store keeps it.
pub fn unix_now() -> i64 {
    Timestamp::now().unix_timestamp()
}

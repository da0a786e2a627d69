// A single table per feature, scoped by the guild_id column.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS giveaways (
    guild_id    INTEGER NOT NULL,
    message_id  INTEGER NOT NULL,
    channel_id  INTEGER NOT NULL,
    prize       TEXT    NOT NULL,
    end_time    INTEGER NOT NULL,
    num_winners INTEGER NOT NULL CHECK (num_winners > 0),
    host_id     INTEGER NOT NULL,
    PRIMARY KEY (guild_id, message_id)
);

CREATE INDEX IF NOT EXISTS idx_giveaways_guild_end
    ON giveaways(guild_id, end_time);

CREATE TABLE IF NOT EXISTS giveaway_participants (
    guild_id   INTEGER NOT NULL,
    message_id INTEGER NOT NULL,
    user_id    INTEGER NOT NULL,
    PRIMARY KEY (guild_id, message_id, user_id),
    FOREIGN KEY (guild_id, message_id)
        REFERENCES giveaways(guild_id, message_id)
        ON DELETE CASCADE
);
";

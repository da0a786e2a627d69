use std::sync::Arc;

use rusqlite::{Connection, OptionalExtension, Row, params};
use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};
use tracing::debug;

use crate::commands::giveaway::models::Giveaway;
use crate::db::Database;
use crate::error::{Error, Result};

const GIVEAWAY_COLUMNS: &str =
    "guild_id, message_id, channel_id, prize, end_time, num_winners, host_id";

// Durable CRUD for giveaway rows, always scoped by guild.
#[derive(Debug)]
#[non_exhaustive]
pub struct GiveawayStore {
    db: Arc<Database>,
    // The bot's own identity never becomes a participant.
    bot_id: UserId,
}

impl GiveawayStore {
    pub fn new(db: Arc<Database>, bot_id: UserId) -> Self {
        GiveawayStore { db, bot_id }
    }

    pub fn bot_id(&self) -> UserId {
        self.bot_id
    }

    pub fn create(&self, giveaway: &Giveaway) -> Result<()> {
        giveaway.validate()?;

        let inserted = self.db.with_conn(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO giveaways
                    (guild_id, message_id, channel_id, prize, end_time, num_winners, host_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    to_sql_id(giveaway.guild_id.get()),
                    to_sql_id(giveaway.message_id.get()),
                    to_sql_id(giveaway.channel_id.get()),
                    giveaway.prize,
                    giveaway.end_time,
                    giveaway.num_winners,
                    to_sql_id(giveaway.host_id.get()),
                ],
            )
        })?;

        if inserted == 0 {
            let message = format!(
                "A giveaway for message {} already exists in guild {}.",
                giveaway.message_id, giveaway.guild_id
            );
            return Err(Error::Storage(message));
        }

        Ok(())
    }

    // Adds the user to the participants. Returns false when nothing changed: the
    // user is the bot, has already entered, or the giveaway doesn't exist (anymore).
    pub fn append_participant(
        &self,
        guild_id: GuildId,
        message_id: MessageId,
        user_id: UserId,
    ) -> Result<bool> {
        if user_id == self.bot_id {
            return Ok(false);
        }

        let inserted = self.db.with_conn(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO giveaway_participants (guild_id, message_id, user_id)
                 SELECT guild_id, message_id, ?3 FROM giveaways
                 WHERE guild_id = ?1 AND message_id = ?2",
                params![
                    to_sql_id(guild_id.get()),
                    to_sql_id(message_id.get()),
                    to_sql_id(user_id.get()),
                ],
            )
        })?;

        debug!(%guild_id, %message_id, %user_id, inserted, "Participant append processed");
        Ok(inserted > 0)
    }

    pub fn list_expired(&self, guild_id: GuildId, now: i64) -> Result<Vec<Giveaway>> {
        self.db.with_conn(|conn| {
            query_giveaways(
                conn,
                "WHERE guild_id = ?1 AND end_time <= ?2 ORDER BY end_time",
                to_sql_id(guild_id.get()),
                now,
            )
        })
    }

    pub fn list_active(&self, guild_id: GuildId, now: i64) -> Result<Vec<Giveaway>> {
        self.db.with_conn(|conn| {
            query_giveaways(
                conn,
                "WHERE guild_id = ?1 AND end_time > ?2 ORDER BY end_time",
                to_sql_id(guild_id.get()),
                now,
            )
        })
    }

    pub fn get(&self, guild_id: GuildId, message_id: MessageId) -> Result<Option<Giveaway>> {
        self.db
            .with_conn(|conn| select_giveaway(conn, guild_id, message_id))
    }

    // Moves the end of the giveaway to `now`, so the next scheduler pass finalizes it.
    pub fn force_expire(&self, guild_id: GuildId, message_id: MessageId, now: i64) -> Result<bool> {
        let updated = self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE giveaways SET end_time = ?3 WHERE guild_id = ?1 AND message_id = ?2",
                params![to_sql_id(guild_id.get()), to_sql_id(message_id.get()), now],
            )
        })?;
        Ok(updated > 0)
    }

    pub fn delete(&self, guild_id: GuildId, message_id: MessageId) -> Result<bool> {
        let deleted = self.db.with_conn(|conn| {
            conn.execute(
                "DELETE FROM giveaways WHERE guild_id = ?1 AND message_id = ?2",
                params![to_sql_id(guild_id.get()), to_sql_id(message_id.get())],
            )
        })?;
        Ok(deleted > 0)
    }

    // Reads and deletes the row in one transaction. Only one caller can ever
    // receive a given giveaway; everybody else gets None.
    pub fn take(&self, guild_id: GuildId, message_id: MessageId) -> Result<Option<Giveaway>> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction()?;
            let giveaway = select_giveaway(&tx, guild_id, message_id)?;
            if giveaway.is_some() {
                tx.execute(
                    "DELETE FROM giveaways WHERE guild_id = ?1 AND message_id = ?2",
                    params![to_sql_id(guild_id.get()), to_sql_id(message_id.get())],
                )?;
            }
            tx.commit()?;
            Ok(giveaway)
        })
    }

    // Guilds that currently own at least one giveaway.
    pub fn guilds(&self) -> Result<Vec<GuildId>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT DISTINCT guild_id FROM giveaways ORDER BY guild_id")?;
            let guilds = stmt
                .query_map([], |row| Ok(GuildId::new(from_sql_id(row.get(0)?))))?
                .collect::<rusqlite::Result<Vec<GuildId>>>()?;
            Ok(guilds)
        })
    }
}

// Discord snowflakes fit into 63 bits, so they round-trip through SQLite INTEGER.
fn to_sql_id(id: u64) -> i64 {
    id as i64
}

fn from_sql_id(id: i64) -> u64 {
    id as u64
}

fn giveaway_from_row(row: &Row<'_>) -> rusqlite::Result<Giveaway> {
    let giveaway = Giveaway::new(
        GuildId::new(from_sql_id(row.get(0)?)),
        ChannelId::new(from_sql_id(row.get(2)?)),
        MessageId::new(from_sql_id(row.get(1)?)),
        UserId::new(from_sql_id(row.get(6)?)),
    )
    .with_prize(&row.get::<_, String>(3)?)
    .with_end_time(row.get(4)?)
    .with_num_winners(row.get(5)?);
    Ok(giveaway)
}

fn select_giveaway(
    conn: &Connection,
    guild_id: GuildId,
    message_id: MessageId,
) -> rusqlite::Result<Option<Giveaway>> {
    let sql = format!(
        "SELECT {GIVEAWAY_COLUMNS} FROM giveaways WHERE guild_id = ?1 AND message_id = ?2"
    );
    let giveaway = conn
        .query_row(
            &sql,
            params![to_sql_id(guild_id.get()), to_sql_id(message_id.get())],
            giveaway_from_row,
        )
        .optional()?;

    match giveaway {
        Some(giveaway) => {
            let participants = select_participants(conn, guild_id, message_id)?;
            Ok(Some(giveaway.with_participants(participants)))
        }
        None => Ok(None),
    }
}

fn query_giveaways(
    conn: &Connection,
    filter: &str,
    guild_id: i64,
    now: i64,
) -> rusqlite::Result<Vec<Giveaway>> {
    let sql = format!("SELECT {GIVEAWAY_COLUMNS} FROM giveaways {filter}");
    let mut stmt = conn.prepare(&sql)?;
    let giveaways = stmt
        .query_map(params![guild_id, now], giveaway_from_row)?
        .collect::<rusqlite::Result<Vec<Giveaway>>>()?;

    giveaways
        .into_iter()
        .map(|giveaway| {
            let participants = select_participants(conn, giveaway.guild_id, giveaway.message_id)?;
            Ok(giveaway.with_participants(participants))
        })
        .collect()
}

fn select_participants(
    conn: &Connection,
    guild_id: GuildId,
    message_id: MessageId,
) -> rusqlite::Result<Vec<UserId>> {
    let mut stmt = conn.prepare(
        "SELECT user_id FROM giveaway_participants
         WHERE guild_id = ?1 AND message_id = ?2 ORDER BY rowid",
    )?;
    let participants = stmt
        .query_map(
            params![to_sql_id(guild_id.get()), to_sql_id(message_id.get())],
            |row| Ok(UserId::new(from_sql_id(row.get(0)?))),
        )?
        .collect::<rusqlite::Result<Vec<UserId>>>()?;
    Ok(participants)
}

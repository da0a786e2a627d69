//! SQLite persistence shared by every feature of the bot.
//!
//! One connection guarded by a mutex: each closure passed to `with_conn` runs
//! with exclusive access, so single statements and transactions inside it are
//! serialized against the scheduler and concurrent event handlers.

pub mod schema;

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::info;

use crate::db::schema::SCHEMA;
use crate::error::{Error, Result};

#[derive(Debug)]
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Opens (or creates) the database file, creating its parent directory when missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                Error::Storage(format!("Can't create {}: {}", parent.display(), err))
            })?;
        }

        let conn = Connection::open(path)?;
        let db = Database::from_connection(conn)?;
        info!(path = %path.display(), "Database opened and schema applied");
        Ok(db)
    }

    /// Opens a private in-memory database (used by tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Database::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        conn.execute_batch(SCHEMA)?;

        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    /// Runs the closure with exclusive access to the connection.
    pub fn with_conn<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Connection) -> rusqlite::Result<R>,
    {
        let mut guard = self.conn.lock()?;
        Ok(f(&mut guard)?)
    }
}

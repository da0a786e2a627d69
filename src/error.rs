use std::io;
use std::result;
use std::sync::PoisonError;

use serenity::prelude::SerenityError;
use thiserror::Error as ThisError;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, Clone, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error("{0}")]
    SerenityError(String),
    #[error("{0}")]
    Storage(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Config(String),
    #[error("{0}")]
    Backup(String),
}

impl Error {
    // Text shown to the user who invoked the failed command.
    pub fn user_message(&self) -> &str {
        match self {
            Error::Validation(msg) | Error::NotFound(msg) => msg,
            Error::Storage(_) => "A database error occurred. Please try again later.",
            Error::SerenityError(_) => "Failed to communicate with Discord. Please try again.",
            Error::Config(_) | Error::Backup(_) => "Something went wrong. Please try again later.",
        }
    }

    // Caused by user input rather than by the bot or its environment.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::NotFound(_))
    }
}

impl From<SerenityError> for Error {
    fn from(err: SerenityError) -> Error {
        let description = err.to_string();
        Error::SerenityError(description)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Error {
        Error::Storage(format!("Database error: {}", err))
    }
}

impl<T> From<PoisonError<T>> for Error {
    fn from(_: PoisonError<T>) -> Error {
        Error::Storage("The database connection lock is poisoned.".to_string())
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Backup(format!("I/O error: {}", err))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Error {
        Error::Backup(format!("Webhook request failed: {}", err))
    }
}

//! SQLite-backed persistence plumbing.
//!
//! # Responsibility
//! - Hand out ready-to-use connections: pragmas set, schema current.
//! - Keep schema evolution in one place (`migrations`).
//!
//! # Invariants
//! - `PRAGMA user_version` always equals the last applied migration.
//! - Nothing reads or writes the `kv` table before `open_db*` returns.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage bootstrap errors.
#[derive(Debug)]
pub enum DbError {
    /// Anything the SQLite driver reports.
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build; opening it could corrupt
    /// data this code does not understand.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "refusing to open schema version {db_version}; this build supports up to {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

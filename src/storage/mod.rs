//! All things related to the storage of notes

use async_trait::async_trait;
use thiserror::Error;

use crate::notes::Note;
use crate::notes::NoteValues;
use crate::utils::env_var;

pub use memory::Memory;
pub use postgres::Postgres;

mod memory;
mod postgres;

/// Storage errors
#[derive(Debug, Error)]
pub enum Error {
    /// A connection error with the storage
    #[error("Connection error: {0}")]
    Connection(String),

    /// Migrations could not be applied
    #[error("Migration error: {0}")]
    Migration(String),
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Storage configuration
pub enum Config {
    /// Detect configuration from environment
    ///
    /// Uses Postgres when `DATABASE_URL` is set, memory otherwise
    DetectConfig,

    /// Use existing connection
    ExistingConnection(sqlx::PgPool),

    /// Keep everything in memory
    Memory,
}

/// The storage a [`Config`] resolves to
pub enum Backend {
    /// Postgres storage
    Postgres(Postgres),

    /// Memory storage
    Memory(Memory),
}

/// Setup the storage
pub async fn setup(config: Config) -> Result<Backend> {
    match config {
        Config::DetectConfig => {
            if let Some(database_url) = env_var("DATABASE_URL") {
                Postgres::connect(&database_url).await.map(Backend::Postgres)
            } else {
                tracing::warn!("`DATABASE_URL` is not set, notes are kept in memory only");

                Ok(Backend::Memory(Memory::new()))
            }
        }
        Config::ExistingConnection(pool) => Postgres::with_pool(pool).await.map(Backend::Postgres),
        Config::Memory => Ok(Backend::Memory(Memory::new())),
    }
}

/// Storage with all supported operations
///
/// Listings are ordered newest first, ties broken by the highest ID
#[async_trait]
pub trait Storage: Clone + Send + Sync + 'static {
    /// Find all notes
    async fn find_all_notes(&self) -> Result<Vec<Note>>;

    /// Find all notes whose address contains the fragment
    ///
    /// Plain case-sensitive substring match, no wildcards
    async fn find_all_notes_by_endereco(&self, fragment: &str) -> Result<Vec<Note>>;

    /// Find a single note by its ID
    async fn find_single_note_by_id(&self, id: i64) -> Result<Option<Note>>;

    /// Create a note
    async fn create_note(&self, values: &NoteValues) -> Result<Note>;

    /// Update the mutable fields of a note
    ///
    /// Returns `false` when no note has the ID
    async fn update_note(&self, id: i64, values: &NoteValues) -> Result<bool>;

    /// Delete a note for good
    ///
    /// Returns `false` when no note has the ID
    async fn delete_note(&self, id: i64) -> Result<bool>;
}

//! The client side of Notas
//!
//! View models talk to a [`NoteRepository`] and report back through presenters, the
//! terminal is just one of those presenters.

use async_trait::async_trait;
use thiserror::Error;

use crate::notes::Note;
use crate::notes::NoteValues;

pub use editor::EditorPresenter;
pub use editor::EditorSeed;
pub use editor::NoteEditor;
pub use editor::SaveOutcome;
pub use gateway::Gateway;
pub use list::Intent;
pub use list::ListOutcome;
pub use list::ListPresenter;
pub use list::NoteRow;
pub use list::NotesList;
pub use location::FixedLocation;
pub use location::Geocoder;
pub use location::NoGeocoder;
pub use location::NominatimGeocoder;
pub use location::Position;
pub use map::MapMarker;
pub use terminal::Terminal;

mod editor;
mod gateway;
mod list;
mod location;
mod map;
mod terminal;

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never got a usable response
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The note does not exist (anymore)
    #[error("{0}")]
    NotFound(String),

    /// The URL can not carry a path, nothing was sent
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The API refused or failed the request
    #[error(
        "{error} ({status}){}",
        details.as_ref().map(|details| format!(": {details}")).unwrap_or_default()
    )]
    Api {
        status: u16,
        error: String,
        details: Option<String>,
    },
}

/// Result type for all client interactions
pub type Result<T> = core::result::Result<T, ClientError>;

/// Everything the views can do with notes
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Create a note, returns its new ID
    async fn create(&self, values: &NoteValues) -> Result<i64>;

    /// All notes, newest first
    async fn list(&self) -> Result<Vec<Note>>;

    /// A single note
    async fn get(&self, id: i64) -> Result<Note>;

    /// Replace the mutable fields of a note
    async fn update(&self, id: i64, values: &NoteValues) -> Result<()>;

    /// Delete a note
    async fn delete(&self, id: i64) -> Result<()>;

    /// Notes with the fragment somewhere in their address, newest first
    async fn search(&self, endereco: &str) -> Result<Vec<Note>>;
}

/// What every view needs from its presentation
pub trait Presenter {
    /// Show or hide the busy indicator, controls are disabled while busy
    fn set_busy(&mut self, busy: bool);

    /// Show a short-lived message
    fn notify(&mut self, message: &str);
}

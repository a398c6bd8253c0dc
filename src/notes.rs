use chrono::naive::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;

/// A stored note, as it travels over the wire
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub titulo: String,
    pub conteudo: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub endereco: Option<String>,
    pub data_criacao: NaiveDateTime,
}

impl Note {
    /// Both coordinates, only when the pair is complete
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Values to create or update a note with
///
/// Also the request body the client sends for both operations
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct NoteValues {
    pub titulo: String,
    pub conteudo: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub endereco: Option<String>,
}

impl NoteValues {
    /// The address worth storing, as sent
    ///
    /// Empty or whitespace only addresses count as absent
    pub fn stored_endereco(&self) -> Option<&str> {
        self.endereco
            .as_deref()
            .filter(|endereco| !endereco.trim().is_empty())
    }
}

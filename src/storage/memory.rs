//! Memory storage
//!
//! Will be destroyed on system shutdown

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::notes::Note;
use crate::notes::NoteValues;

use super::Result;
use super::Storage;

/// Notes by ID, plus the last handed out ID
#[derive(Debug, Default)]
struct Table {
    /// All notes in storage
    notes: BTreeMap<i64, Note>,

    /// Mimics the serial column of Postgres
    last_id: i64,
}

/// An in-memory storage
///
/// Will be destroyed on system shutdown
#[derive(Clone, Debug, Default)]
pub struct Memory {
    table: Arc<Mutex<Table>>,
}

impl Memory {
    /// Create a new empty Memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first, highest ID first for equal timestamps
fn newest_first(mut notes: Vec<Note>) -> Vec<Note> {
    notes.sort_by(|a, b| {
        b.data_criacao
            .cmp(&a.data_criacao)
            .then_with(|| b.id.cmp(&a.id))
    });

    notes
}

#[async_trait]
impl Storage for Memory {
    async fn find_all_notes(&self) -> Result<Vec<Note>> {
        let notes = self.table.lock().await.notes.values().cloned().collect();

        Ok(newest_first(notes))
    }

    async fn find_all_notes_by_endereco(&self, fragment: &str) -> Result<Vec<Note>> {
        let notes = self
            .table
            .lock()
            .await
            .notes
            .values()
            .filter(|note| {
                note.endereco
                    .as_deref()
                    .is_some_and(|endereco| endereco.contains(fragment))
            })
            .cloned()
            .collect();

        Ok(newest_first(notes))
    }

    async fn find_single_note_by_id(&self, id: i64) -> Result<Option<Note>> {
        Ok(self.table.lock().await.notes.get(&id).cloned())
    }

    async fn create_note(&self, values: &NoteValues) -> Result<Note> {
        let mut table = self.table.lock().await;

        table.last_id += 1;

        let note = Note {
            id: table.last_id,
            titulo: values.titulo.clone(),
            conteudo: values.conteudo.clone(),
            latitude: values.latitude,
            longitude: values.longitude,
            endereco: values.stored_endereco().map(ToString::to_string),
            data_criacao: Utc::now().naive_utc(),
        };

        table.notes.insert(note.id, note.clone());

        Ok(note)
    }

    async fn update_note(&self, id: i64, values: &NoteValues) -> Result<bool> {
        Ok(self
            .table
            .lock()
            .await
            .notes
            .get_mut(&id)
            .map(|note| {
                note.titulo = values.titulo.clone();
                note.conteudo = values.conteudo.clone();
                note.latitude = values.latitude;
                note.longitude = values.longitude;
                note.endereco = values.stored_endereco().map(ToString::to_string);
            })
            .is_some())
    }

    async fn delete_note(&self, id: i64) -> Result<bool> {
        Ok(self.table.lock().await.notes.remove(&id).is_some())
    }
}

//! Notes API endpoints

use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use crate::notes::Note;
use crate::notes::NoteValues;
use crate::storage::Storage;

use super::Error;
use super::Form;
use super::PathParameters;
use super::Success;

const NOT_FOUND: &str = "Nota não encontrada";

/// Response with a confirmation message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Response after creating a note
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub id: i64,
}

/// Response with a single note
#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub nota: Note,
}

/// Response with multiple notes and their count
#[derive(Debug, Serialize)]
pub struct NotesResponse {
    pub total: usize,
    pub notas: Vec<Note>,
}

impl NotesResponse {
    fn from_notes(notas: Vec<Note>) -> Self {
        Self {
            total: notas.len(),
            notas,
        }
    }
}

/// List all notes, newest first
///
/// Request:
/// ```sh
/// curl -v http://localhost:3000/api/notas
/// ```
///
/// Response:
/// ```json
/// { "success": true, "total": 1, "notas": [ { "id": 1, "titulo": "Shopping" ... } ] }
/// ```
pub async fn list<S: Storage>(
    Extension(storage): Extension<S>,
) -> Result<Success<NotesResponse>, Error> {
    let notes = storage
        .find_all_notes()
        .await
        .map_err(Error::storage("Erro ao listar notas"))?;

    Ok(Success::ok(NotesResponse::from_notes(notes)))
}

/// Get a single note
///
/// Request:
/// ```sh
/// curl -v http://localhost:3000/api/notas/1
/// ```
///
/// Response:
/// ```json
/// { "success": true, "nota": { "id": 1, "titulo": "Shopping" ... } }
/// ```
pub async fn single<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(note_id): PathParameters<i64>,
) -> Result<Success<NoteResponse>, Error> {
    let note = storage
        .find_single_note_by_id(note_id)
        .await
        .map_err(Error::storage("Erro ao obter nota"))?;

    note.map_or_else(
        || {
            tracing::debug!("Note {note_id} not found");

            Err(Error::not_found(NOT_FOUND))
        },
        |nota| Ok(Success::ok(NoteResponse { nota })),
    )
}

/// Search notes by a part of their address, newest first
///
/// No match is still a success, with an empty list
pub async fn search<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(endereco): PathParameters<String>,
) -> Result<Success<NotesResponse>, Error> {
    let notes = storage
        .find_all_notes_by_endereco(&endereco)
        .await
        .map_err(Error::storage("Erro ao buscar notas"))?;

    Ok(Success::ok(NotesResponse::from_notes(notes)))
}

/// Create note form
///
/// Title and content are checked by the handler, so a missing field gets the same
/// message as an empty one
#[derive(Debug, Deserialize)]
pub struct CreateNoteForm {
    titulo: Option<String>,
    conteudo: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    endereco: Option<String>,
}

/// Create a note
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{ "titulo": "Shopping", "conteudo": "Buy milk", "endereco": "Lisbon" }' \
///     http://localhost:3000/api/notas
/// ```
///
/// Response:
/// ```json
/// { "success": true, "message": "Nota criada com sucesso!", "id": 1 }
/// ```
pub async fn create<S: Storage>(
    Extension(storage): Extension<S>,
    Form(form): Form<CreateNoteForm>,
) -> Result<Success<CreatedResponse>, Error> {
    let (Some(titulo), Some(conteudo)) = (
        form.titulo.filter(|titulo| !titulo.trim().is_empty()),
        form.conteudo.filter(|conteudo| !conteudo.trim().is_empty()),
    ) else {
        return Err(Error::bad_request("Título e conteúdo são obrigatórios"));
    };

    let values = NoteValues {
        titulo,
        conteudo,
        latitude: form.latitude,
        longitude: form.longitude,
        endereco: form.endereco,
    };

    let note = storage
        .create_note(&values)
        .await
        .map_err(Error::storage("Erro ao criar nota"))?;

    tracing::debug!("Created note {}", note.id);

    Ok(Success::created(CreatedResponse {
        message: "Nota criada com sucesso!",
        id: note.id,
    }))
}

/// Update a note
///
/// Title and content must be present, but are stored as they arrive, empty or not
pub async fn update<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(note_id): PathParameters<i64>,
    Form(values): Form<NoteValues>,
) -> Result<Success<MessageResponse>, Error> {
    let updated = storage
        .update_note(note_id, &values)
        .await
        .map_err(Error::storage("Erro ao atualizar nota"))?;

    if !updated {
        return Err(Error::not_found(NOT_FOUND));
    }

    Ok(Success::ok(MessageResponse {
        message: "Nota atualizada com sucesso!",
    }))
}

/// Delete a note for good
pub async fn delete<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(note_id): PathParameters<i64>,
) -> Result<Success<MessageResponse>, Error> {
    let deleted = storage
        .delete_note(note_id)
        .await
        .map_err(Error::storage("Erro ao eliminar nota"))?;

    if !deleted {
        return Err(Error::not_found(NOT_FOUND));
    }

    Ok(Success::ok(MessageResponse {
        message: "Nota eliminada com sucesso!",
    }))
}

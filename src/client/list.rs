//! Notes list view model

use chrono::NaiveDateTime;

use crate::notes::Note;

use super::EditorSeed;
use super::MapMarker;
use super::NoteRepository;
use super::Presenter;

/// Presentation of the notes list
pub trait ListPresenter: Presenter {
    /// Nothing to show
    fn show_empty(&mut self);

    /// Render the rows, replacing whatever was shown before
    fn show_notes(&mut self, rows: &[NoteRow]);

    /// Ask the user to confirm a destructive action
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// A single note, ready to be rendered
#[derive(Clone, Debug, PartialEq)]
pub struct NoteRow {
    pub id: i64,
    pub titulo: String,
    pub conteudo: String,
    pub endereco: Option<String>,

    /// Formatted creation date
    pub data: String,

    /// Only notes with both coordinates can be shown on the map
    pub has_map: bool,
}

impl NoteRow {
    pub fn from_note(note: &Note) -> Self {
        Self {
            id: note.id,
            titulo: note.titulo.clone(),
            conteudo: note.conteudo.clone(),
            endereco: note
                .endereco
                .clone()
                .filter(|endereco| !endereco.is_empty()),
            data: format_date(note.data_criacao),
            has_map: note.coordinates().is_some(),
        }
    }
}

/// Format a creation date the way the list shows it
pub fn format_date(date: NaiveDateTime) -> String {
    date.format("%d/%m/%Y %H:%M").to_string()
}

/// What the user wants to do with a note in the list
#[derive(Clone, Debug)]
pub enum Intent {
    Open(Note),
    ShowOnMap(Note),
    Delete(Note),
}

/// Where an intent leads to
#[derive(Debug, PartialEq)]
pub enum ListOutcome {
    /// Open the editor with the note
    Edit(EditorSeed),

    /// Open the map with a single marker
    Map(MapMarker),

    /// The note is gone and the list is refreshed
    Deleted,

    /// Nothing happened
    Nothing,
}

/// The list of all notes
pub struct NotesList<R> {
    repository: R,
    notes: Vec<Note>,
}

impl<R: NoteRepository> NotesList<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            notes: Vec::new(),
        }
    }

    /// Fetch all notes and show them
    ///
    /// Returns `false` when the notes could not be fetched, the previous notes stay
    pub async fn refresh<P: ListPresenter>(&mut self, presenter: &mut P) -> bool {
        presenter.set_busy(true);
        let result = self.repository.list().await;
        presenter.set_busy(false);

        match result {
            Ok(notes) => {
                self.notes = notes;
                self.show(presenter);

                true
            }
            Err(err) => {
                tracing::debug!("Could not load notes: {err}");
                presenter.notify(&format!("Erro ao carregar notas: {err}"));

                false
            }
        }
    }

    /// Show a search result with the same rendering as the full list
    pub async fn search<P: ListPresenter>(&mut self, endereco: &str, presenter: &mut P) -> bool {
        presenter.set_busy(true);
        let result = self.repository.search(endereco).await;
        presenter.set_busy(false);

        match result {
            Ok(notes) => {
                self.notes = notes;
                self.show(presenter);

                true
            }
            Err(err) => {
                presenter.notify(&format!("Erro ao buscar notas: {err}"));

                false
            }
        }
    }

    fn show<P: ListPresenter>(&self, presenter: &mut P) {
        if self.notes.is_empty() {
            presenter.show_empty();
        } else {
            let rows = self.notes.iter().map(NoteRow::from_note).collect::<Vec<_>>();

            presenter.show_notes(&rows);
        }
    }

    /// Act on what the user asked for
    pub async fn handle<P: ListPresenter>(
        &mut self,
        intent: Intent,
        presenter: &mut P,
    ) -> ListOutcome {
        match intent {
            Intent::Open(note) => ListOutcome::Edit(EditorSeed::from_note(&note)),
            Intent::ShowOnMap(note) => {
                MapMarker::for_note(&note).map_or(ListOutcome::Nothing, ListOutcome::Map)
            }
            Intent::Delete(note) => self.delete(&note, presenter).await,
        }
    }

    async fn delete<P: ListPresenter>(&mut self, note: &Note, presenter: &mut P) -> ListOutcome {
        if !presenter.confirm("Tem certeza que deseja eliminar esta nota?") {
            return ListOutcome::Nothing;
        }

        presenter.set_busy(true);
        let result = self.repository.delete(note.id).await;
        presenter.set_busy(false);

        match result {
            Ok(()) => {
                presenter.notify("Nota eliminada!");
                self.refresh(presenter).await;

                ListOutcome::Deleted
            }
            Err(err) => {
                presenter.notify(&format!("Erro ao eliminar nota: {err}"));

                ListOutcome::Nothing
            }
        }
    }
}

//! Note editor view model

use crate::notes::Note;
use crate::notes::NoteValues;

use super::NoteRepository;
use super::Presenter;
use super::location::CapturedLocation;
use super::location::Geocoder;
use super::location::LocationProvider;
use super::location::capture_location;

/// Presentation of the editor
pub trait EditorPresenter: Presenter {
    /// Show a message next to the offending field
    fn show_field_error(&mut self, message: &'static str);

    /// Show the captured address
    fn show_location(&mut self, endereco: &str);
}

/// Everything the editor needs to edit an existing note
#[derive(Clone, Debug, PartialEq)]
pub struct EditorSeed {
    pub id: i64,
    pub titulo: String,
    pub conteudo: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub endereco: Option<String>,
}

impl EditorSeed {
    /// Seed from a note, half a pair of coordinates counts as no coordinates
    pub fn from_note(note: &Note) -> Self {
        let coordinates = note.coordinates();

        Self {
            id: note.id,
            titulo: note.titulo.clone(),
            conteudo: note.conteudo.clone(),
            latitude: coordinates.map(|(latitude, _)| latitude),
            longitude: coordinates.map(|(_, longitude)| longitude),
            endereco: note.endereco.clone(),
        }
    }
}

/// Either a new note, or an existing one
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Create,
    Edit { id: i64 },
}

/// Missing field messages
pub const TITULO_REQUIRED: &str = "Título obrigatório";
pub const CONTEUDO_REQUIRED: &str = "Conteúdo obrigatório";

/// How saving went
#[derive(Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// New note with its ID, the editor can close
    Created(i64),

    /// Existing note is updated, the editor can close
    Updated,

    /// Fields need attention, nothing was sent
    Invalid,

    /// The request failed, the editor stays open with everything intact
    Failed,
}

/// The editor of a single note
#[derive(Clone, Debug, PartialEq)]
pub struct NoteEditor {
    mode: Mode,
    pub titulo: String,
    pub conteudo: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub endereco: Option<String>,
}

impl NoteEditor {
    /// Editor for a new note, all fields empty
    pub fn create() -> Self {
        Self {
            mode: Mode::Create,
            titulo: String::new(),
            conteudo: String::new(),
            latitude: None,
            longitude: None,
            endereco: None,
        }
    }

    /// Editor for an existing note
    pub fn edit(seed: EditorSeed) -> Self {
        Self {
            mode: Mode::Edit { id: seed.id },
            titulo: seed.titulo,
            conteudo: seed.conteudo,
            latitude: seed.latitude,
            longitude: seed.longitude,
            endereco: seed.endereco,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            Mode::Create => "Nova Nota",
            Mode::Edit { .. } => "Editar Nota",
        }
    }

    /// Forget the location
    pub fn clear_location(&mut self) {
        self.latitude = None;
        self.longitude = None;
        self.endereco = None;
    }

    /// Take over a captured location
    pub fn set_location(&mut self, location: CapturedLocation) {
        self.latitude = Some(location.position.latitude);
        self.longitude = Some(location.position.longitude);
        self.endereco = Some(location.endereco);
    }

    /// Capture the current location into the editor
    ///
    /// On failure the previous location stays
    pub async fn capture_location<L, G, P>(
        &mut self,
        provider: &L,
        geocoder: &G,
        presenter: &mut P,
    ) -> bool
    where
        L: LocationProvider + ?Sized,
        G: Geocoder + ?Sized,
        P: EditorPresenter,
    {
        presenter.set_busy(true);
        let result = capture_location(provider, geocoder).await;
        presenter.set_busy(false);

        match result {
            Ok(location) => {
                presenter.show_location(&location.endereco);
                presenter.notify("Localização capturada!");
                self.set_location(location);

                true
            }
            Err(err) => {
                presenter.notify(&err.to_string());

                false
            }
        }
    }

    /// Values to send, or the messages of the fields that need attention
    pub fn validate(&self) -> Result<NoteValues, Vec<&'static str>> {
        let titulo = self.titulo.trim();
        let conteudo = self.conteudo.trim();

        let mut errors = Vec::new();

        if titulo.is_empty() {
            errors.push(TITULO_REQUIRED);
        }

        if conteudo.is_empty() {
            errors.push(CONTEUDO_REQUIRED);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NoteValues {
            titulo: titulo.to_string(),
            conteudo: conteudo.to_string(),
            latitude: self.latitude,
            longitude: self.longitude,
            endereco: self.endereco.clone(),
        })
    }

    /// Validate and send the note
    pub async fn save<R, P>(&mut self, repository: &R, presenter: &mut P) -> SaveOutcome
    where
        R: NoteRepository + ?Sized,
        P: EditorPresenter,
    {
        let values = match self.validate() {
            Ok(values) => values,
            Err(errors) => {
                for error in errors {
                    presenter.show_field_error(error);
                }

                return SaveOutcome::Invalid;
            }
        };

        presenter.set_busy(true);
        let outcome = match self.mode {
            Mode::Create => repository.create(&values).await.map(|id| {
                self.mode = Mode::Edit { id };

                SaveOutcome::Created(id)
            }),
            Mode::Edit { id } => repository
                .update(id, &values)
                .await
                .map(|()| SaveOutcome::Updated),
        };
        presenter.set_busy(false);

        match outcome {
            Ok(outcome) => {
                presenter.notify(match outcome {
                    SaveOutcome::Created(_) => "Nota criada!",
                    _ => "Nota atualizada!",
                });

                outcome
            }
            Err(err) => {
                presenter.notify(&format!("Erro ao guardar nota: {err}"));

                SaveOutcome::Failed
            }
        }
    }
}

//! Map view model, a single marker

use crate::notes::Note;

/// Zoom level the map opens with
pub const ZOOM: u8 = 15;

/// A single labelled marker, the map is centred on it
#[derive(Clone, Debug, PartialEq)]
pub struct MapMarker {
    pub title: String,

    /// Shown in the info window, below the title
    pub snippet: String,

    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

impl MapMarker {
    pub fn new(title: &str, latitude: f64, longitude: f64, endereco: Option<&str>) -> Self {
        let title = if title.is_empty() { "Nota" } else { title };

        Self {
            title: title.to_string(),
            snippet: endereco.unwrap_or_default().to_string(),
            latitude,
            longitude,
            zoom: ZOOM,
        }
    }

    /// Marker for a note, only when it has both coordinates
    pub fn for_note(note: &Note) -> Option<Self> {
        note.coordinates().map(|(latitude, longitude)| {
            Self::new(
                &note.titulo,
                latitude,
                longitude,
                note.endereco.as_deref(),
            )
        })
    }

    pub fn window_title(&self) -> String {
        format!("Localização: {}", self.title)
    }

    /// OpenStreetMap link with the marker, centred and zoomed
    pub fn url(&self) -> String {
        let Self {
            latitude,
            longitude,
            zoom,
            ..
        } = self;

        format!(
            "https://www.openstreetmap.org/?mlat={latitude}&mlon={longitude}#map={zoom}/{latitude}/{longitude}"
        )
    }
}

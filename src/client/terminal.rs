//! Terminal presentation for the views

use std::io::BufRead;
use std::io::IsTerminal;
use std::io::Write;

use crate::notes::Note;

use super::EditorPresenter;
use super::ListPresenter;
use super::MapMarker;
use super::NoteRow;
use super::Presenter;
use super::list::format_date;

/// Renders to stdout, notices and the busy indicator go to stderr
#[derive(Debug, Default)]
pub struct Terminal {
    /// Answer every confirmation with yes
    pub assume_yes: bool,
}

impl Terminal {
    /// Print a single note in full
    pub fn show_note(&mut self, note: &Note) {
        println!("#{} {}", note.id, note.titulo);
        println!("{}", note.conteudo);

        if let Some(endereco) = note.endereco.as_deref().filter(|e| !e.is_empty()) {
            println!("📍 {endereco}");
        }

        if let Some((latitude, longitude)) = note.coordinates() {
            println!("{latitude}, {longitude}");
        }

        println!("{}", format_date(note.data_criacao));
    }

    /// Print a map marker
    pub fn show_map(&mut self, marker: &MapMarker) {
        println!("{}", marker.window_title());

        if !marker.snippet.is_empty() {
            println!("{}", marker.snippet);
        }

        println!("{}", marker.url());
    }
}

impl Presenter for Terminal {
    fn set_busy(&mut self, busy: bool) {
        let mut stderr = std::io::stderr();

        if !stderr.is_terminal() {
            return;
        }

        // a failing stderr is nothing to act on
        let _ = if busy {
            write!(stderr, "A carregar...")
        } else {
            write!(stderr, "\r\x1b[2K")
        };
        let _ = stderr.flush();
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

impl ListPresenter for Terminal {
    fn show_empty(&mut self) {
        println!("Nenhuma nota encontrada");
    }

    fn show_notes(&mut self, rows: &[NoteRow]) {
        for row in rows {
            let map = if row.has_map { " [mapa]" } else { "" };

            println!("#{} {} ({}){map}", row.id, row.titulo, row.data);
            println!("    {}", row.conteudo);

            if let Some(endereco) = &row.endereco {
                println!("    📍 {endereco}");
            }
        }
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        eprint!("{prompt} [s/N] ");
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }

        matches!(answer.trim().to_lowercase().as_str(), "s" | "sim" | "y" | "yes")
    }
}

impl EditorPresenter for Terminal {
    fn show_field_error(&mut self, message: &'static str) {
        eprintln!("{message}");
    }

    fn show_location(&mut self, endereco: &str) {
        eprintln!("📍 {endereco}");
    }
}

//! Command line interface
//!
//! `notas serve` runs the API, every other command is a client of that API

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use url::Url;

use crate::client::EditorPresenter;
use crate::client::FixedLocation;
use crate::client::Gateway;
use crate::client::Geocoder;
use crate::client::Intent;
use crate::client::ListOutcome;
use crate::client::NoGeocoder;
use crate::client::NoteEditor;
use crate::client::NoteRepository;
use crate::client::NominatimGeocoder;
use crate::client::NotesList;
use crate::client::Position;
use crate::client::Presenter;
use crate::client::SaveOutcome;
use crate::client::Terminal;
use crate::storage::Config;

#[derive(Debug, Parser)]
#[command(name = "notas", version, about = "Geotagged notes, the API and a terminal client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Where the notes API lives
    #[arg(
        long,
        global = true,
        env = "NOTAS_API_URL",
        default_value = "http://localhost:3000"
    )]
    pub api_url: Url,

    /// Nominatim compatible service for reverse geocoding
    #[arg(
        long,
        global = true,
        env = "NOTAS_GEOCODER_URL",
        default_value = "https://nominatim.openstreetmap.org"
    )]
    pub geocoder_url: Url,

    /// Never look up addresses, use the coordinates instead
    #[arg(long, global = true)]
    pub no_geocode: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the API server
    Serve {
        /// Keep notes in memory, even when `DATABASE_URL` is set
        #[arg(long)]
        memory: bool,
    },

    #[command(flatten)]
    Client(ClientCommand),
}

/// Commands talking to a running API
#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// List all notes, newest first
    List,

    /// Show a single note
    Show { id: i64 },

    /// Create a note
    Create(NoteArgs),

    /// Edit a note, only the given fields change
    Edit {
        id: i64,

        #[command(flatten)]
        note: NoteArgs,

        /// Remove the location from the note
        #[arg(long, conflicts_with_all = ["latitude", "longitude", "endereco"])]
        clear_location: bool,
    },

    /// Delete a note
    Delete {
        id: i64,

        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },

    /// Find notes by a part of their address
    Search { endereco: String },

    /// Show where a note was taken
    Map { id: i64 },
}

#[derive(Debug, Args)]
pub struct NoteArgs {
    #[arg(long)]
    pub titulo: Option<String>,

    #[arg(long)]
    pub conteudo: Option<String>,

    /// Looked up as an address unless `--endereco` is given
    #[arg(long, requires = "longitude", allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    #[arg(long, requires = "latitude", allow_hyphen_values = true)]
    pub longitude: Option<f64>,

    #[arg(long)]
    pub endereco: Option<String>,
}

/// Run the command
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let command = match cli.command {
        Command::Serve { memory } => {
            let config = if memory {
                Config::Memory
            } else {
                Config::DetectConfig
            };

            crate::serve(config).await?;

            return Ok(ExitCode::SUCCESS);
        }
        Command::Client(command) => command,
    };

    let gateway = Gateway::new(cli.api_url)?;

    let geocoder: Box<dyn Geocoder> = if cli.no_geocode {
        Box::new(NoGeocoder)
    } else {
        Box::new(NominatimGeocoder::new(cli.geocoder_url)?)
    };

    let mut terminal = Terminal::default();

    let success = match command {
        ClientCommand::List => NotesList::new(gateway).refresh(&mut terminal).await,
        ClientCommand::Search { endereco } => {
            NotesList::new(gateway)
                .search(&endereco, &mut terminal)
                .await
        }
        ClientCommand::Show { id } => match fetch(&gateway, id, &mut terminal).await {
            Some(note) => {
                terminal.show_note(&note);

                true
            }
            None => false,
        },
        ClientCommand::Map { id } => {
            let Some(note) = fetch(&gateway, id, &mut terminal).await else {
                return Ok(ExitCode::FAILURE);
            };

            let mut list = NotesList::new(gateway);

            let outcome = list.handle(Intent::ShowOnMap(note), &mut terminal).await;

            if let ListOutcome::Map(marker) = outcome {
                terminal.show_map(&marker);

                true
            } else {
                terminal.notify("Esta nota não tem localização");

                false
            }
        }
        ClientCommand::Delete { id, yes } => {
            let Some(note) = fetch(&gateway, id, &mut terminal).await else {
                return Ok(ExitCode::FAILURE);
            };

            terminal.assume_yes = yes;

            let mut list = NotesList::new(gateway);

            list.handle(Intent::Delete(note), &mut terminal).await == ListOutcome::Deleted
        }
        ClientCommand::Create(args) => {
            let mut editor = NoteEditor::create();
            terminal.notify(editor.title());

            fill(&mut editor, args, geocoder.as_ref(), &mut terminal).await;

            match editor.save(&gateway, &mut terminal).await {
                SaveOutcome::Created(id) => {
                    println!("{id}");

                    true
                }
                _ => false,
            }
        }
        ClientCommand::Edit {
            id,
            note,
            clear_location,
        } => {
            let Some(current) = fetch(&gateway, id, &mut terminal).await else {
                return Ok(ExitCode::FAILURE);
            };

            let mut list = NotesList::new(gateway.clone());

            let ListOutcome::Edit(seed) = list.handle(Intent::Open(current), &mut terminal).await
            else {
                return Ok(ExitCode::FAILURE);
            };

            let mut editor = NoteEditor::edit(seed);
            terminal.notify(editor.title());

            if clear_location {
                editor.clear_location();
            }

            fill(&mut editor, note, geocoder.as_ref(), &mut terminal).await;

            editor.save(&gateway, &mut terminal).await == SaveOutcome::Updated
        }
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Fetch a note, reporting when that fails
async fn fetch<R, P>(repository: &R, id: i64, presenter: &mut P) -> Option<crate::notes::Note>
where
    R: NoteRepository,
    P: Presenter,
{
    presenter.set_busy(true);
    let result = repository.get(id).await;
    presenter.set_busy(false);

    result
        .map_err(|err| presenter.notify(&format!("Erro ao obter nota: {err}")))
        .ok()
}

/// Put the given fields into the editor
///
/// Coordinates without an address are captured like a device location would be
async fn fill<P>(
    editor: &mut NoteEditor,
    args: NoteArgs,
    geocoder: &dyn Geocoder,
    presenter: &mut P,
) where
    P: EditorPresenter,
{
    if let Some(titulo) = args.titulo {
        editor.titulo = titulo;
    }

    if let Some(conteudo) = args.conteudo {
        editor.conteudo = conteudo;
    }

    match (args.latitude.zip(args.longitude), args.endereco) {
        (Some((latitude, longitude)), None) => {
            let position = Position {
                latitude,
                longitude,
            };

            editor
                .capture_location(&FixedLocation(Some(position)), geocoder, presenter)
                .await;
        }
        (coordinates, Some(endereco)) => {
            if let Some((latitude, longitude)) = coordinates {
                editor.latitude = Some(latitude);
                editor.longitude = Some(longitude);
            }

            editor.endereco = Some(endereco);
        }
        (None, None) => {}
    }
}

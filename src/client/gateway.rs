//! Typed HTTP client for the notes API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::Response;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::notes::Note;
use crate::notes::NoteValues;

use super::ClientError;
use super::NoteRepository;
use super::Result;

#[derive(Debug, Deserialize)]
struct CreatedBody {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct NoteBody {
    nota: Note,
}

#[derive(Debug, Deserialize)]
struct NotesBody {
    notas: Vec<Note>,
}

/// Any body without interesting data, only the status matters
#[derive(Debug, Deserialize)]
struct MessageBody {}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    details: Option<String>,
}

/// Gateway to the notes API
#[derive(Clone, Debug)]
pub struct Gateway {
    client: Client,

    /// Where the API lives, possibly below a path
    base_url: Url,
}

impl Gateway {
    /// Create a gateway for the API living at the base URL
    pub fn new(base_url: Url) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self { client, base_url })
    }

    /// URL below the base path, every segment is escaped on its own
    fn url<'a, I>(&self, segments: I) -> Result<Url>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}

/// A segment the URL would resolve away instead of sending
fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

/// Decode a successful body, or turn the error body into a [`ClientError`]
async fn parse<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status();

    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.json::<ErrorBody>().await.ok();

    tracing::debug!("API responded with {status}: {body:?}");

    if status == StatusCode::NOT_FOUND {
        let message = body.map_or_else(|| status.to_string(), |body| body.error);

        return Err(ClientError::NotFound(message));
    }

    let (error, details) = body.map_or_else(
        || (status.to_string(), None),
        |body| (body.error, body.details),
    );

    Err(ClientError::Api {
        status: status.as_u16(),
        error,
        details,
    })
}

#[async_trait]
impl NoteRepository for Gateway {
    async fn create(&self, values: &NoteValues) -> Result<i64> {
        let response = self
            .client
            .post(self.url(["api", "notas"])?)
            .json(values)
            .send()
            .await?;

        parse::<CreatedBody>(response).await.map(|body| body.id)
    }

    async fn list(&self) -> Result<Vec<Note>> {
        let response = self.client.get(self.url(["api", "notas"])?).send().await?;

        parse::<NotesBody>(response).await.map(|body| body.notas)
    }

    async fn get(&self, id: i64) -> Result<Note> {
        let response = self
            .client
            .get(self.url(["api", "notas", id.to_string().as_str()])?)
            .send()
            .await?;

        parse::<NoteBody>(response).await.map(|body| body.nota)
    }

    async fn update(&self, id: i64, values: &NoteValues) -> Result<()> {
        let response = self
            .client
            .put(self.url(["api", "notas", id.to_string().as_str()])?)
            .json(values)
            .send()
            .await?;

        parse::<MessageBody>(response).await.map(|_| ())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.url(["api", "notas", id.to_string().as_str()])?)
            .send()
            .await?;

        parse::<MessageBody>(response).await.map(|_| ())
    }

    async fn search(&self, endereco: &str) -> Result<Vec<Note>> {
        // same literal match the API does, on the full list
        if is_dot_segment(endereco) {
            let notes = self.list().await?;

            return Ok(notes
                .into_iter()
                .filter(|note| {
                    note.endereco
                        .as_deref()
                        .is_some_and(|stored| stored.contains(endereco))
                })
                .collect());
        }

        let response = self
            .client
            .get(self.url(["api", "notas", "localizacao", endereco])?)
            .send()
            .await?;

        parse::<NotesBody>(response).await.map(|body| body.notas)
    }
}

//! Postgres storage

use core::fmt::Display;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use crate::notes::Note;
use crate::notes::NoteValues;

use super::Error;
use super::Result;
use super::Storage;

/// Migrator to run migrations on startup
static MIGRATOR: Migrator = sqlx::migrate!();

/// Postgres storage
#[derive(Clone, Debug)]
pub struct Postgres {
    /// Pool of connections
    connection_pool: PgPool,
}

impl Postgres {
    /// Connect to the database behind the connection string
    ///
    /// Migrations will be run
    pub async fn connect(database_url: &str) -> Result<Self> {
        let connection_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await
            .map_err(connection_error)?;

        Self::with_pool(connection_pool).await
    }

    /// Create Postgres storage with existing pool
    ///
    /// Migrations will be run
    pub async fn with_pool(connection_pool: PgPool) -> Result<Self> {
        MIGRATOR
            .run(&connection_pool)
            .await
            .map_err(|err| Error::Migration(err.to_string()))?;

        Ok(Self { connection_pool })
    }
}

#[async_trait]
impl Storage for Postgres {
    async fn find_all_notes(&self) -> Result<Vec<Note>> {
        sqlx::query_as::<_, Note>(
            r"
            SELECT id, titulo, conteudo, latitude, longitude, endereco, data_criacao
            FROM notas
            ORDER BY data_criacao DESC, id DESC
            ",
        )
        .fetch_all(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    async fn find_all_notes_by_endereco(&self, fragment: &str) -> Result<Vec<Note>> {
        sqlx::query_as::<_, Note>(
            r"
            SELECT id, titulo, conteudo, latitude, longitude, endereco, data_criacao
            FROM notas
            WHERE strpos(endereco, $1) > 0
            ORDER BY data_criacao DESC, id DESC
            ",
        )
        .bind(fragment)
        .fetch_all(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    async fn find_single_note_by_id(&self, id: i64) -> Result<Option<Note>> {
        sqlx::query_as::<_, Note>(
            r"
            SELECT id, titulo, conteudo, latitude, longitude, endereco, data_criacao
            FROM notas
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    async fn create_note(&self, values: &NoteValues) -> Result<Note> {
        sqlx::query_as::<_, Note>(
            r"
            INSERT INTO notas (titulo, conteudo, latitude, longitude, endereco, data_criacao)
            VALUES ($1, $2, $3, $4, $5, timezone('UTC', now()))
            RETURNING id, titulo, conteudo, latitude, longitude, endereco, data_criacao
            ",
        )
        .bind(&values.titulo)
        .bind(&values.conteudo)
        .bind(values.latitude)
        .bind(values.longitude)
        .bind(values.stored_endereco())
        .fetch_one(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    async fn update_note(&self, id: i64, values: &NoteValues) -> Result<bool> {
        let result = sqlx::query(
            r"
            UPDATE notas
            SET titulo = $1, conteudo = $2, latitude = $3, longitude = $4, endereco = $5
            WHERE id = $6
            ",
        )
        .bind(&values.titulo)
        .bind(&values.conteudo)
        .bind(values.latitude)
        .bind(values.longitude)
        .bind(values.stored_endereco())
        .bind(id)
        .execute(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_note(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notas WHERE id = $1")
            .bind(id)
            .execute(&self.connection_pool)
            .await
            .map_err(connection_error)?;

        Ok(result.rows_affected() > 0)
    }
}

/// Turn any error into a connection error
fn connection_error<E>(err: E) -> Error
where
    E: Display,
{
    Error::Connection(err.to_string())
}

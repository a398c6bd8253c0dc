//! The root!
//!
//! Describes the service and what it has to offer

use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;

use crate::api::Error;

/// Every route of the API, with a short description
pub const ENDPOINTS: [(&str, &str); 6] = [
    ("POST /api/notas", "Criar nota"),
    ("GET /api/notas", "Listar todas as notas"),
    ("GET /api/notas/:id", "Obter nota por ID"),
    ("PUT /api/notas/:id", "Atualizar nota"),
    ("DELETE /api/notas/:id", "Eliminar nota"),
    (
        "GET /api/notas/localizacao/:endereco",
        "Buscar por localização",
    ),
];

/// Service metadata
#[derive(Debug, Serialize)]
pub struct Root {
    message: &'static str,
    version: &'static str,
    endpoints: BTreeMap<&'static str, &'static str>,
}

/// The root!
///
/// Doubles as a health check
pub async fn root() -> Json<Root> {
    Json(Root {
        message: "API de Notas está funcionando!",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS.into_iter().collect(),
    })
}

/// All unknown routes end up here
pub async fn not_found() -> Error {
    Error::not_found("Route not found")
}

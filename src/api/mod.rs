//! All API endpoint setup

use axum::Router;
use axum::routing::get;

pub use request::Form;
pub use request::PathParameters;
pub use response::Error;
pub use response::Success;

use crate::storage::Storage;

mod notes;
mod request;
mod response;

/// Get the Axum router for all API routes
pub fn router<S: Storage>() -> Router {
    let notes = Router::new()
        .route("/", get(notes::list::<S>).post(notes::create::<S>))
        .route("/localizacao/{endereco}", get(notes::search::<S>))
        .route(
            "/{note}",
            get(notes::single::<S>)
                .put(notes::update::<S>)
                .delete(notes::delete::<S>),
        );

    Router::new().nest("/notas", notes)
}

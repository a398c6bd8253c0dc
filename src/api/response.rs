//! API response helpers

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;

/// Hold data for a successful API interaction
///
/// The data is flattened next to a `success: true` marker
pub struct Success<V>
where
    V: Serialize,
{
    status_code: StatusCode,
    data: V,
}

impl<V> Success<V>
where
    V: Serialize,
{
    pub fn ok(data: V) -> Self {
        Self {
            status_code: StatusCode::OK,
            data,
        }
    }

    pub fn created(data: V) -> Self {
        Self {
            status_code: StatusCode::CREATED,
            data,
        }
    }
}

#[derive(Serialize)]
struct SuccessWrapper<D>
where
    D: Serialize,
{
    success: bool,
    #[serde(flatten)]
    data: D,
}

impl<V> IntoResponse for Success<V>
where
    V: Serialize,
{
    fn into_response(self) -> Response {
        (
            self.status_code,
            Json(SuccessWrapper {
                success: true,
                data: self.data,
            }),
        )
            .into_response()
    }
}

/// Hold data for a failed API interaction
#[derive(Debug)]
pub struct Error {
    status_code: StatusCode,
    message: String,
    details: Option<String>,
}

impl Error {
    pub fn bad_request<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code: StatusCode::BAD_REQUEST,
            message: message.to_string(),
            details: None,
        }
    }

    pub fn not_found<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code: StatusCode::NOT_FOUND,
            message: message.to_string(),
            details: None,
        }
    }

    pub fn internal_server_error<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details<M>(self, details: M) -> Self
    where
        M: ToString,
    {
        Self {
            details: Some(details.to_string()),
            ..self
        }
    }

    /// Map a storage failure into an internal server error
    ///
    /// The storage error ends up in the details, the message describes the failed action
    pub fn storage(message: &'static str) -> impl FnOnce(crate::storage::Error) -> Self {
        move |err| {
            tracing::error!("{message}: {err}");

            Self::internal_server_error(message).with_details(err)
        }
    }
}

#[derive(Serialize)]
struct ErrorWrapper {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (
            self.status_code,
            Json(ErrorWrapper {
                error: self.message,
                details: self.details,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use serde_json::Value;
    use serde_json::json;

    use super::*;

    async fn body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_success_is_flattened() {
        #[derive(Serialize)]
        struct Created {
            id: i64,
        }

        let response = Success::created(Created { id: 7 }).into_response();
        assert_eq!(StatusCode::CREATED, response.status());
        assert_eq!(json!({ "success": true, "id": 7 }), body(response).await);
    }

    #[tokio::test]
    async fn test_error_details_are_optional() {
        let response = Error::not_found("Nota não encontrada").into_response();
        assert_eq!(StatusCode::NOT_FOUND, response.status());
        assert_eq!(json!({ "error": "Nota não encontrada" }), body(response).await);

        let response = Error::internal_server_error("Erro ao criar nota")
            .with_details("Connection error: gone")
            .into_response();
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
        assert_eq!(
            json!({ "error": "Erro ao criar nota", "details": "Connection error: gone" }),
            body(response).await
        );
    }
}

//! Location capture
//!
//! A position comes from a [`LocationProvider`], a [`Geocoder`] turns it into an
//! address. Geocoding never blocks a capture, the coordinates themselves are the
//! fallback address.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use super::ClientError;

/// A pair of coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// A captured position with its address
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedLocation {
    pub position: Position,
    pub endereco: String,
}

/// Location errors
#[derive(Debug, Error)]
pub enum LocationError {
    /// The user did not allow access to the location
    #[error("Permissão negada. Não será possível capturar localização.")]
    PermissionDenied,

    /// There is no known position
    #[error("Não foi possível obter localização")]
    Unavailable,
}

/// Source of the device position
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Check the permission, asking for it when needed
    async fn request_permission(&self) -> bool;

    /// The last known position, if any
    async fn last_known_position(&self) -> Result<Option<Position>, LocationError>;
}

/// Reverse geocoding
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Address for the position, `None` when nothing is known about it
    async fn reverse(&self, position: Position) -> Result<Option<String>, ClientError>;
}

/// Address used when geocoding has nothing to offer
pub fn coordinate_literal(position: Position) -> String {
    format!("Lat: {}, Lng: {}", position.latitude, position.longitude)
}

/// Address for the position, falling back to the coordinates
pub async fn resolve_address<G>(geocoder: &G, position: Position) -> String
where
    G: Geocoder + ?Sized,
{
    match geocoder.reverse(position).await {
        Ok(Some(endereco)) if !endereco.trim().is_empty() => endereco,
        Ok(_) => coordinate_literal(position),
        Err(err) => {
            tracing::debug!("Reverse geocoding failed: {err}");

            coordinate_literal(position)
        }
    }
}

/// Capture the position once and find its address
pub async fn capture_location<L, G>(
    provider: &L,
    geocoder: &G,
) -> Result<CapturedLocation, LocationError>
where
    L: LocationProvider + ?Sized,
    G: Geocoder + ?Sized,
{
    if !provider.request_permission().await {
        return Err(LocationError::PermissionDenied);
    }

    let position = provider
        .last_known_position()
        .await?
        .ok_or(LocationError::Unavailable)?;

    let endereco = resolve_address(geocoder, position).await;

    Ok(CapturedLocation { position, endereco })
}

/// A position known up front, like one given on the command line
#[derive(Clone, Copy, Debug)]
pub struct FixedLocation(pub Option<Position>);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn request_permission(&self) -> bool {
        true
    }

    async fn last_known_position(&self) -> Result<Option<Position>, LocationError> {
        Ok(self.0)
    }
}

/// Geocoder that never knows anything
#[derive(Clone, Copy, Debug)]
pub struct NoGeocoder;

#[async_trait]
impl Geocoder for NoGeocoder {
    async fn reverse(&self, _position: Position) -> Result<Option<String>, ClientError> {
        Ok(None)
    }
}

#[derive(Debug, Deserialize)]
struct ReverseBody {
    display_name: Option<String>,
}

/// Reverse geocoding with a Nominatim compatible service
#[derive(Clone, Debug)]
pub struct NominatimGeocoder {
    client: Client,
    base_url: Url,
}

impl NominatimGeocoder {
    pub fn new(base_url: Url) -> Result<Self, ClientError> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("notas/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn reverse(&self, position: Position) -> Result<Option<String>, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("reverse");
        url.query_pairs_mut()
            .append_pair("format", "jsonv2")
            .append_pair("lat", &position.latitude.to_string())
            .append_pair("lon", &position.longitude.to_string());

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.json::<ReverseBody>().await?;

        Ok(body.display_name)
    }
}

use super::{IDirectionsApi, IPlacesApi};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, warn};
use wayfarer_domain::{GeoPoint, PlaceCandidate};

const DIRECTIONS_API_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";
const PLACE_DETAILS_API_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";
const TEXT_SEARCH_API_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";

fn create_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .expect("To create reqwest client")
}

/// Adapter for the Google Directions API
pub struct GoogleDirectionsApi {
    client: Client,
    api_key: Option<String>,
}

impl GoogleDirectionsApi {
    pub fn new(api_key: Option<String>, timeout_secs: u64) -> Self {
        Self {
            client: create_client(timeout_secs),
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Deserialize)]
struct DirectionsLeg {
    duration: DirectionsDuration,
}

#[derive(Debug, Deserialize)]
struct DirectionsDuration {
    /// Seconds
    value: i64,
}

#[async_trait::async_trait]
impl IDirectionsApi for GoogleDirectionsApi {
    async fn travel_time_secs(
        &self,
        origin: &GeoPoint,
        destination_place_id: &str,
    ) -> Option<i64> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                warn!("Directions lookup skipped: no API key configured");
                return None;
            }
        };

        let res = match self
            .client
            .get(DIRECTIONS_API_URL)
            .query(&[
                ("origin", origin.to_string()),
                (
                    "destination",
                    format!("place_id:{}", destination_place_id),
                ),
                ("key", api_key.clone()),
            ])
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                error!("[Network Error] Google Directions API error: {:?}", e);
                return None;
            }
        };

        let data = match res.json::<DirectionsResponse>().await {
            Ok(data) => data,
            Err(e) => {
                error!(
                    "[Unexpected Response] Google Directions API error: {:?}",
                    e
                );
                return None;
            }
        };

        if data.status != "OK" {
            warn!(
                "Google Directions API returned status: {} for place: {}",
                data.status, destination_place_id
            );
            return None;
        }

        data.routes
            .first()
            .and_then(|route| route.legs.first())
            .map(|leg| leg.duration.value)
    }
}

/// Adapter for the Google Places API (place details + text search)
pub struct GooglePlacesApi {
    client: Client,
    api_key: Option<String>,
}

impl GooglePlacesApi {
    pub fn new(api_key: Option<String>, timeout_secs: u64) -> Self {
        Self {
            client: create_client(timeout_secs),
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlaceDetailsResponse {
    status: String,
    result: Option<PlaceDetailsResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceDetailsResult {
    geometry: PlaceGeometry,
}

#[derive(Debug, Deserialize)]
struct PlaceGeometry {
    location: PlaceLocation,
}

#[derive(Debug, Deserialize)]
struct PlaceLocation {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    results: Vec<TextSearchResult>,
}

#[derive(Debug, Deserialize)]
struct TextSearchResult {
    place_id: String,
    name: String,
    rating: Option<f64>,
    #[serde(default)]
    types: Vec<String>,
}

impl From<TextSearchResult> for PlaceCandidate {
    fn from(result: TextSearchResult) -> Self {
        PlaceCandidate {
            place_id: result.place_id,
            name: result.name,
            rating: result.rating,
            types: result.types,
        }
    }
}

#[async_trait::async_trait]
impl IPlacesApi for GooglePlacesApi {
    async fn place_coordinates(&self, place_id: &str) -> Option<GeoPoint> {
        let api_key = self.api_key.as_ref()?;

        let res = match self
            .client
            .get(PLACE_DETAILS_API_URL)
            .query(&[
                ("place_id", place_id),
                ("fields", "geometry"),
                ("key", api_key),
            ])
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                error!(
                    "[Network Error] Google Place Details API error for place {}: {:?}",
                    place_id, e
                );
                return None;
            }
        };

        let data = match res.json::<PlaceDetailsResponse>().await {
            Ok(data) => data,
            Err(e) => {
                error!(
                    "[Unexpected Response] Google Place Details API error for place {}: {:?}",
                    place_id, e
                );
                return None;
            }
        };

        if data.status != "OK" {
            warn!(
                "Google Place Details API returned status: {} for place: {}",
                data.status, place_id
            );
            return None;
        }

        data.result
            .map(|result| GeoPoint::new(result.geometry.location.lat, result.geometry.location.lng))
    }

    async fn text_search(
        &self,
        query: &str,
        location: &GeoPoint,
        radius_m: u32,
    ) -> Vec<PlaceCandidate> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => return Vec::new(),
        };

        let res = match self
            .client
            .get(TEXT_SEARCH_API_URL)
            .query(&[
                ("query", query.to_string()),
                ("location", location.to_string()),
                ("radius", radius_m.to_string()),
                ("key", api_key.clone()),
            ])
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                error!("[Network Error] Google Text Search API error: {:?}", e);
                return Vec::new();
            }
        };

        match res.json::<TextSearchResponse>().await {
            Ok(data) => data.results.into_iter().map(|r| r.into()).collect(),
            Err(e) => {
                error!(
                    "[Unexpected Response] Google Text Search API error: {:?}",
                    e
                );
                Vec::new()
            }
        }
    }
}

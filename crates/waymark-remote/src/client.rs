//! HTTP client for the hosted locations table.
//!
//! Wraps `reqwest` with the backend's authentication headers, status
//! mapping and row decoding. Use [`RemoteClient::new`] with a validated
//! [`RemoteConfig`]; tests point the same constructor at a mock server.

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};
use uuid::Uuid;
use waymark_core::{Location, LocationId, NewLocation};

use crate::config::RemoteConfig;
use crate::error::{RemoteError, RemoteResult};
use crate::row::{LocationRow, LocationWrite};

/// Path prefix of the REST interface.
const REST_PREFIX: &str = "rest/v1/";

/// Identifier of a trip row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(Uuid);

impl TripId {
    pub fn new(id: Uuid) -> Self {
        TripId(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for TripId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(TripId)
    }
}

#[derive(Debug, Deserialize)]
struct TripRow {
    id: TripId,
}

/// Client for the hosted locations table.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    base_url: Url,
    table: String,
    trips_table: String,
}

impl RemoteClient {
    /// Creates a client from a configuration.
    ///
    /// # Errors
    ///
    /// - [`RemoteError::InvalidConfig`] / [`RemoteError::InvalidUrl`] if the
    ///   configuration does not validate
    /// - [`RemoteError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed
    pub fn new(config: &RemoteConfig) -> RemoteResult<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(config.api_key.trim())
            .map_err(|e| RemoteError::InvalidConfig(format!("api_key is not a valid header: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key.trim()))
            .map_err(|e| RemoteError::InvalidConfig(format!("api_key is not a valid header: {e}")))?;
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("waymark/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        // Exactly one trailing slash so joins append instead of replacing the
        // last path segment.
        let normalised = format!("{}/", config.url.trim().trim_end_matches('/'));
        let base_url = Url::parse(&normalised)?;

        Ok(RemoteClient {
            client,
            base_url,
            table: config.table.clone(),
            trips_table: config.trips_table.clone(),
        })
    }

    // =========================================================================
    // Locations
    // =========================================================================

    /// Lists every location, newest first.
    ///
    /// Rows that cannot become a [`Location`] are skipped with a warning.
    pub async fn list_locations(&self) -> RemoteResult<Vec<Location>> {
        let url = self.table_url(&self.table, &[("select", "*"), ("order", "created_at.desc")])?;
        let body = self.send(self.client.get(url), "list locations").await?;

        let rows: Vec<LocationRow> =
            serde_json::from_value(body).map_err(|e| RemoteError::Deserialize {
                context: "list locations".to_string(),
                source: e,
            })?;

        let total = rows.len();
        let locations: Vec<Location> = rows
            .into_iter()
            .filter_map(|row| match Location::try_from(row) {
                Ok(location) => Some(location),
                Err(e) => {
                    warn!(error = %e, "Skipping remote row");
                    None
                }
            })
            .collect();

        debug!(total, kept = locations.len(), "Listed remote locations");
        Ok(locations)
    }

    /// Inserts a validated location and returns the stored row.
    pub async fn insert_location(&self, new: &NewLocation) -> RemoteResult<Location> {
        let url = self.table_url(&self.table, &[("select", "*")])?;
        let request = self
            .client
            .post(url)
            .header("Prefer", "return=representation")
            .json(&LocationWrite::from(new));

        let context = format!("insert location '{}'", new.name);
        let body = self.send(request, &context).await?;
        let row = Self::single_row(body, &context)?;
        Location::try_from(row)
    }

    /// Writes every field of `location` to the row with the same id and
    /// returns the stored row.
    ///
    /// # Errors
    ///
    /// [`RemoteError::EmptyResponse`] if no row has that id.
    pub async fn update_location(&self, location: &Location) -> RemoteResult<Location> {
        let id_filter = format!("eq.{}", location.id);
        let url = self.table_url(&self.table, &[("id", &id_filter), ("select", "*")])?;
        let request = self
            .client
            .request(Method::PATCH, url)
            .header("Prefer", "return=representation")
            .json(&LocationWrite::from(location));

        let context = format!("update location {}", location.id);
        let body = self.send(request, &context).await?;
        let row = Self::single_row(body, &context)?;
        Location::try_from(row)
    }

    /// Deletes the row with `id`.
    pub async fn delete_location(&self, id: LocationId) -> RemoteResult<()> {
        let id_filter = format!("eq.{id}");
        let url = self.table_url(&self.table, &[("id", &id_filter)])?;
        self.send(self.client.delete(url), &format!("delete location {id}"))
            .await?;
        Ok(())
    }

    // =========================================================================
    // Trips
    // =========================================================================

    /// Creates a trip row and returns its id.
    pub async fn create_trip(&self, name: &str) -> RemoteResult<TripId> {
        let url = self.table_url(&self.trips_table, &[("select", "id")])?;
        let request = self
            .client
            .post(url)
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({ "name": name }));

        let context = format!("create trip '{name}'");
        let body = self.send(request, &context).await?;
        let value = Self::first_value(body, &context)?;

        let trip: TripRow = serde_json::from_value(value).map_err(|e| RemoteError::Deserialize {
            context,
            source: e,
        })?;
        Ok(trip.id)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// `{base}/rest/v1/{table}?{params}`
    fn table_url(&self, table: &str, params: &[(&str, &str)]) -> RemoteResult<Url> {
        let mut url = self.base_url.join(REST_PREFIX)?.join(table)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Sends a request, maps non-2xx statuses, and parses a JSON body.
    ///
    /// An empty body (as DELETE returns without representation) becomes
    /// `Value::Null`.
    async fn send(&self, request: RequestBuilder, context: &str) -> RemoteResult<Value> {
        debug!(context = %context, "Sending remote request");

        let response = request.send().await.map_err(|e| {
            error!(context = %context, error = %e, "Remote request failed");
            RemoteError::Http(e)
        })?;
        let response = Self::check_status(response, context).await?;

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| RemoteError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }

    /// Turns a non-2xx response into [`RemoteError::Rejected`], using the
    /// backend's `message` field when the body carries one.
    async fn check_status(response: Response, context: &str) -> RemoteResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    body.trim().to_string()
                }
            });

        error!(context = %context, status = status.as_u16(), message = %message, "Remote call rejected");
        Err(RemoteError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    /// The representation may be a single object or a one-element array.
    fn first_value(body: Value, context: &str) -> RemoteResult<Value> {
        let value = match body {
            Value::Array(items) => items.into_iter().next(),
            Value::Null => None,
            other => Some(other),
        };
        value.ok_or_else(|| RemoteError::EmptyResponse {
            context: context.to_string(),
        })
    }

    fn single_row(body: Value, context: &str) -> RemoteResult<LocationRow> {
        let value = Self::first_value(body, context)?;
        serde_json::from_value(value).map_err(|e| RemoteError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_client(base_url: &str) -> RemoteClient {
        RemoteClient::new(&RemoteConfig::new(base_url, "anon-key")).unwrap()
    }

    #[test]
    fn test_table_url_strips_trailing_slash() {
        let client = test_client("https://example.supabase.co///");
        let url = client
            .table_url("locations", &[("select", "*"), ("order", "created_at.desc")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.supabase.co/rest/v1/locations?select=*&order=created_at.desc"
        );
    }

    #[test]
    fn test_table_url_id_filter() {
        let client = test_client("https://example.supabase.co");
        let url = client.table_url("locations", &[("id", "eq.5")]).unwrap();
        assert_eq!(url.query(), Some("id=eq.5"));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = RemoteClient::new(&RemoteConfig::new("", "key")).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_first_value_shapes() {
        assert_eq!(
            RemoteClient::first_value(json!([{"id": 1}]), "t").unwrap(),
            json!({"id": 1})
        );
        assert_eq!(
            RemoteClient::first_value(json!({"id": 2}), "t").unwrap(),
            json!({"id": 2})
        );
        assert!(matches!(
            RemoteClient::first_value(json!([]), "t"),
            Err(RemoteError::EmptyResponse { .. })
        ));
    }

    #[test]
    fn test_trip_id_parse() {
        let id: TripId = "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap();
        assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
        assert!("trip-1".parse::<TripId>().is_err());
    }
}

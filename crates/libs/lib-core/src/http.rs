//! # HTTP Plumbing
//!
//! Shared `reqwest` client construction and a JSON GET helper with the duration and
//! status logging every collaborator call uses.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{CoreError, Result};

/// User agent sent to every collaborator. Nominatim rejects anonymous clients.
pub const USER_AGENT: &str = concat!("maatiputra/", env!("CARGO_PKG_VERSION"));

/// Build an HTTP client with the given request timeout.
///
/// Falls back to a default client if the builder fails.
pub fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// GET `url` with `query` and decode the JSON body.
#[tracing::instrument(skip(client, query), fields(url = %url))]
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<T> {
    let start = Instant::now();

    let response = client.get(url).query(query).send().await.map_err(|e| {
        tracing::error!(
            error = %e,
            duration_ms = start.elapsed().as_millis(),
            "Network error"
        );
        CoreError::from(e)
    })?;

    let status = response.status();
    let duration = start.elapsed();

    if !status.is_success() {
        tracing::warn!(
            status = status.as_u16(),
            duration_ms = duration.as_millis(),
            "Request failed"
        );
        return Err(CoreError::Http {
            status: status.as_u16(),
            message: format!("GET {} failed", url),
        });
    }

    let body = response.json::<T>().await.map_err(|e| {
        tracing::error!(error = %e, "Response parse error");
        CoreError::Decode(e.to_string())
    })?;

    tracing::debug!(duration_ms = duration.as_millis(), "Request succeeded");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(serde::Deserialize)]
    struct Echo {
        ok: bool,
    }

    #[tokio::test]
    async fn test_get_json_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/probe"))
            .and(query_param("name", "Indore"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .mount(&server)
            .await;

        let client = build_client(Duration::from_secs(5));
        let url = format!("{}/probe", server.uri());
        let echo: Echo = get_json(&client, &url, &[("name", "Indore".to_string())])
            .await
            .unwrap();
        assert!(echo.ok);
    }

    #[tokio::test]
    async fn test_get_json_maps_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = build_client(Duration::from_secs(5));
        let err = get_json::<Echo>(&client, &server.uri(), &[]).await.err().unwrap();
        assert!(matches!(err, CoreError::Http { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_get_json_maps_bad_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = build_client(Duration::from_secs(5));
        let err = get_json::<Echo>(&client, &server.uri(), &[]).await.err().unwrap();
        assert!(matches!(err, CoreError::Decode(_)));
    }
}

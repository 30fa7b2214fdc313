use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to reach exercise catalog: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Exercise catalog responded with status {0}")]
    Status(u16),
}

/// Client for the third-party exercise catalog.
///
/// The catalog is a plain GET returning JSON; the payload is passed through
/// without interpretation.
#[derive(Debug, Clone)]
pub struct ExerciseCatalogClient {
    client: Client,
    url: String,
}

impl ExerciseCatalogClient {
    pub fn new(url: impl Into<String>) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub async fn fetch(&self) -> Result<Value, CatalogError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            error!(%status, url = %self.url, "exercise catalog request failed");
            return Err(CatalogError::Status(status.as_u16()));
        }

        let catalog = response.json::<Value>().await?;
        info!(url = %self.url, "fetched exercise catalog");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_returns_catalog_json() {
        let server = MockServer::start().await;
        let body = json!([{ "name": "Deadlift", "equipment": ["Barbell"] }]);
        Mock::given(method("GET"))
            .and(path("/exercises"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let client = ExerciseCatalogClient::new(format!("{}/exercises", server.uri())).unwrap();
        assert_eq!(client.fetch().await.unwrap(), body);
    }

    #[tokio::test]
    async fn test_upstream_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = ExerciseCatalogClient::new(server.uri()).unwrap();
        assert_matches!(client.fetch().await, Err(CatalogError::Status(503)));
    }
}

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::{
    config::UNITS,
    error::FetchFailure,
    model::{Query, WeatherPayload},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: Url,
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(base_url: &str, api_key: String) -> Result<Self, FetchFailure> {
        let base_url =
            Url::parse(base_url).map_err(|err| FetchFailure::Url(format!("{base_url}: {err}")))?;

        Ok(Self {
            base_url,
            api_key,
            http: Client::new(),
        })
    }

    /// Full request URL for `query`; the city is percent-encoded, spaces as `%20`.
    pub fn request_url(&self, query: &Query) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query.city())
            .append_pair("appid", &self.api_key)
            .append_pair("units", UNITS);

        // Form encoding writes spaces as `+`; a literal `+` is already `%2B` at this point.
        let encoded = url.query().map(|q| q.replace('+', "%20"));
        url.set_query(encoded.as_deref());
        url
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, query: &Query) -> Result<WeatherPayload, FetchFailure> {
        debug!(city = %query, "requesting current weather");

        let res = self
            .http
            .get(self.request_url(query))
            .send()
            .await
            .map_err(FetchFailure::Request)?;

        // Error statuses carry a JSON body with `cod`, so the body is decoded either way.
        let status = res.status();
        let body = res.text().await.map_err(FetchFailure::Body)?;
        debug!(city = %query, %status, bytes = body.len(), "received weather response");

        let payload: WeatherPayload = serde_json::from_str(&body)?;
        if let Some(note) = payload.message_text() {
            debug!(city = %query, code = ?payload.status.code(), note, "provider message");
        }

        Ok(payload)
    }
}

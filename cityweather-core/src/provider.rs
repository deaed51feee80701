use crate::{
    Config,
    error::FetchFailure,
    model::{Query, WeatherPayload},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of current-weather payloads.
///
/// Implementations only report transport-level problems; status codes inside
/// the payload are left to [`crate::interpret()`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, query: &Query) -> Result<WeatherPayload, FetchFailure>;
}

/// Construct the OpenWeatherMap provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = OpenWeatherProvider::new(config.api_url(), config.api_key().to_owned())
        .map_err(|err| {
            anyhow::anyhow!(
                "{err}\n\
                 Hint: run `cityweather configure` and enter a valid endpoint."
            )
        })?;

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_default_config_works() {
        let provider = provider_from_config(&Config::default());
        assert!(provider.is_ok());
    }

    #[test]
    fn provider_from_config_rejects_bad_endpoint() {
        let mut cfg = Config::default();
        cfg.set_api_url(Some("not a url".into()));

        let err = provider_from_config(&cfg).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("invalid endpoint URL"));
        assert!(msg.contains("Hint: run `cityweather configure`"));
    }
}

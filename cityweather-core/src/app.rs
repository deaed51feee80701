use std::{
    io,
    sync::{Mutex, PoisonError},
};

use tracing::{error, info};

use crate::{
    error::WeatherError,
    interpret::interpret,
    model::{DisplayState, Query, WeatherSummary},
    provider::WeatherProvider,
    region::OutputRegion,
    render::render,
};

/// Runs one lookup per submission and keeps the output region in sync.
///
/// Submissions are not cancelled or serialized: when two overlap, the one that
/// resolves last is what the region shows.
#[derive(Debug)]
pub struct WeatherApp<R> {
    provider: Box<dyn WeatherProvider>,
    region: Mutex<R>,
}

impl<R: OutputRegion> WeatherApp<R> {
    pub fn new(provider: Box<dyn WeatherProvider>, region: R) -> Self {
        Self { provider, region: Mutex::new(region) }
    }

    /// Handle one activation with the raw input text and return the state left on screen.
    pub async fn submit(&self, raw: &str) -> io::Result<DisplayState> {
        let query = match Query::parse(raw) {
            Ok(query) => query,
            Err(err) => {
                let state = DisplayState::from(&err);
                self.show(&state)?;
                return Ok(state);
            }
        };

        self.show(&DisplayState::Loading)?;

        let state = DisplayState::from(self.lookup(&query).await);
        self.show(&state)?;
        Ok(state)
    }

    /// Fetch and interpret weather for `query` without touching the region.
    pub async fn lookup(&self, query: &Query) -> Result<WeatherSummary, WeatherError> {
        let outcome = match self.provider.fetch(query).await {
            Ok(payload) => interpret(payload),
            Err(failure) => Err(failure.into()),
        };

        match &outcome {
            Ok(summary) => info!(city = %query, resolved = %summary.city, "weather lookup succeeded"),
            Err(WeatherError::Transport(cause)) => {
                error!(city = %query, error = %cause, "weather API error");
            }
            Err(err) => info!(city = %query, %err, "weather lookup rejected"),
        }

        outcome
    }

    /// Run `f` against the region, e.g. to inspect what is currently shown.
    pub fn with_region<T>(&self, f: impl FnOnce(&mut R) -> T) -> T {
        let mut region = self.region.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut region)
    }

    pub fn into_region(self) -> R {
        self.region.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn show(&self, state: &DisplayState) -> io::Result<()> {
        let lines = render(state);
        let mut region = self.region.lock().unwrap_or_else(PoisonError::into_inner);
        region.replace(&lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::FetchFailure, model::WeatherPayload, region::MemoryRegion};
    use async_trait::async_trait;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug)]
    struct StubProvider {
        body: Option<&'static str>,
        calls: Arc<AtomicUsize>,
    }

    impl StubProvider {
        fn replying(body: &'static str) -> Self {
            Self { body: Some(body), calls: Arc::default() }
        }

        fn failing() -> Self {
            Self { body: None, calls: Arc::default() }
        }
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn fetch(&self, _query: &Query) -> Result<WeatherPayload, FetchFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.body {
                Some(body) => Ok(serde_json::from_str(body)?),
                None => Err(FetchFailure::MissingField("stub")),
            }
        }
    }

    fn app(provider: StubProvider) -> (WeatherApp<MemoryRegion>, Arc<AtomicUsize>) {
        let calls = Arc::clone(&provider.calls);
        (WeatherApp::new(Box::new(provider), MemoryRegion::new()), calls)
    }

    #[tokio::test]
    async fn blank_input_renders_error_without_request() {
        let (app, calls) = app(StubProvider::replying(r#"{"cod":200}"#));

        let state = app.submit("   ").await.expect("render");
        app.submit("").await.expect("render");

        assert_eq!(state, DisplayState::Error("Please enter a city name!".into()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // Two error renders and no loading state in between.
        let region = app.into_region();
        assert_eq!(region.text(), vec!["Please enter a city name!"]);
        assert_eq!(region.writes(), 2);
    }

    #[tokio::test]
    async fn lookup_renders_loading_then_result() {
        let (app, _) = app(StubProvider::replying(
            r#"{"cod":"200","weather":[{"main":"Snow"}],"main":{"temp":-0.5,"humidity":90},"name":"Reykjavik","sys":{"country":"IS"}}"#,
        ));

        let state = app.submit(" Reykjavik ").await.expect("render");

        assert!(matches!(state, DisplayState::Success(_)));
        let region = app.into_region();
        assert_eq!(region.writes(), 2);
        assert_eq!(region.text(), vec!["Snow", "0°C", "Humidity: 90%", "City: Reykjavik, IS"]);
    }

    #[tokio::test]
    async fn transport_failure_renders_connectivity_message() {
        let (app, _) = app(StubProvider::failing());

        let state = app.submit("Paris").await.expect("render");

        assert_eq!(
            state,
            DisplayState::Error(
                "Error fetching weather data! Please check your internet connection and try again."
                    .into()
            )
        );
    }

    #[tokio::test]
    async fn provider_is_called_once_per_submission() {
        let (app, calls) = app(StubProvider::replying(r#"{"cod":"404"}"#));

        app.submit("Atlantis").await.expect("render");
        app.submit("Atlantis").await.expect("render");

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let region = app.into_region();
        assert_eq!(region.writes(), 4);
        assert_eq!(region.text(), vec!["City not found! Please check the spelling and try again."]);
    }
}

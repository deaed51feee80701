//! Weather lookup errors.
//!
//! The `Display` text of every [`WeatherError`] is the message shown to the user.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Please enter a city name!")]
    EmptyCity,

    #[error(
        "Error fetching weather data! Please check your internet connection and try again."
    )]
    Transport(#[from] FetchFailure),

    #[error("City not found! Please check the spelling and try again.")]
    NotFound,

    /// Any status other than 200 or 404. `status` is `None` when the payload had no usable code.
    #[error("An error occurred while fetching weather data.")]
    Api { status: Option<i64> },
}

/// Why a request never produced a usable payload.
#[derive(Error, Debug)]
pub enum FetchFailure {
    #[error("invalid endpoint URL: {0}")]
    Url(String),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}

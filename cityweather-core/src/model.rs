use serde::{Deserialize, Deserializer, de::IgnoredAny};
use serde_json::{Number, Value};
use std::fmt;

use crate::error::WeatherError;

/// A trimmed, non-empty city name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    city: String,
}

impl Query {
    /// Trim user input; blank input is rejected before any request is made.
    pub fn parse(raw: &str) -> Result<Self, WeatherError> {
        let city = raw.trim();
        if city.is_empty() {
            return Err(WeatherError::EmptyCity);
        }

        Ok(Self { city: city.to_string() })
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.city)
    }
}

/// Provider status code, normalized from either a JSON number or a JSON string.
///
/// Holds `None` when the field is absent, null, fractional, or not a decimal number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApiStatus(Option<i64>);

impl ApiStatus {
    pub const OK: i64 = 200;
    pub const NOT_FOUND: i64 = 404;

    pub fn new(code: i64) -> Self {
        Self(Some(code))
    }

    pub fn code(&self) -> Option<i64> {
        self.0
    }

    pub fn is_ok(&self) -> bool {
        self.0 == Some(Self::OK)
    }

    pub fn is_not_found(&self) -> bool {
        self.0 == Some(Self::NOT_FOUND)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatus {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for ApiStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = match RawStatus::deserialize(deserializer)? {
            RawStatus::Int(n) => Some(n),
            RawStatus::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(f as i64),
            RawStatus::Float(_) => None,
            RawStatus::Text(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                s.parse().ok()
            }
            RawStatus::Text(_) | RawStatus::Other(_) => None,
        };

        Ok(Self(code))
    }
}

/// Decoded current-weather body.
///
/// Only `cod` is interpreted while decoding. The display fields stay as raw JSON
/// and are read by [`crate::interpret()`] once the status is known to be 200, so a
/// malformed field never hides a not-found or error status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherPayload {
    #[serde(default, rename = "cod")]
    pub status: ApiStatus,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub weather: Option<Value>,
    #[serde(default)]
    pub main: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub sys: Option<Value>,
}

impl WeatherPayload {
    /// Provider's `message` when it is text.
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_ref().and_then(Value::as_str)
    }
}

/// Relative humidity exactly as the provider reported it.
///
/// Integral values print without a fractional part (`72.0` prints as `72`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Humidity(Number);

impl Humidity {
    pub fn new(value: Number) -> Self {
        Self(value)
    }
}

impl From<u32> for Humidity {
    fn from(value: u32) -> Self {
        Self(Number::from(value))
    }
}

impl fmt::Display for Humidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_f64() {
            Some(v) if self.0.is_f64() && v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", v as i64)
            }
            _ => write!(f, "{}", self.0),
        }
    }
}

/// Fields shown for a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherSummary {
    pub condition: String,
    pub temperature_c: i64,
    pub humidity_pct: Humidity,
    pub city: String,
    pub country: String,
}

/// The single state held by the output region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Loading,
    Success(WeatherSummary),
    Error(String),
}

impl From<&WeatherError> for DisplayState {
    fn from(err: &WeatherError) -> Self {
        DisplayState::Error(err.to_string())
    }
}

impl From<Result<WeatherSummary, WeatherError>> for DisplayState {
    fn from(outcome: Result<WeatherSummary, WeatherError>) -> Self {
        match outcome {
            Ok(summary) => DisplayState::Success(summary),
            Err(err) => DisplayState::from(&err),
        }
    }
}

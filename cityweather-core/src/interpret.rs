use serde_json::Value;

use crate::{
    error::{FetchFailure, WeatherError},
    model::{Humidity, WeatherPayload, WeatherSummary},
};

/// Classify a decoded payload by its status and extract the display fields.
///
/// 404 is reported as not found, every other non-200 status collapses into
/// [`WeatherError::Api`]. Display fields are only read for a 200 payload; one
/// that lacks a field or has it in the wrong shape is treated as a broken
/// response, the same as one that failed to decode.
pub fn interpret(payload: WeatherPayload) -> Result<WeatherSummary, WeatherError> {
    if payload.status.is_not_found() {
        return Err(WeatherError::NotFound);
    }

    if !payload.status.is_ok() {
        return Err(WeatherError::Api { status: payload.status.code() });
    }

    let condition = payload
        .weather
        .as_ref()
        .and_then(|list| list.get(0))
        .and_then(|first| first.get("main"))
        .and_then(Value::as_str)
        .ok_or(FetchFailure::MissingField("weather[0].main"))?;

    let main = payload.main.as_ref();
    let temp = main
        .and_then(|m| m.get("temp"))
        .and_then(Value::as_f64)
        .ok_or(FetchFailure::MissingField("main.temp"))?;
    let humidity = main
        .and_then(|m| m.get("humidity"))
        .and_then(|h| match h {
            Value::Number(n) => Some(Humidity::new(n.clone())),
            _ => None,
        })
        .ok_or(FetchFailure::MissingField("main.humidity"))?;

    let city = payload
        .name
        .as_ref()
        .and_then(Value::as_str)
        .ok_or(FetchFailure::MissingField("name"))?;
    let country = payload
        .sys
        .as_ref()
        .and_then(|sys| sys.get("country"))
        .and_then(Value::as_str)
        .ok_or(FetchFailure::MissingField("sys.country"))?;

    Ok(WeatherSummary {
        condition: condition.to_string(),
        temperature_c: round_half_up(temp),
        humidity_pct: humidity,
        city: city.to_string(),
        country: country.to_string(),
    })
}

/// Nearest integer, with halves going toward positive infinity (-2.5 becomes -2).
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    // `value - floor` is exact, unlike `value + 0.5`.
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

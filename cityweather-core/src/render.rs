use crate::model::{DisplayState, WeatherSummary};

pub const LOADING_TEXT: &str = "Loading weather data...";

/// How an output region may style a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Loading,
    Error,
    Condition,
    Temperature,
    Detail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

impl Line {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }
}

/// Render the whole content of the output region for `state`.
pub fn render(state: &DisplayState) -> Vec<Line> {
    match state {
        DisplayState::Loading => vec![Line::new(LineKind::Loading, LOADING_TEXT)],
        DisplayState::Error(message) => vec![Line::new(LineKind::Error, message.as_str())],
        DisplayState::Success(summary) => render_summary(summary),
    }
}

fn render_summary(summary: &WeatherSummary) -> Vec<Line> {
    vec![
        Line::new(LineKind::Condition, summary.condition.as_str()),
        Line::new(LineKind::Temperature, format!("{}°C", summary.temperature_c)),
        Line::new(LineKind::Detail, format!("Humidity: {}%", summary.humidity_pct)),
        Line::new(LineKind::Detail, format!("City: {}, {}", summary.city, summary.country)),
    ]
}

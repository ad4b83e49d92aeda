//! User selections driving a forecast.

use crate::core::ALL_WEATHER;
use std::fmt;

/// Weather selection: every condition, or one specific condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum WeatherFilter {
    #[default]
    All,
    Condition(String),
}

impl WeatherFilter {
    /// Interpret a selector value. The sentinel `"All"` means no filter.
    pub fn parse(selection: &str) -> Self {
        let selection = selection.trim();
        if selection == ALL_WEATHER {
            WeatherFilter::All
        } else {
            WeatherFilter::Condition(selection.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, WeatherFilter::All)
    }

    pub fn condition(&self) -> Option<&str> {
        match self {
            WeatherFilter::All => None,
            WeatherFilter::Condition(c) => Some(c),
        }
    }
}

impl From<&str> for WeatherFilter {
    fn from(selection: &str) -> Self {
        WeatherFilter::parse(selection)
    }
}

impl fmt::Display for WeatherFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherFilter::All => f.write_str(ALL_WEATHER),
            WeatherFilter::Condition(c) => f.write_str(c),
        }
    }
}

/// A visitor type plus weather selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    pub visitor_type: String,
    pub weather: WeatherFilter,
}

impl ForecastRequest {
    pub fn new(visitor_type: impl Into<String>, weather: impl Into<WeatherFilter>) -> Self {
        Self {
            visitor_type: visitor_type.into(),
            weather: weather.into(),
        }
    }
}

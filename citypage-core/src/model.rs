use serde::{Deserialize, Serialize};

/// Placeholder for report fields whose source section is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// One monitored location from the site directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRecord {
    pub site_name: String,
    pub code: String,
    pub province: String,
}

/// One named window of the multi-period forecast, e.g. "Thursday night".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub period: String,
    pub temperature: String,
    /// `"POP 40%"` style label, or empty when no probability is published.
    pub pop: String,
    pub pop_summary: String,
    pub cloud_pop_summary: String,
    pub relative_humidity_percent: String,
    pub wind_summary: String,
    pub wind_chill_summary: String,
    pub summary: String,
    /// Free text exactly as published, line breaks included.
    pub full_summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningRecord {
    pub description: String,
    pub priority: String,
}

/// Normalized view of one site's weather document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    /// Rounded to a whole unit and kept as text, e.g. `"-20"`.
    pub temperature: String,
    pub temperature_unit: String,
    pub conditions: String,
    pub relative_humidity_percent: u32,
    pub wind_summary: String,
    pub wind_chill_summary: String,
    pub warnings: Vec<WarningRecord>,
    pub forecasts: Vec<ForecastPeriod>,
}

impl Default for WeatherReport {
    fn default() -> Self {
        Self {
            temperature: NOT_AVAILABLE.to_string(),
            temperature_unit: NOT_AVAILABLE.to_string(),
            conditions: NOT_AVAILABLE.to_string(),
            relative_humidity_percent: 0,
            wind_summary: NOT_AVAILABLE.to_string(),
            wind_chill_summary: NOT_AVAILABLE.to_string(),
            warnings: Vec::new(),
            forecasts: Vec::new(),
        }
    }
}

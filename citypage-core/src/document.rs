use tracing::debug;

use crate::{
    error::ParseError,
    model::{ForecastPeriod, WarningRecord, WeatherReport},
    xml::Element,
};

/// Parse one site's weather document into a [`WeatherReport`].
///
/// Only the current conditions are required. Forecasts, warnings and the
/// secondary current-condition fields fall back to their defaults when the
/// document leaves them out.
pub fn parse_weather_document(xml: &str) -> Result<WeatherReport, ParseError> {
    let root = Element::parse(xml)?;
    if root.name() != "siteData" {
        return Err(ParseError::MissingRequiredSection("siteData"));
    }

    let current = root
        .child("currentConditions")
        .ok_or(ParseError::MissingRequiredSection("currentConditions"))?;
    let temperature = current
        .child("temperature")
        .ok_or(ParseError::MissingRequiredSection("currentConditions/temperature"))?;
    let rounded = round_temperature(temperature.text())
        .ok_or(ParseError::MissingRequiredSection("currentConditions/temperature"))?;
    let unit = non_empty(temperature.attr("units"))
        .ok_or(ParseError::MissingRequiredSection("currentConditions/temperature@units"))?;
    let condition = current
        .child_text("condition")
        .ok_or(ParseError::MissingRequiredSection("currentConditions/condition"))?;

    let mut report = WeatherReport {
        temperature: rounded,
        temperature_unit: unit.to_string(),
        conditions: condition.to_string(),
        ..WeatherReport::default()
    };
    if let Some(humidity) = non_empty(current.child_text("relativeHumidity")) {
        report.relative_humidity_percent = humidity.parse().unwrap_or(0);
    }
    if let Some(wind) = current.child("wind").and_then(current_wind_summary) {
        report.wind_summary = wind;
    }
    if let Some(chill) = non_empty(current.child_text("windChill")) {
        report.wind_chill_summary = chill.to_string();
    }

    report.warnings = warnings(&root);
    report.forecasts = root
        .child("forecastGroup")
        .map(|group| {
            group
                .children("forecast")
                .map(|f| ForecastXml::from_element(f).into_period())
                .collect()
        })
        .unwrap_or_default();

    debug!(
        forecasts = report.forecasts.len(),
        warnings = report.warnings.len(),
        "Parsed weather document"
    );
    Ok(report)
}

/// Round half away from zero and print without decimals; `-0.4` prints as `"-0"`.
fn round_temperature(raw: &str) -> Option<String> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(format!("{:.0}", value.round()))
}

fn current_wind_summary(wind: &Element) -> Option<String> {
    let speed = wind.child("speed")?;
    let value = non_empty(Some(speed.text()))?;
    let units = non_empty(speed.attr("units"));

    let mut parts = Vec::new();
    if let Some(direction) = non_empty(wind.child_text("direction")) {
        parts.push(direction);
    }
    parts.push(value);
    parts.extend(units);

    if let Some(gust) = non_empty(wind.child_text("gust")) {
        parts.push("gust");
        parts.push(gust);
        parts.extend(units);
    }

    Some(parts.join(" "))
}

/// At most one record per `warnings` section, taken from its first `event`.
/// Sections without an event, or whose event lacks a description or a
/// priority, are skipped.
fn warnings(root: &Element) -> Vec<WarningRecord> {
    root.children("warnings")
        .filter_map(|section| section.child("event"))
        .filter_map(|event| {
            Some(WarningRecord {
                description: event.attr("description")?.trim().to_string(),
                priority: event.attr("priority")?.trim().to_string(),
            })
        })
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Whether a forecast entry has a wind-chill section, and what it says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindChill<'a> {
    Absent,
    NoSummary,
    Summary(&'a str),
}

/// Typed view of a `forecast` element; `None` means the element is absent.
#[derive(Debug)]
struct ForecastXml<'a> {
    period: Option<&'a str>,
    text_summary: Option<&'a str>,
    cloud_precip: Option<&'a str>,
    abbreviated_summary: Option<&'a str>,
    pop: Option<&'a Element>,
    temperatures: Option<&'a str>,
    winds: Option<&'a str>,
    precipitation: Option<&'a str>,
    wind_chill: WindChill<'a>,
    relative_humidity: Option<&'a str>,
}

impl<'a> ForecastXml<'a> {
    fn from_element(forecast: &'a Element) -> Self {
        let summary_of = |name: &str| {
            forecast
                .child(name)
                .and_then(|s| s.child_text("textSummary"))
        };
        let abbreviated = forecast.child("abbreviatedForecast");

        let wind_chill = match forecast.child("windChill") {
            None => WindChill::Absent,
            Some(section) => match section.child_text("textSummary") {
                None => WindChill::NoSummary,
                Some(text) => WindChill::Summary(text),
            },
        };

        Self {
            period: forecast.child_text("period"),
            text_summary: forecast.child_text("textSummary"),
            cloud_precip: summary_of("cloudPrecip"),
            abbreviated_summary: abbreviated.and_then(|a| a.child_text("textSummary")),
            pop: abbreviated.and_then(|a| a.child("pop")),
            temperatures: summary_of("temperatures"),
            winds: summary_of("winds"),
            precipitation: summary_of("precipitation"),
            wind_chill,
            relative_humidity: forecast.child_text("relativeHumidity"),
        }
    }

    fn into_period(self) -> ForecastPeriod {
        let owned = |value: Option<&str>| value.unwrap_or_default().to_string();

        let pop = self
            .pop
            .and_then(|pop| {
                let value = non_empty(Some(pop.text()))?;
                Some(format!("POP {value}{}", pop.attr("units").unwrap_or_default()))
            })
            .unwrap_or_default();

        let wind_chill_summary = match self.wind_chill {
            WindChill::Summary(text) => text.to_string(),
            WindChill::Absent | WindChill::NoSummary => String::new(),
        };

        ForecastPeriod {
            period: owned(self.period),
            temperature: owned(self.temperatures),
            pop,
            pop_summary: owned(self.precipitation),
            cloud_pop_summary: owned(self.cloud_precip),
            relative_humidity_percent: owned(self.relative_humidity),
            wind_summary: owned(self.winds),
            wind_chill_summary,
            summary: self
                .abbreviated_summary
                .map(|s| format!("{s}."))
                .unwrap_or_default(),
            full_summary: owned(self.text_summary),
        }
    }
}

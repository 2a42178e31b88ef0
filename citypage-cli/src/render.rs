use citypage_core::{ForecastPeriod, SiteRecord, WeatherReport};

pub fn site_line(site: &SiteRecord) -> String {
    format!("{} ({}) {}", site.site_name, site.province, site.code)
}

pub fn report(report: &WeatherReport) -> String {
    let mut lines = vec![
        format!(
            "Now: {} {}, {}",
            report.temperature, report.temperature_unit, report.conditions
        ),
    ];
    if report.relative_humidity_percent > 0 {
        lines.push(format!("Humidity: {}%", report.relative_humidity_percent));
    }
    lines.push(format!("Wind: {}", report.wind_summary));
    lines.push(format!("Wind chill: {}", report.wind_chill_summary));

    if !report.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings:".to_string());
        for warning in &report.warnings {
            lines.push(format!("  [{}] {}", warning.priority, warning.description));
        }
    }

    if !report.forecasts.is_empty() {
        lines.push(String::new());
        lines.push("Forecast:".to_string());
        for forecast in &report.forecasts {
            lines.extend(forecast_lines(forecast));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn forecast_lines(forecast: &ForecastPeriod) -> Vec<String> {
    let mut headline = format!("  {}: {}", forecast.period, forecast.summary);
    for extra in [&forecast.temperature, &forecast.pop] {
        if !extra.is_empty() {
            headline.push(' ');
            headline.push_str(extra);
        }
    }

    let mut lines = vec![headline];
    lines.extend(
        [&forecast.wind_summary, &forecast.wind_chill_summary]
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(|s| format!("    {s}")),
    );
    lines
}

/// Public city page feed.
pub const DEFAULT_BASE_URL: &str = "http://dd.weatheroffice.ec.gc.ca/citypage_weather/xml";

const SITE_LIST_DOCUMENT: &str = "siteList.xml";
/// English variant of each site's weather document.
const DOCUMENT_SUFFIX: &str = "_e.xml";

/// Locator of a site's weather document on the public feed.
///
/// ```
/// assert_eq!(
///     citypage_core::build_locator("s0000045", "AB"),
///     "http://dd.weatheroffice.ec.gc.ca/citypage_weather/xml/AB/s0000045_e.xml",
/// );
/// ```
pub fn build_locator(code: &str, province: &str) -> String {
    Endpoints::default().weather_document(code, province)
}

/// URL templates for the directory and the per-site documents under one base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn site_list(&self) -> String {
        format!("{}/{SITE_LIST_DOCUMENT}", self.base_url)
    }

    pub fn weather_document(&self, code: &str, province: &str) -> String {
        format!("{}/{province}/{code}{DOCUMENT_SUFFIX}", self.base_url)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_weather_document_locator() {
        assert_eq!(
            build_locator("s0000045", "AB"),
            "http://dd.weatheroffice.ec.gc.ca/citypage_weather/xml/AB/s0000045_e.xml"
        );
    }

    #[test]
    fn locator_is_a_pure_function_of_its_inputs() {
        assert_eq!(build_locator("s0000458", "ON"), build_locator("s0000458", "ON"));
        assert_ne!(build_locator("s0000458", "ON"), build_locator("s0000458", "QC"));
    }

    #[test]
    fn site_list_lives_under_base_url() {
        assert_eq!(
            Endpoints::default().site_list(),
            "http://dd.weatheroffice.ec.gc.ca/citypage_weather/xml/siteList.xml"
        );
    }

    #[test]
    fn custom_base_url_drops_trailing_slashes() {
        let endpoints = Endpoints::new("http://localhost:8080/mirror//");

        assert_eq!(endpoints.base_url(), "http://localhost:8080/mirror");
        assert_eq!(
            endpoints.weather_document("s0000001", "BC"),
            "http://localhost:8080/mirror/BC/s0000001_e.xml"
        );
    }
}

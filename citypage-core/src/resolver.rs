use tracing::{debug, instrument};

use crate::{
    document::parse_weather_document,
    error::LookupError,
    fetch::{Fetcher, HttpFetcher},
    locator::Endpoints,
    model::{SiteRecord, WeatherReport},
    sites::parse_site_directory,
};

/// Resolves sites and fetches their weather through a [`Fetcher`].
///
/// Nothing is cached between calls, so concurrent lookups are independent.
#[derive(Debug, Clone)]
pub struct CityPageClient<F = HttpFetcher> {
    fetcher: F,
    endpoints: Endpoints,
}

impl<F: Fetcher> CityPageClient<F> {
    pub fn new(fetcher: F, endpoints: Endpoints) -> Self {
        Self { fetcher, endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Fetch and parse the full site directory.
    #[instrument(skip(self))]
    pub async fn site_directory(&self) -> Result<Vec<SiteRecord>, LookupError> {
        let body = self.fetcher.fetch(&self.endpoints.site_list()).await?;
        Ok(parse_site_directory(&body)?)
    }

    /// First directory entry named `name`, restricted to `province` when one is given.
    #[instrument(skip(self))]
    pub async fn find_site_by_name(
        &self,
        name: &str,
        province: Option<&str>,
    ) -> Result<SiteRecord, LookupError> {
        let sites = self.site_directory().await?;

        let site = sites
            .into_iter()
            .find(|site| matches_site(site, name, province))
            .ok_or_else(|| LookupError::SiteNotFound {
                name: name.to_string(),
                province: province.map(str::to_string),
            })?;

        debug!(code = %site.code, province = %site.province, "Resolved site");
        Ok(site)
    }

    #[instrument(skip(self))]
    pub async fn weather_by_name(
        &self,
        name: &str,
        province: Option<&str>,
    ) -> Result<WeatherReport, LookupError> {
        let site = self.find_site_by_name(name, province).await?;
        self.weather_by_code(&site.code, &site.province).await
    }

    #[instrument(skip(self))]
    pub async fn weather_by_code(
        &self,
        code: &str,
        province: &str,
    ) -> Result<WeatherReport, LookupError> {
        let url = self.endpoints.weather_document(code, province);
        let body = self.fetcher.fetch(&url).await?;
        Ok(parse_weather_document(&body)?)
    }
}

/// Case-insensitive, whitespace-trimmed match on name, and on province when a
/// non-blank one is given.
pub fn matches_site(site: &SiteRecord, name: &str, province: Option<&str>) -> bool {
    let same = |a: &str, b: &str| a.trim().to_uppercase() == b.trim().to_uppercase();

    let province = province.filter(|p| !p.trim().is_empty());
    same(&site.site_name, name) && province.is_none_or(|p| same(&site.province, p))
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Mutex};

    use async_trait::async_trait;
    use reqwest::StatusCode;

    use super::*;
    use crate::error::{ParseError, TransportError};

    const DIRECTORY: &str = r#"<siteList>
  <site code="s0000001"><nameEn>Athabasca</nameEn><provinceCode>AB</provinceCode></site>
  <site code="s0000045"><nameEn>Edmonton</nameEn><provinceCode>AB</provinceCode></site>
  <site code="s0000600"><nameEn>Springfield</nameEn><provinceCode>MB</provinceCode></site>
  <site code="s0000601"><nameEn>Springfield</nameEn><provinceCode>NS</provinceCode></site>
</siteList>"#;

    const EDMONTON: &str = r#"<siteData>
  <currentConditions>
    <condition>Clear</condition>
    <temperature unitType="metric" units="C">-20.3</temperature>
  </currentConditions>
</siteData>"#;

    /// Serves canned bodies by URL and records every request.
    #[derive(Debug, Default)]
    struct StubFetcher {
        bodies: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn with(mut self, url: String, body: &str) -> Self {
            self.bodies.insert(url, body.to_string());
            self
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().map(|r| r.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl Fetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<String, TransportError> {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(url.to_string());
            }
            self.bodies
                .get(url)
                .cloned()
                .ok_or_else(|| TransportError::Status {
                    url: url.to_string(),
                    status: StatusCode::NOT_FOUND,
                    body: String::new(),
                })
        }
    }

    fn client() -> CityPageClient<StubFetcher> {
        let endpoints = Endpoints::default();
        let fetcher = StubFetcher::default()
            .with(endpoints.site_list(), DIRECTORY)
            .with(endpoints.weather_document("s0000045", "AB"), EDMONTON);
        CityPageClient::new(fetcher, endpoints)
    }

    fn site(name: &str, code: &str, province: &str) -> SiteRecord {
        SiteRecord {
            site_name: name.into(),
            code: code.into(),
            province: province.into(),
        }
    }

    #[test]
    fn matching_ignores_case_and_surrounding_whitespace() {
        let edmonton = site("Edmonton", "s0000045", "AB");

        assert!(matches_site(&edmonton, "edmonton", Some("ab")));
        assert!(matches_site(&edmonton, "  EDMONTON ", Some(" Ab ")));
        assert!(matches_site(&edmonton, "Edmonton", None));
        assert!(matches_site(&edmonton, "Edmonton", Some("  ")));
        assert!(!matches_site(&edmonton, "Edmonton", Some("BC")));
        assert!(!matches_site(&edmonton, "Edmont", None));
    }

    #[test]
    fn matching_handles_non_ascii_names() {
        let site = site("Trois-Rivières", "s0000003", "QC");
        assert!(matches_site(&site, "TROIS-RIVIÈRES", Some("qc")));
    }

    #[tokio::test]
    async fn finds_site_regardless_of_casing() {
        let client = client();

        let exact = client
            .find_site_by_name("Edmonton", Some("AB"))
            .await
            .expect("site should resolve");
        let lower = client
            .find_site_by_name("edmonton", Some("ab"))
            .await
            .expect("site should resolve");

        assert_eq!(exact, site("Edmonton", "s0000045", "AB"));
        assert_eq!(exact, lower);
    }

    #[tokio::test]
    async fn first_match_wins_without_province() {
        let client = client();

        let found = client
            .find_site_by_name("springfield", None)
            .await
            .expect("site should resolve");
        assert_eq!(found.province, "MB");

        let found = client
            .find_site_by_name("springfield", Some("ns"))
            .await
            .expect("site should resolve");
        assert_eq!(found.code, "s0000601");
    }

    #[tokio::test]
    async fn unknown_site_is_reported() {
        let err = client()
            .find_site_by_name("NON-EXISTENT SITE", Some("AB"))
            .await
            .unwrap_err();

        assert!(matches!(
            &err,
            LookupError::SiteNotFound { name, province }
                if name == "NON-EXISTENT SITE" && province.as_deref() == Some("AB")
        ));
        assert_eq!(err.to_string(), "No site with this name found.");
    }

    #[tokio::test]
    async fn province_mismatch_is_not_found() {
        let err = client()
            .find_site_by_name("Edmonton", Some("BC"))
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::SiteNotFound { .. }));
    }

    #[tokio::test]
    async fn weather_by_name_resolves_then_fetches() {
        let client = client();

        let report = client
            .weather_by_name("Edmonton", Some("AB"))
            .await
            .expect("weather should load");

        assert_eq!(report.temperature, "-20");
        assert_eq!(report.temperature_unit, "C");
        assert_eq!(
            client.fetcher.requests(),
            vec![
                client.endpoints().site_list(),
                client.endpoints().weather_document("s0000045", "AB"),
            ]
        );
    }

    #[tokio::test]
    async fn failed_resolution_skips_weather_fetch() {
        let client = client();

        let err = client
            .weather_by_name("INVALIDNAME", Some("AB"))
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::SiteNotFound { .. }));
        assert_eq!(client.fetcher.requests(), vec![client.endpoints().site_list()]);
    }

    #[tokio::test]
    async fn weather_by_code_skips_directory() {
        let client = client();

        let report = client
            .weather_by_code("s0000045", "AB")
            .await
            .expect("weather should load");

        assert_eq!(report.conditions, "Clear");
        assert_eq!(
            client.fetcher.requests(),
            vec![client.endpoints().weather_document("s0000045", "AB")]
        );
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let err = client()
            .weather_by_code("INVALIDCODE", "AB")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LookupError::Transport(TransportError::Status { status, .. }) if status == StatusCode::NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn malformed_directory_fails_lookup() {
        let endpoints = Endpoints::default();
        let fetcher = StubFetcher::default().with(endpoints.site_list(), "<siteList><site>");
        let client = CityPageClient::new(fetcher, endpoints);

        let err = client
            .find_site_by_name("Edmonton", None)
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Parse(ParseError::MalformedXml(_))));
    }
}

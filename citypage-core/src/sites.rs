use tracing::debug;

use crate::{error::ParseError, model::SiteRecord, xml::Element};

/// Parse the site directory into records, in document order.
///
/// Entries lacking a code, an English name or a province are left out; only
/// a document that is not XML at all (or not a site list) fails the call.
pub fn parse_site_directory(xml: &str) -> Result<Vec<SiteRecord>, ParseError> {
    let root = Element::parse(xml)?;
    if root.name() != "siteList" {
        return Err(ParseError::MissingRequiredSection("siteList"));
    }

    let mut sites = Vec::new();
    for (index, site) in root.children("site").enumerate() {
        match site_record(site) {
            Some(record) => sites.push(record),
            None => debug!(index, "Skipping incomplete site entry"),
        }
    }

    debug!(count = sites.len(), "Parsed site directory");
    Ok(sites)
}

fn site_record(site: &Element) -> Option<SiteRecord> {
    Some(SiteRecord {
        site_name: non_blank(site.child_text("nameEn"))?,
        code: non_blank(site.attr("code"))?,
        province: non_blank(site.child_text("provinceCode"))?,
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

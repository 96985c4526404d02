//! ATS report link discovery
//!
//! For a (report type, date, price zone) triple the portal serves an index
//! page at `{base}/nreport?access=public&rname=..&rdate=YYYYMMDD&region=..`.
//! Every archive on that page is an anchor whose `href` contains `zip=1`;
//! the `href` values are relative to `{base}/nreport`.

use std::fmt;

use chrono::NaiveDate;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::EtlError;
use crate::transport::{HttpGet, Transport};

const ARCHIVE_LINK_SELECTOR: &str = r#"a[href*="zip=1"]"#;

/// Wholesale market price zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PriceZone {
    Unspecified,
    /// European part of Russia and the Urals
    European,
    Siberian,
}

/// Zones requested by most ATS reports
pub static DEFAULT_PRICE_ZONES: [PriceZone; 2] = [PriceZone::European, PriceZone::Siberian];

impl PriceZone {
    /// Value of the `region` query parameter
    pub fn code(self) -> &'static str {
        match self {
            PriceZone::Unspecified => "",
            PriceZone::European => "eur",
            PriceZone::Siberian => "sib",
        }
    }

    /// Zone number as used in report rows (0 = unspecified)
    pub fn number(self) -> u8 {
        match self {
            PriceZone::Unspecified => 0,
            PriceZone::European => 1,
            PriceZone::Siberian => 2,
        }
    }
}

impl fmt::Display for PriceZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// URL of the report index page
///
/// # Example
///
/// ```
/// # use chrono::NaiveDate;
/// # use energo_reports::links::{index_url, PriceZone};
/// let date = NaiveDate::from_ymd_opt(2018, 10, 1).unwrap();
/// assert_eq!(
///     index_url("https://www.atsenergo.ru", "TS_PART_REP_LINE", date, PriceZone::Siberian),
///     "https://www.atsenergo.ru/nreport?access=public&rname=TS_PART_REP_LINE&rdate=20181001&region=sib"
/// );
/// ```
pub fn index_url(base_url: &str, report_type: &str, date: NaiveDate, zone: PriceZone) -> String {
    format!(
        "{}/nreport?access=public&rname={}&rdate={}&region={}",
        base_url.trim_end_matches('/'),
        report_type,
        date.format("%Y%m%d"),
        zone.code()
    )
}

/// Extract archive links from an index page
///
/// Relative `href` values are resolved against `{base}/nreport`. Links that
/// cannot be resolved are logged and skipped. Document order is kept.
pub fn parse_report_links(html: &str, base_url: &str) -> Result<Vec<String>, EtlError> {
    let base = Url::parse(&format!("{}/nreport", base_url.trim_end_matches('/')))
        .map_err(|e| EtlError::Config(format!("Invalid base URL '{}': {}", base_url, e)))?;
    let selector = Selector::parse(ARCHIVE_LINK_SELECTOR)
        .map_err(|e| EtlError::Config(format!("Invalid link selector: {}", e)))?;

    let document = Html::parse_document(html);
    let links = document
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .filter_map(|href| match base.join(href.trim()) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(href, error = %e, "Skipping unresolvable archive link");
                None
            }
        })
        .map(|url| url.to_string())
        .collect();

    Ok(links)
}

/// List the archive URLs of one report for one date and zone
///
/// # Returns
///
/// * `Ok(Vec<String>)` - At least one archive URL
/// * `Err(EtlError::NoLinksFound)` - Index page lists no archives
/// * `Err(EtlError::FetchExhausted)` - Index page could not be fetched
pub fn list_report_urls<C: HttpGet>(
    transport: &Transport<C>,
    base_url: &str,
    report_type: &str,
    date: NaiveDate,
    zone: PriceZone,
) -> Result<Vec<String>, EtlError> {
    let url = index_url(base_url, report_type, date, zone);
    debug!(url = %url, "Fetching report index");

    let page = transport.fetch(&url)?;
    let links = parse_report_links(&String::from_utf8_lossy(&page), base_url)?;

    if links.is_empty() {
        return Err(EtlError::NoLinksFound {
            report_type: report_type.to_string(),
            date: date.to_string(),
            zone: zone.code().to_string(),
        });
    }

    info!(report_type, %date, zone = zone.code(), links = links.len(), "Discovered report archives");
    Ok(links)
}

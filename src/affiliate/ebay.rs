//! eBay Partner Network rewriting.

use tracing::warn;
use url::Url;

use super::AffiliateNetwork;

const ROVER_HOST: &str = "rover.ebay.com";

const FRAGMENTS: &[&str] = &["ebay."];

/// EPN rotation ids keyed by exact lower-cased storefront hostname. A
/// hostname missing from this table passes through unrewritten even though
/// the fragment matched.
const ROTATIONS: &[(&str, &str)] = &[
    ("www.ebay.com", "711-53200-19255-0"),
    ("www.ebay.co.uk", "710-53481-19255-0"),
    ("www.ebay.de", "707-53477-19255-0"),
    ("www.ebay.com.au", "705-53470-19255-0"),
    ("www.ebay.fr", "709-53476-19255-0"),
    ("www.ebay.it", "724-53478-19255-0"),
    ("www.ebay.es", "1185-53479-19255-0"),
];

/// Listing noise stripped from a storefront URL before wrapping.
const STRIP_PARAMS: &[&str] = &["_trksid", "_trkparms", "ssPageName", "roken", "hash"];

/// The eBay Partner Network.
///
/// Already-wrapped `rover.ebay.com` links are hijacked: only `pub` and
/// `campid` are overwritten and every other query parameter, including the
/// wrapped target in `mpre`, is left byte-identical. Direct storefront
/// links are cleaned and wrapped in a fresh rover URL.
pub struct Ebay {
    publisher_id: String,
    campaign_id: String,
}

impl Ebay {
    pub fn new(publisher_id: String, campaign_id: String) -> Self {
        Self {
            publisher_id,
            campaign_id,
        }
    }

    /// Overwrites the publisher and campaign parameters in-place, touching
    /// nothing else. Works on the raw query string so untouched pairs keep
    /// their exact encoding.
    fn hijack(&self, url: &Url) -> Option<String> {
        let query = url.query()?;

        let rewritten: Vec<String> = query
            .split('&')
            .map(|pair| {
                if pair.starts_with("pub=") {
                    format!("pub={}", self.publisher_id)
                } else if pair.starts_with("campid=") {
                    format!("campid={}", self.campaign_id)
                } else {
                    pair.to_string()
                }
            })
            .collect();

        let mut out = url.clone();
        out.set_query(Some(&rewritten.join("&")));
        Some(out.to_string())
    }

    /// Strips tracking noise from a storefront URL, then wraps it in the
    /// rover redirect endpoint for the storefront's rotation.
    fn wrap(&self, target: &Url, rotation: &str) -> Option<String> {
        let kept: Vec<(String, String)> = target
            .query_pairs()
            .filter(|(key, _)| !is_tracking_param(key))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let mut cleaned = target.clone();
        if kept.is_empty() {
            cleaned.set_query(None);
        } else {
            cleaned.query_pairs_mut().clear().extend_pairs(&kept);
        }

        let mut rover = Url::parse(&format!("https://{ROVER_HOST}/rover/1/{rotation}/1")).ok()?;
        rover
            .query_pairs_mut()
            .append_pair("icep_ff3", "2")
            .append_pair("pub", &self.publisher_id)
            .append_pair("campid", &self.campaign_id)
            .append_pair("toolid", "10001")
            .append_pair("mpre", cleaned.as_str());

        Some(rover.to_string())
    }
}

impl AffiliateNetwork for Ebay {
    fn name(&self) -> &'static str {
        "ebay"
    }

    fn fragments(&self) -> &'static [&'static str] {
        FRAGMENTS
    }

    fn rewrite(&self, link: &str) -> Option<String> {
        let url = match Url::parse(link) {
            Ok(url) => url,
            Err(e) => {
                warn!("Skipping affiliate rewrite of unparseable destination {link:?}: {e}");
                return None;
            }
        };

        let host = url.host_str()?.to_ascii_lowercase();

        if host == ROVER_HOST {
            return self.hijack(&url);
        }

        let rotation = ROTATIONS
            .iter()
            .find(|(h, _)| *h == host)
            .map(|(_, rotation)| *rotation)?;

        self.wrap(&url, rotation)
    }
}

fn is_tracking_param(key: &str) -> bool {
    key.starts_with("utm_") || STRIP_PARAMS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> Ebay {
        Ebay::new("5574223344".to_string(), "5338011223".to_string())
    }

    #[test]
    fn matches_ebay_family_domains() {
        let n = network();
        assert!(n.matches("www.ebay.co.uk"));
        assert!(n.matches("rover.ebay.com"));
        assert!(n.matches("cgi.EBAY.de"));
        assert!(!n.matches("example.com"));
    }

    #[test]
    fn hijack_touches_only_publisher_parameters() {
        let n = network();
        let wrapped = "https://rover.ebay.com/rover/1/710-53481-19255-0/1?icep_ff3=2&pub=999&campid=111&toolid=10001&mpre=https%3A%2F%2Fwww.ebay.co.uk%2Fitm%2F230675%3Fvar%3Dabc";

        let out = n.rewrite(wrapped).unwrap();
        assert_eq!(
            out,
            "https://rover.ebay.com/rover/1/710-53481-19255-0/1?icep_ff3=2&pub=5574223344&campid=5338011223&toolid=10001&mpre=https%3A%2F%2Fwww.ebay.co.uk%2Fitm%2F230675%3Fvar%3Dabc"
        );
    }

    #[test]
    fn wrap_strips_tracking_and_encodes_target() {
        let n = network();
        let out = n
            .rewrite("https://www.ebay.co.uk/itm/230675?var=abc&utm_source=feed&utm_medium=rss")
            .unwrap();

        assert!(out.starts_with("https://rover.ebay.com/rover/1/710-53481-19255-0/1?"));
        assert!(out.contains("pub=5574223344"));
        assert!(out.contains("campid=5338011223"));
        // The cleaned target keeps its real parameters and loses the noise.
        assert!(out.contains("var%3Dabc"));
        assert!(!out.contains("utm_source"));
    }

    #[test]
    fn unknown_storefront_passes_through() {
        let n = network();
        assert!(n.matches("shop.ebay.example"));
        assert_eq!(n.rewrite("https://shop.ebay.example/itm/1"), None);
    }
}

//! Awin (Affiliate Window) rewriting.
//!
//! Implemented but not registered in the default rewriter; see
//! [`super::default_rewriter`] and the `AFFILIATE_EXTRA_NETWORKS` flag.

use tracing::warn;
use url::Url;

use super::AffiliateNetwork;

const CREAD_HOST: &str = "www.awin1.com";

const FRAGMENTS: &[&str] = &["awin1.com", "etsy."];

/// Awin merchant ids keyed by exact lower-cased partner hostname.
const MERCHANTS: &[(&str, &str)] = &[("www.etsy.com", "6091"), ("www.etsy.co.uk", "6092")];

/// Deployment publisher id used when none is supplied.
const DEFAULT_AFFILIATE_ID: &str = "123417";

/// The Awin network (formerly Affiliate Window).
///
/// Already-wrapped `www.awin1.com/cread.php` links are hijacked by
/// overwriting `awinaffid` only; direct partner links are cleaned of
/// `utm_*` noise and wrapped in the cread endpoint.
pub struct Awin {
    affiliate_id: String,
}

impl Awin {
    pub fn new(affiliate_id: String) -> Self {
        Self { affiliate_id }
    }

    fn hijack(&self, url: &Url) -> Option<String> {
        let query = url.query()?;

        let rewritten: Vec<String> = query
            .split('&')
            .map(|pair| {
                if pair.starts_with("awinaffid=") {
                    format!("awinaffid={}", self.affiliate_id)
                } else {
                    pair.to_string()
                }
            })
            .collect();

        let mut out = url.clone();
        out.set_query(Some(&rewritten.join("&")));
        Some(out.to_string())
    }

    fn wrap(&self, target: &Url, merchant_id: &str) -> Option<String> {
        let kept: Vec<(String, String)> = target
            .query_pairs()
            .filter(|(key, _)| !key.starts_with("utm_"))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let mut cleaned = target.clone();
        if kept.is_empty() {
            cleaned.set_query(None);
        } else {
            cleaned.query_pairs_mut().clear().extend_pairs(&kept);
        }

        let mut cread = Url::parse(&format!("https://{CREAD_HOST}/cread.php")).ok()?;
        cread
            .query_pairs_mut()
            .append_pair("awinmid", merchant_id)
            .append_pair("awinaffid", &self.affiliate_id)
            .append_pair("ued", cleaned.as_str());

        Some(cread.to_string())
    }
}

impl Default for Awin {
    fn default() -> Self {
        Self::new(DEFAULT_AFFILIATE_ID.to_string())
    }
}

impl AffiliateNetwork for Awin {
    fn name(&self) -> &'static str {
        "awin"
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

        if host == CREAD_HOST {
            return self.hijack(&url);
        }

        let merchant_id = MERCHANTS
            .iter()
            .find(|(h, _)| *h == host)
            .map(|(_, merchant_id)| *merchant_id)?;

        self.wrap(&url, merchant_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hijack_overwrites_affiliate_id_only() {
        let n = Awin::default();
        let wrapped =
            "https://www.awin1.com/cread.php?awinmid=6091&awinaffid=999&clickref=x&ued=https%3A%2F%2Fwww.etsy.com%2Flisting%2F1";

        let out = n.rewrite(wrapped).unwrap();
        assert_eq!(
            out,
            "https://www.awin1.com/cread.php?awinmid=6091&awinaffid=123417&clickref=x&ued=https%3A%2F%2Fwww.etsy.com%2Flisting%2F1"
        );
    }

    #[test]
    fn wrap_known_partner() {
        let n = Awin::default();
        let out = n
            .rewrite("https://www.etsy.com/listing/1?ref=shop&utm_campaign=social")
            .unwrap();

        assert!(out.starts_with("https://www.awin1.com/cread.php?awinmid=6091&awinaffid=123417"));
        assert!(out.contains("ref%3Dshop"));
        assert!(!out.contains("utm_campaign"));
    }

    #[test]
    fn unknown_partner_host_passes_through() {
        let n = Awin::default();
        assert!(n.matches("community.etsy.example"));
        assert_eq!(n.rewrite("https://community.etsy.example/thread/1"), None);
    }
}

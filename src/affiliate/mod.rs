//! Affiliate link rewriting for short-link destinations.
//!
//! Two phases: a single multi-pattern pre-filter over the destination's
//! domain decides whether any network could apply at all, then each
//! registered network is tested independently and, on match, rewrites the
//! destination. Rewriting is best-effort: any parse failure passes the
//! original destination through unmodified.

mod awin;
mod ebay;

pub use awin::Awin;
pub use ebay::Ebay;

use regex::RegexSet;

/// A commission-tracking partner whose links carry a publisher identifier.
///
/// Implementations decide per URL between two strategies: *hijack* (the
/// destination is already wrapped in the network's redirector; only the
/// publisher/campaign parameters are overwritten) and *wrap* (a direct
/// partner URL is cleaned of tracking noise and wrapped in the network's
/// redirect endpoint).
pub trait AffiliateNetwork: Send + Sync {
    fn name(&self) -> &'static str;

    /// Lower-cased domain fragments marking a destination as possibly
    /// belonging to this network.
    fn fragments(&self) -> &'static [&'static str];

    /// Whether this network could claim the destination's domain.
    fn matches(&self, domain: &str) -> bool {
        let domain = domain.to_ascii_lowercase();
        self.fragments().iter().any(|f| domain.contains(f))
    }

    /// Rewrites a destination URL, or `None` to pass it through unchanged.
    fn rewrite(&self, url: &str) -> Option<String>;
}

/// The registered networks plus the phase-1 pre-filter.
///
/// Built once at startup and shared read-only for the life of the process;
/// the matcher is immutable state, not per-call scaffolding.
pub struct AffiliateRewriter {
    networks: Vec<Box<dyn AffiliateNetwork>>,
    prefilter: RegexSet,
}

impl AffiliateRewriter {
    /// Builds a rewriter over a list of networks.
    pub fn new(networks: Vec<Box<dyn AffiliateNetwork>>) -> Self {
        let patterns: Vec<String> = networks
            .iter()
            .flat_map(|n| n.fragments())
            .map(|f| regex::escape(f))
            .collect();
        let prefilter = RegexSet::new(&patterns).expect("escaped fragments are valid patterns");

        Self {
            networks,
            prefilter,
        }
    }

    /// Phase 1: one pass over the lower-cased domain answering whether any
    /// registered network could possibly apply.
    pub fn might_match(&self, domain: &str) -> bool {
        self.prefilter.is_match(&domain.to_ascii_lowercase())
    }

    /// Phase 2: first network claiming the domain that produces a rewrite
    /// wins; if none does, the original destination is returned unchanged.
    pub fn rewrite(&self, domain: &str, url: &str) -> String {
        for network in &self.networks {
            if network.matches(domain)
                && let Some(rewritten) = network.rewrite(url)
            {
                return rewritten;
            }
        }
        url.to_string()
    }

    /// Names of the registered networks, for the startup summary log.
    pub fn network_names(&self) -> Vec<&'static str> {
        self.networks.iter().map(|n| n.name()).collect()
    }
}

/// The deployment's rewriter. eBay Partner Network is always registered;
/// Awin is implemented but only wired in when `extra_networks` is set
/// (`AFFILIATE_EXTRA_NETWORKS`).
pub fn default_rewriter(
    ebay_publisher_id: String,
    ebay_campaign_id: String,
    extra_networks: bool,
) -> AffiliateRewriter {
    let mut networks: Vec<Box<dyn AffiliateNetwork>> =
        vec![Box::new(Ebay::new(ebay_publisher_id, ebay_campaign_id))];

    if extra_networks {
        networks.push(Box::new(Awin::default()));
    }

    AffiliateRewriter::new(networks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewriter() -> AffiliateRewriter {
        default_rewriter("5574223344".to_string(), "5338011223".to_string(), false)
    }

    #[test]
    fn prefilter_spots_registered_fragments() {
        let r = rewriter();
        assert!(r.might_match("www.ebay.co.uk"));
        assert!(r.might_match("ROVER.EBAY.COM"));
        assert!(!r.might_match("news.example.org"));
        assert!(!r.might_match("en.wikipedia.org"));
    }

    #[test]
    fn unclaimed_domain_passes_through() {
        let r = rewriter();
        let url = "https://news.example.org/story/12";
        assert_eq!(r.rewrite("news.example.org", url), url);
    }

    #[test]
    fn unparseable_destination_passes_through() {
        let r = rewriter();
        assert_eq!(r.rewrite("www.ebay.com", "::not a url::"), "::not a url::");
    }

    #[test]
    fn awin_not_registered_by_default() {
        let r = rewriter();
        assert_eq!(r.network_names(), vec!["ebay"]);
        assert!(!r.might_match("www.awin1.com"));
    }

    #[test]
    fn extra_networks_flag_wires_awin() {
        let r = default_rewriter("5574223344".to_string(), "5338011223".to_string(), true);
        assert_eq!(r.network_names(), vec!["ebay", "awin"]);
        assert!(r.might_match("www.awin1.com"));
    }
}

//! Legacy URL resolution: the classification and translation cascade.
//!
//! An inbound predecessor-forum URL is classified (query-string rules
//! first, then an ordered list of path patterns), its legacy identifier is
//! translated through the mapping table, pagination is converted to an
//! offset, any pending semantic action is resolved, and a canonical
//! destination is constructed. Every translation miss is terminal: the
//! engine never guesses a destination.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::error;
use url::Url;

use crate::application::services::{OriginService, TranslatorService};
use crate::domain::entities::{ItemKind, LinkRef, RedirectAction, Resolution, ResolutionStatus};
use crate::domain::repositories::{MappingRepository, OriginRepository, PlatformRepository};

/// Query parameters that classify a URL on their own, highest priority
/// first. The first parameter present with a positive integer value wins;
/// any later ones are ignored even when also present.
const QUERY_RULES: &[(&str, ItemKind)] = &[
    ("forumid", ItemKind::Microcosm),
    ("postid", ItemKind::Comment),
    ("p", ItemKind::Comment),
    ("pmid", ItemKind::Huddle),
    ("threadid", ItemKind::Conversation),
    ("t", ItemKind::Conversation),
    ("userid", ItemKind::Profile),
    ("u", ItemKind::Profile),
];

/// What one path pattern learned about the URL.
struct PathMatch {
    kind: ItemKind,
    old_id: Option<i64>,
    page: Option<i64>,
    action: Option<RedirectAction>,
    search: Option<String>,
}

impl PathMatch {
    fn item(kind: ItemKind, old_id: i64) -> Self {
        Self {
            kind,
            old_id: Some(old_id),
            page: None,
            action: None,
            search: None,
        }
    }

    fn collection(kind: ItemKind) -> Self {
        Self {
            kind,
            old_id: None,
            page: None,
            action: None,
            search: None,
        }
    }
}

/// One entry in the path cascade: a pattern plus the extractor run on its
/// captures.
struct PathRule {
    pattern: Regex,
    extract: fn(&regex::Captures) -> PathMatch,
}

fn capture_i64(caps: &regex::Captures, index: usize) -> i64 {
    caps.get(index)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// The ordered path cascade. Order is load-bearing: `lastpostinthread1.html`
/// contains `thread1.html`, and `printthread1.html` contains `thread1.html`,
/// so the more specific patterns sit first and the loop stops at the first
/// match.
static PATH_RULES: LazyLock<Vec<PathRule>> = LazyLock::new(|| {
    fn rule(pattern: &str, extract: fn(&regex::Captures) -> PathMatch) -> PathRule {
        PathRule {
            pattern: Regex::new(pattern).expect("static path pattern"),
            extract,
        }
    }

    vec![
        rule(r"lastpostinthread(\d+)\.html", |c| PathMatch {
            action: Some(RedirectAction::NewComment),
            ..PathMatch::item(ItemKind::Conversation, capture_i64(c, 1))
        }),
        rule(r"newpostinthread(\d+)\.html", |c| PathMatch {
            action: Some(RedirectAction::NewComment),
            ..PathMatch::item(ItemKind::Conversation, capture_i64(c, 1))
        }),
        // Print views with a page land on page one of the destination; the
        // legacy page number no longer lines up with anything.
        rule(r"printthread(\d+)-\d+\.html", |c| {
            PathMatch::item(ItemKind::Conversation, capture_i64(c, 1))
        }),
        rule(r"printthread(\d+)\.html", |c| {
            PathMatch::item(ItemKind::Conversation, capture_i64(c, 1))
        }),
        // Thread pages likewise resolve to page one: legacy pagination does
        // not survive the migration, and a stale page is worse than the top
        // of the conversation.
        rule(r"thread(\d+)-\d+\.html", |c| {
            PathMatch::item(ItemKind::Conversation, capture_i64(c, 1))
        }),
        rule(r"thread(\d+)\.html", |c| {
            PathMatch::item(ItemKind::Conversation, capture_i64(c, 1))
        }),
        rule(r"post(\d+)-\d+\.html", |c| {
            PathMatch::item(ItemKind::Comment, capture_i64(c, 1))
        }),
        rule(r"post(\d+)\.html", |c| {
            PathMatch::item(ItemKind::Comment, capture_i64(c, 1))
        }),
        rule(r"forum(\d+)-(\d+)\.html", |c| PathMatch {
            page: Some(capture_i64(c, 2)),
            ..PathMatch::item(ItemKind::Microcosm, capture_i64(c, 1))
        }),
        rule(r"forum(\d+)\.html", |c| {
            PathMatch::item(ItemKind::Microcosm, capture_i64(c, 1))
        }),
        // Announcements were imported as conversations.
        rule(r"announcement(\d+)\.html", |c| {
            PathMatch::item(ItemKind::Conversation, capture_i64(c, 1))
        }),
        // Legacy links arrive in both cases; search is lower-case only.
        rule(r"members-([a-zA-Z])\.html", |c| PathMatch {
            action: Some(RedirectAction::Search),
            search: c.get(1).map(|m| m.as_str().to_ascii_lowercase()),
            ..PathMatch::collection(ItemKind::Profile)
        }),
        rule(r"member(\d+)\.html", |c| {
            PathMatch::item(ItemKind::Profile, capture_i64(c, 1))
        }),
        rule(r"attachment(\d+)\.html", |c| {
            PathMatch::item(ItemKind::Attachment, capture_i64(c, 1))
        }),
        rule(r"memberlist\.html", |_| PathMatch::collection(ItemKind::Profile)),
        rule(r"online\.html", |_| PathMatch {
            action: Some(RedirectAction::Online),
            ..PathMatch::collection(ItemKind::Profile)
        }),
        rule(r"private\.html", |_| PathMatch::collection(ItemKind::Huddle)),
        rule(r"subscription\.html", |_| PathMatch::collection(ItemKind::Update)),
        rule(r"usercp\.html", |_| PathMatch::collection(ItemKind::Update)),
    ]
});

/// Converts a legacy one-based page number to a destination offset.
///
/// Pages 0 and 1 map to an offset equal to the page value itself, not to
/// zero. Legacy clients depend on the quirk, so it stays.
pub fn page_to_offset(page: i64, page_size: i64) -> i64 {
    if page > 1 { (page - 1) * page_size } else { page }
}

/// Legacy URLs frequently arrive as bare paths; parse them against a
/// throwaway base so the query string is still addressable.
fn parse_legacy_url(raw: &str) -> Option<Url> {
    static BASE: LazyLock<Url> =
        LazyLock::new(|| Url::parse("http://legacy.invalid/").expect("static base URL"));
    Url::options().base_url(Some(&BASE)).parse(raw).ok()
}

/// First positive integer value of a query parameter, if present.
fn positive_param(url: &Url, name: &str) -> Option<i64> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .and_then(|(_, value)| value.parse::<i64>().ok())
        .filter(|v| *v > 0)
}

/// The legacy URL resolver.
///
/// Stateless beyond its collaborators; each [`resolve`](Self::resolve) call
/// is an independent, short-lived computation.
pub struct ResolverService<O, M, P>
where
    O: OriginRepository,
    M: MappingRepository,
    P: PlatformRepository,
{
    origins: OriginService<O>,
    translator: TranslatorService<M>,
    platform: Arc<P>,
    /// Apex domain the per-site file hosts hang off, e.g. `example.com`
    /// for `https://{subdomain}.example.com/api/v1/files/{hash}`.
    platform_domain: String,
}

impl<O, M, P> ResolverService<O, M, P>
where
    O: OriginRepository,
    M: MappingRepository,
    P: PlatformRepository,
{
    /// Creates a new resolver.
    pub fn new(
        origins: OriginService<O>,
        translator: TranslatorService<M>,
        platform: Arc<P>,
        platform_domain: String,
    ) -> Self {
        Self {
            origins,
            translator,
            platform,
            platform_domain,
        }
    }

    /// Resolves a legacy URL for a site onto the current addressing scheme.
    ///
    /// Never returns an error: every failure mode ends in a `Resolution`
    /// with status [`ResolutionStatus::NotFound`]. Store failures along the
    /// way are logged but presented identically to a miss.
    pub async fn resolve(
        &self,
        site_id: i64,
        raw_url: &str,
        profile_id: Option<i64>,
    ) -> Resolution {
        let mut res = Resolution::unresolved(raw_url);

        // Origin gate: a site that was never migrated has nothing to
        // resolve against.
        let Some(origin) = self.origins.get_origin(site_id).await else {
            return res;
        };

        let Some(url) = parse_legacy_url(raw_url) else {
            return res;
        };
        res.origin = Some(origin.clone());
        res.url = Some(url.clone());

        // Query-string classification outranks everything. Once a
        // parameter matched, a failed translation is terminal; there is no
        // fallback to the path patterns.
        let mut query_classified = false;
        for (param, kind) in QUERY_RULES {
            let Some(old_id) = positive_param(&url, param) else {
                continue;
            };
            query_classified = true;

            let item_id = self
                .translator
                .get_new_id(origin.origin_id, *kind, old_id)
                .await;
            if item_id == 0 {
                return res;
            }
            res.item_kind = Some(*kind);
            res.item_id = item_id;
            break;
        }

        if !query_classified {
            let matched = PATH_RULES
                .iter()
                .find_map(|rule| rule.pattern.captures(url.path()).map(|c| (rule.extract)(&c)));

            let Some(m) = matched else {
                // Unrecognized URL shape.
                return res;
            };

            res.item_kind = Some(m.kind);
            res.action = m.action;
            res.search = m.search;

            if let Some(old_id) = m.old_id {
                let item_id = self
                    .translator
                    .get_new_id(origin.origin_id, m.kind, old_id)
                    .await;
                if item_id == 0 {
                    return res;
                }
                res.item_id = item_id;
            }

            if let Some(page) = m.page {
                res.offset = page_to_offset(page, m.kind.page_size());
            }
        }

        // Pagination from the query string; the page size depends on what
        // the URL resolved to, defaulting to the comment page size.
        if let Some(page) = positive_param(&url, "page") {
            let page_size = res
                .item_kind
                .map(ItemKind::page_size)
                .unwrap_or(ItemKind::Comment.page_size());
            res.offset = page_to_offset(page, page_size);
        }

        // `goto=newpost` is the only mapped action hint.
        if url
            .query_pairs()
            .any(|(key, value)| key == "goto" && value == "newpost")
        {
            res.action = Some(RedirectAction::NewComment);
        }

        if res.action == Some(RedirectAction::NewComment)
            && res.item_kind == Some(ItemKind::Conversation)
            && !self.resolve_new_comment(&mut res, profile_id).await
        {
            return res;
        }

        let Some(href) = self.build_destination(&res, site_id).await else {
            return res;
        };

        res.link = Some(LinkRef::permalink(href));
        res.status = ResolutionStatus::MovedPermanently;
        res
    }

    /// Resolves the jump-to-new-comment action on a conversation, switching
    /// the resolution to the specific comment. Returns `false` on any
    /// failure, which is terminal for the caller.
    async fn resolve_new_comment(&self, res: &mut Resolution, profile_id: Option<i64>) -> bool {
        // Without a requester there is no read state to jump from.
        let Some(profile_id) = profile_id else {
            return false;
        };

        let last_read = match self.platform.last_read_time(profile_id, res.item_id).await {
            // Never read: everything is new, start from the epoch.
            Ok(read) => read.unwrap_or(chrono::DateTime::UNIX_EPOCH),
            Err(e) => {
                error!("Read-state lookup failed for conversation {}: {e}", res.item_id);
                return false;
            }
        };

        match self.platform.comment_id_after(res.item_id, last_read).await {
            Ok(Some(comment_id)) => {
                res.item_kind = Some(ItemKind::Comment);
                res.item_id = comment_id;
                true
            }
            Ok(None) => false,
            Err(e) => {
                error!("Comment lookup failed for conversation {}: {e}", res.item_id);
                false
            }
        }
    }

    /// Builds the canonical destination for a finished classification.
    /// `None` means the resolution fails.
    async fn build_destination(&self, res: &Resolution, site_id: i64) -> Option<String> {
        let mut href = match res.item_kind? {
            ItemKind::Microcosm => {
                if res.item_id > 0 {
                    format!("/microcosms/{}/", res.item_id)
                } else {
                    "/microcosms/".to_string()
                }
            }
            ItemKind::Conversation => {
                if res.item_id == 0 {
                    return None;
                }
                format!("/conversations/{}/", res.item_id)
            }
            ItemKind::Comment => {
                if res.item_id == 0 {
                    return None;
                }
                format!("/comments/{}/", res.item_id)
            }
            ItemKind::Huddle => {
                if res.item_id > 0 {
                    format!("/huddles/{}/", res.item_id)
                } else {
                    "/huddles/".to_string()
                }
            }
            ItemKind::Attachment => self.build_file_url(res.item_id, site_id).await?,
            ItemKind::Profile => {
                if res.item_id > 0 {
                    format!("/profiles/{}/", res.item_id)
                } else {
                    match (res.action, res.search.as_deref()) {
                        (Some(RedirectAction::Search), Some(term)) => {
                            let encoded: String =
                                url::form_urlencoded::byte_serialize(term.as_bytes()).collect();
                            format!("/profiles/?q={encoded}")
                        }
                        (Some(RedirectAction::Online), _) => "/profiles/?online=true".to_string(),
                        _ => "/profiles/".to_string(),
                    }
                }
            }
            ItemKind::Update => "/updates/".to_string(),
        };

        // Only list-paginated destinations carry the converted offset.
        if res.offset > 0
            && res.item_kind.is_some_and(ItemKind::is_list_paginated)
        {
            let sep = if href.contains('?') { '&' } else { '?' };
            href.push_str(&format!("{sep}offset={}", res.offset));
        }

        Some(href)
    }

    /// Absolute file URL for an attachment: needs the stored file hash and
    /// the site's routing subdomain. Either lookup failing is terminal.
    async fn build_file_url(&self, metadata_id: i64, site_id: i64) -> Option<String> {
        let hash = match self.platform.attachment_file_hash(metadata_id).await {
            Ok(hash) => hash?,
            Err(e) => {
                error!("Attachment lookup failed for metadata {metadata_id}: {e}");
                return None;
            }
        };

        let subdomain = match self.platform.site_subdomain(site_id).await {
            Ok(subdomain) => subdomain?,
            Err(e) => {
                error!("Site lookup failed for site {site_id}: {e}");
                return None;
            }
        };

        Some(format!(
            "https://{}.{}/api/v1/files/{}",
            subdomain, self.platform_domain, hash
        ))
    }
}

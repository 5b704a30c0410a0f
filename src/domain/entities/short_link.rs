//! Short link entity backing the compact redirect table.

use chrono::{DateTime, Utc};

/// A short link row mapping a compact token to an external destination.
///
/// Every field except `hits` is written once at creation time (outside this
/// engine). `hits` increases monotonically and only through the atomic
/// increment-and-return lookup in the repository, so concurrent resolutions
/// of the same token never lose an update.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ShortLink {
    pub id: i64,
    /// The compact token, unique across the table.
    pub short_url: String,
    /// Lower-cased host of the destination, stored for cheap classification.
    pub domain: String,
    /// The externally supplied destination URL.
    pub url: String,
    /// Anchor text the link was created with, if any.
    pub inner_text: Option<String>,
    pub created: DateTime<Utc>,
    /// Destination after any one-time resolution pass (outside this engine).
    pub resolved_url: Option<String>,
    pub resolved: Option<bool>,
    pub hits: i64,
}

//! Origin entity recording where a site was migrated from.

use serde::{Deserialize, Serialize};

/// A site's recorded migration source.
///
/// One row exists per site that was imported from a predecessor forum
/// product. A site without a row was never migrated, which is a normal
/// state rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Origin {
    /// Migration batch that produced this site's identifier mappings.
    pub origin_id: i64,
    pub site_id: i64,
    /// Name of the predecessor product, e.g. `"vbulletin"`.
    pub product: String,
}

impl Origin {
    pub fn new(origin_id: i64, site_id: i64, product: String) -> Self {
        Self {
            origin_id,
            site_id,
            product,
        }
    }
}

//! Response shape for the resolve endpoint.

use serde::Serialize;

use crate::domain::entities::{ItemKind, LinkRef, RedirectAction, Resolution, ResolutionStatus};

/// Resolution metadata returned alongside the destination link.
#[derive(Debug, Serialize)]
pub struct ResolutionResponse {
    pub status: ResolutionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_kind: Option<ItemKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<RedirectAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl From<Resolution> for ResolutionResponse {
    fn from(res: Resolution) -> Self {
        Self {
            status: res.status,
            link: res.link,
            item_kind: res.item_kind,
            item_id: (res.item_id > 0).then_some(res.item_id),
            offset: (res.offset > 0).then_some(res.offset),
            action: res.action,
            search: res.search,
        }
    }
}

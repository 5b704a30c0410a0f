//! Resolution of one legacy URL onto the current addressing scheme.
//!
//! A [`Resolution`] exists only for the duration of a single resolve call;
//! it is never persisted.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::entities::Origin;

/// Category of an addressable entity on the current platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Microcosm,
    Conversation,
    Comment,
    Huddle,
    Profile,
    Attachment,
    Update,
}

impl ItemKind {
    /// Storage name used in the `imported_items.item_type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Microcosm => "microcosm",
            Self::Conversation => "conversation",
            Self::Comment => "comment",
            Self::Huddle => "huddle",
            Self::Profile => "profile",
            Self::Attachment => "attachment",
            Self::Update => "update",
        }
    }

    /// Items per page on the destination. Microcosm listings page in
    /// larger chunks than comment flows.
    pub fn page_size(self) -> i64 {
        match self {
            Self::Microcosm => 100,
            _ => 50,
        }
    }

    /// Whether a destination of this kind accepts an `offset` query
    /// parameter. Only list-paginated collections do.
    pub fn is_list_paginated(self) -> bool {
        matches!(self, Self::Microcosm | Self::Conversation | Self::Profile)
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic action attached to a resolution beyond "go to this item".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectAction {
    /// Jump to the first unread comment in a conversation.
    NewComment,
    /// Member search over the profile collection.
    Search,
    /// Who's-online view of the profile collection.
    Online,
}

/// Outcome of a resolve call as seen by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    MovedPermanently,
    NotFound,
}

/// A hypermedia reference to the constructed destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    pub rel: String,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl LinkRef {
    pub fn permalink(href: impl Into<String>) -> Self {
        Self {
            rel: "permalink".to_string(),
            href: href.into(),
            title: None,
        }
    }
}

/// The full state of one legacy URL resolution.
///
/// Carries everything the cascade learns about the URL: the classification,
/// the translated identifier, pagination offset, pending action and the
/// constructed destination. A non-zero `item_id` is only ever set after a
/// successful mapping-table lookup.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub raw_url: String,
    pub url: Option<Url>,
    pub origin: Option<Origin>,
    pub link: Option<LinkRef>,
    pub item_kind: Option<ItemKind>,
    pub item_id: i64,
    pub offset: i64,
    pub action: Option<RedirectAction>,
    pub search: Option<String>,
    pub status: ResolutionStatus,
}

impl Resolution {
    /// A fresh, unresolved state for an inbound raw URL.
    pub fn unresolved(raw_url: impl Into<String>) -> Self {
        Self {
            raw_url: raw_url.into(),
            url: None,
            origin: None,
            link: None,
            item_kind: None,
            item_id: 0,
            offset: 0,
            action: None,
            search: None,
            status: ResolutionStatus::NotFound,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.status == ResolutionStatus::MovedPermanently
    }
}

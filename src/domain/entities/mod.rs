//! Core domain entities for the resolution and redirection engine.

mod origin;
mod resolution;
mod short_link;

pub use origin::Origin;
pub use resolution::{ItemKind, LinkRef, RedirectAction, Resolution, ResolutionStatus};
pub use short_link::ShortLink;

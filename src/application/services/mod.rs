//! Application services orchestrating the resolution and redirection flows.

mod origin_service;
mod redirect_service;
mod resolver_service;
mod translator_service;

pub use origin_service::OriginService;
pub use redirect_service::RedirectService;
pub use resolver_service::{ResolverService, page_to_offset};
pub use translator_service::TranslatorService;

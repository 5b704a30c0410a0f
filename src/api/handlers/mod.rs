//! HTTP handlers exposing the engine's two operations plus a health check.

mod health;
mod redirect;
mod resolve;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use resolve::{ResolveParams, resolve_handler};

//! PostgreSQL implementations of the repository traits.

mod pg_mapping_repository;
mod pg_origin_repository;
mod pg_platform_repository;
mod pg_short_link_repository;

pub use pg_mapping_repository::PgMappingRepository;
pub use pg_origin_repository::PgOriginRepository;
pub use pg_platform_repository::PgPlatformRepository;
pub use pg_short_link_repository::PgShortLinkRepository;

//! Repository traits abstracting the relational store.

mod mapping_repository;
mod origin_repository;
mod platform_repository;
mod short_link_repository;

pub use mapping_repository::MappingRepository;
pub use origin_repository::OriginRepository;
pub use platform_repository::PlatformRepository;
pub use short_link_repository::ShortLinkRepository;

#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
#[cfg(test)]
pub use origin_repository::MockOriginRepository;
#[cfg(test)]
pub use platform_repository::MockPlatformRepository;
#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;

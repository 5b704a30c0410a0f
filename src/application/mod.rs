//! Application layer: service orchestration.

pub mod services;

//! Card records: repository seam and application service.

pub mod repository;
pub mod service;

/// Entity name used in not-found messages.
pub const ENTITY: &str = "Card";

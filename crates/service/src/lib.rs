//! Service layer providing card CRUD on top of models.
//! - Separates business logic from data access.
//! - Reuses entity definitions in `models` crate.
//! - Turns missing rows into `ServiceError::NotFound`.

pub mod errors;
pub mod card;
pub mod db;
#[cfg(test)]
pub mod test_support;

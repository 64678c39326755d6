pub mod routes;
pub mod startup;
pub mod cards;
pub mod errors;
pub mod openapi;
pub mod state;

pub use startup::{load_settings, run, Settings};

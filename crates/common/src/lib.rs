//! Types and helpers shared by the API server and the client.

pub mod types;
pub mod utils;

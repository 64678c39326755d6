//! Client side of the cards service: HTTP bindings, the list/form state
//! holder and a terminal front end on top of it.

pub mod errors;
pub mod api;
pub mod board;
pub mod shell;

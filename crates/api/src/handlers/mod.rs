//! Request handlers.
//!
//! Handlers stay thin: extract the authenticated actor, validate input,
//! call into the repository layer, and map errors at the boundary.

pub mod demo;
pub mod relationships;
pub mod tracks;
pub mod users;

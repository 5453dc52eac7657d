//! Token-based authentication.
//!
//! Identity-provider wiring (OAuth sign-in) lives outside this service;
//! the API only validates bearer tokens and resolves the current actor.

pub mod jwt;

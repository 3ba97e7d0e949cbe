//! mapon-core - Domain models for the Mapon fleet-telematics API
//!
//! Every type in this crate is a plain value record. Records are produced by
//! the mapping layer in `mapon-conv` from one decoded API response and handed
//! to the caller by value; nothing here performs I/O or holds shared state.
//!
//! Vendor codes (unit type, fuel type, movement status, route type) are
//! closed enums with an `Unrecognized(String)` variant that keeps the raw
//! vendor string, so an incomplete enum never loses information.

pub mod models;

pub use models::*;

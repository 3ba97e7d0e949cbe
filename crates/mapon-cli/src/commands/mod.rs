//! Command implementations for mapon-cli

pub mod auth;
pub mod data;
pub mod fleet;
pub mod groups;

pub use auth::{login, logout};
pub use fleet::{alerts, drivers, objects, routes, units};
pub use groups::{group_units, groups, tell_tales};

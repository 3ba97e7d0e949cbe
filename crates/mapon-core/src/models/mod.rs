//! Shared data models for Mapon API responses

mod alert;
mod can;
mod codes;
mod common;
mod diagnostics;
mod driver;
mod group;
mod object;
mod route;
mod series;
mod state;
mod telltale;
mod unit;

pub use alert::*;
pub use can::*;
pub use codes::*;
pub use common::*;
pub use diagnostics::*;
pub use driver::*;
pub use group::*;
pub use object::*;
pub use route::*;
pub use series::*;
pub use state::*;
pub use telltale::*;
pub use unit::*;

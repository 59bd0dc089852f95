//! Error types and result extensions for cachescope operations

mod builders;
mod conversions;
mod display;
mod extensions;
mod types;

pub use extensions::*;
pub use types::{Error, Result};

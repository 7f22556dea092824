pub mod bsp;
pub mod error;

pub use error::{Error, Result};

pub mod binaries;
pub mod bsp;
pub mod chunks;
pub mod config;
pub mod consts;
pub mod error;
pub mod hierarchy;
pub mod loader;
pub mod model;
pub mod prelude;

#[cfg(test)]
mod test_util;

pub use error::{PofError, Result};
pub use loader::{load_pof, PofReader, ToleratedGap};
pub use model::PofModel;

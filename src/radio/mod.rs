//! A module to encapsulate all things related to radio operation.
pub mod prelude;

pub(crate) mod sx127x;
pub use sx127x::{Sx127xError, SX127x};

mod config;
pub use config::RadioConfig;

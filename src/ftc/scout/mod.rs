pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod format;
pub mod ingest;
pub mod io;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod server;

pub use error::{ErrorKind, Result, ScoutError};

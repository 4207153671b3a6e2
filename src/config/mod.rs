//! Config files referenced from the command line.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::BlobStoreConfig;

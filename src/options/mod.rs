//! Option beans for command-line tools.
//!
//! Feature modules declare their own flags through [`OptionsBean`], share a
//! single parse pass driven by [`Options`], and are looked up by type afterwards:
//!
//! ```text
//! Options::new() → register_options_factory() → parse_and_configure() → get_option_bean::<T>()
//! ```

mod bean;
mod blob;
mod common;
mod document;
mod error;
mod kinds;
mod registry;

pub use bean::{BeanExt, OptionsBean, OptionsBeanFactory};
pub use blob::{BlobStoreOptions, BlobStoreType};
pub use common::{CommonOptions, StoreKind};
pub use document::{CacheSplit, DocumentStoreOptions, DEFAULT_CACHE_SIZE_MB};
pub use error::OptionsError;
pub use kinds::OptionBeans;
pub use registry::{Options, ParseOutcome};

//! Built-in option bean kinds, the default feature set.

use crate::options::bean::{OptionsBean, OptionsBeanFactory};
use crate::options::blob::BlobStoreOptions;
use crate::options::common::CommonOptions;
use crate::options::document::DocumentStoreOptions;

/// Option beans shipped with the tool.
///
/// Declaration order is the order in which the registry instantiates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionBeans {
    /// Help, store selection and global toggles.
    Common,
    /// Document store tuning.
    DocumentStore,
    /// Blob store selection.
    BlobStore,
}

impl OptionBeans {
    /// Every built-in kind, in instantiation order.
    pub const ALL: [OptionBeans; 3] = [
        OptionBeans::Common,
        OptionBeans::DocumentStore,
        OptionBeans::BlobStore,
    ];
}

impl OptionsBeanFactory for OptionBeans {
    fn create(&self) -> Box<dyn OptionsBean> {
        match self {
            OptionBeans::Common => Box::new(CommonOptions::new()),
            OptionBeans::DocumentStore => Box::new(DocumentStoreOptions::new()),
            OptionBeans::BlobStore => Box::new(BlobStoreOptions::new()),
        }
    }
}

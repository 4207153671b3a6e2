//! Bean and factory contracts shared by built-in and extension option beans.

use std::any::Any;

use clap::{ArgMatches, Command};

use crate::options::error::OptionsError;

/// A self-contained configuration unit.
///
/// A bean declares its flags on the shared parser and, once the arguments have
/// been parsed, reads its own values back out of the parse result. Each bean
/// kind exposes its own typed accessors for those values.
pub trait OptionsBean: Any {
    /// Add this bean's flags to the parser.
    fn register_flags(&self, parser: Command) -> Command;

    /// Read and validate this bean's values from the parse result.
    ///
    /// Called exactly once per registry lifecycle.
    fn configure(&mut self, matches: &ArgMatches) -> Result<(), OptionsError>;

    /// Casts this bean to `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Casts this bean to `Any` for mutable downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Short type name used in diagnostics.
    fn type_name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// Helper trait for downcasting beans.
pub trait BeanExt {
    /// Attempts to downcast this bean to a concrete type.
    fn downcast_ref<T: OptionsBean>(&self) -> Option<&T>;

    /// Attempts to downcast this bean to a concrete mutable type.
    fn downcast_mut<T: OptionsBean>(&mut self) -> Option<&mut T>;
}

impl BeanExt for dyn OptionsBean {
    fn downcast_ref<T: OptionsBean>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    fn downcast_mut<T: OptionsBean>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Produces exactly one option bean per registry lifecycle.
pub trait OptionsBeanFactory: 'static {
    /// Create a fresh, unconfigured bean.
    fn create(&self) -> Box<dyn OptionsBean>;

    /// Create a bean and register its flags on the parser in one step.
    fn new_instance(&self, parser: Command) -> (Command, Box<dyn OptionsBean>) {
        let bean = self.create();
        let parser = bean.register_flags(parser);
        (parser, bean)
    }
}

/// Strip the module path from a fully qualified type name.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    // Generic parameters may contain `::` themselves
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}

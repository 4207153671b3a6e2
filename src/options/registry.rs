//! Option bean registry: one shared parse pass for every registered bean.
//!
//! ```text
//! Factories → Create beans → Register flags → Parse → Configure → Lookup
//! ```

use std::any::{type_name, Any, TypeId};
use std::collections::{BTreeSet, HashMap};
use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{ArgMatches, Command};

use crate::options::bean::{short_type_name, BeanExt, OptionsBean, OptionsBeanFactory};
use crate::options::common::CommonOptions;
use crate::options::error::OptionsError;
use crate::options::kinds::OptionBeans;

/// How a parse pass ended.
///
/// Only `Parsed` hands control back to the tool. The others carry the text
/// the caller should print before exiting with [`ParseOutcome::exit_code`].
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    /// Every bean is configured; the parse result is attached.
    Parsed(ArgMatches),
    /// The user asked for help.
    HelpRequested { help: String },
    /// The user asked for the version of a parser that declares one.
    VersionRequested { version: String },
    /// No positional argument selected a target store.
    NoTargetSelected { help: String },
}

impl ParseOutcome {
    /// Process exit status the caller should use, `None` to keep running.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ParseOutcome::Parsed(_) => None,
            ParseOutcome::HelpRequested { .. } | ParseOutcome::VersionRequested { .. } => Some(0),
            ParseOutcome::NoTargetSelected { .. } => Some(1),
        }
    }

    /// Help text to print before exiting.
    pub fn help(&self) -> Option<&str> {
        match self {
            ParseOutcome::HelpRequested { help } | ParseOutcome::NoTargetSelected { help } => {
                Some(help.as_str())
            }
            ParseOutcome::Parsed(_) | ParseOutcome::VersionRequested { .. } => None,
        }
    }

    /// Whatever should go to stdout before exiting: help or version text.
    pub fn output(&self) -> Option<&str> {
        match self {
            ParseOutcome::VersionRequested { version } => Some(version.as_str()),
            other => other.help(),
        }
    }

    pub fn into_matches(self) -> Option<ArgMatches> {
        match self {
            ParseOutcome::Parsed(matches) => Some(matches),
            _ => None,
        }
    }
}

/// Registry of option beans.
///
/// Construct it with the built-in kinds you need, add extension factories,
/// run [`Options::parse_and_configure`] once, then look beans up by type.
pub struct Options {
    kinds: BTreeSet<OptionBeans>,
    factories: Vec<(TypeId, Box<dyn OptionsBeanFactory>)>,
    beans: Vec<Box<dyn OptionsBean>>,
    index: HashMap<TypeId, usize>,
    parser: Option<Command>,
    option_set: Option<ArgMatches>,
    parsed: bool,
}

impl Options {
    /// Registry with every built-in kind active.
    pub fn new() -> Self {
        Self::with_kinds(OptionBeans::ALL)
    }

    /// Registry with exactly the given built-in kinds active.
    pub fn with_kinds(kinds: impl IntoIterator<Item = OptionBeans>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
            factories: Vec::new(),
            beans: Vec::new(),
            index: HashMap::new(),
            parser: None,
            option_set: None,
            parsed: false,
        }
    }

    /// Active built-in kinds, in instantiation order.
    pub fn kinds(&self) -> impl Iterator<Item = OptionBeans> + '_ {
        self.kinds.iter().copied()
    }

    /// Add an extension factory.
    ///
    /// Factories are kept as a set keyed by factory type: registering a second
    /// factory of the same type is a no-op. Once parsing has started the call
    /// is ignored. Returns whether the factory was added.
    pub fn register_options_factory<F: OptionsBeanFactory>(&mut self, factory: F) -> bool {
        let name = short_type_name(type_name::<F>());
        if self.parsed {
            tracing::warn!("Ignoring option factory {} registered after parsing", name);
            return false;
        }

        let id = TypeId::of::<F>();
        if self.factories.iter().any(|(existing, _)| *existing == id) {
            tracing::debug!("Option factory {} already registered", name);
            return false;
        }

        self.factories.push((id, Box::new(factory)));
        true
    }

    /// Parse `args` and configure every bean, requiring a store argument.
    ///
    /// `args` must not include the program name.
    pub fn parse_and_configure<I, T>(
        &mut self,
        parser: Command,
        args: I,
    ) -> Result<ParseOutcome, OptionsError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.parse_and_configure_with(parser, args, true)
    }

    /// Parse `args` and configure every bean.
    ///
    /// # Arguments
    ///
    /// * `parser` - Parser the beans add their flags to
    /// * `args` - Raw arguments without the program name
    /// * `check_non_options` - If true, a missing store argument ends with
    ///   [`ParseOutcome::NoTargetSelected`] (only when `CommonOptions` is registered)
    ///
    /// # Errors
    ///
    /// * [`OptionsError::AlreadyConfigured`] on a second call
    /// * [`OptionsError::DuplicateBean`] if two factories produce the same bean type
    /// * [`OptionsError::Parse`] if the arguments don't match the registered flags
    /// * whatever a bean returns from its configure step, unchanged
    pub fn parse_and_configure_with<I, T>(
        &mut self,
        parser: Command,
        args: I,
        check_non_options: bool,
    ) -> Result<ParseOutcome, OptionsError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        if self.parsed {
            return Err(OptionsError::AlreadyConfigured);
        }
        self.parsed = true;

        // Stage 1: Create beans and collect their flags
        let mut parser = parser.no_binary_name(true);
        let mut beans: Vec<Box<dyn OptionsBean>> = Vec::new();
        let mut index = HashMap::new();
        let built_in = self.kinds.iter().map(|kind| kind as &dyn OptionsBeanFactory);
        let extensions = self
            .factories
            .iter()
            .map(|(_, factory)| &**factory as &dyn OptionsBeanFactory);
        for factory in built_in.chain(extensions) {
            let bean = factory.create();
            let type_id = Any::type_id(bean.as_any());
            if index.contains_key(&type_id) {
                return Err(OptionsError::DuplicateBean {
                    type_name: bean.type_name(),
                });
            }
            parser = bean.register_flags(parser);
            tracing::debug!("Registered option bean {}", bean.type_name());
            index.insert(type_id, beans.len());
            beans.push(bean);
        }
        let common_slot = index.get(&TypeId::of::<CommonOptions>()).copied();

        // Stage 2: Help beats every other flag, valid or not
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        if common_slot.is_some() && requests_help(&args) {
            tracing::debug!("Help requested, skipping parse");
            self.parser = Some(parser);
            return Ok(ParseOutcome::HelpRequested {
                help: self.help_text(),
            });
        }

        // Stage 3: Parse
        let result = parser.try_get_matches_from_mut(args);
        self.parser = Some(parser);
        let matches = match result {
            Ok(matches) => matches,
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    return Ok(ParseOutcome::HelpRequested {
                        help: err.render().to_string(),
                    });
                }
                ErrorKind::DisplayVersion => {
                    return Ok(ParseOutcome::VersionRequested {
                        version: err.render().to_string(),
                    });
                }
                _ => return Err(err.into()),
            },
        };

        // Stage 4: Common options first, help skips everything else
        if let Some(slot) = common_slot {
            beans[slot].configure(&matches)?;
            if common_in(&beans, slot).is_some_and(CommonOptions::is_help_requested) {
                tracing::debug!("Help requested, skipping remaining beans");
                return Ok(ParseOutcome::HelpRequested {
                    help: self.help_text(),
                });
            }
        }

        // Stage 5: Configure the rest
        for (slot, bean) in beans.iter_mut().enumerate() {
            if Some(slot) == common_slot {
                continue;
            }
            tracing::debug!("Configuring option bean {}", bean.type_name());
            bean.configure(&matches)?;
        }

        // Every bean is configured, lookups may see them now
        let no_target = check_non_options
            && common_slot
                .and_then(|slot| common_in(&beans, slot))
                .is_some_and(|common| common.non_options().is_empty());
        self.beans = beans;
        self.index = index;
        self.option_set = Some(matches.clone());

        // Stage 6: Some store must be selected
        if no_target {
            return Ok(ParseOutcome::NoTargetSelected {
                help: self.help_text(),
            });
        }

        Ok(ParseOutcome::Parsed(matches))
    }

    /// The parse result, `None` until parsing succeeded.
    pub fn option_set(&self) -> Option<&ArgMatches> {
        self.option_set.as_ref()
    }

    /// Look up the bean of type `T`.
    ///
    /// Only beans of a run that configured all of them are visible. After a
    /// failed run or a help request every lookup fails with `BeanNotFound`.
    pub fn get_option_bean<T: OptionsBean>(&self) -> Result<&T, OptionsError> {
        self.index
            .get(&TypeId::of::<T>())
            .and_then(|&slot| self.beans[slot].downcast_ref::<T>())
            .ok_or_else(|| OptionsError::BeanNotFound {
                requested: short_type_name(type_name::<T>()),
                registered: self.registered_beans(),
            })
    }

    /// Whether a configured bean of type `T` is registered.
    pub fn contains<T: OptionsBean>(&self) -> bool {
        self.index.contains_key(&TypeId::of::<T>())
    }

    pub fn common_options(&self) -> Result<&CommonOptions, OptionsError> {
        self.get_option_bean::<CommonOptions>()
    }

    /// Type names of the registered beans, in registration order.
    pub fn registered_beans(&self) -> Vec<&'static str> {
        self.beans.iter().map(|bean| bean.type_name()).collect()
    }

    /// Help text of the parser the beans registered on.
    pub fn render_help(&mut self) -> Option<String> {
        self.parser
            .as_mut()
            .map(|parser| parser.render_help().to_string())
    }

    fn help_text(&mut self) -> String {
        self.render_help().unwrap_or_default()
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

fn common_in(beans: &[Box<dyn OptionsBean>], slot: usize) -> Option<&CommonOptions> {
    beans.get(slot).and_then(|bean| bean.downcast_ref::<CommonOptions>())
}

/// Whether `-h` or `--help` appears before a `--` terminator.
fn requests_help(args: &[OsString]) -> bool {
    args.iter()
        .take_while(|arg| arg.as_os_str() != "--")
        .any(|arg| arg.as_os_str() == "-h" || arg.as_os_str() == "--help")
}

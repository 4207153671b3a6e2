//! Cross-cutting options: help, store selection and global toggles.

use std::any::Any;

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::options::bean::OptionsBean;
use crate::options::error::OptionsError;

const HELP: &str = "help";
const READ_WRITE: &str = "read-write";
const METRICS: &str = "metrics";
const SEGMENT: &str = "segment";
const NON_OPTIONS: &str = "non_options";

/// Kind of node store selected by the first non-option argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// `mongodb://...` connection URI.
    Mongo,
    /// `jdbc:...` connection URI.
    Rdb,
    /// Anything else is a segment store directory.
    Segment,
}

/// Options every tool gets: help, read-write mode, metrics and the
/// positional arguments that select the target store.
#[derive(Debug, Clone, Default)]
pub struct CommonOptions {
    help: bool,
    read_write: bool,
    metrics: bool,
    segment: bool,
    non_options: Vec<String>,
}

impl CommonOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_help_requested(&self) -> bool {
        self.help
    }

    /// Positional arguments not consumed by any flag, in order.
    pub fn non_options(&self) -> &[String] {
        &self.non_options
    }

    /// The first non-option argument, which names the target store.
    pub fn store_uri(&self) -> Option<&str> {
        self.non_options.first().map(String::as_str)
    }

    pub fn is_read_write(&self) -> bool {
        self.read_write
    }

    pub fn is_metrics_enabled(&self) -> bool {
        self.metrics
    }

    /// Classify the selected store.
    ///
    /// `--segment` forces a segment store regardless of the URI.
    pub fn store_kind(&self) -> Option<StoreKind> {
        let uri = self.store_uri()?;
        if self.segment {
            return Some(StoreKind::Segment);
        }
        if uri.starts_with("mongodb://") {
            Some(StoreKind::Mongo)
        } else if uri.starts_with("jdbc:") {
            Some(StoreKind::Rdb)
        } else {
            Some(StoreKind::Segment)
        }
    }

    /// Whether the selected store is document based (Mongo or RDB).
    pub fn is_document(&self) -> bool {
        matches!(self.store_kind(), Some(StoreKind::Mongo | StoreKind::Rdb))
    }
}

impl OptionsBean for CommonOptions {
    fn register_flags(&self, parser: Command) -> Command {
        // `--help` becomes a plain flag so the registry decides what to do with it
        parser
            .disable_help_flag(true)
            .arg(
                Arg::new(HELP)
                    .short('h')
                    .long("help")
                    .action(ArgAction::SetTrue)
                    .help("Show help"),
            )
            .arg(
                Arg::new(READ_WRITE)
                    .long("read-write")
                    .action(ArgAction::SetTrue)
                    .help("Connect to the repository in read-write mode"),
            )
            .arg(
                Arg::new(METRICS)
                    .long("metrics")
                    .action(ArgAction::SetTrue)
                    .help("Enable metrics collection"),
            )
            .arg(
                Arg::new(SEGMENT)
                    .long("segment")
                    .action(ArgAction::SetTrue)
                    .help("Treat the store argument as a segment store directory"),
            )
            .arg(
                Arg::new(NON_OPTIONS)
                    .value_name("STORE")
                    .num_args(1..)
                    .action(ArgAction::Append)
                    .help("Store path or connection URI"),
            )
    }

    fn configure(&mut self, matches: &ArgMatches) -> Result<(), OptionsError> {
        self.help = matches.get_flag(HELP);
        self.read_write = matches.get_flag(READ_WRITE);
        self.metrics = matches.get_flag(METRICS);
        self.segment = matches.get_flag(SEGMENT);
        self.non_options = matches
            .get_many::<String>(NON_OPTIONS)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(args: &[&str]) -> CommonOptions {
        let mut opts = CommonOptions::new();
        let matches = opts
            .register_flags(Command::new("test").no_binary_name(true))
            .try_get_matches_from(args)
            .unwrap();
        opts.configure(&matches).unwrap();
        opts
    }

    #[test]
    fn defaults_without_arguments() {
        let opts = configured(&[]);
        assert!(!opts.is_help_requested());
        assert!(!opts.is_read_write());
        assert!(!opts.is_metrics_enabled());
        assert!(opts.non_options().is_empty());
        assert_eq!(opts.store_uri(), None);
        assert_eq!(opts.store_kind(), None);
    }

    #[test]
    fn help_short_and_long() {
        assert!(configured(&["--help"]).is_help_requested());
        assert!(configured(&["-h"]).is_help_requested());
    }

    #[test]
    fn collects_non_options_in_order() {
        let opts = configured(&["--read-write", "mystore", "extra"]);
        assert_eq!(opts.non_options(), ["mystore", "extra"]);
        assert_eq!(opts.store_uri(), Some("mystore"));
        assert!(opts.is_read_write());
    }

    #[test]
    fn store_kind_from_uri() {
        assert_eq!(
            configured(&["mongodb://localhost/oak"]).store_kind(),
            Some(StoreKind::Mongo)
        );
        assert_eq!(
            configured(&["jdbc:h2:file:/tmp/oak"]).store_kind(),
            Some(StoreKind::Rdb)
        );
        assert_eq!(
            configured(&["/var/repo/segmentstore"]).store_kind(),
            Some(StoreKind::Segment)
        );
    }

    #[test]
    fn segment_flag_overrides_uri() {
        let opts = configured(&["--segment", "mongodb://localhost/oak"]);
        assert_eq!(opts.store_kind(), Some(StoreKind::Segment));
        assert!(!opts.is_document());
    }

    #[test]
    fn document_store_detection() {
        assert!(configured(&["jdbc:postgresql://db/oak"]).is_document());
        assert!(!configured(&["./repo"]).is_document());
        assert!(!configured(&[]).is_document());
    }

    #[test]
    fn registration_disables_builtin_help() {
        let parser = CommonOptions::new().register_flags(Command::new("test"));
        assert!(parser.is_disable_help_flag_set());
    }
}

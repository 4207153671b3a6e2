//! Document node store tuning options.

use std::any::Any;

use clap::parser::ValueSource;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use crate::options::bean::OptionsBean;
use crate::options::error::OptionsError;

const CACHE: &str = "cache";
const CLUSTER_ID: &str = "cluster-id";
const DISABLE_BRANCHES: &str = "disable-branches";
const NODE_CACHE_PCT: &str = "node-cache-percentage";
const PREV_DOC_CACHE_PCT: &str = "prev-doc-cache-percentage";
const CHILDREN_CACHE_PCT: &str = "children-cache-percentage";
const DIFF_CACHE_PCT: &str = "diff-cache-percentage";
const CACHE_PCTS: [&str; 4] = [
    NODE_CACHE_PCT,
    PREV_DOC_CACHE_PCT,
    CHILDREN_CACHE_PCT,
    DIFF_CACHE_PCT,
];
const RDB_USER: &str = "rdb-jdbc-user";
const RDB_PASSWORD: &str = "rdb-jdbc-passwd";

pub const DEFAULT_CACHE_SIZE_MB: u64 = 256;
const DEFAULT_CACHE_SIZE: &str = "256";

/// How the document store cache is split between its segments, in percent.
///
/// Whatever the four segments leave over goes to the document cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSplit {
    pub node: u8,
    pub prev_doc: u8,
    pub children: u8,
    pub diff: u8,
}

impl CacheSplit {
    pub fn total(&self) -> u32 {
        [self.node, self.prev_doc, self.children, self.diff]
            .into_iter()
            .map(u32::from)
            .sum()
    }
}

impl Default for CacheSplit {
    fn default() -> Self {
        Self {
            node: 25,
            prev_doc: 4,
            children: 10,
            diff: 5,
        }
    }
}

/// Options for Mongo and RDB backed document stores.
#[derive(Debug, Clone)]
pub struct DocumentStoreOptions {
    cache_size_mb: u64,
    cluster_id: u32,
    disable_branches: bool,
    cache_split: CacheSplit,
    rdb_user: Option<String>,
    rdb_password: Option<String>,
}

impl Default for DocumentStoreOptions {
    fn default() -> Self {
        Self {
            cache_size_mb: DEFAULT_CACHE_SIZE_MB,
            cluster_id: 0,
            disable_branches: false,
            cache_split: CacheSplit::default(),
            rdb_user: None,
            rdb_password: None,
        }
    }
}

impl DocumentStoreOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache_size_mb(&self) -> u64 {
        self.cache_size_mb
    }

    pub fn cluster_id(&self) -> u32 {
        self.cluster_id
    }

    pub fn is_branches_disabled(&self) -> bool {
        self.disable_branches
    }

    pub fn cache_split(&self) -> CacheSplit {
        self.cache_split
    }

    pub fn rdb_user(&self) -> Option<&str> {
        self.rdb_user.as_deref()
    }

    pub fn rdb_password(&self) -> Option<&str> {
        self.rdb_password.as_deref()
    }
}

fn percentage(id: &'static str, default: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .long(id)
        .value_name("PERCENT")
        .value_parser(value_parser!(u8).range(0..=100))
        .default_value(default)
        .help(help)
}

/// Percentage flags given on the command line, or all of them if none was.
fn blamed_percentages(matches: &ArgMatches) -> String {
    let given: Vec<String> = CACHE_PCTS
        .iter()
        .filter(|id| matches.value_source(id) == Some(ValueSource::CommandLine))
        .map(|id| format!("--{}", id))
        .collect();
    if given.is_empty() {
        CACHE_PCTS.map(|id| format!("--{}", id)).join(", ")
    } else {
        given.join(", ")
    }
}

impl OptionsBean for DocumentStoreOptions {
    fn register_flags(&self, parser: Command) -> Command {
        parser
            .arg(
                Arg::new(CACHE)
                    .long("cache")
                    .value_name("MB")
                    .value_parser(value_parser!(u64))
                    .default_value(DEFAULT_CACHE_SIZE)
                    .help("Cache size in MB"),
            )
            .arg(
                Arg::new(CLUSTER_ID)
                    .long("cluster-id")
                    .value_name("ID")
                    .value_parser(value_parser!(u32))
                    .default_value("0")
                    .help("Cluster id of this document store instance"),
            )
            .arg(
                Arg::new(DISABLE_BRANCHES)
                    .long("disable-branches")
                    .action(ArgAction::SetTrue)
                    .help("Disable branches for commits"),
            )
            .arg(percentage(NODE_CACHE_PCT, "25", "Share of the cache for nodes"))
            .arg(percentage(
                PREV_DOC_CACHE_PCT,
                "4",
                "Share of the cache for previous documents",
            ))
            .arg(percentage(
                CHILDREN_CACHE_PCT,
                "10",
                "Share of the cache for child lists",
            ))
            .arg(percentage(DIFF_CACHE_PCT, "5", "Share of the cache for diffs"))
            .arg(
                Arg::new(RDB_USER)
                    .long("rdb-jdbc-user")
                    .value_name("USER")
                    .help("RDB JDBC user"),
            )
            .arg(
                Arg::new(RDB_PASSWORD)
                    .long("rdb-jdbc-passwd")
                    .value_name("PASSWORD")
                    .help("RDB JDBC password"),
            )
    }

    fn configure(&mut self, matches: &ArgMatches) -> Result<(), OptionsError> {
        let defaults = Self::default();
        let percent =
            |id: &str, default: u8| matches.get_one::<u8>(id).copied().unwrap_or(default);
        let split = CacheSplit {
            node: percent(NODE_CACHE_PCT, defaults.cache_split.node),
            prev_doc: percent(PREV_DOC_CACHE_PCT, defaults.cache_split.prev_doc),
            children: percent(CHILDREN_CACHE_PCT, defaults.cache_split.children),
            diff: percent(DIFF_CACHE_PCT, defaults.cache_split.diff),
        };

        // The document cache needs a non-empty share of its own
        if split.total() >= 100 {
            return Err(OptionsError::InvalidValue {
                flag: blamed_percentages(matches),
                message: format!(
                    "cache percentages add up to {}%, must stay below 100%",
                    split.total()
                ),
            });
        }

        self.cache_size_mb = matches
            .get_one::<u64>(CACHE)
            .copied()
            .unwrap_or(defaults.cache_size_mb);
        self.cluster_id = matches
            .get_one::<u32>(CLUSTER_ID)
            .copied()
            .unwrap_or(defaults.cluster_id);
        self.disable_branches = matches.get_flag(DISABLE_BRANCHES);
        self.cache_split = split;
        self.rdb_user = matches.get_one::<String>(RDB_USER).cloned();
        self.rdb_password = matches.get_one::<String>(RDB_PASSWORD).cloned();
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

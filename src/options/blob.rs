//! Blob store selection options.

use std::any::Any;
use std::path::{Path, PathBuf};

use clap::{value_parser, Arg, ArgMatches, Command};

use crate::config::BlobStoreConfig;
use crate::options::bean::OptionsBean;
use crate::options::error::OptionsError;

const FDS: &str = "fds";
const S3DS: &str = "s3ds";
const AZUREDS: &str = "azureds";
const FAKE_DS_PATH: &str = "fake-ds-path";

/// Which blob store the tool should attach to the node store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobStoreType {
    /// File data store in a local directory.
    Fds,
    /// Amazon S3 data store.
    S3,
    /// Azure blob storage data store.
    Azure,
    /// Fake data store that only records blob ids.
    Fake,
    /// Blobs are kept inline in the node store.
    None,
}

/// Options selecting and configuring the external blob store.
#[derive(Debug, Clone, Default)]
pub struct BlobStoreOptions {
    fds_path: Option<PathBuf>,
    s3_config_path: Option<PathBuf>,
    azure_config_path: Option<PathBuf>,
    fake_ds_path: Option<PathBuf>,
    store_config: Option<BlobStoreConfig>,
}

impl BlobStoreOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fds_path(&self) -> Option<&Path> {
        self.fds_path.as_deref()
    }

    pub fn s3_config_path(&self) -> Option<&Path> {
        self.s3_config_path.as_deref()
    }

    pub fn azure_config_path(&self) -> Option<&Path> {
        self.azure_config_path.as_deref()
    }

    pub fn fake_ds_path(&self) -> Option<&Path> {
        self.fake_ds_path.as_deref()
    }

    /// Settings loaded from the S3 or Azure config file.
    pub fn store_config(&self) -> Option<&BlobStoreConfig> {
        self.store_config.as_ref()
    }

    pub fn blob_store_type(&self) -> BlobStoreType {
        if self.fds_path.is_some() {
            BlobStoreType::Fds
        } else if self.s3_config_path.is_some() {
            BlobStoreType::S3
        } else if self.azure_config_path.is_some() {
            BlobStoreType::Azure
        } else if self.fake_ds_path.is_some() {
            BlobStoreType::Fake
        } else {
            BlobStoreType::None
        }
    }
}

impl OptionsBean for BlobStoreOptions {
    fn register_flags(&self, parser: Command) -> Command {
        parser
            .arg(
                Arg::new(FDS)
                    .long("fds")
                    .value_name("PATH")
                    .value_parser(value_parser!(PathBuf))
                    .conflicts_with_all([S3DS, AZUREDS])
                    .help("File data store directory"),
            )
            .arg(
                Arg::new(S3DS)
                    .long("s3ds")
                    .value_name("CONFIG")
                    .value_parser(value_parser!(PathBuf))
                    .conflicts_with(AZUREDS)
                    .help("S3 data store config file"),
            )
            .arg(
                Arg::new(AZUREDS)
                    .long("azureds")
                    .value_name("CONFIG")
                    .value_parser(value_parser!(PathBuf))
                    .help("Azure data store config file"),
            )
            .arg(
                Arg::new(FAKE_DS_PATH)
                    .long("fake-ds-path")
                    .value_name("PATH")
                    .value_parser(value_parser!(PathBuf))
                    .help("Directory for the fake data store"),
            )
    }

    fn configure(&mut self, matches: &ArgMatches) -> Result<(), OptionsError> {
        self.fds_path = matches.get_one::<PathBuf>(FDS).cloned();
        self.s3_config_path = matches.get_one::<PathBuf>(S3DS).cloned();
        self.azure_config_path = matches.get_one::<PathBuf>(AZUREDS).cloned();
        self.fake_ds_path = matches.get_one::<PathBuf>(FAKE_DS_PATH).cloned();

        let config_path = self
            .s3_config_path
            .as_deref()
            .or(self.azure_config_path.as_deref());
        self.store_config = match config_path {
            Some(path) => Some(BlobStoreConfig::load(path)?),
            None => None,
        };
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

use std::io::{self, Write};

use anyhow::Result;
use clap::Command;

use optbeans::logging::init_tracing;
use optbeans::options::{
    BlobStoreOptions, BlobStoreType, DocumentStoreOptions, Options, OptionsError, StoreKind,
};

fn main() -> Result<()> {
    init_tracing();

    let mut options = Options::new();
    let outcome = match options.parse_and_configure(command(), std::env::args_os().skip(1)) {
        Ok(outcome) => outcome,
        Err(OptionsError::Parse(err)) => err.exit(),
        Err(err) => return Err(err.into()),
    };

    if let Some(code) = outcome.exit_code() {
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", outcome.output().unwrap_or_default().trim_end())?;
        stdout.flush()?;
        std::process::exit(code);
    }

    print_summary(&options)
}

fn command() -> Command {
    Command::new("optbeans")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse store selection and store options the way repository tools see them")
}

fn print_summary(options: &Options) -> Result<()> {
    let common = options.common_options()?;
    let store = common.store_uri().unwrap_or_default();
    println!("store: {} ({})", store, store_kind_name(common.store_kind()));
    println!(
        "mode: {}",
        if common.is_read_write() {
            "read-write"
        } else {
            "read-only"
        }
    );
    if common.is_metrics_enabled() {
        println!("metrics: enabled");
    }

    if common.is_document() {
        let document = options.get_option_bean::<DocumentStoreOptions>()?;
        println!(
            "cache: {} MB, cluster id {}",
            document.cache_size_mb(),
            document.cluster_id()
        );
    }

    let blob = options.get_option_bean::<BlobStoreOptions>()?;
    println!("blob store: {}", describe_blob_store(blob));
    Ok(())
}

fn store_kind_name(kind: Option<StoreKind>) -> &'static str {
    match kind {
        Some(StoreKind::Mongo) => "mongo",
        Some(StoreKind::Rdb) => "rdb",
        Some(StoreKind::Segment) => "segment",
        None => "none",
    }
}

fn describe_blob_store(blob: &BlobStoreOptions) -> String {
    let path = |p: Option<&std::path::Path>| {
        p.map(|p| p.display().to_string()).unwrap_or_default()
    };
    match blob.blob_store_type() {
        BlobStoreType::Fds => format!("fds {}", path(blob.fds_path())),
        BlobStoreType::S3 => format!(
            "s3 ({} settings)",
            blob.store_config().map_or(0, |c| c.len())
        ),
        BlobStoreType::Azure => format!(
            "azure ({} settings)",
            blob.store_config().map_or(0, |c| c.len())
        ),
        BlobStoreType::Fake => format!("fake {}", path(blob.fake_ds_path())),
        BlobStoreType::None => "inline".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_kind_names() {
        assert_eq!(store_kind_name(Some(StoreKind::Mongo)), "mongo");
        assert_eq!(store_kind_name(Some(StoreKind::Segment)), "segment");
        assert_eq!(store_kind_name(None), "none");
    }

    #[test]
    fn inline_blob_store_by_default() {
        assert_eq!(describe_blob_store(&BlobStoreOptions::new()), "inline");
    }
}

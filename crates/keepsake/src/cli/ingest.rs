//! The `keepsake ingest` command: register one item from its photos.

use clap::Args;
use keepsake_core::photo::PhotoDiscovery;
use keepsake_core::Config;
use std::path::PathBuf;

use super::OutputArgs;

/// Arguments for the `ingest` command.
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Photos of one item, or directories holding them. The first photo is analyzed.
    #[arg(required = true)]
    pub photos: Vec<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Execute the ingest command.
pub async fn execute(args: IngestArgs, config: &Config) -> anyhow::Result<()> {
    let photos = PhotoDiscovery::new(config.photos.clone()).discover_all(&args.photos);
    if photos.is_empty() {
        anyhow::bail!(
            "No supported photos found in {:?}\n\n  Hint: supported formats are {}.",
            args.photos,
            config.photos.supported_formats.join(", ")
        );
    }
    tracing::info!("Ingesting item from {} photo(s)", photos.len());

    let registry = super::open_registry(config).await?;
    let outcome = registry.ingest(&photos).await?;

    let mut writer = args.output.writer(config);
    writer.write(&outcome)?;
    writer.flush()?;
    Ok(())
}

//! CLI subcommands and the plumbing they share.

pub mod config;
pub mod ingest;
pub mod items;
pub mod search;

use clap::{Args, ValueEnum};
use keepsake_core::{Config, OutputFormat as CoreOutputFormat, OutputWriter, Registry};
use std::io::{self, StdoutLock};

/// Supported output formats.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON document
    Json,
    /// One JSON object per line (newline-delimited)
    Jsonl,
}

impl From<OutputFormat> for CoreOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => CoreOutputFormat::Json,
            OutputFormat::Jsonl => CoreOutputFormat::JsonLines,
        }
    }
}

/// Output flags shared by every data-producing command.
#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Output format (defaults to `output.format` from config)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

impl OutputArgs {
    /// A stdout writer honoring the flags, falling back to config.
    pub fn writer(&self, config: &Config) -> OutputWriter<StdoutLock<'static>> {
        let format = self
            .format
            .map(CoreOutputFormat::from)
            .or_else(|| CoreOutputFormat::parse(&config.output.format))
            .unwrap_or(CoreOutputFormat::Json);
        let pretty = config.output.pretty && !self.compact;
        OutputWriter::new(io::stdout().lock(), format, pretty)
    }
}

/// Open the registry configured in `config`.
pub async fn open_registry(config: &Config) -> anyhow::Result<Registry> {
    let registry = Registry::from_config(config).await?;
    tracing::debug!("Item store at {:?}", config.store_path());
    Ok(registry)
}

/// A registry for commands that never analyze photos.
///
/// Administrative commands must work without provider credentials, so they
/// run with the offline provider regardless of `provider.kind`.
pub async fn open_registry_offline(config: &Config) -> anyhow::Result<Registry> {
    let mut offline = config.clone();
    offline.provider.kind = "sidecar".to_string();
    open_registry(&offline).await
}

//! JSON and JSONL output of registry results.
//!
//! A single result (one item, a search outcome) is written as one JSON
//! document. Collections go out as an array in JSON mode and as one object
//! per line in JSONL mode, so listings can be piped into line tools.

use serde::Serialize;
use std::io::{self, Write};

/// How results are rendered on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    /// Newline-delimited; collections go out one item per line
    JsonLines,
}

impl OutputFormat {
    /// Case-insensitive; `ndjson` is accepted as an alias of `jsonl`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// Serializes registry results to a writer.
pub struct OutputWriter<W: Write> {
    out: W,
    format: OutputFormat,
    /// Only honored in JSON mode
    pretty: bool,
}

impl<W: Write> OutputWriter<W> {
    pub fn new(out: W, format: OutputFormat, pretty: bool) -> Self {
        Self { out, format, pretty }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write one value as a single JSON document or line.
    pub fn write<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        let result = if self.pretty && self.format == OutputFormat::Json {
            serde_json::to_writer_pretty(&mut self.out, value)
        } else {
            serde_json::to_writer(&mut self.out, value)
        };
        result.map_err(io::Error::other)?;
        writeln!(self.out)
    }

    /// Write a collection: an array in JSON mode, one line per value in JSONL.
    pub fn write_all<T: Serialize>(&mut self, values: &[T]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.write(&values),
            OutputFormat::JsonLines => values.iter().try_for_each(|v| self.write(v)),
        }
    }

    /// Write an outcome that wraps a list of items (a search or a listing).
    ///
    /// JSON mode writes the whole outcome; JSONL mode writes only the items so
    /// the stream stays one item per line. Flushes afterwards.
    pub fn write_outcome<T: Serialize, I: Serialize>(
        &mut self,
        outcome: &T,
        items: &[I],
    ) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.write(outcome)?,
            OutputFormat::JsonLines => self.write_all(items)?,
        }
        self.flush()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

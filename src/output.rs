use crate::config;
use crate::error::NBNError;
use anyhow::{Context, Result};
use chrono::Local;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Print results to stdout
    #[default]
    Std,
    /// Write results to output/<operation>/<timestamp>.json
    Json,
}

/// Section banner written ahead of a command's result
///
/// The CLI writes it to stderr; stdout carries only the result.
pub fn write_banner<W: Write>(mut out: W, title: &str) -> std::io::Result<()> {
    let rule = "=".repeat(60);
    writeln!(out, "{}", rule.blue())?;
    writeln!(out, "{}", title.green().bold())?;
    writeln!(out, "{}", rule.blue())
}

/// Destination for command results
pub trait OutputSink {
    /// Print or persist `value`; returns the file path when one was written
    fn emit<T: Serialize>(&self, operation: &str, value: &T) -> Result<Option<PathBuf>>;
}

pub struct OutputWriter {
    format: OutputFormat,
    root: PathBuf,
    indent: usize,
}

impl OutputWriter {
    pub fn new(format: OutputFormat, root: impl Into<PathBuf>, indent: usize) -> Self {
        Self {
            format,
            root: root.into(),
            indent,
        }
    }

    /// Writer using the environment-configured output root and indentation
    pub fn from_env(format: OutputFormat) -> Self {
        Self::new(format, config::get_output_dir(), config::get_json_indent())
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<operation>/<timestamp>.json`
    pub fn file_path(&self, operation: &str) -> PathBuf {
        let stamp = Local::now().format(config::OUTPUT_TIMESTAMP_FORMAT).to_string();
        self.root.join(operation).join(format!("{}.json", stamp))
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        let indent = " ".repeat(self.indent);
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
        value.serialize(&mut ser).context("Failed to serialize result")?;
        Ok(buf)
    }
}

impl OutputSink for OutputWriter {
    fn emit<T: Serialize>(&self, operation: &str, value: &T) -> Result<Option<PathBuf>> {
        let rendered = self.render(value)?;

        match self.format {
            OutputFormat::Std => {
                println!("{}", String::from_utf8_lossy(&rendered));
                Ok(None)
            }
            OutputFormat::Json => {
                let path = self.file_path(operation);
                if let Some(dir) = path.parent() {
                    std::fs::create_dir_all(dir)
                        .map_err(NBNError::from)
                        .with_context(|| format!("Failed to create {}", dir.display()))?;
                }
                std::fs::write(&path, rendered)
                    .map_err(NBNError::from)
                    .with_context(|| format!("Failed to write {}", path.display()))?;

                info!(operation, path = %path.display(), "result written");
                println!("{} Saved {} to {}", "✓".green(), operation.cyan(), path.display());
                Ok(Some(path))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_path_layout() {
        let writer = OutputWriter::new(OutputFormat::Json, "out", 2);
        let path = writer.file_path("get_pivot");
        assert!(path.starts_with("out/get_pivot"));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
    }

    #[test]
    fn test_banner_goes_to_given_writer() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        write_banner(&mut buf, "Expiry").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), vec!["=".repeat(60).as_str(), "Expiry", "=".repeat(60).as_str()]);
    }

    #[test]
    fn test_render_uses_configured_indent() {
        let writer = OutputWriter::new(OutputFormat::Std, "out", 4);
        let rendered = writer.render(&serde_json::json!({"a": 1})).unwrap();
        assert_eq!(String::from_utf8(rendered).unwrap(), "{\n    \"a\": 1\n}");
    }
}

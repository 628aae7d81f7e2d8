//! Output formatting and writing utilities
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::cli::ReportFormat;
use crate::error::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use schemadoc_core::documentation::{DocumentPlan, GenerationReport};
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;
use tracing::debug;

/// Serializes values in a report format
pub trait OutputFormatter {
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;
}

impl OutputFormatter for ReportFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            ReportFormat::Json => Ok(serde_json::to_string(value)?),
            ReportFormat::JsonPretty | ReportFormat::Human => {
                Ok(serde_json::to_string_pretty(value)?)
            }
            ReportFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }
}

/// Writes messages and reports to stdout, or to any writer in tests
pub struct OutputWriter {
    format: ReportFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    pub fn new(format: ReportFormat, use_color: bool, quiet: bool, progress: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: progress && !quiet && io::stdout().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Output writer over a custom writer; progress indicators are disabled
    pub fn with_writer(format: ReportFormat, use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color,
            show_progress: false,
            quiet,
            writer,
        }
    }

    fn is_human(&self) -> bool {
        self.format == ReportFormat::Human
    }

    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);
        if self.quiet || !self.is_human() {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    pub fn warning(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }
        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        if self.is_human() {
            self.writeln(&formatted)
        } else {
            self.write(&formatted)
        }
    }

    /// Document plan of a dry run
    pub fn plan(&mut self, plan: &DocumentPlan) -> Result<()> {
        if !self.is_human() {
            return self.data(plan);
        }
        self.section("Document Plan")?;
        for document in &plan.documents {
            self.writeln(&format!("  {:<8} {}", document.template.as_str(), document.path.display()))?;
        }
        self.skipped_summary(plan.skipped.len())
    }

    /// Summary of a finished run
    pub fn report(&mut self, report: &GenerationReport) -> Result<()> {
        if !self.is_human() {
            return self.data(report);
        }
        self.success(&format!("✓ Wrote {} documents", report.written.len()))?;
        self.skipped_summary(report.skipped.len())
    }

    fn skipped_summary(&mut self, skipped: usize) -> Result<()> {
        if skipped > 0 {
            self.info(&format!("{} external elements skipped", skipped))?;
        }
        Ok(())
    }

    /// Spinner for indeterminate progress
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(default_spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}

pub fn default_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Writer whose contents tests can read back
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    pub(crate) fn writer(format: ReportFormat, quiet: bool) -> (OutputWriter, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let output = OutputWriter::with_writer(format, false, quiet, Box::new(buffer.clone()));
        (output, buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemadoc_core::documentation::SkippedElement;
    use schemadoc_core::ElementKind;
    use super::test_support::writer;
    use std::path::PathBuf;

    fn report() -> GenerationReport {
        GenerationReport {
            written: vec![PathBuf::from("docs/index.md"), PathBuf::from("docs/Person.md")],
            skipped: vec![SkippedElement {
                kind: ElementKind::Type,
                name: "string".to_string(),
            }],
        }
    }

    #[test]
    fn test_human_report() {
        let (mut output, buffer) = writer(ReportFormat::Human, false);
        output.report(&report()).unwrap();
        assert_eq!(
            buffer.contents(),
            "✓ Wrote 2 documents\nINFO: 1 external elements skipped\n"
        );
    }

    #[test]
    fn test_json_report() {
        let (mut output, buffer) = writer(ReportFormat::Json, false);
        output.report(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(value["written"][1], "docs/Person.md");
        assert_eq!(value["skipped"][0]["kind"], "type");
    }

    #[test]
    fn test_quiet_suppresses_messages() {
        let (mut output, buffer) = writer(ReportFormat::Human, true);
        output.info("hidden").unwrap();
        output.success("hidden").unwrap();
        output.warning("shown").unwrap();
        assert_eq!(buffer.contents(), "WARNING: shown\n");
    }

    #[test]
    fn test_machine_formats_skip_messages() {
        let (mut output, buffer) = writer(ReportFormat::Yaml, false);
        output.info("hidden").unwrap();
        output.section("hidden").unwrap();
        assert!(buffer.contents().is_empty());
        assert!(output.spinner("working").is_none());
    }
}

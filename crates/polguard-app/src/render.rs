//! Render use cases: sink formats from in-memory reports, plus artifact writers.

use anyhow::Context;
use camino::Utf8Path;
use polguard_types::ScanReport;

use crate::report::{serialize_report, to_renderable};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Markdown,
    Html,
    Csv,
    Xlsx,
}

impl ReportFormat {
    pub fn name(self) -> &'static str {
        match self {
            ReportFormat::Markdown => "markdown",
            ReportFormat::Html => "html",
            ReportFormat::Csv => "csv",
            ReportFormat::Xlsx => "xlsx",
        }
    }

    /// Text formats can be printed to a terminal; XLSX is a zip archive.
    pub fn is_text(self) -> bool {
        !matches!(self, ReportFormat::Xlsx)
    }
}

/// Render a sink artifact. Text formats come back as UTF-8 bytes.
pub fn render_report(report: &ScanReport, format: ReportFormat) -> anyhow::Result<Vec<u8>> {
    let renderable = to_renderable(report);
    let bytes = match format {
        ReportFormat::Markdown => polguard_render::render_markdown(&renderable).into_bytes(),
        ReportFormat::Html => polguard_render::render_html(&renderable).into_bytes(),
        ReportFormat::Csv => polguard_render::render_csv(&renderable).into_bytes(),
        ReportFormat::Xlsx => {
            polguard_render::render_xlsx(&renderable).context("render xlsx workbook")?
        }
    };
    Ok(bytes)
}

pub fn write_report(path: &Utf8Path, report: &ScanReport) -> anyhow::Result<()> {
    let data = serialize_report(report)?;
    create_parent(path)?;
    std::fs::write(path, data).with_context(|| format!("write report: {path}"))?;
    log::debug!("wrote report {path}");
    Ok(())
}

pub fn write_artifact(path: &Utf8Path, bytes: &[u8]) -> anyhow::Result<()> {
    create_parent(path)?;
    std::fs::write(path, bytes).with_context(|| format!("write artifact: {path}"))?;
    log::debug!("wrote {path}");
    Ok(())
}

fn create_parent(path: &Utf8Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    Ok(())
}

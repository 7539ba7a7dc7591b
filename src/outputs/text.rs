//! Plain-text rendering for terminal output.

use crate::models::{ResolutionReport, ResolutionStatus, SourceDescriptor, SourceResolution};
use std::fmt::Write;

/// One line per source: `id  display name  [language]  landing page`.
pub fn catalog_to_text<'a>(sources: impl IntoIterator<Item = &'a SourceDescriptor>) -> String {
    let sources: Vec<&SourceDescriptor> = sources.into_iter().collect();
    let id_width = sources.iter().map(|s| s.id.chars().count()).max().unwrap_or(0);
    let name_width = sources
        .iter()
        .map(|s| s.display_name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for source in sources {
        let language = source.language.as_deref().unwrap_or("-");
        writeln!(
            out,
            "{:<id_width$}  {:<name_width$}  {:<8}  {}",
            source.id, source.display_name, language, source.landing_page_url
        )
        .unwrap();
    }
    out
}

pub fn descriptor_to_text(source: &SourceDescriptor) -> String {
    let mut out = String::new();
    writeln!(out, "id:           {}", source.id).unwrap();
    writeln!(out, "name:         {}", source.display_name).unwrap();
    writeln!(out, "landing page: {}", source.landing_page_url).unwrap();
    writeln!(out, "logo:         {}", source.logo_path).unwrap();
    if let Some(language) = &source.language {
        writeln!(out, "language:     {language}").unwrap();
    }
    out
}

pub fn resolution_to_text(resolution: &SourceResolution) -> String {
    match resolution.status {
        ResolutionStatus::Found => format!(
            "{}: {}",
            resolution.id,
            resolution.pdf_url.as_deref().unwrap_or_default()
        ),
        ResolutionStatus::NotFound => format!(
            "{}: no PDF link found on {}",
            resolution.id, resolution.landing_page_url
        ),
        ResolutionStatus::FetchFailed => format!(
            "{}: source unavailable ({})",
            resolution.id,
            resolution.error.as_deref().unwrap_or("unknown error")
        ),
    }
}

pub fn report_to_text(report: &ResolutionReport) -> String {
    let mut out = String::new();
    writeln!(out, "E-paper links for {} {}", report.local_date, report.local_time).unwrap();
    for resolution in &report.sources {
        writeln!(out, "  {}", resolution_to_text(resolution)).unwrap();
    }
    writeln!(
        out,
        "{} found, {} without PDF, {} unavailable",
        report.count(ResolutionStatus::Found),
        report.count(ResolutionStatus::NotFound),
        report.count(ResolutionStatus::FetchFailed)
    )
    .unwrap();
    out
}

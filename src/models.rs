//! Data models for newspaper sources and their resolved PDF links.
//!
//! This module defines the core data structures used throughout the application:
//! - [`SourceDescriptor`]: Static metadata describing one e-paper source
//! - [`SourceResolution`]: Outcome of resolving one source's landing page
//! - [`ResolutionReport`]: A dated collection of resolutions for a single run

use serde::{Deserialize, Serialize};

/// Static metadata for one newspaper source.
///
/// Descriptors are loaded once at start-up into a
/// [`SourceRegistry`](crate::registry::SourceRegistry) and never mutated
/// afterwards.
///
/// # Fields
///
/// * `id` - Unique registry key, e.g. `"hindu"`
/// * `display_name` - Human readable name, e.g. `"The Hindu"`
/// * `landing_page_url` - Page believed to link to today's PDF
/// * `logo_path` - Static asset path of the source logo
/// * `language` - Optional language tag used for display
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceDescriptor {
    pub id: String,
    pub display_name: String,
    pub landing_page_url: String,
    pub logo_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl SourceDescriptor {
    pub fn new(id: &str, display_name: &str, landing_page_url: &str, logo_path: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            landing_page_url: landing_page_url.to_string(),
            logo_path: logo_path.to_string(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }
}

/// How a single resolution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    /// The landing page was fetched and a PDF link was found.
    Found,
    /// The landing page was fetched but carries no PDF link.
    NotFound,
    /// The landing page could not be retrieved.
    FetchFailed,
}

/// The result of resolving one source, in a form suitable for reporting.
///
/// Unlike the `Result<Option<String>, _>` returned by the resolver, this
/// flattens all three outcomes into one serializable row so a batch run can
/// report every source side by side.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceResolution {
    pub id: String,
    pub display_name: String,
    pub landing_page_url: String,
    pub status: ResolutionStatus,
    /// The resolved link, present only when `status` is `found`.
    pub pdf_url: Option<String>,
    /// The fetch error message, present only when `status` is `fetch_failed`.
    pub error: Option<String>,
}

impl SourceResolution {
    pub fn found(source: &SourceDescriptor, pdf_url: String) -> Self {
        Self::with_status(source, ResolutionStatus::Found, Some(pdf_url), None)
    }

    pub fn not_found(source: &SourceDescriptor) -> Self {
        Self::with_status(source, ResolutionStatus::NotFound, None, None)
    }

    pub fn fetch_failed(source: &SourceDescriptor, error: String) -> Self {
        Self::with_status(source, ResolutionStatus::FetchFailed, None, Some(error))
    }

    fn with_status(
        source: &SourceDescriptor,
        status: ResolutionStatus,
        pdf_url: Option<String>,
        error: Option<String>,
    ) -> Self {
        Self {
            id: source.id.clone(),
            display_name: source.display_name.clone(),
            landing_page_url: source.landing_page_url.clone(),
            status,
            pdf_url,
            error,
        }
    }
}

/// A dated collection of resolutions produced by one `resolve-all` run.
///
/// Serialized to `{output_dir}/{local_date}/epapers.json` when an output
/// directory is given.
#[derive(Debug, Deserialize, Serialize)]
pub struct ResolutionReport {
    /// The date of the run in `YYYY-MM-DD` format.
    pub local_date: String,
    /// The local time of the run in `HH:MM:SS.microseconds` format.
    pub local_time: String,
    /// One entry per source, ordered by source id.
    pub sources: Vec<SourceResolution>,
}

impl ResolutionReport {
    pub fn count(&self, status: ResolutionStatus) -> usize {
        self.sources.iter().filter(|s| s.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hindu() -> SourceDescriptor {
        SourceDescriptor::new(
            "hindu",
            "The Hindu",
            "https://epapertoday.in/the-hindu-newspaper-pdf-download/",
            "/static/logos/hindu.png",
        )
    }

    #[test]
    fn test_descriptor_yaml_without_language() {
        let yaml = r#"
id: lokmat
display_name: Lokmat
landing_page_url: https://epapertoday.in/lokmat-newspaper-pdf-download/
logo_path: /static/logos/lokmat.png
"#;
        let descriptor: SourceDescriptor = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(descriptor.id, "lokmat");
        assert_eq!(descriptor.language, None);
    }

    #[test]
    fn test_descriptor_json_skips_missing_language() {
        let json = serde_json::to_string(&hindu()).unwrap();
        assert!(!json.contains("language"));

        let json = serde_json::to_string(&hindu().with_language("english")).unwrap();
        assert!(json.contains(r#""language":"english""#));
    }

    #[test]
    fn test_resolution_constructors() {
        let found = SourceResolution::found(&hindu(), "/files/today.pdf".to_string());
        assert_eq!(found.status, ResolutionStatus::Found);
        assert_eq!(found.pdf_url.as_deref(), Some("/files/today.pdf"));
        assert_eq!(found.error, None);

        let missing = SourceResolution::not_found(&hindu());
        assert_eq!(missing.status, ResolutionStatus::NotFound);
        assert_eq!(missing.pdf_url, None);

        let failed = SourceResolution::fetch_failed(&hindu(), "connection refused".to_string());
        assert_eq!(failed.status, ResolutionStatus::FetchFailed);
        assert_eq!(failed.error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&ResolutionStatus::FetchFailed).unwrap();
        assert_eq!(json, r#""fetch_failed""#);
        let json = serde_json::to_string(&ResolutionStatus::NotFound).unwrap();
        assert_eq!(json, r#""not_found""#);
    }

    #[test]
    fn test_report_counts() {
        let report = ResolutionReport {
            local_date: "2026-10-19".to_string(),
            local_time: "07:30:00".to_string(),
            sources: vec![
                SourceResolution::found(&hindu(), "/a.pdf".to_string()),
                SourceResolution::not_found(&hindu()),
                SourceResolution::found(&hindu(), "/b.pdf".to_string()),
            ],
        };
        assert_eq!(report.count(ResolutionStatus::Found), 2);
        assert_eq!(report.count(ResolutionStatus::NotFound), 1);
        assert_eq!(report.count(ResolutionStatus::FetchFailed), 0);
    }

    #[test]
    fn test_report_deserialization() {
        let json = r#"{
            "local_date": "2026-10-19",
            "local_time": "07:30:00",
            "sources": [{
                "id": "hindu",
                "display_name": "The Hindu",
                "landing_page_url": "https://example.com/",
                "status": "not_found",
                "pdf_url": null,
                "error": null
            }]
        }"#;
        let report: ResolutionReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.sources.len(), 1);
        assert_eq!(report.sources[0].status, ResolutionStatus::NotFound);
    }
}

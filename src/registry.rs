//! The newspaper source registry.
//!
//! A [`SourceRegistry`] is an immutable id → [`SourceDescriptor`] mapping that
//! is built once at start-up, either from the built-in catalog or from a YAML
//! file, and then passed by reference to whatever needs to look sources up.
//!
//! # Registry File Format
//!
//! ```yaml
//! - id: hindu
//!   display_name: The Hindu
//!   landing_page_url: https://epapertoday.in/the-hindu-newspaper-pdf-download/
//!   logo_path: /static/logos/hindu.png
//!   language: english        # optional
//! ```

use crate::models::SourceDescriptor;
use itertools::Itertools;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, instrument};
use url::Url;

/// Errors raised while building or querying a [`SourceRegistry`].
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("failed to read registry file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid registry YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("registry contains no sources")]
    Empty,

    #[error("duplicate source id: {0}")]
    DuplicateId(String),

    /// A required descriptor field is empty or whitespace.
    #[error("source '{id}' has an empty `{field}`")]
    EmptyField { id: String, field: &'static str },

    #[error("source '{id}' has an invalid landing page URL '{url}': {reason}")]
    InvalidUrl {
        id: String,
        url: String,
        reason: String,
    },

    #[error("unknown source: {0}")]
    UnknownSource(String),
}

/// Immutable mapping from source id to descriptor.
///
/// Iteration order is sorted by id.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: BTreeMap<String, SourceDescriptor>,
}

impl SourceRegistry {
    /// Build a registry, validating every descriptor.
    ///
    /// # Errors
    ///
    /// Fails when the list is empty, an id repeats, a required field is
    /// blank, or a landing page is not an absolute `http`/`https` URL.
    pub fn new(descriptors: Vec<SourceDescriptor>) -> Result<Self, RegistryError> {
        if descriptors.is_empty() {
            return Err(RegistryError::Empty);
        }

        if let Some(dup) = descriptors.iter().map(|d| d.id.as_str()).duplicates().next() {
            return Err(RegistryError::DuplicateId(dup.to_string()));
        }

        for descriptor in &descriptors {
            validate(descriptor)?;
        }

        let sources = descriptors
            .into_iter()
            .map(|d| (d.id.clone(), d))
            .collect::<BTreeMap<_, _>>();
        Ok(Self { sources })
    }

    /// The catalog that ships with the binary.
    pub fn builtin() -> Self {
        let descriptors = vec![
            SourceDescriptor::new(
                "hindu",
                "The Hindu",
                "https://epapertoday.in/the-hindu-newspaper-pdf-download/",
                "/static/logos/hindu.png",
            )
            .with_language("english"),
            SourceDescriptor::new(
                "lokmat",
                "Lokmat",
                "https://epapertoday.in/lokmat-newspaper-pdf-download/",
                "/static/logos/lokmat.png",
            )
            .with_language("marathi"),
            SourceDescriptor::new(
                "divya_marathi",
                "Divya Marathi",
                "https://epapertoday.in/divya-marathi-newspaper-pdf-download/",
                "/static/logos/divya-marathi.png",
            )
            .with_language("marathi"),
            SourceDescriptor::new(
                "indian_express",
                "Indian Express",
                "https://epapertoday.in/the-indian-express-newspaper-pdf-download/",
                "/static/logos/indian-express.png",
            )
            .with_language("english"),
        ];
        let sources = descriptors
            .into_iter()
            .map(|d| (d.id.clone(), d))
            .collect::<BTreeMap<_, _>>();
        Self { sources }
    }

    /// Parse a registry from a YAML sequence of descriptors.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RegistryError> {
        let descriptors: Vec<SourceDescriptor> = serde_yaml::from_str(yaml)?;
        debug!(count = descriptors.len(), "Parsed registry YAML");
        Self::new(descriptors)
    }

    /// Load a registry from a YAML file on disk.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn from_yaml_file(path: &Path) -> Result<Self, RegistryError> {
        let yaml = fs::read_to_string(path)
            .await
            .map_err(|source| RegistryError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let registry = Self::from_yaml_str(&yaml)?;
        info!(count = registry.len(), "Loaded source registry");
        Ok(registry)
    }

    /// Look a source up by id.
    pub fn get(&self, id: &str) -> Result<&SourceDescriptor, RegistryError> {
        self.sources
            .get(id)
            .ok_or_else(|| RegistryError::UnknownSource(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceDescriptor> {
        self.sources.values()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }
}

fn validate(descriptor: &SourceDescriptor) -> Result<(), RegistryError> {
    let fields = [
        ("id", &descriptor.id),
        ("display_name", &descriptor.display_name),
        ("landing_page_url", &descriptor.landing_page_url),
        ("logo_path", &descriptor.logo_path),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            return Err(RegistryError::EmptyField {
                id: descriptor.id.clone(),
                field,
            });
        }
    }

    if descriptor
        .language
        .as_deref()
        .is_some_and(|language| language.trim().is_empty())
    {
        return Err(RegistryError::EmptyField {
            id: descriptor.id.clone(),
            field: "language",
        });
    }

    let invalid = |reason: String| RegistryError::InvalidUrl {
        id: descriptor.id.clone(),
        url: descriptor.landing_page_url.clone(),
        reason,
    };
    let url = Url::parse(&descriptor.landing_page_url).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme `{other}`"))),
    }
}

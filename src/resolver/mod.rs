//! Landing-page link resolution.
//!
//! Each newspaper source publishes a landing page that links to the day's
//! PDF edition. Resolving a source is a single-shot operation:
//!
//! 1. **Fetch**: one HTTP GET to the landing page with a browser-like
//!    `User-Agent`, bounded by a request timeout
//! 2. **Match**: scan the returned HTML for the first PDF link (see [`html`])
//! 3. **Return**: the link verbatim, or an explicit absence
//!
//! A page that loads but carries no PDF link is *not* an error: it resolves
//! to `Ok(None)`. Only failing to retrieve the page is reported as a
//! [`ResolveError`], so callers can tell "source unavailable" apart from
//! "no PDF today".
//!
//! There are no retries and nothing is cached; every call issues its own
//! request and shares nothing mutable with concurrent calls.

pub mod html;

use crate::models::{SourceDescriptor, SourceResolution};
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

pub use html::{MatchMode, absolutize, find_pdf_link_with};

/// Browser-like identifier sent with every landing-page request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Upper bound on a single landing-page request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of sources resolved at once by [`LinkResolver::resolve_sources`].
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Failure to retrieve a landing page.
///
/// "No PDF link on the page" is deliberately absent from this enum; it is
/// the `Ok(None)` outcome of [`LinkResolver::resolve_pdf_link`].
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The HTTP client itself could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection, TLS, timeout, invalid URL or body read failure.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("fetching {url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
}

impl ResolveError {
    /// Whether this error means the landing page could not be retrieved.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Status { .. })
    }

    fn fetch(url: &str, source: reqwest::Error) -> Self {
        Self::Fetch {
            url: url.to_string(),
            source,
        }
    }
}

/// Settings for a [`LinkResolver`].
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub mode: MatchMode,
    /// Join relative targets onto the landing page URL before returning them.
    pub absolute: bool,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub system_proxy: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            mode: MatchMode::Strict,
            absolute: false,
            system_proxy: true,
        }
    }
}

/// Resolves landing pages to PDF links.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    client: Client,
    config: ResolverConfig,
}

impl LinkResolver {
    /// Build a resolver and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Client`] if the TLS backend cannot be
    /// initialised.
    pub fn new(config: ResolverConfig) -> Result<Self, ResolveError> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(ResolveError::Client)?;
        debug!(?config, "Built link resolver");
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Fetch `page_url` and return its first PDF link.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(link))` with the link exactly as written in the markup
    ///   (joined onto `page_url` when [`ResolverConfig::absolute`] is set)
    /// - `Ok(None)` when the page loaded but has no matching link
    ///
    /// # Errors
    ///
    /// [`ResolveError::Fetch`] on transport failure or timeout and
    /// [`ResolveError::Status`] on a non-2xx response.
    #[instrument(level = "info", skip(self))]
    pub async fn resolve_pdf_link(&self, page_url: &str) -> Result<Option<String>, ResolveError> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(page_url)
            .send()
            .await
            .map_err(|e| ResolveError::fetch(page_url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Landing page returned non-success status");
            return Err(ResolveError::Status {
                url: page_url.to_string(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ResolveError::fetch(page_url, e))?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched landing page"
        );

        let link = find_pdf_link_with(&body, self.config.mode).map(|href| {
            if self.config.absolute {
                absolutize(page_url, &href).unwrap_or(href)
            } else {
                href
            }
        });

        match &link {
            Some(href) => info!(%href, "Resolved PDF link"),
            None => {
                info!("No PDF link on landing page");
                debug!(preview = %truncate_for_log(&body, 300), "Landing page body");
            }
        }
        Ok(link)
    }

    /// Resolve one registered source into a report row.
    #[instrument(level = "info", skip_all, fields(id = %source.id))]
    pub async fn resolve_source(&self, source: &SourceDescriptor) -> SourceResolution {
        match self.resolve_pdf_link(&source.landing_page_url).await {
            Ok(Some(link)) => SourceResolution::found(source, link),
            Ok(None) => SourceResolution::not_found(source),
            Err(e) => {
                error!(error = %e, fetch_failure = e.is_fetch_failure(), "Source resolution failed");
                SourceResolution::fetch_failed(source, e.to_string())
            }
        }
    }

    /// Resolve many sources concurrently, at most `concurrency` at a time.
    ///
    /// Every source yields exactly one row; one source failing has no
    /// effect on the others. Rows come back ordered by source id.
    #[instrument(level = "info", skip_all, fields(concurrency = concurrency))]
    pub async fn resolve_sources<'a, I>(&self, sources: I, concurrency: usize) -> Vec<SourceResolution>
    where
        I: IntoIterator<Item = &'a SourceDescriptor>,
    {
        let mut results: Vec<SourceResolution> = stream::iter(sources)
            .map(|source| self.resolve_source(source))
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;
        results.sort_by(|a, b| a.id.cmp(&b.id));

        info!(count = results.len(), "Resolved sources");
        results
    }
}

//! Async wrapper around [`DeckImporter`] for use in async runtimes (Tokio, etc.).
//!
//! The importer uses a blocking `reqwest` client, so every call is moved to
//! Tokio's blocking thread pool via [`tokio::task::spawn_blocking`], keeping
//! the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use mtg_board_state::AsyncDeckImporter;
//!
//! #[tokio::main]
//! async fn main() {
//!     let importer = AsyncDeckImporter::builder().build().await.unwrap();
//!     let deck = importer
//!         .normalize("https://archidekt.com/decks/123456/my_deck")
//!         .await
//!         .unwrap();
//!     println!("{}\n{}", deck.name, deck.list);
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::config;
use crate::error::{BoardStateError, Result};
use crate::importer::DeckImporter;
use crate::models::DeckPayload;
use crate::providers::ProviderRegistry;

// ---------------------------------------------------------------------------
// AsyncDeckImporterBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncDeckImporter`].
pub struct AsyncDeckImporterBuilder {
    timeout: Duration,
    registry: Option<ProviderRegistry>,
}

impl Default for AsyncDeckImporterBuilder {
    fn default() -> Self {
        Self {
            timeout: config::DEFAULT_TIMEOUT,
            registry: None,
        }
    }
}

impl AsyncDeckImporterBuilder {
    /// Set the HTTP request timeout for provider API calls.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the provider set (defaults to Moxfield and Archidekt).
    pub fn registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build the importer on the blocking pool. The blocking HTTP client
    /// must never be created or dropped on an async worker thread.
    pub async fn build(self) -> Result<AsyncDeckImporter> {
        tokio::task::spawn_blocking(move || {
            let mut builder = DeckImporter::builder()
                .timeout(self.timeout)
                .cors_proxy(None)
                .fallback_endpoint(None);
            if let Some(registry) = self.registry {
                builder = builder.registry(registry);
            }
            Ok(AsyncDeckImporter {
                inner: Arc::new(builder.build()),
            })
        })
        .await
        .map_err(|e| BoardStateError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncDeckImporter
// ---------------------------------------------------------------------------

/// Async wrapper around [`DeckImporter`], configured for server-side use
/// (direct provider calls, no proxy or fallback tier).
#[derive(Clone)]
pub struct AsyncDeckImporter {
    inner: Arc<DeckImporter>,
}

impl AsyncDeckImporter {
    pub fn builder() -> AsyncDeckImporterBuilder {
        AsyncDeckImporterBuilder::default()
    }

    /// Run a sync importer operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&DeckImporter) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let importer = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&importer))
            .await
            .map_err(|e| BoardStateError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Fetch and normalize a deck URL asynchronously.
    ///
    /// Convenience wrapper around [`run()`](Self::run) for
    /// [`DeckImporter::normalize()`].
    pub async fn normalize(&self, url: &str) -> Result<DeckPayload> {
        let url = url.to_string();
        self.run(move |i| i.normalize(&url)).await
    }
}

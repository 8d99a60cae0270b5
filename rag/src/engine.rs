//! High-level orchestrator: `ingest` and `ask`.

use finsight_core::{CompletionModel, EmbeddingModel};
use finsight_loader::ContentLoader;

use crate::chunking::{Chunker, RecursiveChunker};
use crate::cleaning::{BasicCleaner, Cleaner};
use crate::config::RagConfig;
use crate::error::{FetchFailure, IngestError, QueryError};
use crate::index::VectorIndex;
use crate::store::IndexStore;
use crate::types::{Answer, Document, IngestReport};

/// Outcome of [`ResearchEngine::ask`].
///
/// Asking before any ingest has happened is an expected state, not a
/// failure, so it gets its own success-path variant.
#[derive(Clone, Debug)]
pub enum AskOutcome {
    /// No index has been built yet; ingest some URLs first.
    NotReady,
    /// The question was answered.
    Answer(Answer),
}

/// The research pipeline: URL ingestion on one side, grounded question
/// answering on the other.
///
/// Every collaborator is owned explicitly — models, loader, chunker,
/// cleaner, store — so the engine can be embedded in any front end and
/// tested with in-memory fakes. The persisted index file is the only state
/// shared between `ingest` and `ask`.
pub struct ResearchEngine<M, G, L, C = RecursiveChunker, N = BasicCleaner>
where
    M: EmbeddingModel,
    G: CompletionModel,
    L: ContentLoader,
    C: Chunker,
    N: Cleaner,
{
    embedder: M,
    generator: G,
    loader: L,
    chunker: C,
    cleaner: N,
    store: IndexStore,
    config: RagConfig,
}

impl<M, G, L, C, N> std::fmt::Debug for ResearchEngine<M, G, L, C, N>
where
    M: EmbeddingModel,
    G: CompletionModel,
    L: ContentLoader,
    C: Chunker,
    N: Cleaner,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResearchEngine")
            .field("chunker", &self.chunker.name())
            .field("cleaner", &self.cleaner.name())
            .field("store", &self.store)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<M, G, L> ResearchEngine<M, G, L>
where
    M: EmbeddingModel,
    G: CompletionModel,
    L: ContentLoader,
{
    /// Creates an engine with the default chunker and cleaner derived from
    /// `config`.
    #[must_use]
    pub fn new(embedder: M, generator: G, loader: L, config: RagConfig) -> Self {
        let chunker = RecursiveChunker::new(config.chunk_size, config.chunk_overlap);
        Self::with_components(embedder, generator, loader, chunker, BasicCleaner, config)
    }
}

impl<M, G, L, C, N> ResearchEngine<M, G, L, C, N>
where
    M: EmbeddingModel,
    G: CompletionModel,
    L: ContentLoader,
    C: Chunker,
    N: Cleaner,
{
    /// Creates an engine with explicit chunking and cleaning strategies.
    #[must_use]
    pub fn with_components(
        embedder: M,
        generator: G,
        loader: L,
        chunker: C,
        cleaner: N,
        config: RagConfig,
    ) -> Self {
        let store = IndexStore::new(&config.index_path);
        Self {
            embedder,
            generator,
            loader,
            chunker,
            cleaner,
            store,
            config,
        }
    }

    /// Fetches the given URLs, chunks and embeds their text, and atomically
    /// replaces the persisted index.
    ///
    /// Blank entries are filtered out before anything else; an all-blank
    /// batch fails with [`IngestError::NoInput`] without touching the
    /// network. Any fetch failure aborts the whole batch and reports every
    /// failing URL. Any embedding failure aborts before persistence, so a
    /// previously saved index survives every failure mode unchanged.
    ///
    /// # Errors
    ///
    /// See [`IngestError`].
    pub async fn ingest(&self, urls: &[String]) -> Result<IngestReport, IngestError> {
        let requested: Vec<&str> = urls
            .iter()
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
            .collect();
        if requested.is_empty() {
            return Err(IngestError::NoInput);
        }
        if requested.len() > self.config.max_urls {
            return Err(IngestError::TooManyUrls {
                limit: self.config.max_urls,
            });
        }

        let mut documents = Vec::with_capacity(requested.len());
        let mut failures = Vec::new();
        for url in &requested {
            match self.loader.load(url).await {
                Ok(page) => documents.push(Document::new(page.url, page.text)),
                Err(err) => failures.push(FetchFailure {
                    url: (*url).to_string(),
                    reason: err.to_string(),
                }),
            }
        }
        if !failures.is_empty() {
            return Err(IngestError::Fetch { failures });
        }

        let mut chunks = Vec::new();
        for document in &documents {
            let cleaned = self.cleaner.clean(document);
            chunks.extend(self.chunker.chunk(&cleaned));
        }
        tracing::debug!(
            documents = documents.len(),
            chunks = chunks.len(),
            "chunked batch"
        );

        let mut index = VectorIndex::new(self.embedder.dim());
        for chunk in chunks {
            let embedding = self
                .embedder
                .embed(&chunk.text)
                .await
                .map_err(IngestError::Embedding)?;
            index.push(chunk, embedding)?;
        }

        let report = IngestReport {
            documents: documents.len(),
            chunks: index.len(),
        };
        self.store.save(&index)?;
        tracing::info!(
            documents = report.documents,
            chunks = report.chunks,
            "ingest complete"
        );
        Ok(report)
    }

    /// Answers a question against the persisted index.
    ///
    /// Returns [`AskOutcome::NotReady`] when no index file exists yet.
    /// Otherwise the query is embedded, the index loaded and validated, the
    /// closest chunks retrieved, and their texts stuffed in rank order into
    /// a single context block for the completion model.
    ///
    /// # Errors
    ///
    /// See [`QueryError`].
    pub async fn ask(&self, query: &str) -> Result<AskOutcome, QueryError> {
        if !self.store.exists() {
            return Ok(AskOutcome::NotReady);
        }

        let query_vector = self
            .embedder
            .embed(query)
            .await
            .map_err(QueryError::Embedding)?;
        let index = self.store.load()?;
        let sources = index.search(&query_vector, self.config.top_k)?;
        tracing::debug!(retrieved = sources.len(), "retrieved context chunks");

        let context = sources
            .iter()
            .map(|result| result.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let text = self
            .generator
            .complete(&context, query, self.config.temperature)
            .await
            .map_err(QueryError::Generation)?;

        Ok(AskOutcome::Answer(Answer {
            query: query.to_string(),
            text,
            sources,
        }))
    }

    /// Returns the engine configuration.
    pub const fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Returns the index store.
    pub const fn store(&self) -> &IndexStore {
        &self.store
    }
}

//! Document ingestion with progress tracking.

use crate::chunking::{Chunker, WordChunker};
use crate::types::Document;
use quern_core::{EmbeddingModel, Error, IndexRecord, VectorStore};
use std::fmt;
use std::path::Path;

/// Stages of the ingestion pipeline.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IngestStage {
    /// Reading the source file.
    Read,
    /// Splitting text into chunks.
    Chunk,
    /// Embedding chunks.
    Embed,
    /// Writing records to the vector store.
    Upsert,
    /// Ingestion completed successfully.
    Done,
}

impl fmt::Display for IngestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Read => "read",
            Self::Chunk => "chunk",
            Self::Embed => "embed",
            Self::Upsert => "upsert",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Progress update emitted during ingestion.
#[derive(Clone, Debug)]
pub struct IngestProgress {
    /// Current pipeline stage.
    pub stage: IngestStage,
    /// Chunks completed in the current stage.
    pub completed: usize,
    /// Total chunks, once known.
    pub total: usize,
}

impl IngestProgress {
    /// Creates a new progress update.
    #[must_use]
    pub const fn new(stage: IngestStage, completed: usize, total: usize) -> Self {
        Self {
            stage,
            completed,
            total,
        }
    }
}

/// Summary of a completed ingestion run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IngestReport {
    /// Number of chunks produced from the document.
    pub chunks: usize,
    /// Number of records the store accepted.
    pub upserted: usize,
}

/// A failed ingestion run: which stage broke, and on which chunk.
#[derive(Debug)]
pub struct IngestFailure {
    /// The stage that failed.
    pub stage: IngestStage,
    /// Index of the offending chunk, for per-chunk stages.
    pub chunk: Option<usize>,
    /// The underlying error.
    pub source: Error,
}

impl fmt::Display for IngestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.chunk {
            Some(index) => write!(
                f,
                "ingestion failed at {} stage on chunk {index}: {}",
                self.stage, self.source
            ),
            None => write!(f, "ingestion failed at {} stage: {}", self.stage, self.source),
        }
    }
}

impl std::error::Error for IngestFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Ingestion pipeline: read, chunk, embed, upsert.
///
/// Each document moves through the stages strictly in order, and the first
/// failing stage aborts the run with an [`IngestFailure`] naming it. Chunk
/// ids restart from `chunk-0` per run, so ingesting the same document twice
/// overwrites rather than duplicates.
pub struct Ingestor<M, S, C = WordChunker> {
    embedder: M,
    store: S,
    chunker: C,
}

impl<M, S, C> fmt::Debug for Ingestor<M, S, C>
where
    C: Chunker,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ingestor")
            .field("chunker", &self.chunker.name())
            .finish_non_exhaustive()
    }
}

impl<M, S> Ingestor<M, S> {
    /// Creates an ingestor with the default word-window chunker.
    pub fn new(embedder: M, store: S) -> Self {
        Self {
            embedder,
            store,
            chunker: WordChunker::default(),
        }
    }
}

impl<M, S, C> Ingestor<M, S, C> {
    /// Replaces the chunking strategy.
    pub fn with_chunker<C2: Chunker>(self, chunker: C2) -> Ingestor<M, S, C2> {
        Ingestor {
            embedder: self.embedder,
            store: self.store,
            chunker,
        }
    }
}

impl<M, S, C> Ingestor<M, S, C>
where
    M: EmbeddingModel,
    S: VectorStore,
    C: Chunker,
{
    /// Ingests a document already in memory.
    ///
    /// # Errors
    ///
    /// Returns an [`IngestFailure`] naming the first stage that failed.
    pub async fn ingest(&self, document: &Document) -> Result<IngestReport, IngestFailure> {
        self.ingest_with_progress(document, |_| {}).await
    }

    /// Ingests a document, reporting stage transitions to `on_progress`.
    ///
    /// # Errors
    ///
    /// Returns an [`IngestFailure`] naming the first stage that failed.
    pub async fn ingest_with_progress<F>(
        &self,
        document: &Document,
        mut on_progress: F,
    ) -> Result<IngestReport, IngestFailure>
    where
        F: FnMut(IngestProgress),
    {
        on_progress(IngestProgress::new(IngestStage::Chunk, 0, 0));
        let chunks = self
            .chunker
            .chunk(&document.text)
            .map_err(|source| IngestFailure {
                stage: IngestStage::Chunk,
                chunk: None,
                source,
            })?;
        let total = chunks.len();
        tracing::debug!(
            source = %document.source,
            chunks = total,
            chunker = self.chunker.name(),
            "document chunked"
        );

        let mut records = Vec::with_capacity(total);
        for chunk in &chunks {
            on_progress(IngestProgress::new(IngestStage::Embed, records.len(), total));
            let values = self
                .embedder
                .embed(&chunk.text)
                .await
                .map_err(|source| IngestFailure {
                    stage: IngestStage::Embed,
                    chunk: Some(chunk.index),
                    source,
                })?;
            records.push(IndexRecord::with_text(chunk.id(), values, &chunk.text));
        }

        let mut upserted = 0;
        if !records.is_empty() {
            on_progress(IngestProgress::new(IngestStage::Upsert, total, total));
            let report = self
                .store
                .upsert(records)
                .await
                .map_err(|source| IngestFailure {
                    stage: IngestStage::Upsert,
                    chunk: None,
                    source,
                })?;
            if !report.is_complete() {
                return Err(IngestFailure {
                    stage: IngestStage::Upsert,
                    chunk: None,
                    source: Error::IndexUnavailable(anyhow::anyhow!(
                        "index rejected {} of {} records",
                        report.failed.len(),
                        total
                    )),
                });
            }
            upserted = report.upserted;
        }

        on_progress(IngestProgress::new(IngestStage::Done, total, total));
        tracing::info!(source = %document.source, chunks = total, upserted, "document ingested");
        Ok(IngestReport {
            chunks: total,
            upserted,
        })
    }

    /// Reads the file at `path` and ingests it.
    ///
    /// # Errors
    ///
    /// Returns an [`IngestFailure`] naming the first stage that failed; an
    /// unreadable file fails at the read stage.
    pub async fn ingest_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<IngestReport, IngestFailure> {
        self.ingest_file_with_progress(path, |_| {}).await
    }

    /// Reads and ingests a file, reporting stage transitions to
    /// `on_progress`.
    ///
    /// # Errors
    ///
    /// Returns an [`IngestFailure`] naming the first stage that failed.
    pub async fn ingest_file_with_progress<F>(
        &self,
        path: impl AsRef<Path>,
        mut on_progress: F,
    ) -> Result<IngestReport, IngestFailure>
    where
        F: FnMut(IngestProgress),
    {
        on_progress(IngestProgress::new(IngestStage::Read, 0, 0));
        let document = Document::read(path).map_err(|source| IngestFailure {
            stage: IngestStage::Read,
            chunk: None,
            source,
        })?;
        self.ingest_with_progress(&document, on_progress).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use quern_core::Result;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockEmbedder {
        dimension: usize,
        calls: AtomicUsize,
        fail_on_call: Option<usize>,
    }

    impl MockEmbedder {
        fn new(dimension: usize) -> Self {
            Self {
                dimension,
                calls: AtomicUsize::new(0),
                fail_on_call: None,
            }
        }

        fn failing_on(dimension: usize, call: usize) -> Self {
            Self {
                fail_on_call: Some(call),
                ..Self::new(dimension)
            }
        }
    }

    impl EmbeddingModel for MockEmbedder {
        fn dim(&self) -> usize {
            self.dimension
        }

        #[allow(clippy::cast_precision_loss)]
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on_call == Some(call) {
                return Err(Error::EmbeddingUnavailable(anyhow::anyhow!(
                    "backend down"
                )));
            }
            let mut values = vec![0.0; self.dimension];
            for (i, value) in values.iter_mut().enumerate() {
                *value = (text.len() + i) as f32 * 0.01;
            }
            Ok(values)
        }
    }

    fn many_words(count: usize) -> String {
        (0..count).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ")
    }

    #[tokio::test]
    async fn document_lands_in_store_with_positional_ids() {
        let ingestor = Ingestor::new(MockEmbedder::new(4), MemoryStore::new())
            .with_chunker(WordChunker::new(10).unwrap());
        let document = Document::new("kb.txt", many_words(25));

        let report = ingestor.ingest(&document).await.unwrap();
        assert_eq!(report, IngestReport { chunks: 3, upserted: 3 });

        let store = &ingestor.store;
        assert_eq!(store.len(), 3);
        let matches = store.query(&[0.0; 4], 3, true).await.unwrap();
        let mut ids: Vec<&str> = matches.iter().map(|m| m.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["chunk-0", "chunk-1", "chunk-2"]);
        assert!(matches.iter().all(|m| m.text().is_some()));
    }

    #[tokio::test]
    async fn reingesting_overwrites_instead_of_duplicating() {
        let ingestor = Ingestor::new(MockEmbedder::new(4), MemoryStore::new())
            .with_chunker(WordChunker::new(10).unwrap());
        let document = Document::new("kb.txt", many_words(25));

        ingestor.ingest(&document).await.unwrap();
        ingestor.ingest(&document).await.unwrap();

        assert_eq!(ingestor.store.len(), 3);
    }

    #[tokio::test]
    async fn empty_document_upserts_nothing() {
        let ingestor = Ingestor::new(MockEmbedder::new(4), MemoryStore::new());
        let report = ingestor.ingest(&Document::new("empty.txt", "   ")).await.unwrap();
        assert_eq!(report, IngestReport { chunks: 0, upserted: 0 });
        assert!(ingestor.store.is_empty());
    }

    #[tokio::test]
    async fn embed_failure_names_stage_and_chunk() {
        let ingestor = Ingestor::new(MockEmbedder::failing_on(4, 1), MemoryStore::new())
            .with_chunker(WordChunker::new(10).unwrap());
        let document = Document::new("kb.txt", many_words(25));

        let failure = ingestor.ingest(&document).await.unwrap_err();
        assert_eq!(failure.stage, IngestStage::Embed);
        assert_eq!(failure.chunk, Some(1));
        assert_eq!(failure.source.descriptor(), "EmbeddingUnavailable");
        // Nothing was upserted for the aborted run
        assert!(ingestor.store.is_empty());
    }

    #[tokio::test]
    async fn progress_walks_the_stages_in_order() {
        let ingestor = Ingestor::new(MockEmbedder::new(4), MemoryStore::new())
            .with_chunker(WordChunker::new(10).unwrap());
        let document = Document::new("kb.txt", many_words(25));

        let mut stages = Vec::new();
        ingestor
            .ingest_with_progress(&document, |progress| stages.push(progress.stage))
            .await
            .unwrap();

        assert_eq!(
            stages,
            vec![
                IngestStage::Chunk,
                IngestStage::Embed,
                IngestStage::Embed,
                IngestStage::Embed,
                IngestStage::Upsert,
                IngestStage::Done,
            ]
        );
    }

    #[tokio::test]
    async fn file_ingestion_starts_at_read_stage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", many_words(12)).unwrap();

        let ingestor = Ingestor::new(MockEmbedder::new(4), MemoryStore::new())
            .with_chunker(WordChunker::new(10).unwrap());

        let mut first_stage = None;
        let report = ingestor
            .ingest_file_with_progress(file.path(), |progress| {
                first_stage.get_or_insert(progress.stage);
            })
            .await
            .unwrap();

        assert_eq!(first_stage, Some(IngestStage::Read));
        assert_eq!(report.chunks, 2);
    }

    #[tokio::test]
    async fn missing_file_fails_at_read_stage() {
        let ingestor = Ingestor::new(MockEmbedder::new(4), MemoryStore::new());
        let failure = ingestor.ingest_file("/nonexistent/kb.txt").await.unwrap_err();
        assert_eq!(failure.stage, IngestStage::Read);
        assert_eq!(failure.chunk, None);
        assert!(failure.to_string().contains("read stage"));
    }
}

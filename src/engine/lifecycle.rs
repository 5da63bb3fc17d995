//! Ownership of the active index snapshot.
//!
//! Responsibilities:
//! - Hold exactly one complete snapshot behind a single swappable handle.
//! - Number rebuild requests so the newest request wins.
//! - Drop results of builds that finished after a newer request was issued.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::instrument;

use crate::constants::EMPTY_SNAPSHOT_VERSION;
use crate::excerpt::ExcerptBuilder;
use crate::lex::{LexIndex, LexIndexBuilder};
use crate::types::{SearchConfig, Transcript, TranscriptId};
use crate::{Result, TranscriptSeekError};

/// Primary handle for searching a transcript collection.
///
/// Queries read whichever snapshot is active when they start and keep using it
/// until they finish, so a concurrent rebuild never shows them a partial index.
pub struct TranscriptSearch {
    pub(crate) config: SearchConfig,
    pub(crate) excerpts: ExcerptBuilder,
    active: RwLock<Arc<LexIndex>>,
    requested: AtomicU64,
}

impl std::fmt::Debug for TranscriptSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptSearch")
            .field("config", &self.config)
            .field("active_version", &self.version())
            .field("requested", &self.requested.load(Ordering::SeqCst))
            .finish()
    }
}

/// Reservation for one rebuild. Its version orders it against other requests.
#[derive(Debug, Clone)]
pub struct RebuildTicket {
    version: u64,
    config: SearchConfig,
}

/// A built snapshot waiting to be installed.
#[derive(Debug)]
pub struct PendingSnapshot {
    index: LexIndex,
}

impl PendingSnapshot {
    #[must_use]
    pub fn version(&self) -> u64 {
        self.index.version()
    }

    #[must_use]
    pub fn index(&self) -> &LexIndex {
        &self.index
    }
}

/// What happened to a finished build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
    Installed { version: u64 },
    /// A newer request was issued before this build could be installed.
    Discarded { version: u64, superseded_by: u64 },
}

impl RebuildOutcome {
    #[must_use]
    pub fn is_installed(&self) -> bool {
        matches!(self, Self::Installed { .. })
    }
}

impl RebuildTicket {
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn build<I>(self, transcripts: I) -> Result<PendingSnapshot>
    where
        I: IntoIterator<Item = Transcript>,
    {
        let index = LexIndexBuilder::new(&self.config)
            .version(self.version)
            .build(transcripts)?;
        Ok(PendingSnapshot { index })
    }
}

impl Default for TranscriptSearch {
    fn default() -> Self {
        Self::with_valid_config(SearchConfig::default())
    }
}

impl TranscriptSearch {
    /// Create a handle with an empty snapshot.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: SearchConfig) -> Self {
        Self {
            excerpts: ExcerptBuilder::new(config.context_width),
            active: RwLock::new(Arc::new(LexIndex::empty(&config))),
            requested: AtomicU64::new(EMPTY_SNAPSHOT_VERSION),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The snapshot queries started now would see.
    #[must_use]
    pub fn snapshot(&self) -> Arc<LexIndex> {
        let guard = self.active.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Version of the active snapshot.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.snapshot().version()
    }

    /// Reserve the next rebuild slot. Any ticket issued earlier becomes stale.
    pub fn begin_rebuild(&self) -> RebuildTicket {
        let version = self.requested.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(version, "rebuild requested");
        RebuildTicket {
            version,
            config: self.config.clone(),
        }
    }

    /// Install a finished build unless a newer request has been issued since.
    pub fn install(&self, pending: PendingSnapshot) -> RebuildOutcome {
        let version = pending.version();
        let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
        let latest = self.requested.load(Ordering::SeqCst);
        if version != latest || active.version() >= version {
            let superseded_by = latest.max(active.version());
            tracing::debug!(version, superseded_by, "discarding stale snapshot");
            return RebuildOutcome::Discarded {
                version,
                superseded_by,
            };
        }

        let index = Arc::new(pending.index);
        tracing::info!(
            version,
            transcripts = index.transcript_count(),
            terms = index.term_count(),
            fingerprint = %index.fingerprint().to_hex(),
            "installed snapshot"
        );
        *active = index;
        RebuildOutcome::Installed { version }
    }

    /// Rebuild from the full current collection and install the result.
    ///
    /// On error the previously active snapshot stays in place.
    #[instrument(skip_all)]
    pub fn rebuild<I>(&self, transcripts: I) -> Result<RebuildOutcome>
    where
        I: IntoIterator<Item = Transcript>,
    {
        let ticket = self.begin_rebuild();
        let pending = ticket.build(transcripts)?;
        Ok(self.install(pending))
    }

    /// Transcript `id` as held by the active snapshot.
    pub fn transcript(&self, id: &TranscriptId) -> Result<Transcript> {
        self.snapshot()
            .transcript_by_id(id)
            .cloned()
            .ok_or_else(|| TranscriptSeekError::UnknownTranscript { id: id.clone() })
    }
}

//! Append-only log of persisted labels.

use pmst_core::errors::{ErrorInfo, PmstError};
use pmst_core::EdgeId;

/// Predecessor index of the root entry.
pub const SENTINEL: usize = usize::MAX;

const BLOCK_SIZE: usize = 1000;

/// One persisted label: where it came from and the edge that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Archive index of the predecessor, or [`SENTINEL`].
    pub pred: usize,
    /// Last edge of the partial tree; `None` for the root.
    pub edge: Option<EdgeId>,
}

/// Block-growable archive with stable indices.
#[derive(Debug, Clone, Default)]
pub struct PermanentArchive {
    blocks: Vec<Vec<ArchiveEntry>>,
    len: usize,
}

impl PermanentArchive {
    /// Creates an empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the next [`push`](Self::push) will return.
    pub fn next_index(&self) -> usize {
        self.len
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been persisted.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends an entry and returns its index.
    pub fn push(&mut self, pred: usize, edge: Option<EdgeId>) -> usize {
        if self.len % BLOCK_SIZE == 0 {
            self.blocks.push(Vec::with_capacity(BLOCK_SIZE));
        }
        if let Some(block) = self.blocks.last_mut() {
            block.push(ArchiveEntry { pred, edge });
        }
        self.len += 1;
        self.len - 1
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<ArchiveEntry> {
        self.blocks
            .get(index / BLOCK_SIZE)
            .and_then(|block| block.get(index % BLOCK_SIZE))
            .copied()
    }

    /// Edges of the tree persisted at `index`, from the root outwards.
    pub fn walk(&self, index: usize) -> Result<Vec<EdgeId>, PmstError> {
        let mut edges = Vec::new();
        let mut cursor = index;
        let mut steps = 0usize;
        while cursor != SENTINEL {
            let entry = self.get(cursor).ok_or_else(|| {
                PmstError::Search(
                    ErrorInfo::new("archive-index", "archive index out of range")
                        .with_context("index", cursor)
                        .with_context("len", self.len),
                )
            })?;
            if entry.pred != SENTINEL && entry.pred >= cursor {
                return Err(PmstError::invariant(
                    "archive-order",
                    "predecessor was persisted after its successor",
                ));
            }
            edges.extend(entry.edge);
            cursor = entry.pred;
            steps += 1;
            debug_assert!(steps <= self.len);
        }
        edges.reverse();
        Ok(edges)
    }
}

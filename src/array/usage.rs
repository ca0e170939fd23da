//! Resource-tracking handshake around a lambda call.
//!
//! Before dispatch the target buffer is marked as written and the source
//! buffers as read; the marks are dropped once the call has finished,
//! whether it succeeded or not. Views share the usage record of the buffer
//! they look into, so a buffer appearing several times in one call is
//! marked once per role.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::error::LambdaOp;

static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(0);

/// In-flight uses of one device buffer.
#[derive(Debug)]
pub(crate) struct BufferUsage {
    id: u64,
    readers: AtomicUsize,
    writers: AtomicUsize,
}

impl BufferUsage {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            id: NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed),
            readers: AtomicUsize::new(0),
            writers: AtomicUsize::new(0),
        })
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn readers(&self) -> usize {
        self.readers.load(Ordering::Acquire)
    }

    pub(crate) fn writers(&self) -> usize {
        self.writers.load(Ordering::Acquire)
    }
}

/// Marks held for the duration of one call. Released on drop.
#[must_use = "the marks are released as soon as the guard is dropped"]
pub(crate) struct SpecialUse {
    op: LambdaOp,
    writes: SmallVec<[Arc<BufferUsage>; 1]>,
    reads: SmallVec<[Arc<BufferUsage>; 3]>,
}

impl SpecialUse {
    /// Marks `writes` as written and `reads` as read.
    pub(crate) fn prepare(
        op: LambdaOp,
        writes: &[&Arc<BufferUsage>],
        reads: &[&Arc<BufferUsage>],
    ) -> Self {
        let writes: SmallVec<[Arc<BufferUsage>; 1]> = unique(writes);
        let reads: SmallVec<[Arc<BufferUsage>; 3]> = unique(reads);

        for buffer in &writes {
            buffer.writers.fetch_add(1, Ordering::AcqRel);
        }
        for buffer in &reads {
            buffer.readers.fetch_add(1, Ordering::AcqRel);
        }

        if writes.iter().any(|w| reads.iter().any(|r| r.id == w.id)) {
            log::trace!("{op}: target buffer is also read, applying in place");
        }
        log::trace!(
            "{op}: prepared {} written and {} read buffers",
            writes.len(),
            reads.len()
        );

        Self { op, writes, reads }
    }

    /// Drops the marks.
    pub(crate) fn release(self) {
        drop(self);
    }
}

impl Drop for SpecialUse {
    fn drop(&mut self) {
        for buffer in &self.writes {
            buffer.writers.fetch_sub(1, Ordering::AcqRel);
        }
        for buffer in &self.reads {
            buffer.readers.fetch_sub(1, Ordering::AcqRel);
        }
        log::trace!("{}: released buffer marks", self.op);
    }
}

fn unique<const N: usize>(buffers: &[&Arc<BufferUsage>]) -> SmallVec<[Arc<BufferUsage>; N]> {
    let mut seen = HashSet::with_capacity(buffers.len());
    buffers
        .iter()
        .filter(|buffer| seen.insert(buffer.id))
        .map(|buffer| Arc::clone(buffer))
        .collect()
}

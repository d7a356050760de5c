#![forbid(unsafe_code)]

use crate::buffer::GeometryBuffer;
use crate::error::Error;
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Read access to the active frame. Holding it keeps the producer from
/// rewriting that buffer.
pub type FrameGuard<'a> = RwLockReadGuard<'a, GeometryBuffer>;

/// Summary of one committed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub sequence: u64,
    pub vertex_count: usize,
}

struct Slots {
    buffers: [RwLock<GeometryBuffer>; 2],
    active: AtomicUsize,
    /// Set once the producer is dropped; no further frames will come.
    closed: AtomicBool,
}

/// Two geometry buffers and the index of the one readers see.
///
/// The producer always writes the buffer that is not active, releases its
/// write lock once the frame is complete, and only then publishes the new
/// index with release ordering. Readers load the index with acquire
/// ordering, so the frame they lock is always a finished one.
pub struct FrameExchange;

impl FrameExchange {
    /// Create both buffers with the same vertex capacity.
    #[allow(clippy::new_ret_no_self)]
    pub fn new(capacity: usize) -> (FrameProducer, FrameReader) {
        let slots = Arc::new(Slots {
            buffers: [
                RwLock::new(GeometryBuffer::with_capacity(capacity)),
                RwLock::new(GeometryBuffer::with_capacity(capacity)),
            ],
            active: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        });
        (
            FrameProducer {
                slots: Arc::clone(&slots),
                last_sequence: 0,
            },
            FrameReader { slots },
        )
    }
}

/// The single writer. Not `Clone`: one producer per exchange.
pub struct FrameProducer {
    slots: Arc<Slots>,
    last_sequence: u64,
}

impl FrameProducer {
    /// Build a frame into the inactive buffer and make it active.
    ///
    /// If `build` fails the active buffer is left as it was and the
    /// half-written one is cleared.
    pub fn publish<F>(&mut self, build: F) -> Result<FrameStats, Error>
    where
        F: FnOnce(&mut GeometryBuffer) -> Result<(), Error>,
    {
        let building = 1 - self.slots.active.load(Ordering::Acquire);

        let stats = {
            let mut buffer = self.slots.buffers[building].write();
            buffer.clear();
            if let Err(err) = build(&mut buffer) {
                buffer.clear();
                return Err(err);
            }
            self.last_sequence += 1;
            buffer.seal(self.last_sequence);
            FrameStats {
                sequence: self.last_sequence,
                vertex_count: buffer.len(),
            }
        };

        // write guard dropped above: the frame is complete before the swap
        self.slots.active.store(building, Ordering::Release);
        Ok(stats)
    }

    /// Sequence number of the most recent commit.
    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }
}

impl Drop for FrameProducer {
    fn drop(&mut self) {
        self.slots.closed.store(true, Ordering::Release);
    }
}

/// Shared read handle; clone it freely, including across threads.
#[derive(Clone)]
pub struct FrameReader {
    slots: Arc<Slots>,
}

impl FrameReader {
    /// Lock the active frame.
    pub fn read(&self) -> FrameGuard<'_> {
        loop {
            let index = self.slots.active.load(Ordering::Acquire);
            let guard = self.slots.buffers[index].read();
            // a swap may have happened while waiting for the lock
            if self.slots.active.load(Ordering::Acquire) == index {
                return guard;
            }
        }
    }

    /// Whether the producer is gone. The last committed frame stays
    /// readable.
    pub fn is_closed(&self) -> bool {
        self.slots.closed.load(Ordering::Acquire)
    }

    /// Index of the active buffer.
    pub fn active_index(&self) -> usize {
        self.slots.active.load(Ordering::Acquire)
    }
}

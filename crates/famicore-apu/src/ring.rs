//! Single-producer single-consumer sample ring.
//!
//! The one piece of cross-thread state in the core: the emulator thread
//! pushes mixed samples, the audio callback pops them. Two atomic
//! indices with acquire/release ordering carry the hand-off; samples
//! are stored as `f32` bit patterns in `AtomicU32` cells so the whole
//! structure is safe code. One slot is sacrificed to distinguish full
//! from empty, so a ring of capacity `N` holds up to `N - 1` samples.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

/// Default ring capacity: ~146 ms at the native sample rate.
pub const DEFAULT_RING_CAPACITY: usize = 1 << 17;

#[derive(Debug)]
struct Inner {
    buffer: Box<[AtomicU32]>,
    /// Next slot the consumer will read.
    head: AtomicUsize,
    /// Next slot the producer will write.
    tail: AtomicUsize,
}

impl Inner {
    fn advance(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.buffer.len() { 0 } else { next }
    }

    fn len(&self) -> usize {
        let tail = self.tail.load(Ordering::Acquire);
        let head = self.head.load(Ordering::Acquire);
        if tail >= head {
            tail - head
        } else {
            tail + self.buffer.len() - head
        }
    }
}

/// Producer half; lives on the emulator thread.
#[derive(Debug)]
pub struct SampleProducer {
    inner: Arc<Inner>,
}

/// Consumer half; may be moved to the audio thread.
#[derive(Debug)]
pub struct SampleConsumer {
    inner: Arc<Inner>,
    /// Last delivered sample, repeated to pad short reads.
    last: f32,
}

/// Create a connected producer/consumer pair.
///
/// # Panics
///
/// Panics if `capacity < 2`; one slot is reserved.
#[must_use]
pub fn sample_ring(capacity: usize) -> (SampleProducer, SampleConsumer) {
    assert!(capacity >= 2, "ring needs at least one usable slot");
    let buffer = (0..capacity).map(|_| AtomicU32::new(0)).collect();
    let inner = Arc::new(Inner {
        buffer,
        head: AtomicUsize::new(0),
        tail: AtomicUsize::new(0),
    });
    (
        SampleProducer {
            inner: Arc::clone(&inner),
        },
        SampleConsumer {
            inner,
            last: 0.0,
        },
    )
}

impl SampleProducer {
    /// Push one sample. Returns false (dropping the sample) when full;
    /// the ring never overwrites unread data.
    pub fn push(&self, sample: f32) -> bool {
        let inner = &*self.inner;
        let tail = inner.tail.load(Ordering::Relaxed);
        let next = inner.advance(tail);

        if next == inner.head.load(Ordering::Acquire) {
            return false;
        }

        inner.buffer[tail].store(sample.to_bits(), Ordering::Relaxed);
        inner.tail.store(next, Ordering::Release);
        true
    }

    /// Samples currently queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SampleConsumer {
    /// Pop up to `out.len()` samples; returns how many were real.
    pub fn pop_slice(&mut self, out: &mut [f32]) -> usize {
        let inner = &*self.inner;
        let tail = inner.tail.load(Ordering::Acquire);
        let mut head = inner.head.load(Ordering::Relaxed);

        let mut count = 0;
        while head != tail && count < out.len() {
            let sample = f32::from_bits(inner.buffer[head].load(Ordering::Relaxed));
            out[count] = sample;
            self.last = sample;
            head = inner.advance(head);
            count += 1;
        }

        inner.head.store(head, Ordering::Release);
        count
    }

    /// Fill `out` completely, padding a short read by repeating the
    /// last delivered sample. Returns the number of real samples.
    pub fn fill(&mut self, out: &mut [f32]) -> usize {
        let count = self.pop_slice(out);
        let pad = self.last;
        for slot in &mut out[count..] {
            *slot = pad;
        }
        count
    }

    /// Samples currently queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

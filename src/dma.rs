//! Bookkeeping for the circular audio DMA buffers.
//!
//! The acquisition engine fills [`DMA_CHUNKS_PER_CHANNEL`] fixed-size chunks
//! per channel in a circle, raising an interrupt as each chunk completes.
//! This module tracks which chunks hold unread data; it owns no sample
//! storage. A returned chunk index times
//! [`AUDIO_DMA_BUFF_LEN_IN_BYTES`](crate::constants::AUDIO_DMA_BUFF_LEN_IN_BYTES)
//! is the byte offset of that chunk in the caller's buffer.
//!
//! ## Contexts
//!
//! - **ISR side**: [`AudioDma::chunk_ready`], called once per completed
//!   chunk. Kept to a few atomic operations since the engine starts
//!   overwriting the next chunk within microseconds.
//! - **Consumer side**: [`AudioDma::num_buffers_available`] and
//!   [`AudioDma::consume_buffer`], called from the main loop. One consumer
//!   per channel.
//!
//! If the consumer falls more than a full circle behind, the oldest unread
//! chunk has already been overwritten. The tracker latches the channel's
//! overrun flag and restarts both sides at the next fresh chunk; the flag
//! stays set until [`AudioDma::clear_overrun`].

use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::constants::DMA_CHUNKS_PER_CHANNEL;
use crate::types::Channel;

struct ChannelCounters {
    /// Completed but not yet consumed chunks.
    pending: AtomicUsize,
    /// Index of the chunk the engine fills next. ISR side only.
    write_index: AtomicUsize,
    /// Index of the oldest unread chunk. Consumer side, except for the
    /// lockstep reset after an overrun.
    read_index: AtomicUsize,
    overrun: AtomicBool,
}

const IDLE_CHANNEL: ChannelCounters = ChannelCounters {
    pending: AtomicUsize::new(0),
    write_index: AtomicUsize::new(0),
    read_index: AtomicUsize::new(0),
    overrun: AtomicBool::new(false),
};

/// Chunk accounting shared between the DMA interrupt and the main loop.
///
/// Construction is `const`, so the tracker can live in a `static` reachable
/// from both contexts without locks.
pub struct AudioDma {
    channels: [ChannelCounters; Channel::COUNT],
    running: AtomicBool,
}

impl AudioDma {
    /// A stopped tracker with empty accounting.
    pub const fn new() -> Self {
        AudioDma {
            channels: [IDLE_CHANNEL; Channel::COUNT],
            running: AtomicBool::new(false),
        }
    }

    /// Reset all counters to the first chunk and honor `chunk_ready` calls
    /// from now on.
    ///
    /// A latched overrun flag survives `start`; only
    /// [`clear_overrun`](Self::clear_overrun) clears it.
    pub fn start(&self) {
        for counters in &self.channels {
            counters.pending.store(0, Ordering::Relaxed);
            counters.write_index.store(0, Ordering::Relaxed);
            counters.read_index.store(0, Ordering::Relaxed);
        }
        self.running.store(true, Ordering::Release);
    }

    /// Ignore `chunk_ready` calls from now on. Counters keep their values
    /// for the consumer to drain.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Record that the engine finished filling one chunk for `channel`.
    ///
    /// ISR side. Latches the overrun flag and restarts the accounting at
    /// the next fresh chunk when the consumer has fallen a full circle
    /// behind.
    pub fn chunk_ready(&self, channel: Channel) {
        if !self.running.load(Ordering::Acquire) {
            return;
        }
        let counters = &self.channels[channel.index()];

        let next = (counters.write_index.load(Ordering::Relaxed) + 1) % DMA_CHUNKS_PER_CHANNEL;
        counters.write_index.store(next, Ordering::Relaxed);

        // Release pairs with the consumer's Acquire so the chunk data the
        // engine wrote is visible once the count is observed
        let pending = counters.pending.fetch_add(1, Ordering::Release) + 1;
        if pending > DMA_CHUNKS_PER_CHANNEL {
            counters.overrun.store(true, Ordering::Relaxed);
            counters.pending.store(0, Ordering::Relaxed);
            counters.read_index.store(next, Ordering::Relaxed);
        }
    }

    /// Completed chunks waiting to be consumed for `channel`.
    pub fn num_buffers_available(&self, channel: Channel) -> usize {
        self.channels[channel.index()]
            .pending
            .load(Ordering::Acquire)
    }

    /// Claim the oldest unread chunk for `channel`, returning its index in
    /// the circle, or `None` when nothing is pending.
    ///
    /// Consumer side. The chunk must be fully read before the engine comes
    /// back around to it; [`num_buffers_available`](Self::num_buffers_available)
    /// staying low is the caller's evidence of that.
    pub fn consume_buffer(&self, channel: Channel) -> Option<usize> {
        let counters = &self.channels[channel.index()];

        // checked_sub makes a racing overrun reset a missed claim instead
        // of an underflow
        counters
            .pending
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .ok()?;

        let index = counters.read_index.load(Ordering::Relaxed);
        counters
            .read_index
            .store((index + 1) % DMA_CHUNKS_PER_CHANNEL, Ordering::Relaxed);
        Some(index)
    }

    /// Whether `channel` lost data since the last [`clear_overrun`](Self::clear_overrun).
    pub fn overrun_occurred(&self, channel: Channel) -> bool {
        self.channels[channel.index()]
            .overrun
            .load(Ordering::Relaxed)
    }

    /// Acknowledge a latched overrun for `channel`.
    pub fn clear_overrun(&self, channel: Channel) {
        self.channels[channel.index()]
            .overrun
            .store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_rise_with_ready_and_fall_with_consume() {
        let dma = AudioDma::new();
        dma.start();

        dma.chunk_ready(Channel::Channel0);
        dma.chunk_ready(Channel::Channel0);
        assert_eq!(dma.num_buffers_available(Channel::Channel0), 2);
        assert_eq!(dma.num_buffers_available(Channel::Channel1), 0);

        assert_eq!(dma.consume_buffer(Channel::Channel0), Some(0));
        assert_eq!(dma.num_buffers_available(Channel::Channel0), 1);
        assert_eq!(dma.consume_buffer(Channel::Channel0), Some(1));
        assert_eq!(dma.consume_buffer(Channel::Channel0), None);
    }

    #[test]
    fn chunk_indices_cycle_through_the_circle() {
        let dma = AudioDma::new();
        dma.start();

        for expected in [0, 1, 2, 3, 0, 1] {
            dma.chunk_ready(Channel::Channel1);
            assert_eq!(dma.consume_buffer(Channel::Channel1), Some(expected));
        }
    }

    #[test]
    fn fifth_unconsumed_chunk_latches_an_overrun() {
        let dma = AudioDma::new();
        dma.start();

        for _ in 0..DMA_CHUNKS_PER_CHANNEL {
            dma.chunk_ready(Channel::Channel0);
        }
        assert!(!dma.overrun_occurred(Channel::Channel0));
        assert_eq!(
            dma.num_buffers_available(Channel::Channel0),
            DMA_CHUNKS_PER_CHANNEL
        );

        dma.chunk_ready(Channel::Channel0);
        assert!(dma.overrun_occurred(Channel::Channel0));
        assert!(!dma.overrun_occurred(Channel::Channel1));
        // accounting restarted, nothing trustworthy left to read
        assert_eq!(dma.num_buffers_available(Channel::Channel0), 0);
        assert_eq!(dma.consume_buffer(Channel::Channel0), None);

        // producer and consumer meet again at the next fresh chunk
        dma.chunk_ready(Channel::Channel0);
        assert_eq!(dma.consume_buffer(Channel::Channel0), Some(1));

        dma.clear_overrun(Channel::Channel0);
        assert!(!dma.overrun_occurred(Channel::Channel0));
    }

    #[test]
    fn chunks_are_ignored_until_started() {
        let dma = AudioDma::new();

        dma.chunk_ready(Channel::Channel0);
        assert_eq!(dma.num_buffers_available(Channel::Channel0), 0);

        dma.start();
        dma.chunk_ready(Channel::Channel0);
        assert_eq!(dma.num_buffers_available(Channel::Channel0), 1);

        dma.stop();
        dma.chunk_ready(Channel::Channel0);
        // the chunk that was already pending can still be drained
        assert_eq!(dma.num_buffers_available(Channel::Channel0), 1);
        assert_eq!(dma.consume_buffer(Channel::Channel0), Some(0));
    }

    #[test]
    fn restart_rewinds_to_the_first_chunk() {
        let dma = AudioDma::new();
        dma.start();

        dma.chunk_ready(Channel::Channel1);
        dma.chunk_ready(Channel::Channel1);
        assert_eq!(dma.consume_buffer(Channel::Channel1), Some(0));

        dma.start();
        assert_eq!(dma.num_buffers_available(Channel::Channel1), 0);
        dma.chunk_ready(Channel::Channel1);
        assert_eq!(dma.consume_buffer(Channel::Channel1), Some(0));
    }
}

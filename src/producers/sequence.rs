//! Sequence production.
//!
//! # Responsibilities
//! - Emit `1..=count`, each element one interval after the previous one
//! - Stop emitting as soon as the consumer drops the stream
//! - Produce the lowercase alphabet eagerly, with no delay
//!
//! # Design Decisions
//! - Each deadline is armed from the instant the previous element was handed
//!   out (the first from creation), so a stalled consumer never gets a burst
//! - At most one armed timer per stream; dropping the stream drops it
//! - Lifecycle counters are shared through `StreamStats` so cancellation is
//!   observable from outside the stream

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{ready, Context, Poll};
use std::time::Duration;

use futures_util::Stream;
use tokio::time::{sleep_until, Instant, Sleep};

use crate::config::StreamConfig;
use crate::observability::metrics;

/// Counters shared by every stream created from one producer.
#[derive(Debug, Default)]
pub struct StreamStats {
    started: AtomicUsize,
    emitted: AtomicUsize,
    completed: AtomicUsize,
    cancelled: AtomicUsize,
}

impl StreamStats {
    /// Streams created so far.
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Items handed to consumers across all streams.
    pub fn emitted(&self) -> usize {
        self.emitted.load(Ordering::SeqCst)
    }

    /// Streams that ran to their last element.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Streams dropped before their last element.
    pub fn cancelled(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Streams still alive.
    pub fn active(&self) -> usize {
        self.started()
            .saturating_sub(self.completed())
            .saturating_sub(self.cancelled())
    }
}

/// Produces the numeric event stream and the letter sequence.
#[derive(Debug)]
pub struct SequenceProducer {
    count: u32,
    interval: Duration,
    stats: Arc<StreamStats>,
}

impl SequenceProducer {
    /// Create a producer emitting `count` numbers spaced by `interval`.
    pub fn new(count: u32, interval: Duration) -> Self {
        Self {
            count,
            interval,
            stats: Arc::new(StreamStats::default()),
        }
    }

    pub fn from_config(config: &StreamConfig) -> Self {
        Self::new(config.count, Duration::from_millis(config.interval_ms))
    }

    /// Shared lifecycle counters for all streams of this producer.
    pub fn stats(&self) -> Arc<StreamStats> {
        self.stats.clone()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start a new, independent numeric stream.
    ///
    /// The first element becomes ready one interval from now; every later
    /// element one interval after its predecessor was taken.
    pub fn produce_numbers(&self) -> NumberStream {
        self.stats.started.fetch_add(1, Ordering::SeqCst);
        metrics::record_stream_started();

        NumberStream {
            next: 1,
            count: self.count,
            last_emit: Instant::now(),
            interval: self.interval,
            timer: None,
            stats: self.stats.clone(),
            finished: false,
        }
    }

    /// The 26 lowercase letters in alphabetical order.
    pub fn produce_letters(&self) -> Vec<char> {
        ('a'..='z').collect()
    }
}

impl Default for SequenceProducer {
    fn default() -> Self {
        Self::from_config(&StreamConfig::default())
    }
}

/// A finite stream of `1..=count`, one element per tick.
///
/// Not restartable: once exhausted it stays exhausted.
#[derive(Debug)]
pub struct NumberStream {
    next: u32,
    count: u32,
    last_emit: Instant,
    interval: Duration,
    timer: Option<Pin<Box<Sleep>>>,
    stats: Arc<StreamStats>,
    finished: bool,
}

impl NumberStream {
    fn finish(&mut self, cancelled: bool) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.timer = None;

        if cancelled {
            self.stats.cancelled.fetch_add(1, Ordering::SeqCst);
            tracing::debug!(emitted = self.next - 1, total = self.count, "Number stream cancelled");
        } else {
            self.stats.completed.fetch_add(1, Ordering::SeqCst);
            tracing::debug!(emitted = self.count, "Number stream completed");
        }
        metrics::record_stream_finished(cancelled);
    }
}

impl Stream for NumberStream {
    type Item = u32;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<u32>> {
        let this = &mut *self;

        if this.next > this.count {
            this.finish(false);
            return Poll::Ready(None);
        }

        let deadline = this.last_emit + this.interval;
        let timer = this
            .timer
            .get_or_insert_with(|| Box::pin(sleep_until(deadline)));
        ready!(timer.as_mut().poll(cx));
        this.timer = None;
        this.last_emit = Instant::now();

        let value = this.next;
        this.next += 1;
        this.stats.emitted.fetch_add(1, Ordering::SeqCst);
        metrics::record_stream_item();

        Poll::Ready(Some(value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count + 1).saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl Drop for NumberStream {
    fn drop(&mut self) {
        // Everything already emitted counts as a normal completion.
        let cancelled = self.next <= self.count;
        self.finish(cancelled);
    }
}

//! Flux - a lazy, push-based stream abstraction
//!
//! This module provides the core sequence type and its composition
//! operators: ordered sources, order-preserving transformations, sequential
//! concatenation, pairwise zipping, re-subscription, delayed emission, and
//! worker-task scheduling. Nothing runs until the consumer polls.

use async_stream::stream;
use futures::channel::mpsc::channel;
use futures_core::Stream;
use futures_util::pin_mut;
use futures_util::{
    future,
    stream::{self, BoxStream, StreamExt},
    SinkExt,
};
use std::future::Future;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::{spawn, time::sleep};

/// A boxed, heap-allocated ordered sequence of values.
///
/// A `Flux` delivers zero-or-more elements in a deterministic order, then
/// exactly one terminal signal (the stream ends). It is consumed once.
pub type Flux<O> = BoxStream<'static, O>;

// ================================
// Core Stream Constructors
// ================================

/// Emit a single element, then complete
pub fn emit<O>(item: O) -> Flux<O>
where
    O: Send + 'static,
{
    stream::once(future::ready(item)).boxed()
}

/// Create an empty flux that completes immediately
pub fn empty<O>() -> Flux<O>
where
    O: Send + 'static,
{
    stream::empty().boxed()
}

/// Evaluate a Future and emit its output
pub fn eval<O, F>(fut: F) -> Flux<O>
where
    F: Future<Output = O> + Send + 'static,
    O: Send + 'static,
{
    stream::once(fut).boxed()
}

/// Emit each value in argument order, then complete
///
/// # Examples
/// ```
/// use flux_stream::flux::*;
/// use futures_util::stream::StreamExt;
///
/// # async fn example() {
/// let flux = from_values(vec!["Blenders", "Old", "Johnnie"]);
/// let result = flux.collect::<Vec<_>>().await;
/// assert_eq!(result, vec!["Blenders", "Old", "Johnnie"]);
/// # }
/// ```
pub fn from_values<I, O>(values: I) -> Flux<O>
where
    I: IntoIterator<Item = O> + Send + 'static,
    <I as IntoIterator>::IntoIter: Send,
    O: Send + 'static,
{
    stream::iter(values).boxed()
}

/// Emit `count` consecutive integers starting at `start`, in increasing
/// order, then complete
pub fn from_range(start: i64, count: usize) -> Flux<i64> {
    stream::iter(start..start + count as i64).boxed()
}

// ================================
// Stream Transformations
// ================================

/// Emit only the elements satisfying `predicate`, preserving relative order
pub fn filter<O, F>(s: Flux<O>, mut predicate: F) -> Flux<O>
where
    F: FnMut(&O) -> bool + Send + 'static,
    O: Send + 'static,
{
    stream! {
        pin_mut!(s);
        while let Some(item) = s.next().await {
            if predicate(&item) {
                yield item;
            }
        }
    }
    .boxed()
}

/// Emit `transform(element)` for each element, preserving order and count
pub fn map<A, B, F>(s: Flux<A>, transform: F) -> Flux<B>
where
    F: FnMut(A) -> B + Send + 'static,
    A: Send + 'static,
    B: Send + 'static,
{
    s.map(transform).boxed()
}

/// Concatenate two streams sequentially
///
/// The first stream is fully drained before any element of the second is
/// requested; the result completes only after both complete.
pub fn concat<O, S1, S2>(first: S1, second: S2) -> Flux<O>
where
    S1: Stream<Item = O> + Send + 'static,
    S2: Stream<Item = O> + Send + 'static,
    O: Send + 'static,
{
    stream! {
        pin_mut!(first);
        while let Some(item) = first.next().await {
            yield item;
        }
        pin_mut!(second);
        while let Some(item) = second.next().await {
            yield item;
        }
    }
    .boxed()
}

/// Combine two streams element-by-element using a provided function
///
/// Emits `combiner(a_i, b_i)` in increasing index order and completes when
/// the shorter source is exhausted. Mismatched lengths are normal
/// completion, not an error.
///
/// # Examples
/// ```
/// use flux_stream::flux::*;
/// use futures_util::stream::StreamExt;
///
/// # async fn example() {
/// let first = from_values(vec!["Blenders", "Old", "Johnnie"]);
/// let second = from_values(vec!["Pride", "Monk", "Walker"]);
/// let result = zip_with(first, second, |a, b| format!("{} {}", a, b))
///     .collect::<Vec<_>>()
///     .await;
/// assert_eq!(result, vec!["Blenders Pride", "Old Monk", "Johnnie Walker"]);
/// # }
/// ```
pub fn zip_with<A, B, O, F, S1, S2>(s1: S1, s2: S2, mut combiner: F) -> Flux<O>
where
    S1: Stream<Item = A> + Send + 'static,
    S2: Stream<Item = B> + Send + 'static,
    F: FnMut(A, B) -> O + Send + 'static,
    A: Send + 'static,
    B: Send + 'static,
    O: Send + 'static,
{
    stream! {
        pin_mut!(s1);
        pin_mut!(s2);

        loop {
            match future::join(s1.next(), s2.next()).await {
                (Some(a), Some(b)) => yield combiner(a, b),
                _ => break, // Stop when either source ends
            }
        }
    }
    .boxed()
}

/// Re-subscribe to a source `additional` extra times after the first full
/// emission
///
/// The factory is invoked once per pass, so the full sequence is emitted
/// `additional + 1` times in total, in the same element order each time.
/// `repeat(factory, 0)` is a single pass.
///
/// # Examples
/// ```
/// use flux_stream::flux::*;
/// use futures_util::stream::StreamExt;
///
/// # async fn example() {
/// let flux = repeat(|| from_values(vec![1, 2]), 1);
/// let result = flux.collect::<Vec<_>>().await;
/// assert_eq!(result, vec![1, 2, 1, 2]);
/// # }
/// ```
pub fn repeat<O, S, F>(mut factory: F, additional: usize) -> Flux<O>
where
    F: FnMut() -> S + Send + 'static,
    S: Stream<Item = O> + Send + 'static,
    O: Send + 'static,
{
    stream! {
        for _ in 0..=additional {
            let s = factory();
            pin_mut!(s);
            while let Some(item) = s.next().await {
                yield item;
            }
        }
    }
    .boxed()
}

// ================================
// Timing and Scheduling
// ================================

/// Suspend for `delay` before each element
///
/// Order and count are unchanged; the delay is observable only as a lower
/// bound on elapsed time. The suspension uses the tokio timer, so the
/// caller's task is never blocked.
pub fn delay_elements<O>(s: Flux<O>, delay: Duration) -> Flux<O>
where
    O: Send + 'static,
{
    stream! {
        pin_mut!(s);
        while let Some(item) = s.next().await {
            sleep(delay).await;
            yield item;
        }
    }
    .boxed()
}

/// Drive the upstream on a spawned worker task
///
/// Elements are handed to the consumer over a bounded channel, so order and
/// count are unchanged; only the execution context of upstream work moves.
/// The worker is spawned on first poll, keeping construction lazy, and stops
/// once the consumer side is dropped.
pub fn subscribe_on<O>(s: Flux<O>, capacity: usize) -> Flux<O>
where
    O: Send + 'static,
{
    stream! {
        let (mut tx, mut rx) = channel(capacity);
        let worker = spawn(async move {
            pin_mut!(s);
            while let Some(item) = s.next().await {
                if tx.send(item).await.is_err() {
                    // Consumer went away
                    break;
                }
            }
        });

        while let Some(item) = rx.next().await {
            yield item;
        }
        let _ = worker.await;
    }
    .boxed()
}

/// Log each element and the terminal signal under `target`
pub fn log_events<O>(s: Flux<O>, target: &'static str) -> Flux<O>
where
    O: std::fmt::Debug + Send + 'static,
{
    stream! {
        pin_mut!(s);
        while let Some(item) = s.next().await {
            log::debug!(target: target, "next: {:?}", item);
            yield item;
        }
        log::debug!(target: target, "complete");
    }
    .boxed()
}

// ================================
// Cancellation
// ================================

/// Handle owning the right to cancel one active subscription
pub struct Subscription {
    signal: Option<oneshot::Sender<()>>,
}

impl Subscription {
    /// Request cancellation; idempotent
    pub fn cancel(&mut self) {
        if let Some(signal) = self.signal.take() {
            let _ = signal.send(());
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.signal.is_none()
    }
}

/// Wrap a stream so it can be cancelled from another task
///
/// Once `Subscription::cancel` is observed, no further elements are
/// delivered and any in-flight upstream work (including pending delayed
/// emissions) is dropped. Dropping the handle without cancelling leaves the
/// stream running to its natural terminal.
pub fn cancellable<O>(s: Flux<O>) -> (Subscription, Flux<O>)
where
    O: Send + 'static,
{
    let (tx, mut rx) = oneshot::channel::<()>();

    let out = stream! {
        pin_mut!(s);
        let mut handle_gone = false;

        loop {
            if handle_gone {
                match s.next().await {
                    Some(item) => yield item,
                    None => break,
                }
                continue;
            }

            tokio::select! {
                biased;
                res = &mut rx => {
                    match res {
                        Ok(()) => {
                            log::debug!("subscription cancelled");
                            break;
                        }
                        // Handle dropped without cancelling: keep delivering,
                        // and never poll the exhausted receiver again.
                        Err(_) => handle_gone = true,
                    }
                },
                maybe_item = s.next() => {
                    match maybe_item {
                        Some(item) => yield item,
                        None => break,
                    }
                },
            }
        }
    }
    .boxed();

    (Subscription { signal: Some(tx) }, out)
}

// ================================
// Stream Extensions
// ================================

// Re-export the extension traits from their respective modules
pub use crate::flux_result_stream_ext::FluxResultStreamExt;
pub use crate::flux_stream_ext::FluxStreamExt;

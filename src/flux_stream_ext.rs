use async_stream::stream;
use futures_core::Stream;
use futures_util::pin_mut;
use futures_util::stream::StreamExt;
use std::time::Duration;

use crate::flux::{
    cancellable, concat, delay_elements, filter, log_events, map, subscribe_on, zip_with, Flux,
    Subscription,
};
use crate::flux_result_stream_ext::TryFlux;

/// Extension trait providing pipeline combinators on Streams
pub trait FluxStreamExt: Stream + Sized + Unpin + Send + 'static {
    /// Emit only the elements satisfying `predicate`, preserving order
    fn filter_flux<F>(self, predicate: F) -> Flux<Self::Item>
    where
        F: FnMut(&Self::Item) -> bool + Send + 'static,
        Self::Item: Send + 'static,
    {
        filter(self.boxed(), predicate)
    }

    /// Map elements of the stream with a function
    fn map_flux<U, F>(self, transform: F) -> Flux<U>
    where
        F: FnMut(Self::Item) -> U + Send + 'static,
        U: Send + 'static,
        Self::Item: Send + 'static,
    {
        map(self.boxed(), transform)
    }

    /// Fully drain this stream, then drain `other`
    fn concat_flux<S>(self, other: S) -> Flux<Self::Item>
    where
        S: Stream<Item = Self::Item> + Send + 'static,
        Self::Item: Send + 'static,
    {
        concat(self, other)
    }

    /// Combine pairwise with `other` up to the shorter source
    fn zip_with_flux<B, O, S, F>(self, other: S, combiner: F) -> Flux<O>
    where
        S: Stream<Item = B> + Send + 'static,
        F: FnMut(Self::Item, B) -> O + Send + 'static,
        Self::Item: Send + 'static,
        B: Send + 'static,
        O: Send + 'static,
    {
        zip_with(self, other, combiner)
    }

    /// Re-emit the recorded sequence `additional` extra times
    ///
    /// A consumed stream cannot be re-subscribed, so the first pass is
    /// recorded and replayed. Observationally equivalent to re-subscription
    /// for cold in-memory sources; use `flux::repeat` with a factory when
    /// producing the source has side effects.
    fn repeat_flux(self, additional: usize) -> Flux<Self::Item>
    where
        Self::Item: Clone + Send + Sync + 'static,
    {
        let s = self.boxed();
        stream! {
            pin_mut!(s);
            let mut recorded = Vec::new();
            while let Some(item) = s.next().await {
                recorded.push(item.clone());
                yield item;
            }
            for _ in 0..additional {
                for item in recorded.iter().cloned() {
                    yield item;
                }
            }
        }
        .boxed()
    }

    /// Suspend for `delay` before each element
    fn delay_elements_flux(self, delay: Duration) -> Flux<Self::Item>
    where
        Self::Item: Send + 'static,
    {
        delay_elements(self.boxed(), delay)
    }

    /// Drive upstream work on a spawned worker task
    fn subscribe_on_flux(self, capacity: usize) -> Flux<Self::Item>
    where
        Self::Item: Send + 'static,
    {
        subscribe_on(self.boxed(), capacity)
    }

    /// Log each element and the terminal signal under `target`
    fn log_flux(self, target: &'static str) -> Flux<Self::Item>
    where
        Self::Item: std::fmt::Debug + Send + 'static,
    {
        log_events(self.boxed(), target)
    }

    /// Split off a cancellation handle for this stream
    fn cancellable_flux(self) -> (Subscription, Flux<Self::Item>)
    where
        Self::Item: Send + 'static,
    {
        cancellable(self.boxed())
    }

    /// Lift an infallible stream into a fallible pipeline
    fn into_try_flux(self) -> TryFlux<Self::Item>
    where
        Self::Item: Send + 'static,
    {
        self.map(Ok).boxed()
    }
}

impl<T> FluxStreamExt for T where T: Stream + Sized + Unpin + Send + 'static {}

//! Fallible pipelines.
//!
//! A `TryFlux` carries `Result` elements; the first `Err` is the error
//! terminal. Every operator here short-circuits on it: the error is emitted
//! once, remaining elements are discarded, and untouched sources are never
//! polled.

use async_stream::stream;
use futures_core::Stream;
use futures_util::pin_mut;
use futures_util::{future, stream::StreamExt};

use crate::error::StreamResult;
use crate::flux::Flux;

/// A pipeline that can terminate with an error instead of completing
pub type TryFlux<O> = Flux<StreamResult<O>>;

/// Extension trait for streams of fallible elements
pub trait FluxResultStreamExt<T: Send + 'static>:
    Stream<Item = StreamResult<T>> + Sized + Unpin + Send + 'static
{
    /// Map elements with a fallible transform, halting on the first error
    fn try_map_flux<U, F>(self, mut transform: F) -> TryFlux<U>
    where
        F: FnMut(T) -> StreamResult<U> + Send + 'static,
        U: Send + 'static,
    {
        let s = self.boxed();
        stream! {
            pin_mut!(s);
            while let Some(item) = s.next().await {
                match item.and_then(&mut transform) {
                    Ok(mapped) => yield Ok(mapped),
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                }
            }
        }
        .boxed()
    }

    /// Keep elements the fallible predicate accepts, halting on the first
    /// error
    fn try_filter_flux<F>(self, mut predicate: F) -> TryFlux<T>
    where
        F: FnMut(&T) -> StreamResult<bool> + Send + 'static,
    {
        let s = self.boxed();
        stream! {
            pin_mut!(s);
            while let Some(item) = s.next().await {
                match item {
                    Ok(value) => match predicate(&value) {
                        Ok(true) => yield Ok(value),
                        Ok(false) => {}
                        Err(e) => {
                            yield Err(e);
                            break;
                        }
                    },
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                }
            }
        }
        .boxed()
    }

    /// Combine pairwise with `other` using a fallible combiner
    ///
    /// Completes when the shorter source ends; any upstream or combiner
    /// error ends the stream immediately.
    fn try_zip_with_flux<B, O, S, F>(self, other: S, mut combiner: F) -> TryFlux<O>
    where
        S: Stream<Item = StreamResult<B>> + Send + 'static,
        F: FnMut(T, B) -> StreamResult<O> + Send + 'static,
        B: Send + 'static,
        O: Send + 'static,
    {
        let s1 = self.boxed();
        stream! {
            pin_mut!(s1);
            pin_mut!(other);

            loop {
                match future::join(s1.next(), other.next()).await {
                    (Some(Ok(a)), Some(Ok(b))) => match combiner(a, b) {
                        Ok(combined) => yield Ok(combined),
                        Err(e) => {
                            yield Err(e);
                            break;
                        }
                    },
                    (Some(Err(e)), _) | (_, Some(Err(e))) => {
                        yield Err(e);
                        break;
                    }
                    _ => break,
                }
            }
        }
        .boxed()
    }

    /// Drain this stream, then `second`
    ///
    /// If the first source errors, the error is the terminal and `second`
    /// is never polled.
    fn try_concat_flux<S>(self, second: S) -> TryFlux<T>
    where
        S: Stream<Item = StreamResult<T>> + Send + 'static,
    {
        let first = self.boxed();
        stream! {
            pin_mut!(first);
            let mut failed = false;
            while let Some(item) = first.next().await {
                match item {
                    Ok(value) => yield Ok(value),
                    Err(e) => {
                        yield Err(e);
                        failed = true;
                        break;
                    }
                }
            }

            if !failed {
                pin_mut!(second);
                while let Some(item) = second.next().await {
                    match item {
                        Ok(value) => yield Ok(value),
                        Err(e) => {
                            yield Err(e);
                            break;
                        }
                    }
                }
            }
        }
        .boxed()
    }

    /// Pass elements through until the first error, then end
    ///
    /// Guards a pipeline whose upstream might keep producing after an
    /// error: at most one `Err` is delivered, nothing after it.
    fn halt_on_error_flux(self) -> TryFlux<T> {
        let s = self.boxed();
        stream! {
            pin_mut!(s);
            while let Some(item) = s.next().await {
                let errored = item.is_err();
                yield item;
                if errored {
                    break;
                }
            }
        }
        .boxed()
    }
}

impl<T, S> FluxResultStreamExt<T> for S
where
    S: Stream<Item = StreamResult<T>> + Sized + Unpin + Send + 'static,
    T: Send + 'static,
{
}

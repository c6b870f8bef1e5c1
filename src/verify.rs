//! Step-by-step verification of stream pipelines.
//!
//! `StepVerifier` records expectations against a pipeline, then drives it to
//! its terminal and asserts that the observed sequence of elements and the
//! terminal signal match. Intended for tests: mismatches panic with a
//! description of the step that failed.

use futures_core::Stream;
use futures_util::pin_mut;
use futures_util::stream::StreamExt;
use std::fmt::Debug;

use crate::error::{StreamError, StreamResult};
use crate::flux_result_stream_ext::TryFlux;

enum Step<O> {
    Next(O),
    NextCount(usize),
}

/// Expectation-recording verifier for a single subscription
///
/// # Examples
/// ```
/// use flux_stream::flux::*;
/// use flux_stream::verify::StepVerifier;
///
/// # async fn example() {
/// StepVerifier::create(from_values(vec!["hello", "there"]))
///     .expect_next("hello")
///     .expect_next("there")
///     .verify_complete()
///     .await;
/// # }
/// ```
pub struct StepVerifier<O> {
    stream: TryFlux<O>,
    steps: Vec<Step<O>>,
}

impl<O> StepVerifier<O>
where
    O: PartialEq + Debug + Send + 'static,
{
    /// Verify an infallible pipeline
    pub fn create<S>(stream: S) -> Self
    where
        S: Stream<Item = O> + Send + 'static,
    {
        StepVerifier {
            stream: stream.map(Ok).boxed(),
            steps: Vec::new(),
        }
    }

    /// Verify a fallible pipeline
    pub fn create_try<S>(stream: S) -> Self
    where
        S: Stream<Item = StreamResult<O>> + Send + 'static,
    {
        StepVerifier {
            stream: stream.boxed(),
            steps: Vec::new(),
        }
    }

    /// Expect the next element to equal `value`
    pub fn expect_next(mut self, value: O) -> Self {
        self.steps.push(Step::Next(value));
        self
    }

    /// Expect the next elements to equal `values`, in order
    pub fn expect_next_seq<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = O>,
    {
        for value in values {
            self.steps.push(Step::Next(value));
        }
        self
    }

    /// Expect exactly `count` further elements, values unchecked
    pub fn expect_next_count(mut self, count: usize) -> Self {
        self.steps.push(Step::NextCount(count));
        self
    }

    /// Drive the pipeline and assert every expectation, then completion
    pub async fn verify_complete(self) {
        let StepVerifier { mut stream, steps } = self;
        run_steps(&mut stream, steps).await;

        match stream.next().await {
            None => {}
            Some(Ok(extra)) => panic!("expected completion, got element {:?}", extra),
            Some(Err(e)) => panic!("expected completion, stream errored: {}", e),
        }
    }

    /// Drive the pipeline and assert every expectation, then an error
    /// terminal; returns the error
    pub async fn verify_error(self) -> StreamError {
        let StepVerifier { mut stream, steps } = self;
        run_steps(&mut stream, steps).await;

        match stream.next().await {
            Some(Err(e)) => e,
            Some(Ok(extra)) => panic!("expected an error terminal, got element {:?}", extra),
            None => panic!("expected an error terminal, stream completed"),
        }
    }
}

async fn run_steps<O>(stream: &mut TryFlux<O>, steps: Vec<Step<O>>)
where
    O: PartialEq + Debug,
{
    for step in steps {
        match step {
            Step::Next(expected) => match stream.next().await {
                Some(Ok(actual)) => {
                    assert_eq!(actual, expected, "element mismatch");
                }
                Some(Err(e)) => panic!("expected element {:?}, stream errored: {}", expected, e),
                None => panic!("expected element {:?}, stream completed", expected),
            },
            Step::NextCount(count) => {
                for seen in 0..count {
                    match stream.next().await {
                        Some(Ok(_)) => {}
                        Some(Err(e)) => panic!(
                            "expected {} elements, stream errored after {}: {}",
                            count, seen, e
                        ),
                        None => panic!(
                            "expected {} elements, stream completed after {}",
                            count, seen
                        ),
                    }
                }
            }
        }
    }
}

/// Subscribe and collect the full ordered sequence of an infallible stream
pub async fn collect_flux<S>(stream: S) -> Vec<S::Item>
where
    S: Stream,
{
    pin_mut!(stream);
    let mut collected = Vec::new();
    while let Some(item) = stream.next().await {
        collected.push(item);
    }
    collected
}

/// Collect a fallible stream into its ordered prefix and terminal
///
/// Returns the elements seen before the terminal and `Some(error)` if the
/// terminal was an error rather than completion. Consumption stops at the
/// first error.
pub async fn collect_outcome<S, T>(stream: S) -> (Vec<T>, Option<StreamError>)
where
    S: Stream<Item = StreamResult<T>>,
{
    pin_mut!(stream);
    let mut collected = Vec::new();
    while let Some(item) = stream.next().await {
        match item {
            Ok(value) => collected.push(value),
            Err(e) => return (collected, Some(e)),
        }
    }
    (collected, None)
}

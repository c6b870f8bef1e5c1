use flux_stream::error::StreamError;
use flux_stream::flux::*;
use flux_stream::verify::{collect_flux, collect_outcome, StepVerifier};

#[tokio::test]
async fn verifies_exact_values_then_completion() {
    StepVerifier::create(from_values(vec!["hello", "there"]))
        .expect_next("hello")
        .expect_next("there")
        .verify_complete()
        .await;
}

#[tokio::test]
async fn verifies_a_sequence_expectation() {
    StepVerifier::create(from_range(1, 4))
        .expect_next_seq(vec![1, 2, 3, 4])
        .verify_complete()
        .await;
}

#[tokio::test]
async fn verifies_counts_without_checking_values() {
    StepVerifier::create(from_range(0, 10))
        .expect_next_count(3)
        .expect_next(3)
        .expect_next_count(6)
        .verify_complete()
        .await;
}

#[tokio::test]
async fn verifies_an_empty_stream() {
    StepVerifier::create(empty::<i32>()).verify_complete().await;
}

#[tokio::test]
async fn verify_error_returns_the_terminal_error() {
    let failing = from_values(vec![
        Ok(7),
        Err(StreamError::Custom("went wrong".to_string())),
    ]);

    let error = StepVerifier::create_try(failing)
        .expect_next(7)
        .verify_error()
        .await;
    assert_eq!(error, StreamError::Custom("went wrong".to_string()));
}

#[tokio::test]
#[should_panic(expected = "element mismatch")]
async fn panics_on_a_value_mismatch() {
    StepVerifier::create(from_values(vec![1, 2]))
        .expect_next(1)
        .expect_next(99)
        .verify_complete()
        .await;
}

#[tokio::test]
#[should_panic(expected = "expected completion")]
async fn panics_when_extra_elements_remain() {
    StepVerifier::create(from_values(vec![1, 2, 3]))
        .expect_next(1)
        .verify_complete()
        .await;
}

#[tokio::test]
#[should_panic(expected = "stream completed")]
async fn panics_when_the_stream_ends_early() {
    StepVerifier::create(from_values(vec![1]))
        .expect_next(1)
        .expect_next(2)
        .verify_complete()
        .await;
}

#[tokio::test]
#[should_panic(expected = "expected completion, stream errored")]
async fn panics_when_completion_was_expected_but_the_stream_errored() {
    let failing = from_values(vec![
        Ok(1),
        Err(StreamError::TransformFailure("late fault".to_string())),
    ]);

    StepVerifier::create_try(failing)
        .expect_next(1)
        .verify_complete()
        .await;
}

#[tokio::test]
#[should_panic(expected = "expected an error terminal")]
async fn panics_when_an_error_was_expected_but_the_stream_completed() {
    StepVerifier::create(from_values(vec![1]))
        .expect_next(1)
        .verify_error()
        .await;
}

#[test]
fn collect_flux_gathers_the_full_ordered_sequence() {
    tokio_test::block_on(async {
        let collected = collect_flux(from_range(5, 3)).await;
        assert_eq!(collected, vec![5, 6, 7]);
    });
}

#[test]
fn collect_outcome_reports_a_clean_completion() {
    tokio_test::block_on(async {
        let (values, terminal) = collect_outcome(from_values(vec![1, 2]).into_try_flux()).await;
        assert_eq!(values, vec![1, 2]);
        assert_eq!(terminal, None);
    });
}

#![cfg(feature = "async")]
//! Integration tests for the admission gate and bounded parallel evaluation.

use eitherway::control::Either;
use eitherway::effect::{AdmissionGate, Concurrency, par_sequence, par_traverse_n, run_future_binding};
use rstest::rstest;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{Instant, sleep};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Tracks how many tasks are inside a critical section at once.
#[derive(Default)]
struct Occupancy {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl Occupancy {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

// =============================================================================
// AdmissionGate Tests
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_gate_admits_at_most_capacity_in_arrival_order() {
    init_tracing();
    let gate = AdmissionGate::new(2);
    let occupancy = Occupancy::default();
    let admitted = Mutex::new(Vec::new());
    let started = Instant::now();

    let (occupancy, admitted) = (&occupancy, &admitted);
    let tasks = (0..5).map(|index| {
        gate.with_permit(async move {
            admitted.lock().unwrap().push(index);
            occupancy.enter();
            sleep(Duration::from_millis(10)).await;
            occupancy.leave();
        })
    });
    futures::future::join_all(tasks).await;

    assert!(occupancy.peak() <= 2);
    assert_eq!(*admitted.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    assert!(started.elapsed() >= Duration::from_millis(30));
    assert_eq!(gate.held(), 0);
    assert_eq!(gate.available(), 2);
}

#[tokio::test]
async fn test_permit_guard_releases_on_drop() {
    let gate = AdmissionGate::new(1);
    {
        let _permit = gate.permit().await;
        assert_eq!(gate.held(), 1);
        assert!(!gate.try_acquire());
    }
    assert_eq!(gate.held(), 0);
    assert!(gate.try_acquire());
    gate.release();
}

#[rstest]
#[should_panic(expected = "no permits held")]
fn test_extra_release_is_a_usage_error() {
    let gate = AdmissionGate::new(2);
    assert!(gate.try_acquire());
    gate.release();
    gate.release();
}

// =============================================================================
// Parallel Evaluation Tests
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_par_traverse_respects_limit_and_order() {
    init_tracing();
    let occupancy = Arc::new(Occupancy::default());

    let result = par_traverse_n(
        0..10_u64,
        |value| {
            let occupancy = Arc::clone(&occupancy);
            async move {
                occupancy.enter();
                sleep(Duration::from_millis(5 + (value % 3) * 5)).await;
                occupancy.leave();
                Either::<String, u64>::Right(value * 2)
            }
        },
        Concurrency::bounded(3).unwrap(),
    )
    .await;

    assert_eq!(result, Either::Right((0..10).map(|value| value * 2).collect()));
    assert!(occupancy.peak() <= 3);
}

#[tokio::test(start_paused = true)]
async fn test_par_traverse_returns_single_failure() {
    let result = par_traverse_n(
        0..5,
        |index| async move {
            sleep(Duration::from_millis(10)).await;
            if index == 3 {
                Either::Left("x")
            } else {
                Either::Right(index)
            }
        },
        Concurrency::Unbounded,
    )
    .await;
    assert_eq!(result, Either::Left("x"));
}

#[tokio::test(start_paused = true)]
async fn test_par_sequence_of_comprehensions() {
    let producers = (1..=3).map(|id: u32| {
        move || {
            run_future_binding(move |scope| async move {
                let doubled = scope.bind(Either::<String, u32>::Right(id * 2))?;
                scope.ensure(doubled < 10, || format!("{doubled} too large"))?;
                Ok(doubled)
            })
        }
    });
    assert_eq!(par_sequence(producers).await, Either::Right(vec![2, 4, 6]));
}

async fn exploding_producer() -> Either<String, i32> {
    tokio::task::yield_now().await;
    panic!("producer exploded");
}

#[tokio::test]
#[should_panic(expected = "producer exploded")]
async fn test_par_sequence_reraises_producer_panic() {
    let _ = par_sequence(vec![exploding_producer]).await;
}

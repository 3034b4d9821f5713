#[cfg(test)]
mod tests {
    use crate::coordinator::{Outcome, RequestCoordinator};
    use crate::error::NeonkitError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_completed_delivery() {
        let coordinator = RequestCoordinator::new();

        let outcome: Result<Outcome<&str>, NeonkitError> = coordinator
            .request("products-search", |_token| async { Ok("neon flamingo") })
            .await;

        assert_eq!(outcome.unwrap(), Outcome::Completed("neon flamingo"));
        assert!(!coordinator.in_flight("products-search"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_superseded_by_fast() {
        let coordinator = Arc::new(RequestCoordinator::new());

        let c = Arc::clone(&coordinator);
        let slow = tokio::spawn(async move {
            c.request("search", |_token| async {
                sleep(Duration::from_millis(100)).await;
                Ok::<_, NeonkitError>("slow")
            })
            .await
        });

        // Let the slow request register, then supersede it 10ms later.
        sleep(Duration::from_millis(10)).await;
        let fast = coordinator
            .request("search", |_token| async {
                sleep(Duration::from_millis(20)).await;
                Ok::<_, NeonkitError>("fast")
            })
            .await;

        assert_eq!(fast.unwrap(), Outcome::Completed("fast"));
        assert_eq!(slow.await.unwrap().unwrap(), Outcome::Cancelled);
        assert_eq!(coordinator.in_flight_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_latest_generation_delivers() {
        let coordinator = Arc::new(RequestCoordinator::new());
        let mut handles = Vec::new();

        for n in 0..3u32 {
            let c = Arc::clone(&coordinator);
            handles.push(tokio::spawn(async move {
                c.request("search", move |_token| async move {
                    sleep(Duration::from_millis(50)).await;
                    Ok::<_, NeonkitError>(n)
                })
                .await
            }));
            // Stagger issuance so generations are minted in order.
            sleep(Duration::from_millis(1)).await;
        }

        let outcomes: Vec<_> = futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|joined| joined.unwrap().unwrap())
            .collect();

        assert_eq!(outcomes[0], Outcome::Cancelled);
        assert_eq!(outcomes[1], Outcome::Cancelled);
        assert_eq!(outcomes[2], Outcome::Completed(2));
    }

    #[tokio::test]
    async fn test_failure_propagates_when_current() {
        let coordinator = RequestCoordinator::new();

        let outcome: Result<Outcome<()>, NeonkitError> = coordinator
            .request("checkout", |_token| async {
                Err(NeonkitError::internal("card declined"))
            })
            .await;

        assert!(outcome.is_err());
        // The failed generation is retired; nothing is left in flight.
        assert!(!coordinator.in_flight("checkout"));
    }

    #[tokio::test]
    async fn test_cancellation_kind_rejection_is_not_an_error() {
        let coordinator = RequestCoordinator::new();

        // The operation aborts itself through its own token and then
        // rejects, the way an HTTP client surfaces an abort.
        let outcome: Result<Outcome<()>, NeonkitError> = coordinator
            .request("search", |token| async move {
                token.cancel();
                Err(NeonkitError::internal("request aborted"))
            })
            .await;

        assert_eq!(outcome.unwrap(), Outcome::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_cancel_resolves_to_cancelled() {
        let coordinator = Arc::new(RequestCoordinator::new());

        let c = Arc::clone(&coordinator);
        let pending = tokio::spawn(async move {
            c.request("search", |_token| async {
                sleep(Duration::from_secs(3600)).await;
                Ok::<_, NeonkitError>("never")
            })
            .await
        });

        sleep(Duration::from_millis(5)).await;
        assert!(coordinator.in_flight("search"));
        coordinator.cancel("search");

        assert_eq!(pending.await.unwrap().unwrap(), Outcome::Cancelled);
        assert!(!coordinator.in_flight("search"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_operation_ignoring_its_token_is_abandoned() {
        let coordinator = Arc::new(RequestCoordinator::new());
        let finished = Arc::new(AtomicBool::new(false));

        let c = Arc::clone(&coordinator);
        let f = Arc::clone(&finished);
        let stubborn = tokio::spawn(async move {
            c.request("search", move |_token| async move {
                // Never checks the token.
                sleep(Duration::from_secs(60)).await;
                f.store(true, Ordering::SeqCst);
                Ok::<_, NeonkitError>("stale")
            })
            .await
        });

        sleep(Duration::from_millis(10)).await;
        let fresh = coordinator
            .request("search", |_token| async { Ok::<_, NeonkitError>("fresh") })
            .await;

        assert_eq!(fresh.unwrap(), Outcome::Completed("fresh"));
        assert_eq!(stubborn.await.unwrap().unwrap(), Outcome::Cancelled);
        assert!(!finished.load(Ordering::SeqCst));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_requests_on_one_key_deliver_exactly_once() {
        let coordinator = Arc::new(RequestCoordinator::new());
        let mut handles = Vec::new();

        // Real parallelism: all eight requests overlap, so generations
        // are minted and inserted from competing threads at once.
        for n in 0..8u32 {
            let c = Arc::clone(&coordinator);
            handles.push(tokio::spawn(async move {
                c.request("search", move |_token| async move {
                    sleep(Duration::from_millis(250)).await;
                    Ok::<_, NeonkitError>(n)
                })
                .await
            }));
        }

        let completed = futures::future::join_all(handles)
            .await
            .into_iter()
            .filter(|joined| {
                matches!(joined, Ok(Ok(outcome)) if outcome.is_completed())
            })
            .count();

        assert_eq!(completed, 1);
        assert_eq!(coordinator.in_flight_count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let coordinator = RequestCoordinator::new();

        coordinator.cancel("search");
        coordinator.cancel("search");
        coordinator.cancel_all();
        coordinator.cancel_all();

        assert_eq!(coordinator.in_flight_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all_clears_every_key() {
        let coordinator = Arc::new(RequestCoordinator::new());
        let mut handles = Vec::new();

        for key in ["search", "cart", "profile"] {
            let c = Arc::clone(&coordinator);
            handles.push(tokio::spawn(async move {
                c.request(key, |_token| async {
                    sleep(Duration::from_secs(3600)).await;
                    Ok::<_, NeonkitError>(key)
                })
                .await
            }));
        }

        sleep(Duration::from_millis(5)).await;
        assert_eq!(coordinator.in_flight_count(), 3);

        coordinator.cancel_all();
        coordinator.cancel_all();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), Outcome::Cancelled);
        }
        assert_eq!(coordinator.in_flight_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_distinct_keys_run_independently() {
        let coordinator = Arc::new(RequestCoordinator::new());

        let c = Arc::clone(&coordinator);
        let first = tokio::spawn(async move {
            c.request("search", |_token| async {
                sleep(Duration::from_millis(30)).await;
                Ok::<_, NeonkitError>("search-result")
            })
            .await
        });

        sleep(Duration::from_millis(5)).await;
        let second = coordinator
            .request("cart", |_token| async {
                sleep(Duration::from_millis(10)).await;
                Ok::<_, NeonkitError>("cart-result")
            })
            .await;

        assert_eq!(second.unwrap(), Outcome::Completed("cart-result"));
        assert_eq!(
            first.await.unwrap().unwrap(),
            Outcome::Completed("search-result")
        );
    }
}

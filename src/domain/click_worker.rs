//! Background worker that applies click counter increments.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;

/// Retries after the first failed increment.
const MAX_RETRIES: usize = 3;

/// Consumes click events until the channel closes.
///
/// Up to `concurrency` increments run at once. Each increment is retried
/// with exponential backoff; a click that still fails is logged and dropped,
/// since the redirect it belongs to has already been answered.
///
/// Returns once the channel is closed and every in-flight increment has
/// finished.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<dyn LinkRepository>,
    concurrency: usize,
) {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };
        let repository = repository.clone();

        tasks.spawn(async move {
            record_click(repository, event).await;
            drop(permit);
        });

        while tasks.try_join_next().is_some() {}
    }

    while tasks.join_next().await.is_some() {}

    info!("Click worker stopped");
}

async fn record_click(repository: Arc<dyn LinkRepository>, event: ClickEvent) {
    let strategy = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_secs(1))
        .map(jitter)
        .take(MAX_RETRIES);

    let result = Retry::spawn(strategy, || {
        let repository = repository.clone();
        let code = event.code.clone();
        async move { repository.increment_clicks(&code).await }
    })
    .await;

    match result {
        Ok(()) => debug!(code = %event.code, "Click recorded"),
        Err(e) => {
            metrics::counter!("clicks_failed_total").increment(1);
            error!(code = %event.code, "Failed to record click: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::error::AppError;
    use serde_json::json;

    #[tokio::test]
    async fn test_worker_increments_each_event() {
        let mut mock = MockLinkRepository::new();
        mock.expect_increment_clicks()
            .withf(|code| code == "abc1234")
            .times(3)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(10);
        for _ in 0..3 {
            tx.send(ClickEvent::new("abc1234")).await.unwrap();
        }
        drop(tx);

        run_click_worker(rx, Arc::new(mock), 2).await;
    }

    #[tokio::test]
    async fn test_worker_retries_failed_increment() {
        let mut mock = MockLinkRepository::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_increment_clicks()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::unavailable("down", json!({}))));
        mock.expect_increment_clicks()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(10);
        tx.send(ClickEvent::new("abc1234")).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(mock), 1).await;
    }

    #[tokio::test]
    async fn test_worker_gives_up_after_retries() {
        let mut mock = MockLinkRepository::new();
        mock.expect_increment_clicks()
            .times(MAX_RETRIES + 1)
            .returning(|_| Err(AppError::unavailable("down", json!({}))));

        let (tx, rx) = mpsc::channel(10);
        tx.send(ClickEvent::new("abc1234")).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(mock), 1).await;
    }
}

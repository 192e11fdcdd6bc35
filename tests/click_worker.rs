mod common;

use link_squeeze::domain::click_event::ClickEvent;
use link_squeeze::domain::click_worker::run_click_worker;
use link_squeeze::domain::repositories::LinkRepository;
use link_squeeze::infrastructure::persistence::InMemoryLinkRepository;
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::test]
async fn test_worker_counts_every_click() {
    let repo = Arc::new(InMemoryLinkRepository::new());
    common::create_test_link(&repo, "count01", "https://example.com").await;

    let (tx, rx) = mpsc::channel(64);
    let worker = tokio::spawn(run_click_worker(rx, repo.clone(), 4));

    for _ in 0..25 {
        tx.send(ClickEvent::new("count01")).await.unwrap();
    }
    drop(tx);

    worker.await.unwrap();

    let link = repo.find_by_code("count01").await.unwrap().unwrap();
    assert_eq!(link.clicks, 25);
}

#[tokio::test]
async fn test_redirects_are_counted_end_to_end() {
    let (state, mut rx, repo) = common::create_test_state();
    let server = common::create_test_server(state);

    common::create_test_link(&repo, "e2e0001", "https://example.com").await;

    for _ in 0..5 {
        let response = server.get("/e2e0001").await;
        assert_eq!(response.status_code(), 302);
    }

    let (tx, worker_rx) = mpsc::channel(16);
    while let Ok(event) = rx.try_recv() {
        tx.send(event).await.unwrap();
    }
    drop(tx);

    run_click_worker(worker_rx, repo.clone(), 2).await;

    let link = repo.find_by_code("e2e0001").await.unwrap().unwrap();
    assert_eq!(link.clicks, 5);
}

#![allow(dead_code)]

use axum_test::TestServer;
use link_squeeze::application::services::LinkService;
use link_squeeze::domain::click_event::ClickEvent;
use link_squeeze::domain::entities::NewLink;
use link_squeeze::domain::repositories::LinkRepository;
use link_squeeze::infrastructure::persistence::InMemoryLinkRepository;
use link_squeeze::routes::build_router;
use link_squeeze::state::AppState;
use link_squeeze::utils::code_generator::RandomCodeGenerator;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const BASE_URL: &str = "https://sq.example.com";

pub fn create_test_state() -> (
    AppState,
    mpsc::Receiver<ClickEvent>,
    Arc<InMemoryLinkRepository>,
) {
    let (tx, rx) = mpsc::channel(100);

    let repo = Arc::new(InMemoryLinkRepository::new());

    let link_service = Arc::new(LinkService::new(
        repo.clone(),
        Arc::new(RandomCodeGenerator::default()),
        tx.clone(),
        format!("{}/", BASE_URL),
    ));

    (AppState::new(link_service, tx), rx, repo)
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state)).unwrap()
}

pub async fn create_test_link(repo: &InMemoryLinkRepository, code: &str, url: &str) {
    let inserted = repo
        .insert_if_absent(NewLink {
            code: code.to_string(),
            target_url: url.to_string(),
        })
        .await
        .unwrap();
    assert!(inserted, "code {} already taken", code);
}

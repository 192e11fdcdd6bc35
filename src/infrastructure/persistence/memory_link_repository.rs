//! In-memory implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Process-local link storage.
///
/// `DashMap` shards lock per key, which gives insert-if-absent and counter
/// increments the same single-key atomicity the database provides. Data is
/// lost on restart.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: DashMap<String, Link>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert_if_absent(&self, new_link: NewLink) -> Result<bool, AppError> {
        match self.links.entry(new_link.code.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(new_link.into_link(Utc::now()));
                Ok(true)
            }
        }
    }

    async fn find_target_url(&self, code: &str) -> Result<Option<String>, AppError> {
        Ok(self.links.get(code).map(|link| link.target_url.clone()))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get(code).map(|link| link.clone()))
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), AppError> {
        if let Some(mut link) = self.links.get_mut(code) {
            link.clicks += 1;
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

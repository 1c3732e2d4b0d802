use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::sessions::domain::{Question, QuestionId, Rating, Role};
use crate::sessions::repository::{RepositoryError, SessionRecord, SessionRepository};
use crate::sessions::service::SessionService;
use crate::sessions::session::SessionId;
use crate::sessions::session_router;

pub(super) fn question(key: &str, idx: u32) -> Question {
    Question {
        id: QuestionId(key.to_string()),
        idx,
        text: key.replace('_', " "),
        icon: "✨".to_string(),
    }
}

pub(super) fn rating(key: &str, rater: Role, target: Role, value: u8) -> Rating {
    Rating {
        question_id: QuestionId(key.to_string()),
        rater,
        target,
        value,
    }
}

/// All four role-pair ratings for one question, in A→A, A→B, B→A, B→B order.
pub(super) fn full_grid(key: &str, values: (u8, u8, u8, u8)) -> Vec<Rating> {
    vec![
        rating(key, Role::A, Role::A, values.0),
        rating(key, Role::A, Role::B, values.1),
        rating(key, Role::B, Role::A, values.2),
        rating(key, Role::B, Role::B, values.3),
    ]
}

pub(super) fn build_service() -> (SessionService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = SessionService::new(repository.clone());
    (service, repository)
}

pub(super) fn session_router_with_service(
    service: SessionService<MemoryRepository>,
) -> axum::Router {
    session_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(record.session.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.session.id().clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.session.id().clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn open(&self, _limit: usize) -> Result<Vec<SessionRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _record: SessionRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn open(&self, _limit: usize) -> Result<Vec<SessionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

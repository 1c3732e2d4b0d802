use chrono::{DateTime, Utc};
use serde::Serialize;

use super::session::{Session, SessionId};

/// Repository record pairing the session aggregate with bookkeeping stamps.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub session: Session,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    /// Sanitized progress view exposed over the API.
    pub fn status_view(&self) -> SessionStatusView {
        SessionStatusView {
            session_id: self.session.id().clone(),
            status: self.session.status().label(),
            questions_total: self.session.questions().len(),
            questions_rated: self.session.questions_complete(),
            ratings_submitted: self.session.ratings_submitted(),
            complete: self.session.is_complete(),
            created_at: self.created_at,
            completed_at: self.completed_at,
        }
    }
}

/// Storage abstraction so the service layer can be exercised in isolation.
/// The production deployment keys a document store by session id; tests and
/// the bundled binary use an in-memory map.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError>;
    fn update(&self, record: SessionRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError>;
    fn open(&self, limit: usize) -> Result<Vec<SessionRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of a session's collection progress.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatusView {
    pub session_id: SessionId,
    pub status: &'static str,
    pub questions_total: usize,
    pub questions_rated: usize,
    pub ratings_submitted: usize,
    pub complete: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{Rating, SessionError, SessionStatus};
use super::pack::QuestionPack;
use super::report::views::SessionResultsView;
use super::report::DEFAULT_INSIGHT_LIMIT;
use super::repository::{RepositoryError, SessionRecord, SessionRepository};
use super::session::{Session, SessionId};

/// Service composing the repository with the scoring engine. All scoring
/// happens on a snapshot read from the repository; the engine itself never
/// touches storage.
pub struct SessionService<R> {
    repository: Arc<R>,
    pack: QuestionPack,
    insight_limit: usize,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("sess-{id:06}"))
}

impl<R> SessionService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_insight_limit(repository, DEFAULT_INSIGHT_LIMIT)
    }

    pub fn with_insight_limit(repository: Arc<R>, insight_limit: usize) -> Self {
        Self {
            repository,
            pack: QuestionPack::standard(),
            insight_limit: insight_limit.max(1),
        }
    }

    pub fn insight_limit(&self) -> usize {
        self.insight_limit
    }

    /// Create a fresh session populated from the standard question pack.
    pub fn create(&self) -> Result<SessionRecord, SessionServiceError> {
        let session = Session::new(next_session_id(), &self.pack);
        let record = SessionRecord {
            session,
            created_at: Utc::now(),
            completed_at: None,
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Apply one rating (last write wins) and detect the completion
    /// transition exactly once, stamping `completed_at` when it happens.
    pub fn submit_rating(
        &self,
        session_id: &SessionId,
        rating: Rating,
    ) -> Result<SessionRecord, SessionServiceError> {
        let mut record = self
            .repository
            .fetch(session_id)?
            .ok_or(RepositoryError::NotFound)?;

        let was_done = record.session.status() == SessionStatus::Done;
        record.session.submit_rating(rating)?;

        if record.session.status() == SessionStatus::Done && !was_done {
            record.completed_at = Some(Utc::now());
            info!(session = %record.session.id().0, "session finished collecting ratings");
        }

        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Fetch a session and its current collection progress.
    pub fn status(&self, session_id: &SessionId) -> Result<SessionRecord, SessionServiceError> {
        let record = self
            .repository
            .fetch(session_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Compute results on demand from the current snapshot. Unfinished
    /// sessions are allowed; the view carries `complete` so callers can
    /// gate display on it.
    pub fn results(
        &self,
        session_id: &SessionId,
    ) -> Result<SessionResultsView, SessionServiceError> {
        let record = self
            .repository
            .fetch(session_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(results_view(&record, self.insight_limit))
    }
}

/// Build the full results payload for a record. Shared between the session
/// service and the stateless report surfaces.
pub fn results_view(record: &SessionRecord, insight_limit: usize) -> SessionResultsView {
    let report = record.session.report();
    let insights = report.insights(insight_limit);

    SessionResultsView {
        session_id: record.session.id().clone(),
        status: record.session.status().label(),
        complete: record.session.is_complete(),
        match_percentage: insights.match_percentage,
        results: report.into_results(),
        insights,
    }
}

/// Error raised by the session service.
#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

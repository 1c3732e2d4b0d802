//! Sessions: two participants rating themselves and each other across a
//! question pack, plus everything derived from those ratings.
//!
//! The scoring engine in [`report`] is pure; the service layer reads a
//! consistent snapshot from the repository and passes plain values in.

pub mod domain;
pub mod import;
mod pack;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;
mod session;

#[cfg(test)]
mod tests;

pub use import::{RatingsCsvImporter, RatingsImportError};
pub use pack::{PackEntry, QuestionPack};
pub use report::{
    build_question_results, compute_match_percentage, top_differences, top_matches,
    MatchInsights, MatchLevel, QuestionResult, RatingGrid, SessionReport, SessionResultsView,
    DEFAULT_INSIGHT_LIMIT,
};
pub use repository::{RepositoryError, SessionRecord, SessionRepository, SessionStatusView};
pub use router::{session_router, RatingSubmission};
pub use service::{results_view, SessionService, SessionServiceError};
pub use session::{Session, SessionId};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::domain::{
    Question, QuestionId, Rating, Role, SessionError, SessionStatus, RATING_MAX, RATING_MIN,
};
use super::pack::QuestionPack;
use super::report::{build_question_results, SessionReport};

/// Identifier wrapper for sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RatingKey {
    question_id: QuestionId,
    rater: Role,
    target: Role,
}

/// Aggregate for one two-player run through a question pack. Ratings are
/// keyed by `(question, rater, target)`; resubmitting a triple overwrites
/// the previous value and no history is kept.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    questions: Vec<Question>,
    ratings: HashMap<RatingKey, u8>,
    status: SessionStatus,
}

impl Session {
    pub fn new(id: SessionId, pack: &QuestionPack) -> Self {
        Self {
            id,
            questions: pack.questions(),
            ratings: HashMap::new(),
            status: SessionStatus::Active,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Apply one rating. Values outside the scale and unknown question ids
    /// are rejected; everything else is last-write-wins. Flips the session
    /// to `Done` once all four role pairs exist for every question.
    pub fn submit_rating(&mut self, rating: Rating) -> Result<(), SessionError> {
        if !(RATING_MIN..=RATING_MAX).contains(&rating.value) {
            return Err(SessionError::ValueOutOfRange(rating.value));
        }
        if !self.questions.iter().any(|q| q.id == rating.question_id) {
            return Err(SessionError::QuestionNotFound(rating.question_id.0.clone()));
        }

        self.ratings.insert(
            RatingKey {
                question_id: rating.question_id,
                rater: rating.rater,
                target: rating.target,
            },
            rating.value,
        );

        if self.is_complete() {
            self.status = SessionStatus::Done;
        }

        Ok(())
    }

    pub fn ratings_submitted(&self) -> usize {
        self.ratings.len()
    }

    /// Materialize the current ratings in a deterministic order (question
    /// position, then rater, then target).
    pub fn ratings(&self) -> Vec<Rating> {
        let mut out: Vec<Rating> = self
            .ratings
            .iter()
            .map(|(key, value)| Rating {
                question_id: key.question_id.clone(),
                rater: key.rater,
                target: key.target,
                value: *value,
            })
            .collect();

        out.sort_by_key(|rating| {
            (
                self.question_position(&rating.question_id),
                rating.rater,
                rating.target,
            )
        });
        out
    }

    pub fn question_complete(&self, question_id: &QuestionId) -> bool {
        Role::ordered().into_iter().all(|rater| {
            Role::ordered().into_iter().all(|target| {
                self.ratings.contains_key(&RatingKey {
                    question_id: question_id.clone(),
                    rater,
                    target,
                })
            })
        })
    }

    pub fn questions_complete(&self) -> usize {
        self.questions
            .iter()
            .filter(|question| self.question_complete(&question.id))
            .count()
    }

    pub fn is_complete(&self) -> bool {
        !self.questions.is_empty()
            && self
                .questions
                .iter()
                .all(|question| self.question_complete(&question.id))
    }

    /// Snapshot the questions and ratings and run the scoring engine over
    /// them. The returned report is derived data; nothing is stored.
    pub fn report(&self) -> SessionReport {
        SessionReport::new(build_question_results(&self.questions, &self.ratings()))
    }

    fn question_position(&self, question_id: &QuestionId) -> usize {
        self.questions
            .iter()
            .position(|question| &question.id == question_id)
            .unwrap_or(usize::MAX)
    }
}

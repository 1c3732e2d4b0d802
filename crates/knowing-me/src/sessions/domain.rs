use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest value a participant can hand out on the rating scale.
pub const RATING_MIN: u8 = 1;
/// Highest value a participant can hand out on the rating scale.
pub const RATING_MAX: u8 = 10;

/// One of the two participants in a session. Serialized as `"A"` / `"B"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Role {
    A,
    B,
}

impl Role {
    pub const fn ordered() -> [Self; 2] {
        [Self::A, Self::B]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "Player A",
            Self::B => "Player B",
        }
    }

    pub const fn partner(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Identifier wrapper for questions within a session.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct QuestionId(pub String);

/// One trait or topic both participants rate. Immutable once the session has
/// been created from its pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub idx: u32,
    pub text: String,
    pub icon: String,
}

/// One participant's judgment of one target for one question. A session
/// keeps at most one value per `(question, rater, target)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub question_id: QuestionId,
    pub rater: Role,
    pub target: Role,
    pub value: u8,
}

/// Lifecycle of a session's rating collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Done,
}

impl SessionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Done => "Done",
        }
    }
}

#[derive(Debug)]
pub enum SessionError {
    QuestionNotFound(String),
    ValueOutOfRange(u8),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::QuestionNotFound(id) => {
                write!(f, "question with id {} is not part of this session", id)
            }
            SessionError::ValueOutOfRange(value) => {
                write!(
                    f,
                    "rating value {} is outside the {}-{} scale",
                    value, RATING_MIN, RATING_MAX
                )
            }
        }
    }
}

impl std::error::Error for SessionError {}

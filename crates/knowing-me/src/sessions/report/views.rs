use serde::Serialize;

use super::super::domain::Question;
use super::super::session::SessionId;

/// The four resolved values for one question. Sides nobody has rated yet
/// are already defaulted to 0 here, so a 0 can mean "unanswered" as well as
/// nothing else (the scale starts at 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingGrid {
    pub a_to_a: u8,
    pub a_to_b: u8,
    pub b_to_a: u8,
    pub b_to_b: u8,
}

impl RatingGrid {
    /// True when all four role pairs carry a real (1-10) rating.
    pub fn fully_rated(&self) -> bool {
        self.a_to_a > 0 && self.a_to_b > 0 && self.b_to_a > 0 && self.b_to_b > 0
    }
}

/// Derived result for one question: the grid, both perception gaps, and
/// their average. Recomputed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionResult {
    pub question: Question,
    pub ratings: RatingGrid,
    pub gap_a: u8,
    pub gap_b: u8,
    pub avg_gap: f32,
}

/// Presentation tier for the aggregate percentage, used by result pages and
/// share cards so copy never re-derives the banding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchLevel {
    InSync,
    Warm,
    MixedSignals,
    WorldsApart,
}

impl MatchLevel {
    pub const fn from_percentage(percentage: u8) -> Self {
        if percentage >= 80 {
            Self::InSync
        } else if percentage >= 60 {
            Self::Warm
        } else if percentage >= 40 {
            Self::MixedSignals
        } else {
            Self::WorldsApart
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::InSync => "In Sync",
            Self::Warm => "Warm",
            Self::MixedSignals => "Mixed Signals",
            Self::WorldsApart => "Worlds Apart",
        }
    }
}

/// Aggregate insight payload for one session's results.
#[derive(Debug, Clone, Serialize)]
pub struct MatchInsights {
    pub match_percentage: u8,
    pub match_level: MatchLevel,
    pub match_level_label: &'static str,
    pub questions_total: usize,
    pub questions_rated: usize,
    pub best_matches: Vec<QuestionResult>,
    pub biggest_differences: Vec<QuestionResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
}

/// Full results payload served to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResultsView {
    pub session_id: SessionId,
    pub status: &'static str,
    pub complete: bool,
    pub match_percentage: u8,
    pub results: Vec<QuestionResult>,
    pub insights: MatchInsights,
}

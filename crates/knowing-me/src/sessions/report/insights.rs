use super::scoring::compute_match_percentage;
use super::views::{MatchInsights, MatchLevel, QuestionResult};

/// Entries per ranked list when the caller does not ask for a count.
pub const DEFAULT_INSIGHT_LIMIT: usize = 3;

/// The `limit` questions the players agree on most, smallest `avg_gap`
/// first. The sort is stable, so questions sharing a gap keep their
/// original relative order. Short inputs are returned whole.
pub fn top_matches(results: &[QuestionResult], limit: usize) -> Vec<QuestionResult> {
    let mut ranked = results.to_vec();
    ranked.sort_by(|a, b| a.avg_gap.total_cmp(&b.avg_gap));
    ranked.truncate(limit);
    ranked
}

/// The `limit` questions the players diverge on most, largest `avg_gap`
/// first. Same tie-break and short-list rules as [`top_matches`].
pub fn top_differences(results: &[QuestionResult], limit: usize) -> Vec<QuestionResult> {
    let mut ranked = results.to_vec();
    ranked.sort_by(|a, b| b.avg_gap.total_cmp(&a.avg_gap));
    ranked.truncate(limit);
    ranked
}

pub(crate) fn generate_insights(results: &[QuestionResult], limit: usize) -> MatchInsights {
    let match_percentage = compute_match_percentage(results);
    let match_level = MatchLevel::from_percentage(match_percentage);
    let questions_total = results.len();
    let questions_rated = results
        .iter()
        .filter(|result| result.ratings.fully_rated())
        .count();

    let best_matches = top_matches(results, limit);
    let biggest_differences = top_differences(results, limit);

    let mut observations = Vec::new();
    if questions_total == 0 {
        observations.push("No questions in this session yet".to_string());
    } else {
        let aligned = results
            .iter()
            .filter(|result| result.avg_gap == 0.0 && result.ratings.fully_rated())
            .count();
        if aligned > 0 {
            observations.push(format!(
                "You see each other the same way on {aligned} of {questions_total} questions"
            ));
        }

        if let Some(widest) = biggest_differences.first() {
            if widest.avg_gap > 0.0 {
                observations.push(format!(
                    "Largest perception gap: {} ({:.1} points apart on average)",
                    widest.question.text, widest.avg_gap
                ));
            }
        }

        let unanswered = questions_total - questions_rated;
        if unanswered > 0 {
            observations.push(format!(
                "{unanswered} question(s) still have unanswered sides; missing answers count as 0 and widen the gaps"
            ));
        }
    }

    MatchInsights {
        match_percentage,
        match_level,
        match_level_label: match_level.label(),
        questions_total,
        questions_rated,
        best_matches,
        biggest_differences,
        observations,
    }
}

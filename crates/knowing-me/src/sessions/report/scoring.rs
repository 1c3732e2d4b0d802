use super::super::domain::{Question, Rating, Role};
use super::views::{QuestionResult, RatingGrid};

/// Resolve the four role-pair ratings for every question, in the questions'
/// given order, and derive the perception gaps.
///
/// A missing rating resolves to 0, which makes "unanswered" and "rated the
/// lowest possible value" indistinguishable in the gaps; the insight layer
/// surfaces this to users instead of hiding it. Ratings that reference
/// question ids outside `questions` are ignored. The function is total:
/// any input combination produces one result per question.
pub fn build_question_results(questions: &[Question], ratings: &[Rating]) -> Vec<QuestionResult> {
    questions
        .iter()
        .map(|question| {
            let resolve = |rater: Role, target: Role| {
                ratings
                    .iter()
                    .find(|rating| {
                        rating.question_id == question.id
                            && rating.rater == rater
                            && rating.target == target
                    })
                    .map(|rating| rating.value)
                    .unwrap_or(0)
            };

            let grid = RatingGrid {
                a_to_a: resolve(Role::A, Role::A),
                a_to_b: resolve(Role::A, Role::B),
                b_to_a: resolve(Role::B, Role::A),
                b_to_b: resolve(Role::B, Role::B),
            };

            let gap_a = grid.a_to_a.abs_diff(grid.b_to_a);
            let gap_b = grid.b_to_b.abs_diff(grid.a_to_b);

            QuestionResult {
                question: question.clone(),
                ratings: grid,
                gap_a,
                gap_b,
                avg_gap: f32::from(gap_a + gap_b) / 2.0,
            }
        })
        .collect()
}

/// Collapse per-question gaps into a single 0-100 alignment score.
///
/// An empty result set scores 0. Otherwise the mean of all `avg_gap`
/// values maps linearly onto the percentage: mean gap 0 scores 100, mean
/// gap 10 scores 0. Rounds with `f32::round` (half away from zero) and
/// clamps into `0..=100`.
pub fn compute_match_percentage(results: &[QuestionResult]) -> u8 {
    if results.is_empty() {
        return 0;
    }

    let mean_gap =
        results.iter().map(|result| result.avg_gap).sum::<f32>() / results.len() as f32;
    (100.0 - mean_gap * 10.0).round().clamp(0.0, 100.0) as u8
}

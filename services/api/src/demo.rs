use crate::infra::InMemorySessionRepository;
use clap::Args;
use knowing_me::error::AppError;
use knowing_me::sessions::domain::{Rating, Role};
use knowing_me::sessions::{
    QuestionPack, RatingsCsvImporter, Session, SessionId, SessionService, DEFAULT_INSIGHT_LIMIT,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct MatchReportArgs {
    /// Ratings CSV export to score (Question,Rater,Target,Value)
    #[arg(long)]
    pub(crate) ratings_csv: Option<PathBuf>,
    /// Entries per ranked list in the output
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Include the full per-question breakdown
    #[arg(long)]
    pub(crate) list_questions: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Entries per ranked list in the demo output
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Skip the per-question breakdown at the end of the demo
    #[arg(long)]
    pub(crate) skip_breakdown: bool,
}

pub(crate) fn run_match_report(args: MatchReportArgs) -> Result<(), AppError> {
    let MatchReportArgs {
        ratings_csv,
        top,
        list_questions,
    } = args;

    let pack = QuestionPack::standard();
    let (session, data_source) = match ratings_csv {
        Some(path) => (
            RatingsCsvImporter::from_path(path, &pack)?,
            "ratings CSV export",
        ),
        None => (
            Session::new(SessionId("local".to_string()), &pack),
            "empty session (no ratings provided)",
        ),
    };

    let limit = top.unwrap_or(DEFAULT_INSIGHT_LIMIT).max(1);
    render_match_report(&session, limit, data_source, list_questions);
    Ok(())
}

/// Ratings both players submit during the scripted demo, one
/// (A->A, A->B, B->A, B->B) row per standard pack question.
const DEMO_SCRIPT: [(u8, u8, u8, u8); 10] = [
    (8, 7, 8, 7),
    (6, 9, 4, 8),
    (9, 6, 9, 7),
    (7, 8, 5, 8),
    (10, 4, 3, 6),
    (5, 7, 6, 7),
    (8, 8, 9, 9),
    (4, 6, 7, 5),
    (9, 3, 2, 8),
    (7, 7, 7, 7),
];

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { top, skip_breakdown } = args;
    let limit = top.unwrap_or(DEFAULT_INSIGHT_LIMIT).max(1);

    println!("Knowing You, Knowing Me demo");

    let repository = Arc::new(InMemorySessionRepository::default());
    let service = SessionService::with_insight_limit(repository, limit);

    let record = match service.create() {
        Ok(record) => record,
        Err(err) => {
            println!("  Could not create a session: {}", err);
            return Ok(());
        }
    };
    let session_id = record.session.id().clone();
    let questions: Vec<_> = record.session.questions().to_vec();
    println!(
        "- Created session {} with {} questions",
        session_id.0,
        questions.len()
    );

    // Player A rates both participants first, then player B follows.
    for (question, values) in questions.iter().zip(DEMO_SCRIPT) {
        submit(&service, &session_id, question.id.0.as_str(), Role::A, Role::A, values.0);
        submit(&service, &session_id, question.id.0.as_str(), Role::A, Role::B, values.1);
    }

    match service.status(&session_id) {
        Ok(record) => {
            let view = record.status_view();
            println!(
                "- Player A finished: {} ratings in, status {}",
                view.ratings_submitted, view.status
            );
        }
        Err(err) => println!("  Status unavailable: {}", err),
    }

    for (question, values) in questions.iter().zip(DEMO_SCRIPT) {
        submit(&service, &session_id, question.id.0.as_str(), Role::B, Role::A, values.2);
        submit(&service, &session_id, question.id.0.as_str(), Role::B, Role::B, values.3);
    }

    let record = match service.status(&session_id) {
        Ok(record) => record,
        Err(err) => {
            println!("  Status unavailable: {}", err);
            return Ok(());
        }
    };

    let status_view = record.status_view();
    match serde_json::to_string_pretty(&status_view) {
        Ok(json) => println!("\nPublic status payload:\n{}", json),
        Err(err) => println!("  Public status payload unavailable: {}", err),
    }

    render_match_report(
        &record.session,
        limit,
        "scripted demo ratings",
        !skip_breakdown,
    );
    Ok(())
}

fn submit(
    service: &SessionService<InMemorySessionRepository>,
    session_id: &SessionId,
    question_key: &str,
    rater: Role,
    target: Role,
    value: u8,
) {
    let rating = Rating {
        question_id: knowing_me::sessions::domain::QuestionId(question_key.to_string()),
        rater,
        target,
        value,
    };
    if let Err(err) = service.submit_rating(session_id, rating) {
        println!("  Rating rejected ({question_key}): {err}");
    }
}

pub(crate) fn render_match_report(
    session: &Session,
    limit: usize,
    data_source: &str,
    list_questions: bool,
) {
    let report = session.report();
    let insights = report.insights(limit);

    println!("\nPerception match report");
    println!("Data source: {}", data_source);
    println!("Session status: {}", session.status().label());
    println!(
        "Match: {}% ({})",
        insights.match_percentage, insights.match_level_label
    );
    println!(
        "Questions fully rated: {}/{}",
        insights.questions_rated, insights.questions_total
    );

    if !insights.best_matches.is_empty() {
        println!("\nBest matches");
        for result in &insights.best_matches {
            println!(
                "- {} {} (avg gap {:.1})",
                result.question.icon, result.question.text, result.avg_gap
            );
        }
    }

    if !insights.biggest_differences.is_empty() {
        println!("\nBiggest differences");
        for result in &insights.biggest_differences {
            println!(
                "- {} {} (avg gap {:.1})",
                result.question.icon, result.question.text, result.avg_gap
            );
        }
    }

    if !insights.observations.is_empty() {
        println!("\nObservations");
        for note in &insights.observations {
            println!("- {}", note);
        }
    }

    if list_questions {
        println!("\nPer-question breakdown");
        for result in report.results() {
            let grid = result.ratings;
            println!(
                "- {} | A->A {} A->B {} B->A {} B->B {} | gaps {}/{} avg {:.1}",
                result.question.text,
                grid.a_to_a,
                grid.a_to_b,
                grid.b_to_a,
                grid.b_to_b,
                result.gap_a,
                result.gap_b,
                result.avg_gap
            );
        }
    }
}

use knowing_me::sessions::{
    domain::{QuestionId, Rating, Role, SessionStatus},
    QuestionPack, Session, SessionId, DEFAULT_INSIGHT_LIMIT,
};

fn rating(key: &str, rater: Role, target: Role, value: u8) -> Rating {
    Rating {
        question_id: QuestionId(key.to_string()),
        rater,
        target,
        value,
    }
}

fn grid(key: &str, values: (u8, u8, u8, u8)) -> Vec<Rating> {
    vec![
        rating(key, Role::A, Role::A, values.0),
        rating(key, Role::A, Role::B, values.1),
        rating(key, Role::B, Role::A, values.2),
        rating(key, Role::B, Role::B, values.3),
    ]
}

fn fresh_session() -> Session {
    Session::new(SessionId("sess-test".to_string()), &QuestionPack::standard())
}

#[test]
fn standard_pack_materializes_ordered_unique_questions() {
    let pack = QuestionPack::standard();
    let questions = pack.questions();

    assert_eq!(questions.len(), 10);
    for (idx, question) in questions.iter().enumerate() {
        assert_eq!(question.idx, idx as u32);
        assert!(!question.text.is_empty());
        assert!(!question.icon.is_empty());
    }

    let mut keys: Vec<&str> = questions.iter().map(|q| q.id.0.as_str()).collect();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), questions.len(), "question ids must be unique");
}

#[test]
fn resubmitting_a_triple_overwrites_without_history() {
    let mut session = fresh_session();

    session
        .submit_rating(rating("patience", Role::B, Role::A, 2))
        .expect("first write accepted");
    session
        .submit_rating(rating("patience", Role::B, Role::A, 8))
        .expect("overwrite accepted");

    let ratings = session.ratings();
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0].value, 8);
}

#[test]
fn session_rejects_invalid_submissions() {
    let mut session = fresh_session();

    assert!(session
        .submit_rating(rating("patience", Role::A, Role::B, 0))
        .is_err());
    assert!(session
        .submit_rating(rating("patience", Role::A, Role::B, 11))
        .is_err());
    assert!(session
        .submit_rating(rating("telepathy", Role::A, Role::B, 5))
        .is_err());
    assert_eq!(session.ratings_submitted(), 0);
}

#[test]
fn session_completes_exactly_when_every_grid_is_full() {
    let mut session = fresh_session();
    let keys: Vec<String> = session
        .questions()
        .iter()
        .map(|question| question.id.0.clone())
        .collect();

    for key in &keys[..keys.len() - 1] {
        for submission in grid(key, (6, 6, 6, 6)) {
            session.submit_rating(submission).expect("rating accepted");
        }
    }
    assert_eq!(session.status(), SessionStatus::Active);
    assert_eq!(session.questions_complete(), keys.len() - 1);

    let last = keys.last().expect("pack is not empty");
    for submission in grid(last, (6, 6, 6, 6)) {
        session.submit_rating(submission).expect("rating accepted");
    }
    assert_eq!(session.status(), SessionStatus::Done);
    assert!(session.is_complete());
}

#[test]
fn report_reflects_the_current_snapshot() {
    let mut session = fresh_session();

    for submission in grid("sense_of_humor", (8, 7, 8, 7)) {
        session.submit_rating(submission).expect("rating accepted");
    }
    for submission in grid("patience", (10, 5, 1, 5)) {
        session.submit_rating(submission).expect("rating accepted");
    }

    let report = session.report();
    let results = report.results();
    assert_eq!(results.len(), 10);

    let humor = &results[0];
    assert_eq!(humor.question.id.0, "sense_of_humor");
    assert_eq!(humor.avg_gap, 0.0);

    let patience = &results[1];
    assert_eq!(patience.gap_a, 9);
    assert_eq!(patience.gap_b, 0);
    assert_eq!(patience.avg_gap, 4.5);

    // Eight untouched questions contribute gap 0, so the mean gap is
    // 4.5 / 10 and the percentage rounds to 96.
    assert_eq!(report.match_percentage(), 96);
}

#[test]
fn report_is_deterministic_across_invocations() {
    let mut session = fresh_session();
    for submission in grid("honesty", (9, 2, 4, 7)) {
        session.submit_rating(submission).expect("rating accepted");
    }

    let first = session.report();
    let second = session.report();
    assert_eq!(first.results(), second.results());
    assert_eq!(first.match_percentage(), second.match_percentage());
}

#[test]
fn insights_rank_best_and_widest_questions() {
    let mut session = fresh_session();
    let keys: Vec<String> = session
        .questions()
        .iter()
        .map(|question| question.id.0.clone())
        .collect();

    // Give every question a full grid with a gap that grows with its
    // position, so the ranked lists are predictable.
    for (position, key) in keys.iter().enumerate() {
        let partner_view = 10 - position as u8;
        for submission in grid(key, (10, partner_view, partner_view, 10)) {
            session.submit_rating(submission).expect("rating accepted");
        }
    }

    let insights = session.report().insights(DEFAULT_INSIGHT_LIMIT);
    assert_eq!(insights.questions_total, 10);
    assert_eq!(insights.questions_rated, 10);
    assert_eq!(insights.best_matches.len(), DEFAULT_INSIGHT_LIMIT);
    assert_eq!(insights.biggest_differences.len(), DEFAULT_INSIGHT_LIMIT);

    assert_eq!(insights.best_matches[0].question.id.0, keys[0]);
    assert_eq!(insights.biggest_differences[0].question.id.0, keys[9]);
    assert!(
        insights.best_matches[0].avg_gap <= insights.best_matches[1].avg_gap,
        "best matches ascend by gap"
    );
    assert!(
        insights.biggest_differences[0].avg_gap >= insights.biggest_differences[1].avg_gap,
        "differences descend by gap"
    );
}

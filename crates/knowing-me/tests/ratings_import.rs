use std::io::Cursor;

use knowing_me::sessions::{
    domain::SessionStatus, QuestionPack, RatingsCsvImporter, DEFAULT_INSIGHT_LIMIT,
};

/// Build a full export covering every pack question with aligned ratings,
/// except for one deliberately divergent row set.
fn full_export() -> String {
    let pack = QuestionPack::standard();
    let mut csv = String::from("Question,Rater,Target,Value\n");
    for question in pack.questions() {
        let (a_to_a, a_to_b, b_to_a, b_to_b) = if question.id.0 == "cooking" {
            (10, 5, 1, 5)
        } else {
            (7, 6, 7, 6)
        };
        csv.push_str(&format!("{},A,A,{}\n", question.id.0, a_to_a));
        csv.push_str(&format!("{},A,B,{}\n", question.id.0, a_to_b));
        csv.push_str(&format!("{},B,A,{}\n", question.id.0, b_to_a));
        csv.push_str(&format!("{},B,B,{}\n", question.id.0, b_to_b));
    }
    csv
}

#[test]
fn full_export_hydrates_a_finished_session() {
    let pack = QuestionPack::standard();
    let session = RatingsCsvImporter::from_reader(Cursor::new(full_export()), &pack)
        .expect("import succeeds");

    assert_eq!(session.status(), SessionStatus::Done);
    assert_eq!(session.ratings_submitted(), 40);

    let report = session.report();
    // Nine aligned questions at gap 0 plus one at avg gap 4.5 gives a mean
    // of 0.45 and a percentage of 96.
    assert_eq!(report.match_percentage(), 96);

    let insights = report.insights(DEFAULT_INSIGHT_LIMIT);
    assert_eq!(insights.questions_rated, 10);
    assert_eq!(insights.biggest_differences[0].question.id.0, "cooking");
}

#[test]
fn partial_export_leaves_the_session_active() {
    let pack = QuestionPack::standard();
    let csv = "Question,Rater,Target,Value\n\
Sense of humor,A,A,8\n\
Sense of humor,B,A,8\n";

    let session =
        RatingsCsvImporter::from_reader(Cursor::new(csv), &pack).expect("import succeeds");

    assert_eq!(session.status(), SessionStatus::Active);
    assert_eq!(session.ratings_submitted(), 2);
    assert_eq!(session.questions_complete(), 0);

    let insights = session.report().insights(DEFAULT_INSIGHT_LIMIT);
    assert!(insights
        .observations
        .iter()
        .any(|note| note.contains("unanswered")));
}

#[test]
fn mixed_case_and_unknown_rows_follow_the_lenient_rules() {
    let pack = QuestionPack::standard();
    let csv = "Question,Rater,Target,Value\n\
SENSE_OF_HUMOR,a,a,9\n\
Mind reading,A,B,4\n\
Patience,player b,player a,6\n";

    let session =
        RatingsCsvImporter::from_reader(Cursor::new(csv), &pack).expect("import succeeds");

    assert_eq!(session.ratings_submitted(), 2);
}
